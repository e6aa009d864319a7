use clap::{ArgAction, Parser};
use html_strip::configuration::{DEFAULT_IGNORE_TAGS, DEFAULT_NAMESPACE, DEFAULT_STRIP_SELECTORS};
use std::path::PathBuf;

/// program to strip elements from an html file while keeping template tags intact.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// The html file to operate on.
    pub files: Vec<PathBuf>,
    /// Hidden comment name used for the placeholders, without ">", "--" or control characters.
    #[clap(short = 'h', long, default_value = DEFAULT_NAMESPACE)]
    pub hidden: String,
    /// Comma seperated css selectors of the elements to strip.
    #[clap(short, long, default_value = DEFAULT_STRIP_SELECTORS)]
    pub strip: String,
    /// Comma seperated start and end tag pairs to leave untouched ex: "{%,%},{{,}}".
    #[clap(short, long, default_value = DEFAULT_IGNORE_TAGS)]
    pub ignore_tags: String,
    /// Log the pipeline stages on standard error
    #[clap(short, long)]
    pub verbose: bool,
    /// Print help
    #[clap(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}
