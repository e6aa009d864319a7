extern crate env_logger;
extern crate html_strip;

pub mod options;

use clap::Parser;
use html_strip::{Configuration, Error, Pipeline};
use options::Cli;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if cli.verbose {
        use env_logger::Env;
        let env = Env::default()
            .filter_or("RUST_LOG", "info")
            .write_style_or("RUST_LOG_STYLE", "always");

        env_logger::init_from_env(env);
    } else {
        env_logger::init();
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Read the file, run the pipeline and write the result to stdout.
fn run(cli: &Cli) -> html_strip::Result<()> {
    let path = match cli.files.as_slice() {
        [path] => path,
        _ => return Err(Error::Usage),
    };

    let mut config = Configuration::new();

    config
        .with_namespace(&cli.hidden)
        .with_strip_list(&cli.strip)
        .with_ignore_tags(&cli.ignore_tags)?;

    let pipeline = Pipeline::new(&config)?;

    let input = std::fs::read(path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;

    log::info!("processing {} ({} bytes)", path.display(), input.len());

    let output = pipeline.run(&input)?;

    let mut stdout = std::io::stdout().lock();

    stdout
        .write_all(&output)
        .and_then(|_| stdout.flush())
        .map_err(|source| Error::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })
}
