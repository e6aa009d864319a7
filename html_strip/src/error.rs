use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a strip run can fail. None of these are recovered from: the run
/// aborts and no output is produced.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong number of input files.
    #[error("please specify exactly one file to operate on")]
    Usage,
    /// The input could not be read.
    #[error("{}: {source}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The protected document could not be handed to the HTML parser.
    #[error("could not parse document: {0}")]
    Parse(String),
    /// The tree could not be written back to text.
    #[error("could not serialize document: {0}")]
    Serialize(#[source] std::io::Error),
    /// A placeholder payload was not valid base64.
    #[error("could not decode hidden tag '{token}': {source}")]
    Decode {
        /// The placeholder as found in the serialized document.
        token: String,
        /// The base64 failure.
        #[source]
        source: base64::DecodeError,
    },
    /// A span or placeholder pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Invalid options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The ignore tag list has an odd number of entries.
    #[error("ignore tags must be in pairs")]
    UnpairedTags,
    /// A start or end marker is empty after trimming.
    #[error("invalid tags '{start},{end}'")]
    EmptyTag {
        /// Start marker as given.
        start: String,
        /// End marker as given.
        end: String,
    },
    /// The placeholder namespace could break out of its comment.
    #[error("invalid hidden comment name '{0}': it must be non-empty without '>', '--' or control characters")]
    InvalidNamespace(String),
    /// A strip selector did not parse.
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The selector as given.
        selector: String,
        /// Parser message.
        reason: String,
    },
}
