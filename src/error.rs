use std::path::PathBuf;
use thiserror::Error;

/// Errors at the edges of the crate.
///
/// Tokenizing itself never fails; malformed content is flushed as best-effort
/// tokens instead. These cover configuration and file handling.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown content type `{0}` (expected `html` or `css`)")]
    UnknownContentType(String),

    #[error("cannot tokenize {}: unsupported file extension", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("--type is required when reading from stdin")]
    MissingContentType,

    #[error("no supported files found in {}", .0.display())]
    NoInput(PathBuf),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
