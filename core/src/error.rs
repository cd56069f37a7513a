use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The video dataset could not be turned into a corpus.
    #[error("data could not be loaded from {path}: {reason}")]
    DataLoad { path: String, reason: String },
    /// Reading or writing a CSV file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn data_load(path: impl Into<String>, reason: impl ToString) -> Self {
        Error::DataLoad { path: path.into(), reason: reason.to_string() }
    }

    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
