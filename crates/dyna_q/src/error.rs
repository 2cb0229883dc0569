//! Error types for the Dyna-Q learner.

/// A specialized `Result` type for learner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error enum for all operations within the `dyna_q` crate.
#[derive(Debug)]
pub enum Error {
    /// Invalid learner parameters, rejected at construction.
    Config(String),
    /// The learned environment model has no entry for a requested pair.
    Model(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(s) => write!(f, "Configuration error: {}", s),
            Error::Model(s) => write!(f, "Model error: {}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
