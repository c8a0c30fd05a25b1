use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Length of predictions and targets do not match: ({predictions}), ({targets})")]
    InvalidInput { predictions: usize, targets: usize },
    #[error("Metric is not computable: {0}")]
    NotComputable(String),
    #[error("Metric is configured for distributed sync but has not been synchronized since the last update")]
    NotSynchronized,
    #[error("Request for offset {offset} failed with HTTP status {status}")]
    Fetch { offset: u64, status: u16 },
    #[error("Request for offset {offset} could not be sent: {reason}")]
    Request { offset: u64, reason: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parser error: {0}")]
    ParserError(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::ParserError(error.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::ParserError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
