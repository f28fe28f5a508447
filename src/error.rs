use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("key not found")]
    NotFound,
    #[error("forest has not been indexed: call index_data() before query_iter()")]
    NotIndexed,
}

pub type Result<T> = std::result::Result<T, Error>;
