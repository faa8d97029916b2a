use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SampleError {
    #[error("Unrecognized timestamp '{0}'")]
    InvalidTimestamp(String),
}
