use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Cannot evaluate an empty series")]
    EmptySeries,
}
