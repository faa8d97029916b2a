use crate::dashboard::error::EvaluationError;
use crate::export::error::ExportError;
use crate::series::error::FrameError;
use crate::sources::error::SourceError;
use crate::types::error::SampleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherAnalyticsError {
    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("Could not parse the given date or time")]
    DateParsingError,
}
