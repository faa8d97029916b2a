use crate::types::metric::Metric;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    #[error("Refusing to export non-finite {metric} value {value} for sample at '{timestamp}'")]
    NonFiniteValue {
        metric: Metric,
        timestamp: String,
        value: f64,
    },
}
