use thiserror::Error;

use crate::core::TimeUnit;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid axis geometry: length={length}")]
    InvalidAxisGeometry { length: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown realtime axis `{0}`")]
    UnknownAxis(String),

    /// Tick generation would enumerate more increments than the safety bound allows.
    #[error("{min} and {max} are too far apart with step size of {step} {unit}")]
    TickRangeTooLarge {
        min: f64,
        max: f64,
        step: u32,
        unit: TimeUnit,
    },
}
