use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Construction-time failure: the chart cannot be built from these inputs.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid frame: x={x}, y={y}, width={width}, height={height}")]
    InvalidFrame { x: f64, y: f64, width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
