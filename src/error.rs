use thiserror::Error;

use crate::core::SeriesId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid range: start={start} is greater than end={end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("degenerate plot extent: width={width}")]
    DegenerateExtent { width: f64 },

    #[error("unknown series: {0}")]
    UnknownSeries(SeriesId),

    #[error("series already registered: {0}")]
    DuplicateSeries(SeriesId),

    #[error("loader failed for series {series}: {message}")]
    Loader { series: SeriesId, message: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
