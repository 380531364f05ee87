//! timechart-core: non-visual engine for zoomable multi-series time charts.
//!
//! The crate owns the math behind interactive charts whose series share one
//! time axis but keep independent value axes: prioritized domains, visible
//! window clamping, zoom transform synchronization, windowed data loading and
//! polyline simplification. Drawing is left to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, RenderSnapshot};
pub use error::{ChartError, ChartResult};
