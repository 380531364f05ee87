//! Observer hooks for host-side extensions.
//!
//! Plugins see engine events and a read-only context; they never mutate
//! engine state directly.

pub mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
