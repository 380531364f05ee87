//! Engine facade composing domains, zoom sync, loading and simplification.

mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;
mod render_snapshot;
mod series_controller;
mod time_scale_controller;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use json_contract::{
    ENGINE_CONFIG_JSON_SCHEMA_V1, EngineConfigJsonContractV1, RENDER_SNAPSHOT_JSON_SCHEMA_V1,
    RenderSnapshotJsonContractV1,
};
pub use render_snapshot::{RenderSnapshot, SeriesRenderData};

pub use crate::extensions::PluginEvent;
