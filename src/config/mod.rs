//! Configuration module.
//!
//! Handles deployment settings loaded from TOML and environment variables.
//! Per-request curator configs are JSON and live with their curators
//! (see [`crate::curator::CuratorConfig`]).

mod settings;

pub use settings::{
    expand_env_vars, DrilldownSettings, LoggingSettings, RegistrySettings, Settings, SettingsError,
};
