//! Runtime configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod pipeline;
pub mod platform;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::pipeline::PipelineConfig;
use self::platform::PlatformConfig;

use crate::error::RuntimeError;
use crate::result::RuntimeResult;

/// Root runtime configuration.
///
/// This struct is the top-level deserialization target for the TOML
/// configuration file, with `MANIFOLD_*` environment variables layered on
/// top. Every section has full defaults, so a missing file yields a working
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Processing pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Platform handler settings.
    #[serde(default)]
    pub platform: PlatformConfig,
}

impl RuntimeConfig {
    /// Loads configuration from the given TOML file, then overlays
    /// `MANIFOLD_*` environment variables (`MANIFOLD_LOGGING__LEVEL=debug`).
    pub fn load(path: &str) -> RuntimeResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("MANIFOLD").separator("__"))
            .build()
            .map_err(|e| RuntimeError::configuration(format!("Config build error: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| RuntimeError::configuration(format!("Config parse error: {e}")))
    }
}
