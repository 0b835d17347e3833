//! Processing pipeline configuration.

use serde::{Deserialize, Serialize};

/// Module-processing pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Whether the runtime registers its built-in processors at startup.
    #[serde(default = "default_true")]
    pub builtin_processors: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            builtin_processors: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
