//! Platform handler configuration.

use serde::{Deserialize, Serialize};

/// Platform handler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Candidate external programs the fallback handler probes in order
    /// when opening a URL. `xdg-open` defers to the user's preferred
    /// browser, so it is tried first.
    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            browsers: default_browsers(),
        }
    }
}

fn default_browsers() -> Vec<String> {
    [
        "xdg-open",
        "netscape",
        "firefox",
        "konqueror",
        "mozilla",
        "opera",
        "epiphany",
        "lynx",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
