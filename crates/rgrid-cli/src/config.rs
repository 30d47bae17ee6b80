//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rgrid_core::View;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// chrono `strftime` pattern for date labels.
    pub day_format: String,

    /// Right-to-left layout.
    pub rtl: bool,

    /// Scrollbar thickness reserved when the content area overflows.
    pub scrollbar_size: u32,

    /// Fixed width of the time gutter cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gutter_width: Option<u32>,

    /// View that date labels drill down into; unset disables drilldown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drilldown_view: Option<View>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            day_format: "%d %a".to_string(),
            rtl: false,
            scrollbar_size: 17,
            gutter_width: None,
            drilldown_view: Some(View::Day),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RGRID_*)
        figment = figment.merge(Env::prefixed("RGRID_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for rgrid.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rgrid"))
}
