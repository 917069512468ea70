use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Vendor metadata object that points at the current apartment dataset.
pub const DEFAULT_METADATA_URL: &str =
    "https://www.googleapis.com/storage/v1/b/fiber/o/property-manager%2FAustin1.json";

/// Output file written when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT: &str = "atx_fiber_apts.json";

/// Global configuration loaded from `~/.config/fiberfinder/config.toml`.
///
/// Every field has a default, so a partial file is valid. CLI flags take
/// precedence over these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiberConfig {
    /// Metadata URL used when `--url` is not given.
    pub metadata_url: String,
    /// Output path used when `-o/--output` is not given.
    pub output: PathBuf,
    /// Seconds allowed for establishing each HTTP connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for each whole HTTP transfer. 0 means no limit.
    pub timeout_secs: u64,
    /// Overrides the `fiberfinder/<version>` user agent.
    pub user_agent: Option<String>,
}

impl Default for FiberConfig {
    fn default() -> Self {
        Self {
            metadata_url: DEFAULT_METADATA_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            connect_timeout_secs: 15,
            timeout_secs: 0,
            user_agent: None,
        }
    }
}

impl FiberConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("fiberfinder/{}", env!("CARGO_PKG_VERSION")))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fiberfinder")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FiberConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FiberConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<FiberConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FiberConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
