//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `VXLAN_<SECTION>__<KEY>`, e.g. `VXLAN_FABRIC__PATH`
//! 3. The file passed with `--config` (must exist)
//! 4. `./vxlan.toml`, then the platform config file (both optional)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name written by `vxlan init --local` and picked up from the working
/// directory.
pub const LOCAL_CONFIG_FILE: &str = "vxlan.toml";

const ENV_PREFIX: &str = "VXLAN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the fabric model lives.
    pub fabric: FabricConfig,
    /// Template directory.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `*.tmpl` files; built-ins fill the gaps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory per-device `.cfg` files are written to.
    pub dir: PathBuf,
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("vxlan-out"),
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// JSON log file, written alongside stderr output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Dotted keys understood by [`AppConfig::get`].
    pub const KEYS: [&'static str; 6] = [
        "fabric.path",
        "templates.dir",
        "output.dir",
        "output.no_color",
        "output.format",
        "logging.file",
    ];

    /// Load configuration from files and the environment on top of defaults.
    ///
    /// `config_file` is the path given with `--config`; it must exist. Without
    /// it the platform config file and `./vxlan.toml` are read when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                builder = builder
                    .add_source(File::from(Self::config_path()).required(false))
                    .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `./vxlan.toml`.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "vxlan", "vxlan")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Look up a value by its dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        let value = match key {
            "fabric.path" => path(&self.fabric.path),
            "templates.dir" => path(&self.templates.dir),
            "output.dir" => self.output.dir.display().to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            "logging.file" => path(&self.logging.file),
            _ => return None,
        };
        Some(value)
    }
}
