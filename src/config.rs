use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::patch::PatchOptions;

/// Defaults for the command line tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Encoding label used when `--encoding` is not given
    pub encoding: String,
    /// Log filter used when RUST_LOG is not set
    pub log_filter: Option<String>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            log_filter: None,
        }
    }
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl PatchConfig {
    pub fn load(path: &Path) -> PatchResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let content = std::fs::read_to_string(path).map_err(|e| {
            PatchError::config(format!("cannot read {}: {}", path.display(), e))
        })?;

        match ext {
            "json" => Ok(serde_json::from_str(&content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            "toml" => Ok(toml::from_str(&content)?),
            _ => Err(PatchError::config(format!(
                "Unsupported config format: {}",
                ext
            ))),
        }
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linepatch")
            .join("config.toml")
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else built-in defaults
    pub fn discover(path: Option<&Path>) -> PatchResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Self::default_config_path();
        if default_path.is_file() {
            debug!("Loading config from {}", default_path.display());
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Patch options for this config, with `encoding` overriding the
    /// configured label when given
    pub fn patch_options(&self, encoding: Option<&str>) -> PatchResult<PatchOptions> {
        PatchOptions::with_encoding_label(encoding.unwrap_or(&self.encoding))
    }
}
