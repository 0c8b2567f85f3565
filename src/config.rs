//! Configuration from `qconv.toml`.
//!
//! ```toml
//! [defaults]
//! service = "redshift"
//! style = 5
//!
//! [bitmatch]
//! id_column = "doc_id"
//! temp_table = "hits"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::ast::{ConversionRequest, Engine};
use crate::error::{ConvertError, ConvertResult};
use crate::transpiler::BitmatchOptions;

/// Project-local config file name.
pub const FILE_NAME: &str = "qconv.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,
    pub bitmatch: BitmatchOptions,
}

/// Fallbacks for CLI selection flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub service: Option<Engine>,
    pub style: Option<u8>,
}

impl Config {
    pub fn from_toml(content: &str) -> ConvertResult<Self> {
        toml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ConvertResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml(&content)
    }

    /// Load `explicit` if given, else the first existing default location.
    ///
    /// Missing default files are not an error.
    pub fn discover(explicit: Option<&Path>) -> ConvertResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        for path in default_locations() {
            if path.is_file() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Combine CLI selections with configured defaults.
    pub fn request(
        &self,
        service: Option<Engine>,
        style: Option<u8>,
    ) -> ConvertResult<ConversionRequest> {
        let engine = service.or(self.defaults.service).ok_or_else(|| {
            ConvertError::Config("No target service. Use --service or set defaults.service".into())
        })?;
        let style = style.or(self.defaults.style).ok_or_else(|| {
            ConvertError::Config("No style. Use --type or set defaults.style".into())
        })?;
        Ok(ConversionRequest::new(engine, style))
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("qconv").join("config.toml"));
    }
    paths
}
