//! Configuration for dbspec.
//!
//! TOML-based. Lets a deployment declare extra engines (usually inheriting
//! from a builtin one) and translate grain labels. Nothing is read implicitly:
//! callers pass the file or string they want loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::EngineSpec;
use crate::error::{DbSpecError, Result};
use crate::labels::LabelCatalog;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DbSpecConfig {
    /// Engines declared inline, in addition to the builtin ones.
    pub engines: Vec<EngineSpec>,

    /// Directory of YAML engine declarations, one engine per file.
    pub engine_dir: Option<PathBuf>,

    /// Grain label translations (label → display text).
    pub labels: LabelCatalog,
}

impl DbSpecConfig {
    /// Load configuration from a TOML file.
    ///
    /// A relative `engine_dir` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DbSpecError::Config(format!("failed to read config file: {e}")))?;
        let mut cfg = Self::from_toml(&contents)?;
        if let Some(dir) = cfg.engine_dir.take() {
            cfg.engine_dir = Some(match path.parent() {
                Some(base) if dir.is_relative() => base.join(dir),
                _ => dir,
            });
        }
        tracing::info!(
            path = %path.display(),
            engines = cfg.engines.len(),
            labels = cfg.labels.len(),
            "loaded dbspec config"
        );
        Ok(cfg)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| DbSpecError::Config(format!("failed to parse config: {e}")))
    }
}
