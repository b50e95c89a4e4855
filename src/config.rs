//! Aggregate pipeline configuration.
//!
//! All stage configurations (validation policy, extraction knobs, assembly
//! options) can be defined in a single YAML file and loaded at start-up.
//! Every section is optional and falls back to its stage defaults.
//!
//! ## Example YAML configuration
//!
//! ```yaml
//! ingest:
//!   allowed_extensions: ["pdf", "doc", "docx", "txt"]
//!   max_file_bytes: 26214400
//!
//! extract:
//!   max_concurrent_pages: 4
//!   extraction_timeout_ms: 30000
//!   min_text_run: 4
//!
//! assemble:
//!   insert_page_markers: true
//!   max_text_bytes: 1048576
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use assemble::{AssembleConfig, AssembleConfigError};
use extract::{ExtractConfig, ExtractConfigError};
use ingest::{IngestPolicy, PolicyError};

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Validation policy (extension allow-list, size limit).
    pub ingest: IngestPolicy,

    /// Extraction knobs (page pool width, timeout, legacy noise floor).
    pub extract: ExtractConfig,

    /// Assembly options (page markers, output cap).
    pub assemble: AssembleConfig,
}

impl PipelineConfig {
    /// Loads a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parses YAML configuration from a string and validates it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every stage configuration.
    ///
    /// Intended for process start-up; catches misconfigurations before any
    /// live file is handled.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.ingest.validate()?;
        self.extract.validate()?;
        self.assemble.validate()?;
        Ok(())
    }
}

/// Errors that can occur when loading the pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("invalid ingest policy: {0}")]
    Ingest(#[from] PolicyError),

    #[error("invalid extract config: {0}")]
    Extract(#[from] ExtractConfigError),

    #[error("invalid assemble config: {0}")]
    Assemble(#[from] AssembleConfigError),
}
