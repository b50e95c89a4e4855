//! Extraction stage configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime knobs for the extractors.
///
/// All three values are policy constants supplied by external configuration;
/// none is negotiated at runtime. Defaults suit typical documents: a handful
/// of concurrent page jobs regardless of document length, a 30 second
/// ceiling per document, and a 4-character noise floor for legacy recovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Upper bound on concurrently extracting pages of one paged document.
    /// Bounded by this constant, never by page count, so a very large
    /// document cannot exhaust the worker pool.
    pub max_concurrent_pages: usize,

    /// Wall-clock ceiling for extracting one paged document, in
    /// milliseconds. On expiry outstanding page jobs are cancelled and the
    /// call fails with [`ExtractError::Timeout`](crate::ExtractError).
    pub extraction_timeout_ms: u64,

    /// Minimum printable-run length (in characters) the legacy-binary
    /// scanner keeps; shorter runs are discarded as structural noise.
    pub min_text_run: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_concurrent_pages: 4,
            extraction_timeout_ms: 30_000,
            min_text_run: 4,
        }
    }
}

impl ExtractConfig {
    /// The timeout as a [`Duration`].
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction_timeout_ms)
    }

    /// Validates internal consistency of this configuration.
    ///
    /// Start-up check: a zero pool or a zero timeout would fail every paged
    /// document at request time.
    pub fn validate(&self) -> Result<(), ExtractConfigError> {
        if self.max_concurrent_pages == 0 {
            return Err(ExtractConfigError::ZeroPageConcurrency);
        }
        if self.extraction_timeout_ms == 0 {
            return Err(ExtractConfigError::ZeroTimeout);
        }
        if self.min_text_run == 0 {
            return Err(ExtractConfigError::ZeroMinRun);
        }
        Ok(())
    }
}

/// Configuration-time extraction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractConfigError {
    /// No page job could ever acquire a pool slot.
    #[error("max_concurrent_pages is 0; no page job could ever run")]
    ZeroPageConcurrency,

    /// Every paged extraction would time out immediately.
    #[error("extraction_timeout_ms is 0; every paged extraction would time out")]
    ZeroTimeout,

    /// Every printable run would be discarded as noise.
    #[error("min_text_run is 0; the legacy scanner needs a positive noise floor")]
    ZeroMinRun,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ExtractConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.extraction_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn zero_values_fail_validation() {
        let cfg = ExtractConfig {
            max_concurrent_pages: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ExtractConfigError::ZeroPageConcurrency));

        let cfg = ExtractConfig {
            extraction_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ExtractConfigError::ZeroTimeout));

        let cfg = ExtractConfig {
            min_text_run: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ExtractConfigError::ZeroMinRun));
    }
}
