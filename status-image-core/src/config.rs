// File: src/config.rs

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;

use status_image_common::models::bot::BotIdentity;
use crate::Error;

pub const DEFAULT_RESOURCE_PATH: &str = "file:///usr/share/status-image/resource";
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 5000;

/// Custom display name for one bot, matched by `platform:selfId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNameOverride {
    pub sid: BotIdentity,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusImageConfig {
    /// Candidate background images; one is picked at random per render.
    #[serde(default = "default_backgrounds")]
    pub background: Vec<String>,

    #[serde(default)]
    pub display_name: Vec<DisplayNameOverride>,

    /// Base URL for bundled fonts and icons.
    #[serde(default = "default_resource_path")]
    pub resource_path: String,

    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

fn default_resource_path() -> String {
    DEFAULT_RESOURCE_PATH.to_string()
}

fn default_backgrounds() -> Vec<String> {
    vec![
        format!("{}/bg/default.webp", DEFAULT_RESOURCE_PATH),
        format!("{}/bg/TohsakaRin.jpg", DEFAULT_RESOURCE_PATH),
    ]
}

fn default_sample_interval_ms() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_MS
}

impl Default for StatusImageConfig {
    fn default() -> Self {
        Self {
            background: default_backgrounds(),
            display_name: Vec::new(),
            resource_path: default_resource_path(),
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}

impl StatusImageConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let cfg = Self::from_json(&std::fs::read_to_string(path)?)?;
        info!(
            "Loaded status-image config from {} ({} backgrounds, {} display names)",
            path.display(),
            cfg.background.len(),
            cfg.display_name.len()
        );
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.sample_interval_ms == 0 {
            return Err(Error::Config("sample_interval_ms must be greater than zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let cfg = StatusImageConfig::from_json("{}").unwrap();
        assert_eq!(cfg, StatusImageConfig::default());
        assert_eq!(cfg.background.len(), 2);
        assert_eq!(cfg.sample_interval_ms, 5000);
    }

    #[test]
    fn test_display_names() {
        let cfg = StatusImageConfig::from_json(
            r#"{ "display_name": [ { "sid": "onebot:123456", "name": "Robert" } ] }"#,
        ).unwrap();
        assert_eq!(cfg.display_name[0].sid, BotIdentity::from("onebot:123456"));
        assert_eq!(cfg.display_name[0].name, "Robert");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = StatusImageConfig::from_json(r#"{ "sample_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
