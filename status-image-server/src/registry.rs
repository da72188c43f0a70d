// File: status-image-server/src/registry.rs

use std::path::Path;
use serde::{Deserialize, Serialize};

use status_image_common::models::bot::HostBot;
use status_image_common::traits::host_traits::BotRegistry;
use status_image_core::config::StatusImageConfig;
use status_image_core::Error;

/// Config file of the standalone server: the plugin config plus the bots
/// the static registry serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(flatten)]
    pub plugin: StatusImageConfig,

    #[serde(default)]
    pub bots: Vec<HostBot>,
}

impl ServerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let cfg: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        cfg.plugin.validate()?;
        Ok(cfg)
    }
}

/// Registry over a fixed list of bots read from the config file.
pub struct StaticBotRegistry {
    bots: Vec<HostBot>,
}

impl StaticBotRegistry {
    pub fn new(bots: Vec<HostBot>) -> Self {
        Self { bots }
    }
}

impl BotRegistry for StaticBotRegistry {
    fn bots(&self) -> Vec<HostBot> {
        self.bots.clone()
    }

    fn host_version(&self) -> String {
        format!("status-image-server v{}", env!("CARGO_PKG_VERSION"))
    }
}
