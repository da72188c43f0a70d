// File: src/services/status_command.rs

use std::sync::Arc;
use rand::seq::IndexedRandom;
use tracing::{info, error};

use status_image_common::models::bot::BotIdentity;
use status_image_common::traits::host_traits::{Renderer, SystemInfoProvider};

use crate::template::{generate, TemplateOptions};
use crate::Error;

pub const COMMAND_NAME: &str = "status-image";

/// The session that invoked the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSession {
    pub sid: BotIdentity,
    pub platform: String,
}

/// `status-image`: snapshot, template, render, reply with the image.
pub struct StatusCommand {
    provider: Arc<dyn SystemInfoProvider>,
    renderer: Arc<dyn Renderer>,
    backgrounds: Vec<String>,
    resource_path: String,
}

impl StatusCommand {
    pub fn new(
        provider: Arc<dyn SystemInfoProvider>,
        renderer: Arc<dyn Renderer>,
        backgrounds: Vec<String>,
        resource_path: String,
    ) -> Self {
        Self {
            provider,
            renderer,
            backgrounds,
            resource_path,
        }
    }

    /// One background, chosen at random; "" when none are configured.
    pub fn pick_background(&self) -> &str {
        self.backgrounds
            .choose(&mut rand::rng())
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub async fn execute(&self, session: &CommandSession) -> Result<Vec<u8>, Error> {
        info!("{} requested by {} on {}", COMMAND_NAME, session.sid, session.platform);
        let system_info = self.provider.get_system_info(Some(&session.platform)).await?;

        let html = generate(&TemplateOptions {
            resource_path: &self.resource_path,
            background: self.pick_background(),
            system_info: &system_info,
            active_sid: Some(&session.sid),
            active_platform: Some(&session.platform),
        })?;

        self.renderer.render(&html).await.map_err(|e| {
            error!("Rendering status card failed: {:?}", e);
            e
        })
    }
}
