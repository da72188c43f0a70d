use async_trait::async_trait;
use crate::error::Error;
use crate::models::bot::HostBot;
use crate::models::system::SystemInfo;

/// Name under which the snapshot function is offered to other plugins.
pub const SYSTEM_INFO_CAPABILITY: &str = "status-image.getSystemInfo";

/// Live bot connections of the host runtime.
pub trait BotRegistry: Send + Sync {
    /// Bots in host enumeration order.
    fn bots(&self) -> Vec<HostBot>;

    fn host_version(&self) -> String;
}

/// Turns an HTML document into an image.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, Error>;
}

#[async_trait]
pub trait SystemInfoProvider: Send + Sync {
    async fn get_system_info(&self, platform: Option<&str>) -> Result<SystemInfo, Error>;
}
