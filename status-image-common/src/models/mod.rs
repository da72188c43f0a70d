pub mod analytics;
pub mod bot;
pub mod system;

pub use analytics::{MessageCountRow, MessageType};
pub use bot::{BotIdentity, BotInfo, BotStatus, HostBot, MessageStats};
pub use system::{CpuUsage, MemoryUsage, SystemInfo, SystemStatus};
