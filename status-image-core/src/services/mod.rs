pub mod bot_registry;
pub mod primary_selector;
pub mod snapshot_service;
pub mod status_command;

pub use bot_registry::{BotRegistryAdapter, LoginTracker};
pub use primary_selector::{select_primary, PrimarySelection};
pub use snapshot_service::SnapshotService;
pub use status_command::{CommandSession, StatusCommand};
