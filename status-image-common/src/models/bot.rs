// File: status-image-common/src/models/bot.rs

use std::fmt;
use serde::{Deserialize, Serialize};

/// Stable key of one bot connection, formatted as `platform:selfId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotIdentity(String);

impl BotIdentity {
    pub fn new(platform: &str, self_id: &str) -> Self {
        Self(format!("{}:{}", platform, self_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BotIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BotIdentity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BotIdentity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Connection status reported by the host for a bot.
///
/// The host reports numeric codes; anything outside `0..=4` is kept as
/// `Unknown` so it can still be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    Offline,
    Online,
    Connect,
    Disconnect,
    Reconnect,
    Unknown(i32),
}

impl BotStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => BotStatus::Offline,
            1 => BotStatus::Online,
            2 => BotStatus::Connect,
            3 => BotStatus::Disconnect,
            4 => BotStatus::Reconnect,
            other => BotStatus::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            BotStatus::Offline => 0,
            BotStatus::Online => 1,
            BotStatus::Connect => 2,
            BotStatus::Disconnect => 3,
            BotStatus::Reconnect => 4,
            BotStatus::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for BotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotStatus::Offline => write!(f, "offline"),
            BotStatus::Online => write!(f, "online"),
            BotStatus::Connect => write!(f, "connect"),
            BotStatus::Disconnect => write!(f, "disconnect"),
            BotStatus::Reconnect => write!(f, "reconnect"),
            BotStatus::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// Message totals of one bot for one day bucket.
/// `None` means the aggregation returned no rows, which reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    pub send: Option<u64>,
    pub receive: Option<u64>,
}

impl MessageStats {
    pub fn zero() -> Self {
        Self { send: Some(0), receive: Some(0) }
    }

    /// Same stats with every missing count filled in as zero.
    pub fn normalized(&self) -> Self {
        Self {
            send: Some(self.send.unwrap_or(0)),
            receive: Some(self.receive.unwrap_or(0)),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send.unwrap_or(0)
    }

    pub fn receive_count(&self) -> u64 {
        self.receive.unwrap_or(0)
    }
}

/// One live bot connection as the host runtime enumerates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostBot {
    pub platform: String,
    pub self_id: String,
    pub status: BotStatus,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl HostBot {
    pub fn sid(&self) -> BotIdentity {
        BotIdentity::new(&self.platform, &self.self_id)
    }

    pub fn is_sandbox(&self) -> bool {
        self.platform.starts_with("sandbox:")
    }
}

/// Per-request view of one bot, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotInfo {
    pub sid: BotIdentity,
    pub platform: String,
    pub status: BotStatus,
    pub name: String,
    pub avatar: Option<String>,
    /// Milliseconds since login, or since process start when no login was recorded.
    pub running_time: u64,
    pub messages: MessageStats,
}
