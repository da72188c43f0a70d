use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The two message directions the daily counters track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Send,
    Receive,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Send => "send",
            MessageType::Receive => "receive",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send" => Ok(MessageType::Send),
            "receive" => Ok(MessageType::Receive),
            _ => Err(format!("Unknown message type: {}", s)),
        }
    }
}

/// One aggregated row: summed count for (type, platform, self_id) over a date range.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct MessageCountRow {
    #[sqlx(rename = "type")]
    pub message_type: String,
    pub platform: String,
    pub self_id: String,
    pub count: i64,
}
