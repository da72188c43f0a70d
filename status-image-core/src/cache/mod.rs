pub mod message_count;

pub use message_count::{MessageCountCache, MessageCounts};
