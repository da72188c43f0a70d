use async_trait::async_trait;
use crate::error::Error;
use crate::models::analytics::{MessageCountRow, MessageType};

/// Day-bucketed message counters. Dates are day numbers (days since
/// 1970-01-01 in local time).
#[async_trait]
pub trait MessageAnalyticsRepo: Send + Sync {
    /// Sum counts for `from_date <= date < to_date`, grouped by type, platform and bot.
    async fn sum_by_bot(&self, from_date: i64, to_date: i64) -> Result<Vec<MessageCountRow>, Error>;

    /// Add `by` to the counter of one bucket, creating it if needed.
    async fn increment(
        &self,
        date: i64,
        message_type: MessageType,
        platform: &str,
        self_id: &str,
        by: i64,
    ) -> Result<(), Error>;
}
