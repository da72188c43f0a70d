// src/repositories/postgres/analytics.rs
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use status_image_common::models::analytics::{MessageCountRow, MessageType};
use status_image_common::traits::repository_traits::MessageAnalyticsRepo;
use crate::Error;

/// Postgres-backed daily message counters.
#[derive(Clone)]
pub struct PostgresMessageAnalyticsRepository {
    pool: Pool<Postgres>,
}

impl PostgresMessageAnalyticsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageAnalyticsRepo for PostgresMessageAnalyticsRepository {
    async fn sum_by_bot(&self, from_date: i64, to_date: i64) -> Result<Vec<MessageCountRow>, Error> {
        let rows = sqlx::query_as::<_, MessageCountRow>(
            r#"
            SELECT
                type,
                platform,
                self_id,
                SUM(count)::BIGINT AS count
            FROM analytics_message
            WHERE date >= $1 AND date < $2
            GROUP BY type, platform, self_id
            "#
        )
            .bind(from_date as i32)
            .bind(to_date as i32)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn increment(
        &self,
        date: i64,
        message_type: MessageType,
        platform: &str,
        self_id: &str,
        by: i64,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO analytics_message (date, type, platform, self_id, count)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (date, type, platform, self_id)
            DO UPDATE SET count = analytics_message.count + EXCLUDED.count
            "#
        )
            .bind(date as i32)
            .bind(message_type.as_str())
            .bind(platform)
            .bind(self_id)
            .bind(by)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
