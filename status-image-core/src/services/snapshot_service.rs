// File: src/services/snapshot_service.rs

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use status_image_common::models::bot::MessageStats;
use status_image_common::models::system::{CpuUsage, SystemInfo, SystemStatus};
use status_image_common::traits::host_traits::SystemInfoProvider;

use crate::cache::MessageCountCache;
use crate::metrics::{CpuRate, HostMetrics};
use crate::services::bot_registry::BotRegistryAdapter;
use crate::utils::time::today_number;
use crate::Error;

/// Assembles a [`SystemInfo`] per status request.
///
/// Owns the long-lived state the requests read: the message count cache,
/// the shared CPU rate and the OS description.
pub struct SnapshotService {
    bots: BotRegistryAdapter,
    message_counts: MessageCountCache,
    metrics: Arc<dyn HostMetrics>,
    cpu_rate: Arc<CpuRate>,
    os: OnceCell<String>,
}

impl SnapshotService {
    pub fn new(
        bots: BotRegistryAdapter,
        message_counts: MessageCountCache,
        metrics: Arc<dyn HostMetrics>,
        cpu_rate: Arc<CpuRate>,
    ) -> Self {
        debug!("SnapshotService::new() called");
        Self {
            bots,
            message_counts,
            metrics,
            cpu_rate,
            os: OnceCell::new(),
        }
    }

    /// Resolved once; the OS does not change while the process runs.
    pub fn os_description(&self) -> &str {
        self.os.get_or_init(|| {
            let os = self.metrics.os_description();
            info!("Running on {}", os);
            os
        })
    }

    pub fn message_counts(&self) -> &MessageCountCache {
        &self.message_counts
    }

    /// Snapshot for today's day key.
    pub async fn build_snapshot(&self, requesting_platform: Option<&str>) -> Result<SystemInfo, Error> {
        self.build_snapshot_for_day(requesting_platform, today_number()).await
    }

    /// Either every field is populated or the whole build fails. Only swap
    /// (zeroed) and the CPU rate (unset before the first window) have fallbacks.
    pub async fn build_snapshot_for_day(
        &self,
        requesting_platform: Option<&str>,
        today: i64,
    ) -> Result<SystemInfo, Error> {
        let counts = self.message_counts.ensure_fresh(today).await?;

        let now = Utc::now();
        let mut bots = self.bots.list_bots(requesting_platform, now);
        for bot in &mut bots {
            bot.messages = counts
                .get(&bot.sid)
                .map(|stats| stats.normalized())
                .unwrap_or_else(MessageStats::zero);
        }

        let memory = self.metrics.memory();
        let swap = self.metrics.swap().await;
        let uptime = (now - self.bots.process_started()).num_milliseconds().max(0) as u64;

        debug!(
            "Built snapshot for platform={:?}: {} bots, cpu={:?}",
            requesting_platform,
            bots.len(),
            self.cpu_rate.get()
        );

        Ok(SystemInfo {
            bots,
            system: SystemStatus {
                os: self.os_description().to_string(),
                host_version: self.bots.host_version(),
                plugin_version: env!("CARGO_PKG_VERSION").to_string(),
                uptime,
                cpu_cores: self.metrics.cpu_cores(),
                memory,
                swap,
                cpu: CpuUsage { usage: self.cpu_rate.get() },
            },
        })
    }
}

#[async_trait]
impl SystemInfoProvider for SnapshotService {
    async fn get_system_info(&self, platform: Option<&str>) -> Result<SystemInfo, Error> {
        self.build_snapshot(platform).await
    }
}
