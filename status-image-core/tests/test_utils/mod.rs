// File: status-image-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use parking_lot::Mutex;

use status_image_common::models::analytics::{MessageCountRow, MessageType};
use status_image_common::models::bot::{BotStatus, HostBot};
use status_image_common::models::system::MemoryUsage;
use status_image_common::traits::host_traits::{BotRegistry, Renderer};
use status_image_common::traits::repository_traits::MessageAnalyticsRepo;
use status_image_core::metrics::{CpuTicks, HostMetrics, TickSource};
use status_image_core::Error;

/// Analytics source serving fixed rows and counting aggregation queries.
#[derive(Default)]
pub struct CountingAnalyticsRepo {
    pub rows: Mutex<Vec<MessageCountRow>>,
    pub queries: AtomicUsize,
    pub windows: Mutex<Vec<(i64, i64)>>,
    pub fail: Mutex<bool>,
}

impl CountingAnalyticsRepo {
    pub fn with_rows(rows: Vec<MessageCountRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageAnalyticsRepo for CountingAnalyticsRepo {
    async fn sum_by_bot(&self, from_date: i64, to_date: i64) -> Result<Vec<MessageCountRow>, Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().push((from_date, to_date));
        if *self.fail.lock() {
            return Err(Error::DataSource("analytics database unreachable".into()));
        }
        Ok(self.rows.lock().clone())
    }

    async fn increment(
        &self,
        _date: i64,
        _message_type: MessageType,
        _platform: &str,
        _self_id: &str,
        _by: i64,
    ) -> Result<(), Error> {
        Ok(())
    }
}

pub fn count_row(kind: &str, platform: &str, self_id: &str, count: i64) -> MessageCountRow {
    MessageCountRow {
        message_type: kind.into(),
        platform: platform.into(),
        self_id: self_id.into(),
        count,
    }
}

/// Registry returning a fixed bot list.
pub struct StaticRegistry(pub Vec<HostBot>);

impl BotRegistry for StaticRegistry {
    fn bots(&self) -> Vec<HostBot> {
        self.0.clone()
    }

    fn host_version(&self) -> String {
        "test-host 1.0.0".into()
    }
}

pub fn host_bot(platform: &str, self_id: &str, nick: Option<&str>, name: Option<&str>) -> HostBot {
    HostBot {
        platform: platform.into(),
        self_id: self_id.into(),
        status: BotStatus::Online,
        nick: nick.map(String::from),
        name: name.map(String::from),
        avatar: Some(format!("https://cdn.example/{}.png", self_id)),
        hidden: false,
    }
}

/// Fixed host readings; swap is configurable.
pub struct FakeMetrics {
    pub swap: MemoryUsage,
}

impl FakeMetrics {
    pub fn without_swap() -> Self {
        Self { swap: MemoryUsage::zero() }
    }
}

#[async_trait]
impl HostMetrics for FakeMetrics {
    fn memory(&self) -> MemoryUsage {
        MemoryUsage::new(6 * 1024, 8 * 1024)
    }

    async fn swap(&self) -> MemoryUsage {
        self.swap
    }

    fn os_description(&self) -> String {
        "TestOS 1.0".into()
    }

    fn cpu_cores(&self) -> usize {
        8
    }
}

/// Renderer that returns the HTML bytes unchanged.
pub struct EchoRenderer;

#[async_trait]
impl Renderer for EchoRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, Error> {
        Ok(html.as_bytes().to_vec())
    }
}

/// Tick source replaying a script, then repeating its last sample.
pub struct ScriptedTicks(pub Mutex<VecDeque<CpuTicks>>);

impl ScriptedTicks {
    pub fn new(samples: Vec<CpuTicks>) -> Self {
        Self(Mutex::new(samples.into()))
    }
}

impl TickSource for ScriptedTicks {
    fn sample(&self) -> CpuTicks {
        let mut q = self.0.lock();
        if q.len() > 1 {
            q.pop_front().unwrap_or_default()
        } else {
            q.front().copied().unwrap_or_default()
        }
    }
}
