// File: src/metrics/host.rs

use std::path::PathBuf;
use async_trait::async_trait;
use parking_lot::Mutex;
use sysinfo::System;
use tracing::debug;

use status_image_common::models::system::MemoryUsage;

/// Instantaneous host readings taken on every status request.
#[async_trait]
pub trait HostMetrics: Send + Sync {
    fn memory(&self) -> MemoryUsage;

    /// Best effort; unavailable swap reads as the all-zero block.
    async fn swap(&self) -> MemoryUsage;

    fn os_description(&self) -> String;

    fn cpu_cores(&self) -> usize;
}

/// `sysinfo` for memory and OS release, `/proc/meminfo` for swap.
pub struct SysinfoMetrics {
    sys: Mutex<System>,
    meminfo_path: PathBuf,
}

impl SysinfoMetrics {
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
            meminfo_path: PathBuf::from("/proc/meminfo"),
        }
    }

    pub fn with_meminfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.meminfo_path = path.into();
        self
    }

    fn sysinfo_swap(&self) -> MemoryUsage {
        let mut sys = self.sys.lock();
        sys.refresh_memory();
        swap_usage(sys.total_swap(), sys.free_swap())
    }
}

impl Default for SysinfoMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostMetrics for SysinfoMetrics {
    fn memory(&self) -> MemoryUsage {
        let mut sys = self.sys.lock();
        sys.refresh_memory();
        memory_usage(sys.total_memory(), sys.available_memory())
    }

    async fn swap(&self) -> MemoryUsage {
        match tokio::fs::read_to_string(&self.meminfo_path).await {
            Ok(contents) => {
                let (total, free) = parse_meminfo_swap(&contents);
                swap_usage(total, free)
            }
            Err(e) => {
                debug!("No {} ({}), asking sysinfo for swap", self.meminfo_path.display(), e);
                self.sysinfo_swap()
            }
        }
    }

    fn os_description(&self) -> String {
        describe_os(System::name(), System::os_version())
    }

    fn cpu_cores(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// `(SwapTotal, SwapFree)` in bytes; missing lines read as 0.
pub fn parse_meminfo_swap(contents: &str) -> (u64, u64) {
    let mut total = 0;
    let mut free = 0;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("SwapTotal:") {
            total = kib_to_bytes(rest);
        } else if let Some(rest) = line.strip_prefix("SwapFree:") {
            free = kib_to_bytes(rest);
        }
    }
    (total, free)
}

fn kib_to_bytes(field: &str) -> u64 {
    let digits: String = field.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<u64>().unwrap_or(0) * 1024
}

/// Used memory is everything not available, so reclaimable page cache and
/// buffers do not count as used.
pub fn memory_usage(total: u64, available: u64) -> MemoryUsage {
    MemoryUsage::new(total.saturating_sub(available), total)
}

pub fn swap_usage(total: u64, free: u64) -> MemoryUsage {
    if total == 0 {
        return MemoryUsage::zero();
    }
    MemoryUsage::new(total.saturating_sub(free), total)
}

/// `"<distro> <release>"`, or just the distro when the release is unknown.
pub fn describe_os(distro: Option<String>, release: Option<String>) -> String {
    let distro = distro
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| std::env::consts::OS.to_string());
    match release.filter(|r| !r.is_empty()) {
        Some(release) => format!("{} {}", distro, release),
        None => distro,
    }
}
