// File: src/metrics/cpu.rs
//
// CPU utilization from cumulative tick counters. Tick counters only grow,
// so a rate is always the delta between two samples.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Cumulative ticks since boot, summed over every logical core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    /// Ticks spent in any non-idle state.
    pub used: u64,
    pub total: u64,
}

impl CpuTicks {
    /// Fraction of non-idle time between `prev` and `curr`, in `[0, 1]`.
    /// Returns `None` when no CPU time elapsed between the two samples.
    pub fn utilization(prev: CpuTicks, curr: CpuTicks) -> Option<f64> {
        let total = curr.total.saturating_sub(prev.total);
        if total == 0 {
            return None;
        }
        let used = curr.used.saturating_sub(prev.used);
        Some((used as f64 / total as f64).clamp(0.0, 1.0))
    }
}

/// Where tick samples come from.
pub trait TickSource: Send + Sync {
    fn sample(&self) -> CpuTicks;
}

/// Reads the per-core `cpuN` lines of `/proc/stat`.
///
/// Linux only. Hosts without that file sample as zero, which leaves the
/// rate unset and the card shows 0% CPU.
pub struct ProcStatTicks {
    path: PathBuf,
}

impl ProcStatTicks {
    pub fn new() -> Self {
        Self { path: PathBuf::from("/proc/stat") }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcStatTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for ProcStatTicks {
    fn sample(&self) -> CpuTicks {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => parse_proc_stat(&contents),
            Err(e) => {
                debug!("Cannot read {}: {}", self.path.display(), e);
                CpuTicks::default()
            }
        }
    }
}

/// Sums every `cpuN` line (the aggregate `cpu` line is skipped).
///
/// Only user, nice, system, idle and irq time are counted, so iowait,
/// softirq, steal and guest ticks affect neither `used` nor `total`.
pub fn parse_proc_stat(contents: &str) -> CpuTicks {
    let mut ticks = CpuTicks::default();
    for line in contents.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else { continue };
        let is_core = label
            .strip_prefix("cpu")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
        if !is_core {
            continue;
        }

        let values: Vec<u64> = fields.filter_map(|v| v.parse().ok()).collect();
        if values.len() < 4 {
            continue;
        }
        let irq = values.get(5).copied().unwrap_or(0);
        let used = values[0] + values[1] + values[2] + irq;
        ticks.used += used;
        ticks.total += used + values[3];
    }
    ticks
}

/// Latest utilization, shared between the sampler task (sole writer) and
/// status requests (readers). Stored as `f64` bits so a read never sees a
/// half-written value.
#[derive(Debug)]
pub struct CpuRate(AtomicU64);

const UNSET: u64 = u64::MAX;

impl CpuRate {
    pub fn new() -> Self {
        Self(AtomicU64::new(UNSET))
    }

    pub fn get(&self) -> Option<f64> {
        match self.0.load(Ordering::Acquire) {
            UNSET => None,
            bits => Some(f64::from_bits(bits)),
        }
    }

    pub fn set(&self, rate: f64) {
        self.0.store(rate.to_bits(), Ordering::Release);
    }
}

impl Default for CpuRate {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the previous sample and publishes each new delta into a [`CpuRate`].
pub struct CpuSampler<S: TickSource> {
    source: S,
    previous: CpuTicks,
    rate: Arc<CpuRate>,
}

impl<S: TickSource> CpuSampler<S> {
    /// Takes the baseline sample immediately.
    pub fn new(source: S, rate: Arc<CpuRate>) -> Self {
        let previous = source.sample();
        Self { source, previous, rate }
    }

    /// Sample again and publish the rate for the window since the last call.
    /// An empty window keeps the previously published rate.
    pub fn tick(&mut self) -> Option<f64> {
        let current = self.source.sample();
        if let Some(rate) = CpuTicks::utilization(self.previous, current) {
            self.rate.set(rate);
        }
        self.previous = current;
        self.rate.get()
    }

    pub fn rate(&self) -> Arc<CpuRate> {
        Arc::clone(&self.rate)
    }
}
