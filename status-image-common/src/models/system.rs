// File: status-image-common/src/models/system.rs

use serde::{Deserialize, Serialize};
use crate::models::bot::BotInfo;

/// Used/total pair with the derived ratio (0..=1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub used: u64,
    pub total: u64,
    pub percentage: f64,
}

impl MemoryUsage {
    pub fn zero() -> Self {
        Self::default()
    }

    /// A zero total yields the all-zero block instead of a NaN ratio.
    pub fn new(used: u64, total: u64) -> Self {
        if total == 0 {
            return Self::zero();
        }
        let used = used.min(total);
        Self {
            used,
            total,
            percentage: used as f64 / total as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuUsage {
    /// `None` until the sampler has completed its first window.
    pub usage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub os: String,
    pub host_version: String,
    pub plugin_version: String,
    /// Process uptime in milliseconds.
    pub uptime: u64,
    pub cpu_cores: usize,
    pub memory: MemoryUsage,
    pub swap: MemoryUsage,
    pub cpu: CpuUsage,
}

/// Snapshot handed to the template layer. Built fresh for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub bots: Vec<BotInfo>,
    pub system: SystemStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_usage_ratio() {
        let m = MemoryUsage::new(512, 2048);
        assert_eq!(m.percentage, 0.25);
    }

    #[test]
    fn test_zero_total_is_all_zero() {
        assert_eq!(MemoryUsage::new(10, 0), MemoryUsage { used: 0, total: 0, percentage: 0.0 });
    }
}
