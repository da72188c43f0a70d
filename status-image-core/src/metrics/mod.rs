//! Host readings: a delta-based CPU sampler plus instantaneous memory,
//! swap and OS information.

pub mod cpu;
pub mod host;

pub use cpu::{CpuRate, CpuSampler, CpuTicks, ProcStatTicks, TickSource};
pub use host::{HostMetrics, SysinfoMetrics};
