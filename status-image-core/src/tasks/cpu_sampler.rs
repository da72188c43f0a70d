// status-image-core/src/tasks/cpu_sampler.rs

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::metrics::{CpuSampler, TickSource};

/// Spawns the fixed-interval CPU sampler. The task is the only writer of
/// the sampler's shared rate; it exits when `shutdown_rx` flips to true.
pub fn spawn_cpu_sampler_task<S>(
    mut sampler: CpuSampler<S>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    S: TickSource + 'static,
{
    tokio::spawn(async move {
        info!("CPU sampler started with interval={}ms", period.as_millis());
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the baseline was already taken.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let rate = sampler.tick();
                    debug!("CPU utilization now {:?}", rate);
                },
                Ok(_) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        info!("CPU sampler stopped.");
    })
}
