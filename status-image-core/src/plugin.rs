// File: src/plugin.rs

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use status_image_common::traits::host_traits::{
    BotRegistry, Renderer, SystemInfoProvider, SYSTEM_INFO_CAPABILITY,
};
use status_image_common::traits::repository_traits::MessageAnalyticsRepo;

use crate::cache::MessageCountCache;
use crate::config::StatusImageConfig;
use crate::eventbus::{EventBus, StatusEvent};
use crate::metrics::{CpuRate, CpuSampler, HostMetrics, TickSource};
use crate::services::{BotRegistryAdapter, LoginTracker, SnapshotService, StatusCommand};
use crate::tasks::analytics_recorder::spawn_analytics_recorder;
use crate::tasks::cpu_sampler::spawn_cpu_sampler_task;
use crate::tasks::login_listener::spawn_login_listener;
use crate::utils::time::today_number;
use crate::Error;

/// Everything the host needs to run the status card: the
/// `status-image.getSystemInfo` capability, the `status-image` command and
/// the background tasks feeding them.
pub struct StatusImagePlugin {
    config: StatusImageConfig,
    event_bus: EventBus,
    cpu_rate: Arc<CpuRate>,
    snapshot: Arc<SnapshotService>,
    command: StatusCommand,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl StatusImagePlugin {
    /// Wires the services and starts listening for logins and messages.
    /// Call [`ready`](Self::ready) once the host has finished starting.
    pub async fn apply(
        config: StatusImageConfig,
        event_bus: EventBus,
        registry: Arc<dyn BotRegistry>,
        analytics: Arc<dyn MessageAnalyticsRepo>,
        metrics: Arc<dyn HostMetrics>,
        renderer: Arc<dyn Renderer>,
        process_started: DateTime<Utc>,
    ) -> Result<Self, Error> {
        config.validate()?;

        let logins = Arc::new(LoginTracker::new());
        let cpu_rate = Arc::new(CpuRate::new());
        let snapshot = Arc::new(SnapshotService::new(
            BotRegistryAdapter::new(registry, Arc::clone(&logins), config.display_name.clone(), process_started),
            MessageCountCache::new(Arc::clone(&analytics)),
            metrics,
            Arc::clone(&cpu_rate),
        ));
        let command = StatusCommand::new(
            Arc::clone(&snapshot) as Arc<dyn SystemInfoProvider>,
            renderer,
            config.background.clone(),
            config.resource_path.clone(),
        );

        let tasks = vec![
            spawn_login_listener(&event_bus, logins).await,
            spawn_analytics_recorder(&event_bus, analytics).await,
        ];
        info!("status-image applied, providing '{}'", SYSTEM_INFO_CAPABILITY);

        Ok(Self {
            config,
            event_bus,
            cpu_rate,
            snapshot,
            command,
            tasks: Mutex::new(tasks),
        })
    }

    /// Takes the CPU baseline, starts the sampler, resolves the OS
    /// description and warms the message count cache.
    pub async fn ready<S>(&self, ticks: S) -> Result<(), Error>
    where
        S: TickSource + 'static,
    {
        let sampler = CpuSampler::new(ticks, Arc::clone(&self.cpu_rate));
        let handle = spawn_cpu_sampler_task(
            sampler,
            Duration::from_millis(self.config.sample_interval_ms),
            self.event_bus.shutdown_rx.clone(),
        );
        self.tasks.lock().await.push(handle);

        self.snapshot.os_description();
        self.snapshot.message_counts().ensure_fresh(today_number()).await?;
        info!("status-image ready.");
        Ok(())
    }

    /// Runs [`ready`](Self::ready) once the host publishes
    /// [`StatusEvent::Ready`]. Gives up without sampling if shutdown comes first.
    pub async fn ready_on_event<S>(self: &Arc<Self>, ticks: S)
    where
        S: TickSource + 'static,
    {
        let mut rx = self.event_bus.subscribe(None).await;
        let mut shutdown_rx = self.event_bus.shutdown_rx.clone();
        let plugin = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let host_ready = loop {
                tokio::select! {
                    biased;
                    maybe_event = rx.recv() => {
                        match maybe_event {
                            Some(StatusEvent::Ready) => break true,
                            Some(_) => {}
                            None => break false,
                        }
                    },
                    Ok(_) = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break false;
                        }
                    }
                }
            };
            drop(rx);

            if host_ready {
                if let Err(e) = plugin.ready(ticks).await {
                    error!("status-image ready step failed: {:?}", e);
                }
            }
        });
        self.tasks.lock().await.push(handle);
    }

    pub fn capability_name(&self) -> &'static str {
        SYSTEM_INFO_CAPABILITY
    }

    /// The function registered under [`capability_name`](Self::capability_name).
    pub fn system_info_provider(&self) -> Arc<dyn SystemInfoProvider> {
        Arc::clone(&self.snapshot) as Arc<dyn SystemInfoProvider>
    }

    pub fn snapshot_service(&self) -> Arc<SnapshotService> {
        Arc::clone(&self.snapshot)
    }

    pub fn command(&self) -> &StatusCommand {
        &self.command
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Signals shutdown and waits for the background tasks.
    pub async fn shutdown(&self) {
        self.event_bus.shutdown();
        let handles: Vec<_> = self.tasks.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("status-image task ended abnormally: {:?}", e);
            }
        }
        info!("status-image shut down.");
    }
}
