// File: status-image-core/tests/plugin_tests.rs

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;

use status_image_common::models::bot::BotIdentity;
use status_image_common::traits::host_traits::SYSTEM_INFO_CAPABILITY;
use status_image_core::config::StatusImageConfig;
use status_image_core::eventbus::EventBus;
use status_image_core::metrics::CpuTicks;
use status_image_core::services::CommandSession;
use status_image_core::{Error, StatusImagePlugin};
use test_utils::{
    count_row, host_bot, CountingAnalyticsRepo, EchoRenderer, FakeMetrics, ScriptedTicks, StaticRegistry,
};

async fn plugin_with(repo: Arc<CountingAnalyticsRepo>) -> Result<StatusImagePlugin, Error> {
    let config = StatusImageConfig {
        background: vec!["file:///res/bg/only.webp".into()],
        sample_interval_ms: 20,
        ..StatusImageConfig::default()
    };
    StatusImagePlugin::apply(
        config,
        EventBus::new(),
        Arc::new(StaticRegistry(vec![
            host_bot("discord", "1", Some("Maow"), None),
            host_bot("qq", "2", Some("Penguin"), None),
        ])),
        repo,
        Arc::new(FakeMetrics::without_swap()),
        Arc::new(EchoRenderer),
        Utc::now(),
    ).await
}

#[tokio::test]
async fn test_ready_warms_cache_and_samples_cpu() -> Result<(), Error> {
    let repo = Arc::new(CountingAnalyticsRepo::with_rows(vec![count_row("send", "qq", "2", 5)]));
    let plugin = plugin_with(repo.clone()).await?;
    assert_eq!(plugin.capability_name(), SYSTEM_INFO_CAPABILITY);

    plugin.ready(ScriptedTicks::new(vec![
        CpuTicks { used: 0, total: 0 },
        CpuTicks { used: 50, total: 100 },
    ])).await?;
    assert_eq!(repo.query_count(), 1);

    let provider = plugin.system_info_provider();
    let usage = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let info = provider.get_system_info(Some("qq")).await?;
            if let Some(u) = info.system.cpu.usage {
                return Ok::<f64, Error>(u);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("sampler should publish a rate")?;
    assert_eq!(usage, 0.5);
    // every request above reused the warmed cache
    assert_eq!(repo.query_count(), 1);

    plugin.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_command_renders_requesting_bot_first() -> Result<(), Error> {
    let repo = Arc::new(CountingAnalyticsRepo::with_rows(vec![count_row("send", "qq", "2", 5)]));
    let plugin = plugin_with(repo).await?;
    plugin.ready(ScriptedTicks::new(vec![CpuTicks::default()])).await?;

    let session = CommandSession { sid: BotIdentity::from("qq:2"), platform: "qq".into() };
    let image = plugin.command().execute(&session).await?;
    let html = String::from_utf8(image).expect("echo renderer returns the html");

    assert!(html.contains("<h2>Penguin <small>QQ</small></h2>"));
    assert!(html.contains("昨日发送 <b>5</b>"));
    assert!(html.contains("bg/only.webp"));
    assert!(html.contains("Running on TestOS 1.0"));

    plugin.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_login_event_sets_running_time() -> Result<(), Error> {
    let repo = Arc::new(CountingAnalyticsRepo::default());
    let plugin = plugin_with(repo).await?;
    plugin.ready(ScriptedTicks::new(vec![CpuTicks::default()])).await?;

    let earlier = Utc::now() - chrono::Duration::hours(5);
    plugin.event_bus().publish(status_image_core::eventbus::StatusEvent::LoginAdded {
        sid: BotIdentity::from("discord:1"),
        timestamp: earlier,
    }).await;

    let provider = plugin.system_info_provider();
    let running = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let info = provider.get_system_info(None).await?;
            let bot = &info.bots[0];
            if bot.running_time >= 5 * 3600 * 1000 {
                return Ok::<u64, Error>(bot.running_time);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("login listener should record the timestamp")?;
    assert!(running < 6 * 3600 * 1000);

    plugin.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_ready_event_triggers_ready_step() -> Result<(), Error> {
    let repo = Arc::new(CountingAnalyticsRepo::default());
    let plugin = Arc::new(plugin_with(repo.clone()).await?);
    plugin.ready_on_event(ScriptedTicks::new(vec![CpuTicks::default()])).await;

    let snapshot = plugin.snapshot_service();
    assert_eq!(snapshot.message_counts().cached_date().await, None);
    assert_eq!(repo.query_count(), 0);

    plugin.event_bus().publish_ready().await;
    let warmed = tokio::time::timeout(Duration::from_secs(2), async {
        while snapshot.message_counts().cached_date().await.is_none() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(warmed.is_ok(), "publishing Ready should warm the cache");
    assert_eq!(repo.query_count(), 1);

    plugin.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_shutdown_before_ready_event_skips_ready_step() -> Result<(), Error> {
    let repo = Arc::new(CountingAnalyticsRepo::default());
    let plugin = Arc::new(plugin_with(repo.clone()).await?);
    plugin.ready_on_event(ScriptedTicks::new(vec![CpuTicks::default()])).await;

    plugin.shutdown().await;
    assert_eq!(repo.query_count(), 0);
    Ok(())
}
