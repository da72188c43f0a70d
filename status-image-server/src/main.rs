use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use status_image_common::models::bot::BotIdentity;
use status_image_core::eventbus::EventBus;
use status_image_core::metrics::{ProcStatTicks, SysinfoMetrics};
use status_image_core::repositories::PostgresMessageAnalyticsRepository;
use status_image_core::services::CommandSession;
use status_image_core::{Database, StatusImagePlugin};

mod registry;
mod renderer;

use registry::{ServerConfig, StaticBotRegistry};
use renderer::FileRenderer;

#[derive(Parser, Debug, Clone)]
#[command(name = "status-image")]
#[command(author, version, about = "Renders a bot status card from live host metrics")]
struct Args {
    /// JSON config: plugin settings plus the bots to report on.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Postgres connection URL. Falls back to DATABASE_URL.
    #[arg(long)]
    db_url: Option<String>,

    /// Platform of the requesting session.
    #[arg(long, default_value = "discord")]
    platform: String,

    /// `platform:selfId` of the requesting bot.
    #[arg(long)]
    sid: Option<String>,

    /// Where the rendered card is written.
    #[arg(long, default_value = "status.html")]
    out: PathBuf,

    /// Apply migrations before rendering.
    #[arg(long)]
    migrate: bool,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("status_image=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!("status-image starting. platform={}, out={}", args.platform, args.out.display());

    if let Err(e) = run(args).await {
        error!("status-image failed: {:?}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let process_started = Utc::now();

    let config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };

    let db_url = args
        .db_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .context("no --db-url given and DATABASE_URL is unset")?;
    let db = Database::new(&db_url).await?;
    if args.migrate {
        db.migrate().await?;
    }

    let bots = config.bots.clone();
    let plugin = Arc::new(StatusImagePlugin::apply(
        config.plugin,
        EventBus::new(),
        Arc::new(StaticBotRegistry::new(bots.clone())),
        Arc::new(PostgresMessageAnalyticsRepository::new(db.pool().clone())),
        Arc::new(SysinfoMetrics::new()),
        Arc::new(FileRenderer::new(&args.out)),
        process_started,
    )
    .await?);
    plugin.ready_on_event(ProcStatTicks::new()).await;

    for bot in &bots {
        plugin.event_bus().publish_login(&bot.platform, &bot.self_id).await;
    }
    plugin.event_bus().publish_ready().await;

    let sid = match &args.sid {
        Some(sid) => BotIdentity::from(sid.as_str()),
        None => bots
            .iter()
            .find(|b| b.platform == args.platform)
            .or_else(|| bots.first())
            .map(|b| b.sid())
            .context("no bots configured")?,
    };
    let session = CommandSession { sid, platform: args.platform.clone() };

    let result = plugin.command().execute(&session).await;
    plugin.shutdown().await;

    let bytes = result?;
    info!("Rendered {} bytes for {}", bytes.len(), session.sid);
    Ok(())
}
