use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nowplaying::{
    config::Config, registry::ChannelRegistry, services::NowPlayingService,
    sources::HttpPageFetcher, web::WebServer,
};

#[derive(Parser)]
#[command(name = "nowplaying")]
#[command(version)]
#[command(about = "Now-playing and schedule aggregator for web radio channels")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (defaults to $CONFIG_FILE, then config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Run one aggregation, print the JSON payload and exit
    #[arg(long, value_enum, value_name = "MODE")]
    oneshot: Option<OneshotMode>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OneshotMode {
    Status,
    Schedule,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("nowplaying={},tower_http=trace", cli.log_level)
    } else {
        format!("nowplaying={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting nowplaying v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    if let Some(config_file) = &cli.config {
        std::env::set_var("CONFIG_FILE", config_file);
    }
    let mut config = Config::load()?;

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let fetcher = Arc::new(HttpPageFetcher::from_config(&config.source)?);
    let registry = ChannelRegistry::from_config(&config.channels);
    info!("Registered {} channels", registry.len());

    let service = NowPlayingService::from_config(&config, fetcher, registry)?;

    if let Some(mode) = cli.oneshot {
        let limit = config.web.aggregation_timeout()?;
        let payload = match mode {
            OneshotMode::Status => {
                serde_json::to_string_pretty(&service.get_statuses_within(limit).await)?
            }
            OneshotMode::Schedule => {
                serde_json::to_string_pretty(&service.get_schedule_within(limit).await)?
            }
        };
        println!("{payload}");
        return Ok(());
    }

    let web_server = WebServer::new(config, service)?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
