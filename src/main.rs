use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use toolbox_web::config::Config;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "toolbox-web",
    about = "Multi-tool web backend — AI chat, image links, disposable mailboxes"
)]
struct Cli {
    /// Path to an optional TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Interface to bind (overrides config and HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolbox_web=info,tower_http=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    config.prepare_upload_dir()?;

    let keys = config.provider_keys();
    info!(
        openai = keys.openai.is_some(),
        gemini = keys.gemini.is_some(),
        twilio = config.secrets.twilio.is_configured(),
        "integrations"
    );
    if keys.is_empty() {
        warn!("no LLM provider key set; /api/chat will report a configuration error");
    }

    toolbox_web::web::serve(&config).await
}
