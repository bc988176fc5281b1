use anyhow::Result;
use clap::Parser;
use ddnsd::{Config, DynExchange, SharedConfig, TsigExchange};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Translate HTTP update requests into TSIG signed DNS UPDATEs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the YAML config file.
    #[arg(short, long, default_value = "/etc/ddnsd.conf")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();
    let args = Args::parse();

    let config = config_init(&args.config)?;
    let exchange: DynExchange = Arc::new(TsigExchange::try_from_config(&config)?);

    tracing::info!("Using nameserver {}", &config.nameserver);
    tracing::info!("Listening on {}", config.listen_addr()?);
    let api_server = ddnsd::api::new(config.clone(), exchange)?;
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into())
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ddnsd=info,tower_http=info".into()),
        )
        .init();
}

fn config_init(config_file: &Path) -> Result<SharedConfig> {
    let config = Config::try_from_file(config_file)?;
    tracing::debug!("loaded config from {}", config_file.display());
    Ok(Arc::new(config))
}
