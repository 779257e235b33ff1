use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use wordbook_lib::dictionary::DictionaryClient;
use wordbook_lib::server::{self, ServerState};
use wordbook_lib::storage::FileStorage;
use wordbook_lib::Config;

#[derive(Parser)]
#[command(name = "wordbook", about = "Wordbook HTTP API server", version)]
struct Args {
    /// Config file (default: <config dir>/wordbook/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the listen address, e.g. 127.0.0.1:3000
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let data_dir = config.data_dir().context("Failed to get data directory")?;
    let storage = FileStorage::new(data_dir.clone());
    storage.init().context("Failed to initialize storage")?;
    log::info!("Using data directory {}", data_dir.display());

    let dictionary = DictionaryClient::new(&config.dictionary.base_url, config.dictionary.timeout())
        .context("Failed to create dictionary client")?;

    let state = ServerState::new(Arc::new(Mutex::new(storage)), Arc::new(dictionary));
    let mut server = server::start_server(&config.server, state)
        .await
        .map_err(|e| anyhow!("Failed to start server: {}", e))?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    server.stop().await;

    Ok(())
}
