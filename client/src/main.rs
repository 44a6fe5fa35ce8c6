use anyhow::Context;
use catalog::app::AppContext;
use catalog::cli::{self, Cli};
use catalog::config::load_config;
use catalog::constants::env_vars::{CATALOG_CONFIG, CATALOG_STORE};
use catalog::error::AppError;
use catalog::logger::setup_logger;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                Some(app_error) => eprintln!("Error: {}", app_error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.or_else(|| env_path(CATALOG_CONFIG));
    let store_path = cli.store.or_else(|| env_path(CATALOG_STORE));

    let config = load_config(config_path.as_deref())
        .map_err(|e| AppError::Config(e.to_string()))?;
    setup_logger(config.logging()).context("Failed to initialize logger")?;

    let (tx, rx) = mpsc::channel();
    let mut ctx = AppContext::new(&config, store_path, tx)?;

    let result = cli::execute(cli.command, &mut ctx).await;
    drop(ctx);

    // No interactive view to feed: events end up in the log
    for msg in rx.try_iter() {
        log::debug!("Event: {msg:?}");
    }

    if let Err(e) = &result {
        log::error!("Command failed: {e}");
    }
    Ok(result?)
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
