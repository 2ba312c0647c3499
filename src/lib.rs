pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::ConversionRequest;
use crate::cli::interactive::SessionDefaults;
use crate::core::config::AppConfig;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info};

const FALLBACK_FROM_CURRENCY: &str = "USD";
const FALLBACK_TO_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Currencies,
    Latest {
        from: Option<String>,
        to: Option<String>,
        amount: f64,
    },
    Historical {
        from: Option<String>,
        to: Option<String>,
        date: NaiveDate,
        amount: f64,
    },
    Interactive,
}

fn session_defaults(config: &AppConfig, from: Option<String>, to: Option<String>) -> SessionDefaults {
    SessionDefaults {
        from: from
            .or_else(|| config.from_currency.clone())
            .unwrap_or_else(|| FALLBACK_FROM_CURRENCY.to_string()),
        to: to
            .or_else(|| config.to_currency.clone())
            .unwrap_or_else(|| FALLBACK_TO_CURRENCY.to_string()),
    }
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

fn build_service(config: &AppConfig) -> Result<providers::FrankfurterProvider> {
    let frankfurter = config.frankfurter();
    providers::FrankfurterProvider::new(&frankfurter.base_url, frankfurter.timeout())
}

/// Runs a one-shot command and returns what it would print. The interactive
/// session talks to the terminal itself and is rejected here.
pub async fn render_command(command: AppCommand, config_path: Option<&str>) -> Result<String> {
    if command == AppCommand::Interactive {
        bail!("The interactive session has no rendered output");
    }
    let config = load_config(config_path)?;
    let service = build_service(&config)?;

    match command {
        AppCommand::Currencies => cli::currencies::run(&service).await,
        AppCommand::Latest { from, to, amount } => {
            let defaults = session_defaults(&config, from, to);
            let request = ConversionRequest {
                from: defaults.from,
                to: defaults.to,
                amount,
                date: None,
            };
            cli::convert::run(&service, &request).await
        }
        AppCommand::Historical {
            from,
            to,
            date,
            amount,
        } => {
            let defaults = session_defaults(&config, from, to);
            let request = ConversionRequest {
                from: defaults.from,
                to: defaults.to,
                amount,
                date: Some(date),
            };
            cli::convert::run(&service, &request).await
        }
        AppCommand::Interactive => unreachable!("Interactive command is rejected above"),
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("FX converter starting...");

    if command == AppCommand::Interactive {
        let config = load_config(config_path)?;
        let service = build_service(&config)?;
        let defaults = session_defaults(&config, None, None);
        return cli::interactive::run(&service, &defaults).await;
    }

    let output = render_command(command, config_path).await?;
    println!("{output}");
    Ok(())
}
