//! Prompt-driven conversion session.

use super::convert::{self, ConversionRequest};
use super::{input, ui};
use crate::core::{CurrencySet, ExchangeRateService};
use anyhow::Result;
use chrono::Local;
use console::Term;
use tracing::debug;

/// Line-oriented conversation with the user.
pub trait Prompter {
    fn ask(&mut self, prompt: &str) -> Result<String>;
    fn say(&mut self, line: &str) -> Result<()>;
}

impl Prompter for Term {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.write_str(prompt)?;
        Ok(self.read_line()?)
    }

    fn say(&mut self, line: &str) -> Result<()> {
        Ok(self.write_line(line)?)
    }
}

/// Defaults offered when the user leaves a currency prompt blank.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub from: String,
    pub to: String,
}

fn ask_until_valid<T>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<T> {
    loop {
        let answer = prompter.ask(prompt)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => prompter.say(&ui::style_text(&e.to_string(), ui::StyleType::Error))?,
        }
    }
}

fn ask_request(
    prompter: &mut dyn Prompter,
    currencies: &CurrencySet,
    defaults: &SessionDefaults,
) -> Result<ConversionRequest> {
    let amount = ask_until_valid(prompter, "Amount to convert [1.0]: ", |s| {
        input::parse_amount(s, 1.0)
    })?;
    let from = ask_until_valid(
        prompter,
        &format!("From currency [{}]: ", defaults.from),
        |s| {
            let s = if s.trim().is_empty() { defaults.from.as_str() } else { s };
            input::parse_currency(s, currencies)
        },
    )?;
    let to = ask_until_valid(
        prompter,
        &format!("To currency [{}]: ", defaults.to),
        |s| {
            let s = if s.trim().is_empty() { defaults.to.as_str() } else { s };
            input::parse_currency(s, currencies)
        },
    )?;
    let date = ask_until_valid(prompter, "Date YYYY-MM-DD [latest]: ", |s| {
        input::parse_date(s, Local::now().date_naive())
    })?;

    Ok(ConversionRequest {
        from,
        to,
        amount,
        date,
    })
}

/// Runs conversions until the user declines to continue. Failed lookups are
/// reported and the session carries on.
pub async fn run_session(
    service: &dyn ExchangeRateService,
    prompter: &mut dyn Prompter,
    defaults: &SessionDefaults,
) -> Result<()> {
    let currencies = convert::fetch_currencies(service).await?;
    debug!(count = currencies.len(), "Loaded currencies");
    prompter.say(&ui::style_text("FX Converter", ui::StyleType::Title))?;
    prompter.say(&ui::style_text(
        &format!(
            "Supported: {}",
            currencies.codes().collect::<Vec<_>>().join(", ")
        ),
        ui::StyleType::Subtle,
    ))?;

    loop {
        let request = ask_request(prompter, &currencies, defaults)?;
        match convert::convert(service, &currencies, &request).await {
            Ok(result) => prompter.say(&convert::render(&result, request.date.is_some()))?,
            Err(e) => prompter.say(&ui::style_text(&e.to_string(), ui::StyleType::Error))?,
        }

        let again = prompter.ask("Convert another? [y/N]: ")?;
        if !matches!(again.trim().to_lowercase().as_str(), "y" | "yes") {
            return Ok(());
        }
    }
}

pub async fn run(service: &dyn ExchangeRateService, defaults: &SessionDefaults) -> Result<()> {
    let mut term = Term::stdout();
    run_session(service, &mut term, defaults).await
}
