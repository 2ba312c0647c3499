use super::{input, ui};
use crate::core::{ConversionResult, CurrencySet, ExchangeRateService};
use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};
use tracing::debug;

/// A conversion request as collected from the user, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
    /// `None` asks for the latest rate.
    pub date: Option<NaiveDate>,
}

pub async fn fetch_currencies(service: &dyn ExchangeRateService) -> Result<CurrencySet> {
    let spinner = ui::new_spinner("Fetching currencies...");
    let currencies = service.list_currencies().await;
    spinner.finish_and_clear();
    currencies.ok_or_else(|| anyhow!("Error fetching currencies. Please try again later."))
}

pub async fn latest_conversion(
    service: &dyn ExchangeRateService,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<ConversionResult> {
    let latest = service
        .latest_rate(from, to)
        .await
        .ok_or_else(|| anyhow!("Error fetching the latest conversion rate."))?;
    Ok(ConversionResult::new(latest.date, from, to, latest.rate, amount))
}

pub async fn historical_conversion(
    service: &dyn ExchangeRateService,
    from: &str,
    to: &str,
    date: NaiveDate,
    amount: f64,
) -> Result<ConversionResult> {
    let rate = service
        .historical_rate(from, to, date)
        .await
        .ok_or_else(|| anyhow!("Error fetching the historical conversion rate."))?;
    Ok(ConversionResult::new(date, from, to, rate, amount))
}

/// Validates `request` against the supported currencies and today's date, then
/// fetches the matching rate.
pub async fn convert(
    service: &dyn ExchangeRateService,
    currencies: &CurrencySet,
    request: &ConversionRequest,
) -> Result<ConversionResult> {
    let amount = input::validate_amount(request.amount)?;
    let from = input::parse_currency(&request.from, currencies)?;
    let to = input::parse_currency(&request.to, currencies)?;
    let date = request
        .date
        .map(|date| input::validate_date(date, Local::now().date_naive()))
        .transpose()?;
    debug!(?request, "Converting");

    let spinner = ui::new_spinner("Fetching conversion rate...");
    let result = match date {
        Some(date) => historical_conversion(service, &from, &to, date, amount).await,
        None => latest_conversion(service, &from, &to, amount).await,
    };
    spinner.finish_and_clear();
    result
}

pub fn render(result: &ConversionResult, historical: bool) -> String {
    let title = if historical {
        "Historical Conversion Rate"
    } else {
        "Latest Conversion Rate"
    };
    format!(
        "{}\n\n{}",
        ui::style_text(title, ui::StyleType::Title),
        ui::style_text(&result.to_string(), ui::StyleType::Result)
    )
}

/// Runs one conversion and returns the rendered output.
pub async fn run(service: &dyn ExchangeRateService, request: &ConversionRequest) -> Result<String> {
    let currencies = fetch_currencies(service).await?;
    let result = convert(service, &currencies, request).await?;
    Ok(render(&result, request.date.is_some()))
}
