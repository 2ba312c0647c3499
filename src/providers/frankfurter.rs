use anyhow::Result;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{instrument, warn};

use super::http::{FetchOutcome, fetch};
use crate::core::rates::{CurrencySet, ExchangeRateService, LatestRate};

/// Only the codes matter; a name that is not a string is kept as raw JSON.
fn display_name(value: Value) -> String {
    match value {
        Value::String(name) => name,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Client for the Frankfurter exchange rate API.
pub struct FrankfurterProvider {
    base_url: String,
    client: Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("fxc/1.0")
            .timeout(timeout)
            .build()?;
        Ok(FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetches `url` and decodes a 200 body as `T`. Logs and returns `None`
    /// on any failure.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match fetch(&self.client, url).await {
            FetchOutcome::Success(body) => match serde_json::from_str(&body) {
                Ok(data) => Some(data),
                Err(e) => {
                    warn!(error = %e, "Failed to parse JSON response from {}", url);
                    None
                }
            },
            FetchOutcome::Failure { status, message } => {
                warn!(status, "Request to {} failed: {}", url, message);
                None
            }
        }
    }

    async fn get_rate(&self, url: &str, to: &str) -> Option<f64> {
        let data: RatesResponse = self.get_json(url).await?;
        let rate = data.rates.get(to).copied();
        if rate.is_none() {
            warn!("No rate for {} in response from {}", to, url);
        }
        rate
    }
}

#[async_trait]
impl ExchangeRateService for FrankfurterProvider {
    #[instrument(name = "FrankfurterCurrencies", skip(self))]
    async fn list_currencies(&self) -> Option<CurrencySet> {
        let url = format!("{}/currencies", self.base_url);
        let catalog: BTreeMap<String, Value> = self.get_json(&url).await?;
        Some(
            catalog
                .into_iter()
                .map(|(code, name)| (code, display_name(name)))
                .collect(),
        )
    }

    #[instrument(name = "FrankfurterLatest", skip(self))]
    async fn latest_rate(&self, from: &str, to: &str) -> Option<LatestRate> {
        let url = format!("{}/latest?from={}&to={}", self.base_url, from, to);
        let rate = self.get_rate(&url, to).await?;
        Some(LatestRate {
            date: Local::now().date_naive(),
            rate,
        })
    }

    #[instrument(name = "FrankfurterHistorical", skip(self))]
    async fn historical_rate(&self, from: &str, to: &str, date: NaiveDate) -> Option<f64> {
        let url = format!(
            "{}/{}?from={}&to={}",
            self.base_url,
            date.format("%Y-%m-%d"),
            from,
            to
        );
        self.get_rate(&url, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(mock_server: &MockServer) -> FrankfurterProvider {
        FrankfurterProvider::new(&mock_server.uri(), Duration::from_secs(5))
            .expect("Failed to build provider")
    }

    async fn mount(mock_server: &MockServer, request_path: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(response)
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_list_currencies() {
        let mock_server = MockServer::start().await;
        let body = r#"{"AUD": "Australian Dollar", "EUR": "Euro", "USD": "United States Dollar"}"#;
        mount(
            &mock_server,
            "/currencies",
            ResponseTemplate::new(200).set_body_string(body),
        )
        .await;

        let currencies = provider(&mock_server)
            .list_currencies()
            .await
            .expect("Expected currencies");
        assert_eq!(
            currencies.codes().collect::<Vec<_>>(),
            vec!["AUD", "EUR", "USD"]
        );
        assert_eq!(currencies.name("USD"), Some("United States Dollar"));
    }

    #[tokio::test]
    async fn test_list_currencies_non_string_names() {
        let mock_server = MockServer::start().await;
        let body = r#"{"EUR": "Euro", "XAU": {"name": "Gold"}, "XXX": null, "ZZZ": 7}"#;
        mount(
            &mock_server,
            "/currencies",
            ResponseTemplate::new(200).set_body_string(body),
        )
        .await;

        let currencies = provider(&mock_server)
            .list_currencies()
            .await
            .expect("Expected currencies");
        assert_eq!(
            currencies.codes().collect::<Vec<_>>(),
            vec!["EUR", "XAU", "XXX", "ZZZ"]
        );
        assert_eq!(currencies.name("EUR"), Some("Euro"));
        assert_eq!(currencies.name("XAU"), Some(r#"{"name":"Gold"}"#));
        assert_eq!(currencies.name("XXX"), Some(""));
        assert_eq!(currencies.name("ZZZ"), Some("7"));
    }

    #[tokio::test]
    async fn test_list_currencies_server_error() {
        let mock_server = MockServer::start().await;
        mount(&mock_server, "/currencies", ResponseTemplate::new(500)).await;

        assert!(provider(&mock_server).list_currencies().await.is_none());
    }

    #[tokio::test]
    async fn test_list_currencies_malformed_body() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "/currencies",
            ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
        )
        .await;

        assert!(provider(&mock_server).list_currencies().await.is_none());
    }

    #[tokio::test]
    async fn test_latest_rate_uses_local_today() {
        let mock_server = MockServer::start().await;
        let body = r#"{"amount": 1.0, "base": "USD", "date": "2020-01-02", "rates": {"EUR": 0.9}}"#;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;

        let latest = provider(&mock_server)
            .latest_rate("USD", "EUR")
            .await
            .expect("Expected a rate");
        assert_eq!(latest.rate, 0.9);
        assert_eq!(latest.date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_latest_rate_not_found() {
        let mock_server = MockServer::start().await;
        mount(&mock_server, "/latest", ResponseTemplate::new(404)).await;

        assert!(provider(&mock_server).latest_rate("XXX", "EUR").await.is_none());
    }

    #[tokio::test]
    async fn test_historical_rate() {
        let mock_server = MockServer::start().await;
        let body = r#"{"amount": 1.0, "base": "EUR", "date": "2024-01-02", "rates": {"GBP": 0.86}}"#;
        Mock::given(method("GET"))
            .and(path("/2024-01-02"))
            .and(query_param("from", "EUR"))
            .and(query_param("to", "GBP"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rate = provider(&mock_server)
            .historical_rate("EUR", "GBP", date)
            .await;
        assert_eq!(rate, Some(0.86));
    }

    #[tokio::test]
    async fn test_historical_rate_missing_target_code() {
        let mock_server = MockServer::start().await;
        let body = r#"{"amount": 1.0, "base": "EUR", "date": "2024-01-02", "rates": {"USD": 1.09}}"#;
        mount(
            &mock_server,
            "/2024-01-02",
            ResponseTemplate::new(200).set_body_string(body),
        )
        .await;

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rate = provider(&mock_server)
            .historical_rate("EUR", "GBP", date)
            .await;
        assert!(rate.is_none());
    }

    #[tokio::test]
    async fn test_historical_rate_without_rates_field() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "/2024-01-02",
            ResponseTemplate::new(200).set_body_string(r#"{"message": "not found"}"#),
        )
        .await;

        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(
            provider(&mock_server)
                .historical_rate("EUR", "GBP", date)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "/currencies",
            ResponseTemplate::new(200).set_body_string(r#"{"EUR": "Euro"}"#),
        )
        .await;

        let provider = FrankfurterProvider::new(
            &format!("{}/", mock_server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(provider.list_currencies().await.is_some());
    }

    #[tokio::test]
    async fn test_request_timeout_is_failure() {
        let mock_server = MockServer::start().await;
        mount(
            &mock_server,
            "/currencies",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"EUR": "Euro"}"#)
                .set_delay(Duration::from_secs(2)),
        )
        .await;

        let provider =
            FrankfurterProvider::new(&mock_server.uri(), Duration::from_millis(200)).unwrap();
        assert!(provider.list_currencies().await.is_none());
    }
}
