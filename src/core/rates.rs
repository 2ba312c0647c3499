//! Exchange rate service abstractions

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Currency codes supported by a rate service, mapped to display names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencySet {
    names: BTreeMap<String, String>,
}

impl CurrencySet {
    pub fn new(names: BTreeMap<String, String>) -> Self {
        Self { names }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for CurrencySet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Latest rate, dated with the caller's local today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestRate {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Remote source of currencies and conversion rates.
///
/// Every operation returns `None` when the rate is not available, whatever the
/// cause (transport error, non-200 status, undecodable body, missing code).
#[async_trait]
pub trait ExchangeRateService: Send + Sync {
    async fn list_currencies(&self) -> Option<CurrencySet>;

    async fn latest_rate(&self, from: &str, to: &str) -> Option<LatestRate>;

    async fn historical_rate(&self, from: &str, to: &str, date: NaiveDate) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_set_lookup() {
        let set: CurrencySet = [
            ("USD".to_string(), "United States Dollar".to_string()),
            ("EUR".to_string(), "Euro".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains("USD"));
        assert!(!set.contains("usd"));
        assert_eq!(set.name("EUR"), Some("Euro"));
        assert_eq!(set.codes().collect::<Vec<_>>(), vec!["EUR", "USD"]);
    }
}
