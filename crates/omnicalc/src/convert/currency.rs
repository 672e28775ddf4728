//! Currency conversion against an externally fetched rate table.
//!
//! Rates are USD-relative. A conversion with no table loaded fails
//! with [`CalcError::RatesUnavailable`] — callers then kick off an
//! asynchronous refresh and retry once it lands. A failed fetch
//! installs a fixed fallback table whose results are flagged
//! approximate on every conversion.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{CalcError, CalcResult};

/// How long a fetched table stays fresh
pub const RATE_TTL: Duration = Duration::from_secs(60 * 60);

/// The base currency all rates are relative to
pub const BASE_CURRENCY: &str = "USD";

/// Hardcoded approximate rates used when the fetch fails
const FALLBACK_RATES: [(&str, f64); 10] = [
    ("USD", 1.0),
    ("EUR", 0.85),
    ("GBP", 0.73),
    ("JPY", 110.0),
    ("CAD", 1.25),
    ("AUD", 1.35),
    ("CHF", 0.92),
    ("CNY", 6.45),
    ("INR", 74.0),
    ("BRL", 5.2),
];

/// A conversion result with its provenance flag.
///
/// `approximate` is true whenever the value came from the fallback
/// table; it is carried on every result so a caller cannot show a
/// stale-rate number without knowing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converted {
    /// The converted amount
    pub value: f64,
    /// True when computed from fallback (approximate) rates
    pub approximate: bool,
}

/// USD-relative rate table with its fetch timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
    /// When the table was obtained
    pub fetched_at: SystemTime,
    /// True for the hardcoded fallback table
    pub approximate: bool,
}

impl RateTable {
    /// Builds a table from freshly fetched rates. The base currency
    /// is always present with rate 1.
    #[must_use]
    pub fn from_rates(mut rates: HashMap<String, f64>, fetched_at: SystemTime) -> Self {
        rates.insert(BASE_CURRENCY.to_string(), 1.0);
        Self {
            rates,
            fetched_at,
            approximate: false,
        }
    }

    /// The fixed fallback table
    #[must_use]
    pub fn fallback(fetched_at: SystemTime) -> Self {
        Self {
            rates: FALLBACK_RATES
                .iter()
                .map(|(code, rate)| ((*code).to_string(), *rate))
                .collect(),
            fetched_at,
            approximate: true,
        }
    }

    /// Rate for a currency code, if known
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Converts through the base currency: `value / rate[from] * rate[to]`
    pub fn convert(&self, value: f64, from: &str, to: &str) -> CalcResult<Converted> {
        let from_rate = self.rate(from).ok_or_else(|| CalcError::UnknownUnit {
            unit: from.to_string(),
            category: "currency".to_string(),
        })?;
        let to_rate = self.rate(to).ok_or_else(|| CalcError::UnknownUnit {
            unit: to.to_string(),
            category: "currency".to_string(),
        })?;

        Ok(Converted {
            value: value / from_rate * to_rate,
            approximate: self.approximate,
        })
    }

    /// True while the table is younger than [`RATE_TTL`]
    #[must_use]
    pub fn is_fresh(&self, now: SystemTime) -> bool {
        now.duration_since(self.fetched_at)
            .map(|age| age < RATE_TTL)
            .unwrap_or(true)
    }
}

/// Source of USD-relative rates
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the full rate map in one attempt
    async fn fetch_rates(&self) -> CalcResult<HashMap<String, f64>>;
}

/// One-hour cache in front of a [`RateSource`].
///
/// The event loop is single-threaded, so the cache does no in-flight
/// coordination: callers ask [`CurrencyCache::needs_refresh`] before
/// starting a fetch and therefore never start two.
#[derive(Debug, Default)]
pub struct CurrencyCache {
    table: Option<RateTable>,
}

impl CurrencyCache {
    /// Creates an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache preloaded with a table (tests, offline use)
    #[must_use]
    pub fn with_table(table: RateTable) -> Self {
        Self { table: Some(table) }
    }

    /// The cached table, if any
    #[must_use]
    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    /// True when a refresh should be started
    #[must_use]
    pub fn needs_refresh(&self, now: SystemTime) -> bool {
        self.table.as_ref().map_or(true, |t| !t.is_fresh(now))
    }

    /// Converts using the cached table; fails with
    /// [`CalcError::RatesUnavailable`] when none is loaded yet.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> CalcResult<Converted> {
        let table = self.table.as_ref().ok_or(CalcError::RatesUnavailable)?;
        table.convert(value, from, to)
    }

    /// Refreshes the table through the source.
    ///
    /// A no-op while the cache is fresh. On fetch failure the fixed
    /// fallback table is installed and flagged approximate; the error
    /// is logged, not returned, so conversion keeps working.
    pub async fn refresh(&mut self, source: &dyn RateSource, now: SystemTime) {
        if !self.needs_refresh(now) {
            debug!("rate table still fresh, skipping refresh");
            return;
        }

        match source.fetch_rates().await {
            Ok(rates) => {
                debug!(count = rates.len(), "rate table refreshed");
                self.table = Some(RateTable::from_rates(rates, now));
            }
            Err(e) => {
                warn!(%e, "rate fetch failed, installing fallback table");
                self.table = Some(RateTable::fallback(now));
            }
        }
    }
}

/// Wire shape of the exchangerate-api `latest` document
#[cfg(any(test, feature = "live-rates"))]
#[derive(Debug, serde::Deserialize)]
struct RateDocument {
    rates: HashMap<String, f64>,
}

/// HTTP rate source against an exchangerate-api-style endpoint
#[cfg(feature = "live-rates")]
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "live-rates")]
impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new("https://api.exchangerate-api.com/v4/latest/USD")
    }
}

#[cfg(feature = "live-rates")]
impl HttpRateSource {
    /// Creates a source for the given endpoint URL
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            url: url.into(),
            client,
        }
    }
}

#[cfg(feature = "live-rates")]
#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self) -> CalcResult<HashMap<String, f64>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CalcError::RateFetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CalcError::RateFetch(format!("HTTP {status}")));
        }

        let doc: RateDocument = resp
            .json()
            .await
            .map_err(|e| CalcError::RateFetch(e.to_string()))?;

        if doc.rates.is_empty() {
            return Err(CalcError::RateFetch("empty rate document".into()));
        }

        Ok(doc.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(HashMap<String, f64>);

    #[async_trait]
    impl RateSource for FixedSource {
        async fn fetch_rates(&self) -> CalcResult<HashMap<String, f64>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RateSource for FailingSource {
        async fn fetch_rates(&self) -> CalcResult<HashMap<String, f64>> {
            Err(CalcError::RateFetch("connection refused".into()))
        }
    }

    fn sample_rates() -> HashMap<String, f64> {
        [("EUR".to_string(), 0.9), ("JPY".to_string(), 150.0)]
            .into_iter()
            .collect()
    }

    // ===== RateTable tests =====

    #[test]
    fn test_from_rates_inserts_base() {
        let table = RateTable::from_rates(sample_rates(), SystemTime::now());
        assert_eq!(table.rate("USD"), Some(1.0));
        assert!(!table.approximate);
    }

    #[test]
    fn test_convert_through_base() {
        let table = RateTable::from_rates(sample_rates(), SystemTime::now());
        // 90 EUR -> 100 USD -> 15000 JPY
        let c = table.convert(90.0, "EUR", "JPY").unwrap();
        assert!((c.value - 15000.0).abs() < 1e-9);
        assert!(!c.approximate);
    }

    #[test]
    fn test_convert_unknown_code() {
        let table = RateTable::from_rates(sample_rates(), SystemTime::now());
        assert!(matches!(
            table.convert(1.0, "XYZ", "USD"),
            Err(CalcError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_fallback_flags_approximate() {
        let table = RateTable::fallback(SystemTime::now());
        let c = table.convert(100.0, "USD", "EUR").unwrap();
        assert!(c.approximate);
        assert!((c.value - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_covers_all_listed_currencies() {
        let table = RateTable::fallback(SystemTime::now());
        for code in crate::convert::units::Category::Currency.units() {
            assert!(table.rate(code).is_some(), "missing fallback rate: {code}");
        }
    }

    #[test]
    fn test_freshness_window() {
        let now = SystemTime::now();
        let table = RateTable::from_rates(sample_rates(), now);
        assert!(table.is_fresh(now));
        assert!(table.is_fresh(now + Duration::from_secs(59 * 60)));
        assert!(!table.is_fresh(now + Duration::from_secs(61 * 60)));
    }

    // ===== CurrencyCache tests =====

    #[test]
    fn test_empty_cache_reports_unavailable() {
        let cache = CurrencyCache::new();
        assert!(matches!(
            cache.convert(1.0, "USD", "EUR"),
            Err(CalcError::RatesUnavailable)
        ));
    }

    #[test]
    fn test_empty_cache_needs_refresh() {
        assert!(CurrencyCache::new().needs_refresh(SystemTime::now()));
    }

    #[tokio::test]
    async fn test_refresh_installs_table() {
        let mut cache = CurrencyCache::new();
        let now = SystemTime::now();
        cache.refresh(&FixedSource(sample_rates()), now).await;

        let c = cache.convert(10.0, "USD", "EUR").unwrap();
        assert!((c.value - 9.0).abs() < 1e-12);
        assert!(!c.approximate);
        assert!(!cache.needs_refresh(now));
    }

    #[tokio::test]
    async fn test_refresh_failure_installs_fallback() {
        let mut cache = CurrencyCache::new();
        cache.refresh(&FailingSource, SystemTime::now()).await;

        let c = cache.convert(100.0, "USD", "JPY").unwrap();
        assert!(c.approximate);
        assert!((c.value - 11000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_refresh_noop_while_fresh() {
        let mut cache = CurrencyCache::new();
        let now = SystemTime::now();
        cache.refresh(&FixedSource(sample_rates()), now).await;
        // a failing source must not clobber a fresh table
        cache.refresh(&FailingSource, now).await;
        assert!(!cache.convert(1.0, "USD", "EUR").unwrap().approximate);
    }

    #[tokio::test]
    async fn test_stale_table_refreshes() {
        let mut cache = CurrencyCache::new();
        let then = SystemTime::now();
        cache.refresh(&FixedSource(sample_rates()), then).await;

        let later = then + Duration::from_secs(2 * 60 * 60);
        assert!(cache.needs_refresh(later));
        cache.refresh(&FailingSource, later).await;
        assert!(cache.convert(1.0, "USD", "EUR").unwrap().approximate);
    }

    #[test]
    fn test_rate_document_parses() {
        let doc: RateDocument =
            serde_json::from_str(r#"{"base":"USD","rates":{"EUR":0.85,"GBP":0.73}}"#).unwrap();
        assert_eq!(doc.rates.len(), 2);
    }
}
