//! Unit and currency conversion.

pub mod currency;
pub mod temperature;
pub mod units;

pub use currency::{Converted, CurrencyCache, RateSource, RateTable, RATE_TTL};
pub use temperature::convert_temperature;
pub use units::{convert_linear, Category};

#[cfg(feature = "live-rates")]
pub use currency::HttpRateSource;

use serde::{Deserialize, Serialize};

use crate::error::CalcResult;
use crate::format::format_result;
use crate::state::history::History;

/// Conversion dispatcher across all categories.
///
/// Linear and temperature categories convert immediately; currency
/// goes through the one-hour rate cache and surfaces
/// [`crate::error::CalcError::RatesUnavailable`] until rates land.
#[derive(Debug, Default)]
pub struct UnitConverter {
    currency: CurrencyCache,
}

impl UnitConverter {
    /// Creates a converter with an empty currency cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with a preloaded rate table
    #[must_use]
    pub fn with_rates(table: RateTable) -> Self {
        Self {
            currency: CurrencyCache::with_table(table),
        }
    }

    /// The currency cache, for refresh scheduling
    #[must_use]
    pub fn currency(&self) -> &CurrencyCache {
        &self.currency
    }

    /// Mutable access to the currency cache (refresh installs here)
    pub fn currency_mut(&mut self) -> &mut CurrencyCache {
        &mut self.currency
    }

    /// Converts a value between two units of a category.
    ///
    /// The `approximate` flag on the result is set only when fallback
    /// currency rates produced the number.
    pub fn convert(
        &self,
        value: f64,
        from: &str,
        to: &str,
        category: Category,
    ) -> CalcResult<Converted> {
        match category {
            Category::Temperature => Ok(Converted {
                value: convert_temperature(value, from, to)?,
                approximate: false,
            }),
            Category::Currency => self.currency.convert(value, from, to),
            linear => Ok(Converted {
                value: convert_linear(value, from, to, linear)?,
                approximate: false,
            }),
        }
    }
}

/// Persisted state of the conversion mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionState {
    /// Selected category
    pub category: Category,
    /// Source unit key
    pub from_unit: String,
    /// Target unit key
    pub to_unit: String,
    /// Source field text
    pub from_value: String,
    /// Target field text
    pub to_value: String,
    /// Conversion history (cap 50)
    pub history: History,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self {
            category: Category::Length,
            from_unit: String::new(),
            to_unit: String::new(),
            from_value: String::new(),
            to_value: String::new(),
            history: History::new(),
        }
    }
}

impl ConversionState {
    /// Creates a fresh conversion state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches category and drops the now-invalid unit selections
    pub fn set_category(&mut self, category: Category) {
        if category != self.category {
            self.category = category;
            self.from_unit.clear();
            self.to_unit.clear();
            self.from_value.clear();
            self.to_value.clear();
        }
    }

    /// Exchanges the from/to units and their field values
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        std::mem::swap(&mut self.from_value, &mut self.to_value);
    }

    /// Records a completed conversion in the history
    pub fn record(&mut self, value: f64, result: &Converted) {
        let flag = if result.approximate { " (approx.)" } else { "" };
        self.history.record(format!(
            "{value} {} = {} {}{flag}",
            self.from_unit,
            format_result(result.value),
            self.to_unit,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use std::time::SystemTime;

    // ===== UnitConverter dispatch tests =====

    #[test]
    fn test_linear_dispatch() {
        let conv = UnitConverter::new();
        let c = conv
            .convert(1.0, "kilometer", "meter", Category::Length)
            .unwrap();
        assert_eq!(c.value, 1000.0);
        assert!(!c.approximate);
    }

    #[test]
    fn test_temperature_dispatch() {
        let conv = UnitConverter::new();
        let c = conv
            .convert(0.0, "celsius", "fahrenheit", Category::Temperature)
            .unwrap();
        assert_eq!(c.value, 32.0);
    }

    #[test]
    fn test_currency_without_rates_is_unavailable() {
        let conv = UnitConverter::new();
        let result = conv.convert(100.0, "USD", "EUR", Category::Currency);
        assert!(matches!(result, Err(CalcError::RatesUnavailable)));
    }

    #[test]
    fn test_currency_with_fallback_rates_flags_approximate() {
        let conv = UnitConverter::with_rates(RateTable::fallback(SystemTime::now()));
        let c = conv.convert(100.0, "USD", "EUR", Category::Currency).unwrap();
        assert!(c.approximate);
        assert_eq!(c.value, 85.0);
    }

    // ===== ConversionState tests =====

    #[test]
    fn test_set_category_clears_selections() {
        let mut state = ConversionState::new();
        state.from_unit = "meter".into();
        state.to_unit = "foot".into();
        state.from_value = "5".into();

        state.set_category(Category::Weight);
        assert!(state.from_unit.is_empty());
        assert!(state.to_unit.is_empty());
        assert!(state.from_value.is_empty());
    }

    #[test]
    fn test_set_same_category_keeps_selections() {
        let mut state = ConversionState::new();
        state.from_unit = "meter".into();
        state.set_category(Category::Length);
        assert_eq!(state.from_unit, "meter");
    }

    #[test]
    fn test_swap() {
        let mut state = ConversionState::new();
        state.from_unit = "meter".into();
        state.to_unit = "foot".into();
        state.from_value = "5".into();
        state.to_value = "16.4".into();

        state.swap();
        assert_eq!(state.from_unit, "foot");
        assert_eq!(state.to_unit, "meter");
        assert_eq!(state.from_value, "16.4");
        assert_eq!(state.to_value, "5");
    }

    #[test]
    fn test_record_plain() {
        let mut state = ConversionState::new();
        state.from_unit = "meter".into();
        state.to_unit = "foot".into();
        state.record(
            5.0,
            &Converted {
                value: 16.404199475,
                approximate: false,
            },
        );
        let line = &state.history.last().unwrap().text;
        assert!(line.starts_with("5 meter = 16.404"));
        assert!(!line.contains("approx"));
    }

    #[test]
    fn test_record_approximate_is_flagged() {
        let mut state = ConversionState::new();
        state.category = Category::Currency;
        state.from_unit = "USD".into();
        state.to_unit = "EUR".into();
        state.record(
            100.0,
            &Converted {
                value: 85.0,
                approximate: true,
            },
        );
        assert!(state.history.last().unwrap().text.ends_with("(approx.)"));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut state = ConversionState::new();
        state.category = Category::Time;
        state.from_unit = "hour".into();
        let json = serde_json::to_string(&state).unwrap();
        let back: ConversionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
