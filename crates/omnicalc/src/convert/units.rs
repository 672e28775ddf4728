//! Linear unit categories and their factor tables.
//!
//! Every linear category has a base unit with factor 1; a conversion
//! goes through the base: `value * factor[from] / factor[to]`.
//! Temperature and currency are handled elsewhere (affine formulas and
//! external rates respectively).

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Conversion categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Base unit: meter
    #[default]
    Length,
    /// Base unit: kilogram
    Weight,
    /// Celsius / Fahrenheit / Kelvin
    Temperature,
    /// Base unit: liter
    Volume,
    /// Base unit: square meter
    Area,
    /// Base unit: second
    Time,
    /// USD-relative rates
    Currency,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Self; 7] = [
        Self::Length,
        Self::Weight,
        Self::Temperature,
        Self::Volume,
        Self::Area,
        Self::Time,
        Self::Currency,
    ];

    /// Human-readable category name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Length => "Length",
            Self::Weight => "Weight",
            Self::Temperature => "Temperature",
            Self::Volume => "Volume",
            Self::Area => "Area",
            Self::Time => "Time",
            Self::Currency => "Currency",
        }
    }

    /// True for categories converted by a linear factor
    #[must_use]
    pub const fn is_linear(&self) -> bool {
        !matches!(self, Self::Temperature | Self::Currency)
    }

    /// Unit keys this category offers
    #[must_use]
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            Self::Length => &[
                "meter",
                "kilometer",
                "centimeter",
                "millimeter",
                "inch",
                "foot",
                "yard",
                "mile",
            ],
            Self::Weight => &["kilogram", "gram", "pound", "ounce", "ton", "stone"],
            Self::Temperature => &["celsius", "fahrenheit", "kelvin"],
            Self::Volume => &[
                "liter",
                "milliliter",
                "gallon",
                "quart",
                "pint",
                "cup",
                "fluid_ounce",
            ],
            Self::Area => &[
                "square_meter",
                "square_kilometer",
                "square_centimeter",
                "square_foot",
                "square_inch",
                "acre",
                "hectare",
            ],
            Self::Time => &["second", "minute", "hour", "day", "week", "month", "year"],
            Self::Currency => &[
                "USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "INR", "BRL",
            ],
        }
    }
}

impl std::str::FromStr for Category {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "length" => Ok(Self::Length),
            "weight" => Ok(Self::Weight),
            "temperature" => Ok(Self::Temperature),
            "volume" => Ok(Self::Volume),
            "area" => Ok(Self::Area),
            "time" => Ok(Self::Time),
            "currency" => Ok(Self::Currency),
            other => Err(CalcError::InvalidInput(format!(
                "Unknown category: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Factor relative to the category's base unit
fn factor(category: Category, unit: &str) -> Option<f64> {
    let f = match (category, unit) {
        (Category::Length, "meter") => 1.0,
        (Category::Length, "kilometer") => 1000.0,
        (Category::Length, "centimeter") => 0.01,
        (Category::Length, "millimeter") => 0.001,
        (Category::Length, "inch") => 0.0254,
        (Category::Length, "foot") => 0.3048,
        (Category::Length, "yard") => 0.9144,
        (Category::Length, "mile") => 1609.344,

        (Category::Weight, "kilogram") => 1.0,
        (Category::Weight, "gram") => 0.001,
        (Category::Weight, "pound") => 0.453592,
        (Category::Weight, "ounce") => 0.0283495,
        (Category::Weight, "ton") => 1000.0,
        (Category::Weight, "stone") => 6.35029,

        (Category::Volume, "liter") => 1.0,
        (Category::Volume, "milliliter") => 0.001,
        (Category::Volume, "gallon") => 3.78541,
        (Category::Volume, "quart") => 0.946353,
        (Category::Volume, "pint") => 0.473176,
        (Category::Volume, "cup") => 0.236588,
        (Category::Volume, "fluid_ounce") => 0.0295735,

        (Category::Area, "square_meter") => 1.0,
        (Category::Area, "square_kilometer") => 1_000_000.0,
        (Category::Area, "square_centimeter") => 0.0001,
        (Category::Area, "square_foot") => 0.092903,
        (Category::Area, "square_inch") => 0.00064516,
        (Category::Area, "acre") => 4046.86,
        (Category::Area, "hectare") => 10000.0,

        (Category::Time, "second") => 1.0,
        (Category::Time, "minute") => 60.0,
        (Category::Time, "hour") => 3600.0,
        (Category::Time, "day") => 86400.0,
        (Category::Time, "week") => 604_800.0,
        (Category::Time, "month") => 2_629_746.0,
        (Category::Time, "year") => 31_556_952.0,

        _ => return None,
    };
    Some(f)
}

/// Converts within a linear category through its base unit
pub fn convert_linear(value: f64, from: &str, to: &str, category: Category) -> CalcResult<f64> {
    if !category.is_linear() {
        return Err(CalcError::InvalidInput(format!(
            "{category} is not a factor-table category"
        )));
    }

    let from_factor = factor(category, from).ok_or_else(|| CalcError::UnknownUnit {
        unit: from.to_string(),
        category: category.name().to_lowercase(),
    })?;
    let to_factor = factor(category, to).ok_or_else(|| CalcError::UnknownUnit {
        unit: to.to_string(),
        category: category.name().to_lowercase(),
    })?;

    Ok(value * from_factor / to_factor)
}
