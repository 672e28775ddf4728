//! Temperature conversion via the Celsius pivot.

use crate::error::{CalcError, CalcResult};

fn unknown(unit: &str) -> CalcError {
    CalcError::UnknownUnit {
        unit: unit.to_string(),
        category: "temperature".to_string(),
    }
}

fn to_celsius(value: f64, unit: &str) -> CalcResult<f64> {
    match unit {
        "celsius" => Ok(value),
        "fahrenheit" => Ok((value - 32.0) * 5.0 / 9.0),
        "kelvin" => Ok(value - 273.15),
        other => Err(unknown(other)),
    }
}

fn from_celsius(celsius: f64, unit: &str) -> CalcResult<f64> {
    match unit {
        "celsius" => Ok(celsius),
        "fahrenheit" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "kelvin" => Ok(celsius + 273.15),
        other => Err(unknown(other)),
    }
}

/// Converts between celsius, fahrenheit, and kelvin.
///
/// Both units are validated even when equal, so a typo'd unit never
/// silently passes through.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    let celsius = to_celsius(value, from)?;
    from_celsius(celsius, to)
}
