//! Operator/operand keypad engines.
//!
//! Both engines share the same four-phase machine: idle, operand
//! entry, operator pending, evaluate-and-chain. The scientific engine
//! layers unary functions, a memory register, angle modes, and
//! parenthetical expression entry on top.

pub mod basic;
pub mod scientific;

pub use basic::BasicCalculator;
pub use scientific::{AngleMode, ConstantKey, MemoryOp, ScientificCalculator, UnaryFn};

/// Rounds away accumulated binary-float noise at a fixed number of
/// decimal places before a result is displayed or chained.
#[must_use]
pub fn round_noise(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    ((value + f64::EPSILON) * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_noise_suppresses_float_artifacts() {
        assert_eq!(round_noise(0.1 + 0.2, 8), 0.3);
    }

    #[test]
    fn test_round_noise_preserves_exact_values() {
        assert_eq!(round_noise(42.0, 8), 42.0);
        assert_eq!(round_noise(-2.5, 8), -2.5);
    }

    #[test]
    fn test_round_noise_eleven_places() {
        assert_eq!(round_noise(1.0 / 3.0, 11), 0.33333333333);
    }
}
