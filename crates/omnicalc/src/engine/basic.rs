//! Basic four-function keypad engine.

use serde::{Deserialize, Serialize};

use crate::engine::round_noise;
use crate::error::{CalcError, CalcResult};
use crate::expr::BinaryOp;
use crate::state::history::History;

/// Decimal places kept when suppressing float noise
const RESULT_DECIMALS: u32 = 8;

/// One-pending-operation keypad state machine.
///
/// The display string is the raw operand store; rendering applies
/// [`crate::format::format_display`] on top. A failed evaluation
/// (division by zero) leaves the display, the stored operand, and the
/// pending operator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicCalculator {
    display: String,
    previous: Option<f64>,
    pending: Option<BinaryOp>,
    waiting_for_operand: bool,
    history: History,
}

impl Default for BasicCalculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            pending: None,
            waiting_for_operand: false,
            history: History::new(),
        }
    }
}

impl BasicCalculator {
    /// Creates an engine in the idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw display string (the current operand)
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Display rendered for presentation
    #[must_use]
    pub fn display_formatted(&self) -> String {
        crate::format::format_display(self.value())
    }

    /// The current operand as a number
    #[must_use]
    pub fn value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    /// The stored first operand, if an operation is pending
    #[must_use]
    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// The pending operator, if any
    #[must_use]
    pub fn pending(&self) -> Option<BinaryOp> {
        self.pending
    }

    /// Calculation history for this engine
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Operators this engine's keypad offers
    #[must_use]
    pub fn supports(op: BinaryOp) -> bool {
        matches!(
            op,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div
        )
    }

    /// Appends a digit to the operand, or starts a new operand after
    /// an operator was pressed
    pub fn press_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if self.waiting_for_operand {
            self.display = digit.to_string();
            self.waiting_for_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push_str(&digit.to_string());
        }
    }

    /// Appends the decimal point (at most one per operand)
    pub fn press_decimal(&mut self) {
        if self.waiting_for_operand {
            self.display = "0.".to_string();
            self.waiting_for_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Removes the last character of the operand
    pub fn backspace(&mut self) {
        if self.waiting_for_operand {
            return;
        }
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
    }

    /// Stores the operator; a second operator press evaluates the
    /// pending chain first
    pub fn press_operator(&mut self, op: BinaryOp) -> CalcResult<()> {
        if !Self::supports(op) {
            return Err(CalcError::InvalidInput(format!(
                "Operator {} is not on this keypad",
                op.symbol()
            )));
        }

        let input = self.value();
        match (self.previous, self.pending) {
            (None, _) => self.previous = Some(input),
            (Some(prev), Some(pending)) => {
                let result = self.evaluate(prev, pending, input)?;
                self.display = result.to_string();
                self.previous = Some(result);
            }
            (Some(_), None) => {}
        }

        self.waiting_for_operand = true;
        self.pending = Some(op);
        Ok(())
    }

    /// Evaluates the pending operation and returns to idle
    pub fn press_equals(&mut self) -> CalcResult<()> {
        let (Some(prev), Some(pending)) = (self.previous, self.pending) else {
            return Ok(());
        };

        let input = self.value();
        let result = self.evaluate(prev, pending, input)?;

        self.display = result.to_string();
        self.previous = None;
        self.pending = None;
        self.waiting_for_operand = true;
        Ok(())
    }

    /// Resets everything except history (the C key)
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.previous = None;
        self.pending = None;
        self.waiting_for_operand = false;
    }

    /// Resets the current operand only (the CE key)
    pub fn clear_entry(&mut self) {
        self.display = "0".to_string();
    }

    /// Negates the operand (no-op on zero)
    pub fn toggle_sign(&mut self) {
        let value = self.value();
        if value != 0.0 {
            self.display = (-value).to_string();
        }
    }

    /// Divides the operand by 100
    pub fn percent(&mut self) {
        self.display = (self.value() / 100.0).to_string();
    }

    /// Applies the operation, rounds, and records history. Touches
    /// nothing but history, and only on success; callers commit the
    /// machine state on Ok.
    fn evaluate(&mut self, prev: f64, op: BinaryOp, input: f64) -> CalcResult<f64> {
        let result = round_noise(op.apply(prev, input)?, RESULT_DECIMALS);
        self.history
            .record(format!("{prev} {} {input} = {result}", op.symbol()));
        Ok(result)
    }
}
