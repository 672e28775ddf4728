//! Scientific keypad engine: unary functions, memory register, angle
//! modes, and parenthetical expression entry on top of the basic
//! operator/operand machine.

use serde::{Deserialize, Serialize};

use crate::engine::round_noise;
use crate::error::{CalcError, CalcResult};
use crate::expr::{BinaryOp, Parser};
use crate::state::history::History;

/// Decimal places kept when suppressing float noise
const RESULT_DECIMALS: u32 = 11;

/// Largest n with a finite f64 factorial
const FACTORIAL_MAX: f64 = 170.0;

/// Angle interpretation for trigonometric keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Degrees
    #[default]
    Deg,
    /// Radians
    Rad,
}

impl AngleMode {
    /// Converts a displayed angle into radians
    #[must_use]
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            Self::Deg => value.to_radians(),
            Self::Rad => value,
        }
    }

    /// Converts a radian result back into the display unit
    #[must_use]
    pub fn from_radians(&self, value: f64) -> f64 {
        match self {
            Self::Deg => value.to_degrees(),
            Self::Rad => value,
        }
    }
}

/// Single-operand function keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFn {
    /// sin
    Sin,
    /// cos
    Cos,
    /// tan
    Tan,
    /// sin⁻¹, domain [-1, 1]
    Asin,
    /// cos⁻¹, domain [-1, 1]
    Acos,
    /// tan⁻¹
    Atan,
    /// Base-10 logarithm, domain (0, ∞)
    Log,
    /// Natural logarithm, domain (0, ∞)
    Ln,
    /// 10^x
    TenPow,
    /// e^x
    Exp,
    /// x²
    Square,
    /// Square root, domain [0, ∞)
    Sqrt,
    /// 1/x, x ≠ 0
    Recip,
    /// Absolute value
    Abs,
    /// n!, integer n in [0, 170]
    Factorial,
}

impl UnaryFn {
    /// Keypad label, used in history lines
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "sin⁻¹",
            Self::Acos => "cos⁻¹",
            Self::Atan => "tan⁻¹",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::TenPow => "10ˣ",
            Self::Exp => "exp",
            Self::Square => "x²",
            Self::Sqrt => "√",
            Self::Recip => "1/x",
            Self::Abs => "|x|",
            Self::Factorial => "n!",
        }
    }

    /// Applies the function with full domain validation
    pub fn apply(&self, value: f64, angle_mode: AngleMode) -> CalcResult<f64> {
        match self {
            Self::Sin => Ok(angle_mode.to_radians(value).sin()),
            Self::Cos => Ok(angle_mode.to_radians(value).cos()),
            Self::Tan => Ok(angle_mode.to_radians(value).tan()),
            Self::Asin => {
                if !(-1.0..=1.0).contains(&value) {
                    return Err(CalcError::InvalidInput(
                        "Invalid input for arcsine".into(),
                    ));
                }
                Ok(angle_mode.from_radians(value.asin()))
            }
            Self::Acos => {
                if !(-1.0..=1.0).contains(&value) {
                    return Err(CalcError::InvalidInput(
                        "Invalid input for arccosine".into(),
                    ));
                }
                Ok(angle_mode.from_radians(value.acos()))
            }
            Self::Atan => Ok(angle_mode.from_radians(value.atan())),
            Self::Log => {
                if value <= 0.0 {
                    return Err(CalcError::InvalidInput(
                        "Invalid input for logarithm".into(),
                    ));
                }
                Ok(value.log10())
            }
            Self::Ln => {
                if value <= 0.0 {
                    return Err(CalcError::InvalidInput(
                        "Invalid input for natural logarithm".into(),
                    ));
                }
                Ok(value.ln())
            }
            Self::TenPow => Ok(10f64.powf(value)),
            Self::Exp => Ok(value.exp()),
            Self::Square => Ok(value * value),
            Self::Sqrt => {
                if value < 0.0 {
                    return Err(CalcError::InvalidInput(
                        "Invalid input for square root".into(),
                    ));
                }
                Ok(value.sqrt())
            }
            Self::Recip => {
                if value == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(1.0 / value)
            }
            Self::Abs => Ok(value.abs()),
            Self::Factorial => factorial(value),
        }
    }
}

/// Memory register keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOp {
    /// MC
    Clear,
    /// MR
    Recall,
    /// M+
    Add,
    /// M−
    Subtract,
}

/// Named constants on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKey {
    /// π
    Pi,
    /// e
    E,
}

fn factorial(n: f64) -> CalcResult<f64> {
    if n < 0.0 || n.fract() != 0.0 || n > FACTORIAL_MAX {
        return Err(CalcError::InvalidInput(
            "Invalid input for factorial".into(),
        ));
    }
    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

/// Scientific keypad state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScientificCalculator {
    display: String,
    previous: Option<f64>,
    pending: Option<BinaryOp>,
    waiting_for_operand: bool,
    memory: f64,
    angle_mode: AngleMode,
    expression: String,
    history: History,
}

impl Default for ScientificCalculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            pending: None,
            waiting_for_operand: false,
            memory: 0.0,
            angle_mode: AngleMode::Deg,
            expression: String::new(),
            history: History::new(),
        }
    }
}

impl ScientificCalculator {
    /// Creates an engine in the idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw display string
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

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Switches the angle mode
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    /// Memory register contents
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// True when the memory indicator should light up
    #[must_use]
    pub fn has_memory(&self) -> bool {
        self.memory != 0.0
    }

    /// Calculation history for this engine
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Pending parenthetical expression text, if any
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Appends a digit to the operand
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
    /// pending chain first. All six operators are on this keypad.
    pub fn press_operator(&mut self, op: BinaryOp) -> CalcResult<()> {
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

    /// Applies a unary function key to the displayed value.
    ///
    /// Domain violations abort without touching the display.
    pub fn press_function(&mut self, func: UnaryFn) -> CalcResult<()> {
        let value = self.value();
        let result = round_noise(func.apply(value, self.angle_mode)?, RESULT_DECIMALS);
        self.history
            .record(format!("{}({value}) = {result}", func.label()));
        self.display = result.to_string();
        self.waiting_for_operand = true;
        Ok(())
    }

    /// Begins the two-operand x^y flow
    pub fn press_pow(&mut self) {
        self.previous = Some(self.value());
        self.pending = Some(BinaryOp::Pow);
        self.waiting_for_operand = true;
    }

    /// Loads a named constant into the display
    pub fn press_constant(&mut self, key: ConstantKey) {
        let value = match key {
            ConstantKey::Pi => std::f64::consts::PI,
            ConstantKey::E => std::f64::consts::E,
        };
        self.display = value.to_string();
        self.waiting_for_operand = true;
    }

    /// Memory register keys
    pub fn press_memory(&mut self, op: MemoryOp) {
        let value = self.value();
        match op {
            MemoryOp::Clear => self.memory = 0.0,
            MemoryOp::Recall => {
                self.display = self.memory.to_string();
                self.waiting_for_operand = true;
            }
            MemoryOp::Add => {
                self.memory += value;
                self.history
                    .record(format!("M+ {value} (Memory: {})", self.memory));
            }
            MemoryOp::Subtract => {
                self.memory -= value;
                self.history
                    .record(format!("M- {value} (Memory: {})", self.memory));
            }
        }
    }

    /// Opens a parenthetical group: the displayed value multiplies
    /// into the buffered expression
    pub fn open_paren(&mut self) {
        self.expression.push_str(&self.display);
        self.expression.push_str("*(");
        self.display = "0".to_string();
        self.waiting_for_operand = true;
    }

    /// Closes the parenthetical group and evaluates the buffer through
    /// the expression parser. A malformed buffer is discarded and the
    /// rest of the machine left unchanged.
    pub fn close_paren(&mut self) -> CalcResult<()> {
        if self.expression.is_empty() {
            return Ok(());
        }

        let mut text = std::mem::take(&mut self.expression);
        text.push_str(&self.display);
        text.push(')');

        let expr = Parser::parse_const(&text)?;
        let raw = expr.eval_const();
        if !raw.is_finite() {
            return Err(CalcError::InvalidExpression(
                "Expression result is not finite".into(),
            ));
        }

        let result = round_noise(raw, RESULT_DECIMALS);
        self.history.record(format!("{text} = {result}"));
        self.display = result.to_string();
        self.waiting_for_operand = true;
        Ok(())
    }

    /// Resets everything except history and memory (the C key)
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.previous = None;
        self.pending = None;
        self.waiting_for_operand = false;
        self.expression.clear();
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

    fn evaluate(&mut self, prev: f64, op: BinaryOp, input: f64) -> CalcResult<f64> {
        let result = round_noise(op.apply(prev, input)?, RESULT_DECIMALS);
        self.history
            .record(format!("{prev} {} {input} = {result}", op.symbol()));
        Ok(result)
    }
}
