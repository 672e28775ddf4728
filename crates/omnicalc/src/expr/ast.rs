//! Expression tree and evaluation.

use std::f64::consts::{E, PI};

/// Binary operator set shared by the expression parser and the
/// operator/operand engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Modulo (%)
    Mod,
    /// Power (^)
    Pow,
}

impl BinaryOp {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "×",
            Self::Div => "÷",
            Self::Mod => "mod",
            Self::Pow => "^",
        }
    }

    /// Returns the precedence level (higher binds tighter)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Pow => 3,
        }
    }

    /// Applies the operator with IEEE semantics; division by zero
    /// yields an infinity or NaN rather than an error.
    #[must_use]
    pub fn eval(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Mod => a % b,
            Self::Pow => a.powf(b),
        }
    }

    /// Applies the operator with an explicit divide-by-zero check, for
    /// the keypad engines where the error must surface to the user.
    pub fn apply(&self, a: f64, b: f64) -> crate::error::CalcResult<f64> {
        match self {
            Self::Div | Self::Mod if b == 0.0 => Err(crate::error::CalcError::DivisionByZero),
            _ => Ok(self.eval(a, b)),
        }
    }
}

/// Named functions available in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine (radians)
    Sin,
    /// Cosine (radians)
    Cos,
    /// Tangent (radians)
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    /// Square root
    Sqrt,
    /// Absolute value
    Abs,
    /// e^x
    Exp,
}

impl Function {
    /// Looks up a function by its (lowercase) name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "log" => Some(Self::Log),
            "ln" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            "exp" => Some(Self::Exp),
            _ => None,
        }
    }

    /// Applies the function. Out-of-domain arguments produce NaN per
    /// IEEE semantics; the plotting layer turns those into gaps.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Log => x.log10(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
            Self::Abs => x.abs(),
            Self::Exp => x.exp(),
        }
    }
}

/// Looks up a named constant (`pi`, `e`)
#[must_use]
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

/// Abstract syntax tree for a parsed expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal (constants fold to this at parse time)
    Number(f64),
    /// The single free variable
    Variable,
    /// Unary negation
    Negate(Box<Expr>),
    /// Binary operation
    Binary {
        /// Left operand
        lhs: Box<Expr>,
        /// Operator
        op: BinaryOp,
        /// Right operand
        rhs: Box<Expr>,
    },
    /// Function application
    Call {
        /// The function
        func: Function,
        /// Its argument
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Creates a number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a binary node
    #[must_use]
    pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Self {
        Self::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Creates a negation node
    #[must_use]
    pub fn negate(inner: Expr) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a function-call node
    #[must_use]
    pub fn call(func: Function, arg: Expr) -> Self {
        Self::Call {
            func,
            arg: Box::new(arg),
        }
    }

    /// Evaluates the tree with the free variable bound to `x`.
    ///
    /// Arithmetic follows IEEE rules: division by zero and domain
    /// violations produce non-finite values instead of errors, which
    /// the plot sampler treats as segment breaks.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Variable => x,
            Self::Negate(inner) => -inner.eval(x),
            Self::Binary { lhs, op, rhs } => op.eval(lhs.eval(x), rhs.eval(x)),
            Self::Call { func, arg } => func.apply(arg.eval(x)),
        }
    }

    /// Evaluates a variable-free tree
    #[must_use]
    pub fn eval_const(&self) -> f64 {
        self.eval(0.0)
    }
}
