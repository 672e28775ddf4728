//! Omnicalc — multi-mode calculator engine.
//!
//! Four modes behind one persisted record: a basic four-function
//! keypad, a scientific keypad (memory register, angle modes, domain-
//! checked functions), a function/parametric/polar plotter, and a
//! unit/currency converter with a one-hour rate cache.
//!
//! Expressions go through a real tokenizer and recursive-descent
//! parser ([`expr`]); the plotter samples one point per pixel column
//! and splits polylines at non-finite samples ([`graph`]); state
//! persists through an injected storage port ([`state::StateStore`]).
//!
//! # Example
//!
//! ```rust
//! use omnicalc::prelude::*;
//!
//! // Evaluate an expression
//! let expr = Parser::parse("2(x+1)", Some("x")).unwrap();
//! assert_eq!(expr.eval(3.0), 8.0);
//!
//! // Drive the basic keypad
//! let mut calc = BasicCalculator::new();
//! calc.press_digit(6);
//! calc.press_operator(BinaryOp::Mul).unwrap();
//! calc.press_digit(7);
//! calc.press_equals().unwrap();
//! assert_eq!(calc.display(), "42");
//!
//! // Convert units
//! let converter = UnitConverter::new();
//! let km = converter
//!     .convert(1.0, "mile", "kilometer", Category::Length)
//!     .unwrap();
//! assert!((km.value - 1.609344).abs() < 1e-9);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod app;
pub mod convert;
pub mod engine;
pub mod error;
pub mod expr;
pub mod format;
pub mod graph;
pub mod state;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::App;
    pub use crate::convert::{
        Category, ConversionState, Converted, CurrencyCache, RateSource, RateTable, UnitConverter,
    };
    pub use crate::engine::{
        AngleMode, BasicCalculator, MemoryOp, ScientificCalculator, UnaryFn,
    };
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::expr::{BinaryOp, Expr, Parser};
    pub use crate::graph::{
        build_scene, CanvasMapper, GraphState, PlotMode, Point, RenderDebouncer, Scene,
        ViewWindow,
    };
    pub use crate::state::{AppState, History, JsonFileStore, MemoryStore, Mode, StateStore};

    #[cfg(feature = "live-rates")]
    pub use crate::convert::HttpRateSource;
}
