//! The persisted application record.

pub mod history;
pub mod store;

pub use history::{History, HistoryEntry};
pub use store::{JsonFileStore, MemoryStore, StateStore};

use serde::{Deserialize, Serialize};

use crate::convert::ConversionState;
use crate::engine::{BasicCalculator, ScientificCalculator};
use crate::graph::GraphState;

/// The four calculator modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Four-function keypad
    #[default]
    Basic,
    /// Scientific keypad
    Scientific,
    /// Function plotter
    Graphing,
    /// Unit and currency conversion
    Conversion,
}

impl Mode {
    /// Every mode, in tab order
    pub const ALL: [Self; 4] = [
        Self::Basic,
        Self::Scientific,
        Self::Graphing,
        Self::Conversion,
    ];

    /// Tab label
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Scientific => "scientific",
            Self::Graphing => "graphing",
            Self::Conversion => "conversion",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The single serialized record: the active mode plus every mode's
/// field set. Unknown or missing fields deserialize to defaults, so
/// records written by older versions still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Currently visible mode
    pub active: Mode,
    /// Basic keypad state
    pub basic: BasicCalculator,
    /// Scientific keypad state
    pub scientific: ScientificCalculator,
    /// Graphing state
    pub graphing: GraphState,
    /// Conversion state
    pub conversion: ConversionState,
}

impl AppState {
    /// Creates the factory-default record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
