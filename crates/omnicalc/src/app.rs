//! The application context: the state record, the injected storage
//! port, and the tab controller.

use tracing::debug;

use crate::error::CalcResult;
use crate::state::{AppState, Mode, StateStore};

/// Owns the [`AppState`] and persists it through an injected
/// [`StateStore`].
///
/// Mutating accessors hand out the mode states directly; callers make
/// their edits and then [`App::commit`], mirroring the save-on-every-
/// mutation discipline of the UI event handlers. [`App::switch_mode`]
/// commits on its own since tab switches are single-step.
pub struct App {
    state: AppState,
    store: Box<dyn StateStore>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").field("state", &self.state).finish()
    }
}

impl App {
    /// Loads the saved record through the store, or starts from
    /// factory defaults when none exists.
    pub fn new(store: Box<dyn StateStore>) -> CalcResult<Self> {
        let state = match store.load()? {
            Some(state) => state,
            None => {
                debug!("no saved state, starting fresh");
                AppState::new()
            }
        };
        Ok(Self { state, store })
    }

    /// Creates an app with explicit state (tests, imports)
    #[must_use]
    pub fn with_state(state: AppState, store: Box<dyn StateStore>) -> Self {
        Self { state, store }
    }

    /// The currently visible mode
    #[must_use]
    pub fn active(&self) -> Mode {
        self.state.active
    }

    /// Switches the visible mode and persists the record
    pub fn switch_mode(&mut self, mode: Mode) -> CalcResult<()> {
        self.state.active = mode;
        self.commit()
    }

    /// Read access to the whole record
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Basic keypad state
    pub fn basic_mut(&mut self) -> &mut crate::engine::BasicCalculator {
        &mut self.state.basic
    }

    /// Scientific keypad state
    pub fn scientific_mut(&mut self) -> &mut crate::engine::ScientificCalculator {
        &mut self.state.scientific
    }

    /// Graphing state
    pub fn graphing_mut(&mut self) -> &mut crate::graph::GraphState {
        &mut self.state.graphing
    }

    /// Conversion state
    pub fn conversion_mut(&mut self) -> &mut crate::convert::ConversionState {
        &mut self.state.conversion
    }

    /// Persists the record through the store
    pub fn commit(&self) -> CalcResult<()> {
        self.store.save(&self.state)
    }
}
