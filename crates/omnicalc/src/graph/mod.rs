//! Graphing mode: view window, curve sampling, and scene assembly.

pub mod debounce;
pub mod mapper;
pub mod sampler;
pub mod scene;
pub mod table;
pub mod window;

pub use debounce::RenderDebouncer;
pub use mapper::{CanvasMapper, Point};
pub use sampler::{sample_function, sample_parametric, sample_polar, SampledCurve};
pub use scene::{build_scene, Scene};
pub use table::{function_table, parametric_table, polar_table, TableRow};
pub use window::ViewWindow;

use serde::{Deserialize, Serialize};

/// Number of curve slots per mode
pub const CURVE_SLOTS: usize = 3;

/// Which family of curves is being plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// y = f(x)
    #[default]
    Function,
    /// (x(t), y(t))
    Parametric,
    /// r = f(θ)
    Polar,
}

/// One parametric curve's expression pair
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParametricPair {
    /// x(t)
    pub x: String,
    /// y(t)
    pub y: String,
}

impl ParametricPair {
    /// True when both expressions have been entered
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.x.trim().is_empty() && !self.y.trim().is_empty()
    }
}

/// Expression slots for every plot mode
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionSet {
    /// y1..y3
    pub y: [String; CURVE_SLOTS],
    /// (x1(t), y1(t)) .. (x3(t), y3(t))
    pub parametric: [ParametricPair; CURVE_SLOTS],
    /// r1..r3
    pub r: [String; CURVE_SLOTS],
}

/// Persisted state of the graphing mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphState {
    /// Expression slots
    pub functions: FunctionSet,
    /// Active plot mode
    pub mode: PlotMode,
    /// Visible domain region
    pub window: ViewWindow,
    /// Whether trace mode is on
    pub trace: bool,
    /// Last traced domain point
    pub trace_point: Option<(f64, f64)>,
    /// Editable x column of the function table
    pub table_x: Vec<f64>,
}

impl Default for GraphState {
    fn default() -> Self {
        Self {
            functions: FunctionSet::default(),
            mode: PlotMode::Function,
            window: ViewWindow::default(),
            trace: false,
            trace_point: None,
            table_x: Self::default_table_x(),
        }
    }
}

impl GraphState {
    /// The factory table column: X = 1..=10
    #[must_use]
    pub fn default_table_x() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    /// Creates a fresh graphing state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles trace mode, clearing the marker when turning it off
    pub fn toggle_trace(&mut self) {
        self.trace = !self.trace;
        if !self.trace {
            self.trace_point = None;
        }
    }

    /// Appends a table row continuing from the last x value
    pub fn add_table_row(&mut self) {
        let last = self.table_x.last().copied().unwrap_or(0.0);
        self.table_x.push(last + 1.0);
    }

    /// Removes the last table row; the table never goes below one row
    pub fn remove_table_row(&mut self) -> bool {
        if self.table_x.len() > 1 {
            self.table_x.pop();
            true
        } else {
            false
        }
    }

    /// Restores the factory table column
    pub fn reset_table(&mut self) {
        self.table_x = Self::default_table_x();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let g = GraphState::new();
        assert_eq!(g.mode, PlotMode::Function);
        assert_eq!(g.window, ViewWindow::default());
        assert_eq!(g.table_x, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert!(!g.trace);
    }

    #[test]
    fn test_toggle_trace_clears_marker() {
        let mut g = GraphState::new();
        g.toggle_trace();
        g.trace_point = Some((1.0, 2.0));
        g.toggle_trace();
        assert!(g.trace_point.is_none());
    }

    #[test]
    fn test_table_row_operations() {
        let mut g = GraphState::new();
        g.add_table_row();
        assert_eq!(g.table_x.last(), Some(&11.0));

        assert!(g.remove_table_row());
        assert_eq!(g.table_x.len(), 10);

        g.table_x = vec![5.0];
        assert!(!g.remove_table_row());
        assert_eq!(g.table_x, vec![5.0]);

        g.reset_table();
        assert_eq!(g.table_x.len(), 10);
    }

    #[test]
    fn test_parametric_pair_completeness() {
        let mut p = ParametricPair::default();
        assert!(!p.is_complete());
        p.x = "cos(t)".into();
        assert!(!p.is_complete());
        p.y = "sin(t)".into();
        assert!(p.is_complete());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut g = GraphState::new();
        g.functions.y[0] = "x^2".into();
        g.mode = PlotMode::Polar;
        g.window.zoom(0.8).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: GraphState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
