//! Value tables for the graphing mode.

use crate::expr::{Expr, Parser};
use crate::graph::{FunctionSet, GraphState, CURVE_SLOTS};

/// One table row: the input column plus one cell per curve column.
/// `None` marks an empty slot, a parse failure, or a non-finite value.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// The x / t / θ input value (θ in degrees)
    pub input: f64,
    /// Curve columns in slot order
    pub cells: Vec<Option<f64>>,
}

fn parse_slot(text: &str, var: &str) -> Option<Expr> {
    if text.trim().is_empty() {
        return None;
    }
    Parser::parse(text, Some(var)).ok()
}

fn eval_cell(expr: Option<&Expr>, at: f64) -> Option<f64> {
    let value = expr?.eval(at);
    value.is_finite().then_some(value)
}

/// Function-mode table: one row per entry of the editable x column,
/// one cell per y slot.
#[must_use]
pub fn function_table(state: &GraphState) -> Vec<TableRow> {
    let exprs = parse_y_slots(&state.functions);

    state
        .table_x
        .iter()
        .map(|&x| TableRow {
            input: x,
            cells: exprs.iter().map(|e| eval_cell(e.as_ref(), x)).collect(),
        })
        .collect()
}

/// Parametric-mode table: t over [-5, 5] step 1, with interleaved
/// (x, y) cells per slot.
#[must_use]
pub fn parametric_table(state: &GraphState) -> Vec<TableRow> {
    let exprs: Vec<(Option<Expr>, Option<Expr>)> = state
        .functions
        .parametric
        .iter()
        .map(|pair| (parse_slot(&pair.x, "t"), parse_slot(&pair.y, "t")))
        .collect();

    (-5..=5)
        .map(|t| {
            let t = f64::from(t);
            let mut cells = Vec::with_capacity(CURVE_SLOTS * 2);
            for (x_expr, y_expr) in &exprs {
                cells.push(eval_cell(x_expr.as_ref(), t));
                cells.push(eval_cell(y_expr.as_ref(), t));
            }
            TableRow { input: t, cells }
        })
        .collect()
}

/// Polar-mode table: θ over [0°, 360°] in 30° steps, one r cell per
/// slot. The input column carries degrees; evaluation uses radians.
#[must_use]
pub fn polar_table(state: &GraphState) -> Vec<TableRow> {
    let exprs: Vec<Option<Expr>> = state
        .functions
        .r
        .iter()
        .map(|text| parse_slot(text, "theta"))
        .collect();

    (0..=12)
        .map(|step| {
            let degrees = f64::from(step * 30);
            let theta = degrees.to_radians();
            TableRow {
                input: degrees,
                cells: exprs.iter().map(|e| eval_cell(e.as_ref(), theta)).collect(),
            }
        })
        .collect()
}

fn parse_y_slots(functions: &FunctionSet) -> Vec<Option<Expr>> {
    functions
        .y
        .iter()
        .map(|text| parse_slot(text, "x"))
        .collect()
}
