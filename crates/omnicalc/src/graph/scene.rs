//! Surface-agnostic scene assembly.
//!
//! The scene is a plain draw list in canvas coordinates: grid lines,
//! axes, tick labels, curve polylines, and an optional trace marker.
//! Any renderer (canvas, terminal, test harness) can consume it
//! without this crate knowing how pixels get painted.

use tracing::warn;

use crate::expr::Parser;
use crate::graph::mapper::{CanvasMapper, Point};
use crate::graph::sampler::{sample_function, sample_parametric, sample_polar, SampledCurve};
use crate::graph::{GraphState, PlotMode, CURVE_SLOTS};

/// Per-slot curve colors (slot 1 red, 2 green, 3 blue)
pub const CURVE_COLORS: [&str; CURVE_SLOTS] = ["#ff0000", "#00ff00", "#0000ff"];

/// A straight line in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point
    pub from: Point,
    /// End point
    pub to: Point,
}

/// A tick label anchored at a canvas position
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    /// Label text
    pub text: String,
    /// Anchor position
    pub at: Point,
}

/// One curve's renderable polylines
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Stroke color
    pub color: &'static str,
    /// Disjoint polylines in canvas coordinates (each has ≥ 2 points)
    pub polylines: Vec<Vec<Point>>,
}

/// The trace-point marker and its coordinate label
#[derive(Debug, Clone, PartialEq)]
pub struct TraceMarker {
    /// Marker position in canvas coordinates
    pub at: Point,
    /// Coordinate label, e.g. `(1.500, 2.250)`
    pub label: String,
}

/// Complete draw list for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Unit-interval grid lines
    pub grid: Vec<Line>,
    /// Axis lines through the origin (when visible)
    pub axes: Vec<Line>,
    /// Integer tick labels (zero skipped)
    pub labels: Vec<TickLabel>,
    /// Curves in slot order
    pub curves: Vec<Curve>,
    /// Trace marker, when trace mode is on
    pub trace: Option<TraceMarker>,
}

/// Builds the draw list for the graph state on a width×height canvas.
///
/// Slots whose expressions are empty are skipped; slots that fail to
/// parse are skipped with a warning, leaving the other curves intact.
#[must_use]
pub fn build_scene(state: &GraphState, width: u32, height: u32) -> Scene {
    let mapper = CanvasMapper::new(&state.window, width, height);

    let mut scene = Scene {
        grid: grid_lines(state, &mapper),
        axes: axis_lines(state, &mapper),
        labels: tick_labels(state, &mapper),
        ..Scene::default()
    };

    for (slot, sampled) in sample_slots(state, &mapper) {
        let polylines: Vec<Vec<Point>> = sampled
            .segments
            .into_iter()
            .filter(|seg| seg.len() >= 2)
            .map(|seg| seg.into_iter().map(|p| mapper.to_canvas(p)).collect())
            .collect();
        if !polylines.is_empty() {
            scene.curves.push(Curve {
                color: CURVE_COLORS[slot],
                polylines,
            });
        }
    }

    if state.trace {
        if let Some((x, y)) = state.trace_point {
            scene.trace = Some(TraceMarker {
                at: mapper.to_canvas(Point::new(x, y)),
                label: format!("({x:.3}, {y:.3})"),
            });
        }
    }

    scene
}

/// Samples every populated slot of the active mode
fn sample_slots(state: &GraphState, mapper: &CanvasMapper) -> Vec<(usize, SampledCurve)> {
    let mut out = Vec::new();

    for slot in 0..CURVE_SLOTS {
        let sampled = match state.mode {
            PlotMode::Function => {
                let text = &state.functions.y[slot];
                if text.trim().is_empty() {
                    continue;
                }
                match Parser::parse(text, Some("x")) {
                    Ok(expr) => sample_function(&expr, &state.window, mapper.width),
                    Err(e) => {
                        warn!(slot, %e, "skipping unparsable function");
                        continue;
                    }
                }
            }
            PlotMode::Parametric => {
                let pair = &state.functions.parametric[slot];
                if !pair.is_complete() {
                    continue;
                }
                let parsed = Parser::parse(&pair.x, Some("t"))
                    .and_then(|x| Parser::parse(&pair.y, Some("t")).map(|y| (x, y)));
                match parsed {
                    Ok((x, y)) => sample_parametric(&x, &y, mapper),
                    Err(e) => {
                        warn!(slot, %e, "skipping unparsable parametric pair");
                        continue;
                    }
                }
            }
            PlotMode::Polar => {
                let text = &state.functions.r[slot];
                if text.trim().is_empty() {
                    continue;
                }
                match Parser::parse(text, Some("theta")) {
                    Ok(expr) => sample_polar(&expr, mapper),
                    Err(e) => {
                        warn!(slot, %e, "skipping unparsable polar curve");
                        continue;
                    }
                }
            }
        };
        out.push((slot, sampled));
    }

    out
}

fn grid_lines(state: &GraphState, mapper: &CanvasMapper) -> Vec<Line> {
    let w = &state.window;
    let mut lines = Vec::new();

    let mut x = w.xmin.ceil();
    while x <= w.xmax.floor() {
        let cx = mapper.to_canvas(Point::new(x, 0.0)).x;
        lines.push(Line {
            from: Point::new(cx, 0.0),
            to: Point::new(cx, f64::from(mapper.height)),
        });
        x += 1.0;
    }

    let mut y = w.ymin.ceil();
    while y <= w.ymax.floor() {
        let cy = mapper.to_canvas(Point::new(0.0, y)).y;
        lines.push(Line {
            from: Point::new(0.0, cy),
            to: Point::new(f64::from(mapper.width), cy),
        });
        y += 1.0;
    }

    lines
}

fn axis_lines(state: &GraphState, mapper: &CanvasMapper) -> Vec<Line> {
    let w = &state.window;
    let mut axes = Vec::new();

    if (w.xmin..=w.xmax).contains(&0.0) {
        axes.push(Line {
            from: Point::new(mapper.origin_x, 0.0),
            to: Point::new(mapper.origin_x, f64::from(mapper.height)),
        });
    }
    if (w.ymin..=w.ymax).contains(&0.0) {
        axes.push(Line {
            from: Point::new(0.0, mapper.origin_y),
            to: Point::new(f64::from(mapper.width), mapper.origin_y),
        });
    }

    axes
}

fn tick_labels(state: &GraphState, mapper: &CanvasMapper) -> Vec<TickLabel> {
    let w = &state.window;
    let mut labels = Vec::new();

    let mut x = w.xmin.ceil();
    while x <= w.xmax.floor() {
        if x != 0.0 {
            let cx = mapper.to_canvas(Point::new(x, 0.0)).x;
            let label_y = mapper.origin_y + 15.0;
            if label_y >= 0.0 && label_y <= f64::from(mapper.height) {
                labels.push(TickLabel {
                    text: format!("{x}"),
                    at: Point::new(cx, label_y),
                });
            }
        }
        x += 1.0;
    }

    let mut y = w.ymin.ceil();
    while y <= w.ymax.floor() {
        if y != 0.0 {
            let cy = mapper.to_canvas(Point::new(0.0, y)).y;
            let label_x = mapper.origin_x - 5.0;
            if label_x >= 0.0 && label_x <= f64::from(mapper.width) {
                labels.push(TickLabel {
                    text: format!("{y}"),
                    at: Point::new(label_x, cy + 3.0),
                });
            }
        }
        y += 1.0;
    }

    labels
}
