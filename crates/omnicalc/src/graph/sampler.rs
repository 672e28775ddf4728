//! Curve sampling for the three plot modes.
//!
//! Samples are produced in domain space and grouped into segments; a
//! non-finite result (or, for parametric and polar curves, a sample
//! far outside the canvas) ends the current segment so the renderer
//! draws a gap instead of a connecting line.

use std::f64::consts::PI;

use crate::expr::Expr;
use crate::graph::mapper::{CanvasMapper, Point};
use crate::graph::window::ViewWindow;

/// Parameter range for parametric curves
pub const PARAM_T_MIN: f64 = -10.0;
/// Parameter range for parametric curves
pub const PARAM_T_MAX: f64 = 10.0;
/// Parameter step for parametric curves
pub const PARAM_T_STEP: f64 = 0.1;

/// Polar angle step: one degree
pub const POLAR_THETA_STEP: f64 = PI / 180.0;

/// Off-canvas margin, in pixels, before a sample breaks its segment
pub const OFFSCREEN_MARGIN: f64 = 50.0;

/// A sampled curve: ordered domain-space points in disjoint segments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampledCurve {
    /// Polyline segments, each a run of consecutive valid samples
    pub segments: Vec<Vec<Point>>,
}

impl SampledCurve {
    /// All points across all segments, in sample order
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.segments.iter().flatten()
    }

    /// Total number of sampled points
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// True when no sample survived
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Accumulates points into segments, splitting at breaks
#[derive(Debug, Default)]
struct SegmentBuilder {
    segments: Vec<Vec<Point>>,
    current: Vec<Point>,
}

impl SegmentBuilder {
    fn push(&mut self, p: Point) {
        self.current.push(p);
    }

    fn break_segment(&mut self) {
        if !self.current.is_empty() {
            self.segments.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> SampledCurve {
        self.break_segment();
        SampledCurve {
            segments: self.segments,
        }
    }
}

/// Samples `y = f(x)` across the window, one sample per pixel column.
///
/// Step size is `window.width() / width_px`; exactly `width_px`
/// samples are taken starting at `xmin`.
#[must_use]
pub fn sample_function(expr: &Expr, window: &ViewWindow, width_px: u32) -> SampledCurve {
    let step = window.width() / f64::from(width_px);
    let mut builder = SegmentBuilder::default();

    for i in 0..width_px {
        let x = window.xmin + f64::from(i) * step;
        let y = expr.eval(x);
        if y.is_finite() {
            builder.push(Point::new(x, y));
        } else {
            builder.break_segment();
        }
    }

    builder.finish()
}

/// Samples a parametric pair `(x(t), y(t))` over t ∈ [-10, 10] at
/// step 0.1. Samples landing more than [`OFFSCREEN_MARGIN`] pixels
/// outside the canvas break the segment.
#[must_use]
pub fn sample_parametric(x_expr: &Expr, y_expr: &Expr, mapper: &CanvasMapper) -> SampledCurve {
    let steps = ((PARAM_T_MAX - PARAM_T_MIN) / PARAM_T_STEP).round() as u32;
    let mut builder = SegmentBuilder::default();

    for i in 0..=steps {
        let t = PARAM_T_MIN + f64::from(i) * PARAM_T_STEP;
        let p = Point::new(x_expr.eval(t), y_expr.eval(t));

        if p.is_finite() && mapper.in_bounds(mapper.to_canvas(p), OFFSCREEN_MARGIN) {
            builder.push(p);
        } else {
            builder.break_segment();
        }
    }

    builder.finish()
}

/// Samples a polar curve `r(θ)` over θ ∈ [0, 2π] at 1° steps.
/// Negative radii are discarded and break the segment; surviving
/// samples convert to Cartesian before the bounds check.
#[must_use]
pub fn sample_polar(r_expr: &Expr, mapper: &CanvasMapper) -> SampledCurve {
    let mut builder = SegmentBuilder::default();

    for degrees in 0..=360u32 {
        let theta = f64::from(degrees) * POLAR_THETA_STEP;
        let r = r_expr.eval(theta);

        if !r.is_finite() || r < 0.0 {
            builder.break_segment();
            continue;
        }

        let p = Point::new(r * theta.cos(), r * theta.sin());
        if mapper.in_bounds(mapper.to_canvas(p), OFFSCREEN_MARGIN) {
            builder.push(p);
        } else {
            builder.break_segment();
        }
    }

    builder.finish()
}
