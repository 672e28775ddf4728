//! Window-to-canvas coordinate mapping.

use crate::graph::window::ViewWindow;

/// A 2D point, in either domain or canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Affine map between a [`ViewWindow`] and a pixel canvas.
///
/// Canvas y grows downward, so the vertical map is inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapper {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Pixels per domain unit, horizontal
    pub scale_x: f64,
    /// Pixels per domain unit, vertical
    pub scale_y: f64,
    /// Canvas x of the domain origin
    pub origin_x: f64,
    /// Canvas y of the domain origin
    pub origin_y: f64,
}

impl CanvasMapper {
    /// Builds the map for a window rendered onto a width×height canvas
    #[must_use]
    pub fn new(window: &ViewWindow, width: u32, height: u32) -> Self {
        let scale_x = f64::from(width) / window.width();
        let scale_y = f64::from(height) / window.height();
        Self {
            width,
            height,
            scale_x,
            scale_y,
            origin_x: -window.xmin * scale_x,
            origin_y: window.ymax * scale_y,
        }
    }

    /// Domain point → canvas point
    #[must_use]
    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new(
            self.origin_x + p.x * self.scale_x,
            self.origin_y - p.y * self.scale_y,
        )
    }

    /// Canvas point → domain point
    #[must_use]
    pub fn to_domain(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.origin_x) / self.scale_x,
            (self.origin_y - p.y) / self.scale_y,
        )
    }

    /// True when a canvas point lies within the canvas extended by
    /// `margin` pixels on every side
    #[must_use]
    pub fn in_bounds(&self, p: Point, margin: f64) -> bool {
        p.x >= -margin
            && p.x <= f64::from(self.width) + margin
            && p.y >= -margin
            && p.y <= f64::from(self.height) + margin
    }
}
