//! The rectangular domain region mapped onto the plotting surface.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// View window bounds. Invariant: `xmin < xmax` and `ymin < ymax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    /// Left edge of the visible domain
    pub xmin: f64,
    /// Right edge of the visible domain
    pub xmax: f64,
    /// Bottom edge of the visible domain
    pub ymin: f64,
    /// Top edge of the visible domain
    pub ymax: f64,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self {
            xmin: -10.0,
            xmax: 10.0,
            ymin: -10.0,
            ymax: 10.0,
        }
    }
}

impl ViewWindow {
    /// Creates a window after validating the bound ordering
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> CalcResult<Self> {
        let w = Self {
            xmin,
            xmax,
            ymin,
            ymax,
        };
        w.validate()?;
        Ok(w)
    }

    fn validate(&self) -> CalcResult<()> {
        let bounds = [self.xmin, self.xmax, self.ymin, self.ymax];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(CalcError::InvalidWindow("bounds must be finite".into()));
        }
        if self.xmin >= self.xmax {
            return Err(CalcError::InvalidWindow(format!(
                "xmin {} must be below xmax {}",
                self.xmin, self.xmax
            )));
        }
        if self.ymin >= self.ymax {
            return Err(CalcError::InvalidWindow(format!(
                "ymin {} must be below ymax {}",
                self.ymin, self.ymax
            )));
        }
        Ok(())
    }

    /// Horizontal extent
    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Vertical extent
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Window center
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// Scales the window symmetrically about its center. A factor
    /// below 1 zooms in: 0.8 on [-10,10] yields [-8,8].
    pub fn zoom(&mut self, factor: f64) -> CalcResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(CalcError::InvalidWindow(format!(
                "zoom factor {factor} must be positive"
            )));
        }

        let (cx, cy) = self.center();
        let half_x = self.width() * factor / 2.0;
        let half_y = self.height() * factor / 2.0;

        self.xmin = cx - half_x;
        self.xmax = cx + half_x;
        self.ymin = cy - half_y;
        self.ymax = cy + half_y;
        self.validate()
    }

    /// Translates the window by a drag delta expressed in pixels.
    /// Dragging right moves the window left; canvas y grows downward.
    pub fn pan(&mut self, delta_x_px: f64, delta_y_px: f64, scale_x: f64, scale_y: f64) {
        let dx = -delta_x_px / scale_x;
        let dy = delta_y_px / scale_y;

        self.xmin += dx;
        self.xmax += dx;
        self.ymin += dy;
        self.ymax += dy;
    }

    /// Restores the default [-10,10] window
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Preset: the default [-10,10] window
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Preset: [-2π, 2π] horizontally, [-4, 4] vertically
    #[must_use]
    pub fn trig() -> Self {
        use std::f64::consts::PI;
        Self {
            xmin: -2.0 * PI,
            xmax: 2.0 * PI,
            ymin: -4.0,
            ymax: 4.0,
        }
    }

    /// Preset: one domain unit per ten pixels, centered on the origin
    #[must_use]
    pub fn integer(canvas_width: u32, canvas_height: u32) -> Self {
        let half_x = f64::from(canvas_width) / 20.0;
        let half_y = f64::from(canvas_height) / 20.0;
        Self {
            xmin: -half_x,
            xmax: half_x,
            ymin: -half_y,
            ymax: half_y,
        }
    }

    /// Preset: keeps the current x range but rescales y so both axes
    /// share one pixels-per-unit scale
    #[must_use]
    pub fn square(&self, canvas_width: u32, canvas_height: u32) -> Self {
        let units_per_px = self.width() / f64::from(canvas_width);
        let half_y = units_per_px * f64::from(canvas_height) / 2.0;
        let (_, cy) = self.center();
        Self {
            xmin: self.xmin,
            xmax: self.xmax,
            ymin: cy - half_y,
            ymax: cy + half_y,
        }
    }
}
