use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{AxisDimension, PixelRect};
use crate::error::{ChartError, ChartResult};

/// Identifier of a chart axis (`"x"`, `"y"`, `"realtime"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisId(String);

impl AxisId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AxisId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AxisId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Horizontal,
    Vertical,
}

impl AxisOrientation {
    #[must_use]
    pub fn dimension(self) -> AxisDimension {
        match self {
            Self::Horizontal => AxisDimension::X,
            Self::Vertical => AxisDimension::Y,
        }
    }
}

/// Laid-out box of an axis as computed by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub orientation: AxisOrientation,
    pub reverse: bool,
    pub rect: PixelRect,
}

impl AxisGeometry {
    #[must_use]
    pub fn horizontal(left: f64, right: f64) -> Self {
        Self {
            orientation: AxisOrientation::Horizontal,
            reverse: false,
            rect: PixelRect::new(left, 0.0, right, 0.0),
        }
    }

    #[must_use]
    pub fn vertical(top: f64, bottom: f64) -> Self {
        Self {
            orientation: AxisOrientation::Vertical,
            reverse: false,
            rect: PixelRect::new(0.0, top, 0.0, bottom),
        }
    }

    #[must_use]
    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self.orientation == AxisOrientation::Horizontal
    }

    /// Pixel length along the axis direction.
    #[must_use]
    pub fn length(self) -> f64 {
        if self.is_horizontal() {
            self.rect.width()
        } else {
            self.rect.height()
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        let length = self.length();
        if !length.is_finite() || length < 0.0 {
            return Err(ChartError::InvalidAxisGeometry { length });
        }
        Ok(self)
    }

    // Vertical axes grow upward unless reversed.
    fn reverse_pixels(self) -> bool {
        if self.is_horizontal() {
            self.reverse
        } else {
            !self.reverse
        }
    }

    fn start_pixel(self) -> f64 {
        if self.is_horizontal() {
            self.rect.left
        } else {
            self.rect.top
        }
    }

    #[must_use]
    pub fn pixel_for_value(self, value: f64, min: f64, max: f64) -> f64 {
        let span = max - min;
        let mut decimal = if span == 0.0 { 0.0 } else { (value - min) / span };
        if self.reverse_pixels() {
            decimal = 1.0 - decimal;
        }
        self.start_pixel() + decimal * self.length()
    }

    #[must_use]
    pub fn value_for_pixel(self, pixel: f64, min: f64, max: f64) -> f64 {
        let length = self.length();
        let mut decimal = if length == 0.0 {
            0.0
        } else {
            (pixel - self.start_pixel()) / length
        };
        if self.reverse_pixels() {
            decimal = 1.0 - decimal;
        }
        min + decimal * (max - min)
    }
}
