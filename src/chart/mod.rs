// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart geometry on a fixed virtual canvas. Every chart (period bars,
//! portfolio timeline, asset sparkline, category donut) goes through the
//! same scale, tick and path helpers; pixel density is left to the SVG
//! `viewBox`.

pub mod bars;
pub mod line;
pub mod pie;
pub mod scale;
pub mod svg;

pub use bars::{BarLayout, BarRect, bar_layout};
pub use line::{Point, line_path, line_points};
pub use pie::{SavingsRing, Slice, arc_path, arc_points, pie_layout, savings_ring};
pub use scale::{LinearScale, nice_ceil_max, ticks};

/// Virtual drawing surface in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub pad_x: f64,
    pub pad_y: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 300.0,
            pad_x: 48.0,
            pad_y: 24.0,
        }
    }
}

impl Canvas {
    /// Compact canvas used for per-asset sparklines.
    pub fn sparkline() -> Self {
        Self {
            width: 240.0,
            height: 64.0,
            pad_x: 4.0,
            pad_y: 6.0,
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.pad_x).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.pad_y).max(0.0)
    }
}
