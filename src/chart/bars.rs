// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Canvas;
use super::scale::{nice_ceil_max, ticks};

pub const MIN_BAR_WIDTH: f64 = 4.0;
pub const MAX_BAR_WIDTH: f64 = 48.0;
pub const GRID_LINES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub bars: Vec<BarRect>,
    pub max_y: f64,
    /// Pixel row of value 0; one unit inside the bottom of the plot box.
    pub baseline: f64,
    pub ticks: Vec<f64>,
    pub step: f64,
}

impl BarLayout {
    pub fn y_for(&self, value: f64, canvas: &Canvas) -> f64 {
        let height = self.baseline - canvas.pad_y;
        self.baseline - (value.max(0.0) / self.max_y) * height
    }
}

/// Lays out one bar per value, evenly spaced across the plot width.
pub fn bar_layout(values: &[f64], canvas: &Canvas) -> BarLayout {
    let raw_max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let max_y = nice_ceil_max(raw_max);
    let baseline = canvas.height - canvas.pad_y - 1.0;
    let n = values.len().max(1);
    let step = canvas.plot_width() / n as f64;
    let width = (step * 0.6).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH).min(step.max(1.0));

    let mut layout = BarLayout {
        bars: Vec::with_capacity(values.len()),
        max_y,
        baseline,
        ticks: ticks(max_y, GRID_LINES),
        step,
    };
    for (index, &raw) in values.iter().enumerate() {
        let value = if raw.is_finite() { raw } else { 0.0 };
        let y = layout.y_for(value, canvas);
        layout.bars.push(BarRect {
            index,
            value,
            x: canvas.pad_x + step * index as f64 + (step - width) / 2.0,
            y,
            width,
            height: baseline - y,
        });
    }
    layout
}
