// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pointer-to-index resolution and tooltip placement over a rendered chart.
//!
//! Mouse and touch inputs both reduce to a horizontal ratio across the plot
//! area through [`PointerInput`]; nothing downstream knows which one fired.

use crate::chart::Canvas;

pub const TOOLTIP_GAP: f64 = 12.0;
pub const TOOLTIP_MARGIN: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Horizontal extent of the plot inside the rendered chart, in the same
/// pixel units the pointer reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBox {
    pub left: f64,
    pub width: f64,
}

impl PlotBox {
    /// Scales the virtual canvas padding to a chart rendered `rendered_width`
    /// pixels wide.
    pub fn from_canvas(canvas: &Canvas, rendered_width: f64) -> Self {
        let k = if canvas.width > 0.0 {
            rendered_width / canvas.width
        } else {
            1.0
        };
        Self {
            left: canvas.pad_x * k,
            width: canvas.plot_width() * k,
        }
    }
}

pub trait PointerInput {
    /// Pointer position relative to the chart's top-left corner.
    fn local(&self) -> (f64, f64);

    /// Position across the plot area, clamped to `[0, 1]`.
    fn ratio(&self, plot: &PlotBox) -> f64 {
        let (x, _) = self.local();
        if plot.width <= 0.0 || !x.is_finite() {
            return 0.0;
        }
        ((x - plot.left) / plot.width).clamp(0.0, 1.0)
    }
}

/// Mouse event carrying offsets relative to the chart element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePointer {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PointerInput for MousePointer {
    fn local(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }
}

/// Touch/gesture event in page coordinates plus the chart's page origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPointer {
    pub page_x: f64,
    pub page_y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl PointerInput for TouchPointer {
    fn local(&self) -> (f64, f64) {
        (self.page_x - self.origin_x, self.page_y - self.origin_y)
    }
}

/// Nearest data index for a ratio across `n` evenly spaced points.
pub fn resolve_index(ratio: f64, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let t = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    Some((t * (n - 1) as f64).round() as usize)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
    /// Placed left of the cursor because the right side would overflow.
    pub flipped: bool,
}

/// Right of the cursor unless that overflows the container, then left;
/// vertically centred on the cursor and clamped inside the margins.
pub fn place_tooltip(pointer: (f64, f64), container: Size, tooltip: Size) -> TooltipPosition {
    let (x, y) = pointer;
    let mut left = x + TOOLTIP_GAP;
    let flipped = left + tooltip.width > container.width;
    if flipped {
        left = (x - TOOLTIP_GAP - tooltip.width).max(0.0);
    }
    let max_top = container.height - tooltip.height - TOOLTIP_MARGIN;
    let top = (y - tooltip.height / 2.0).min(max_top).max(TOOLTIP_MARGIN);
    TooltipPosition { left, top, flipped }
}

/// Hover state of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    pub active: Option<usize>,
    pub tooltip: Option<TooltipPosition>,
}

impl HoverState {
    pub fn update<P: PointerInput>(
        &mut self,
        input: &P,
        plot: &PlotBox,
        n: usize,
        container: Size,
        tooltip: Size,
    ) -> Option<usize> {
        self.active = resolve_index(input.ratio(plot), n);
        self.tooltip = self
            .active
            .map(|_| place_tooltip(input.local(), container, tooltip));
        self.active
    }

    pub fn clear(&mut self) {
        *self = HoverState::default();
    }
}
