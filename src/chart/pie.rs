// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

pub const DEFAULT_PAD_ANGLE: f64 = 0.02;
/// Largest angle between two sampled points of a drawn arc.
const ARC_STEP: f64 = PI / 90.0;

/// One donut sector. Angles are radians clockwise from twelve o'clock;
/// `pad_angle` is included in `[start_angle, end_angle]` and trimmed when
/// the arc is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
}

impl Slice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Slices in insertion order with angles proportional to value. Negative
/// and non-finite values get zero width.
pub fn pie_layout(values: &[f64], pad_angle: f64) -> Vec<Slice> {
    let clean: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let n = clean.len();
    if n == 0 {
        return Vec::new();
    }
    let total: f64 = clean.iter().sum();
    let pa = if total > 0.0 {
        (TAU / n as f64).min(pad_angle.max(0.0))
    } else {
        0.0
    };
    let k = if total > 0.0 {
        (TAU - n as f64 * pa) / total
    } else {
        0.0
    };

    let mut angle = 0.0;
    clean
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let start = angle;
            let sweep = if value > 0.0 { value * k } else { 0.0 };
            angle = start + sweep + pa;
            Slice {
                index,
                value,
                start_angle: start,
                end_angle: angle,
                pad_angle: pa,
            }
        })
        .collect()
}

fn polar(cx: f64, cy: f64, r: f64, a: f64) -> (f64, f64) {
    (cx + r * a.sin(), cy - r * a.cos())
}

/// Drawn angles of a slice once its pad is trimmed; `None` for an empty sweep.
fn visible_span(slice: &Slice) -> Option<(f64, f64)> {
    let a0 = slice.start_angle + slice.pad_angle / 2.0;
    let a1 = slice.end_angle - slice.pad_angle / 2.0;
    if a1 - a0 <= f64::EPSILON {
        None
    } else {
        Some((a0, a1))
    }
}

/// SVG path for a ring segment (`inner == 0` draws a wedge).
pub fn arc_path(slice: &Slice, cx: f64, cy: f64, outer: f64, inner: f64) -> String {
    let Some((a0, a1)) = visible_span(slice) else {
        return String::new();
    };
    // A single arc cannot describe a full turn; split it in halves.
    if a1 - a0 >= TAU - 1e-9 {
        let half = Slice {
            index: slice.index,
            value: slice.value,
            start_angle: 0.0,
            end_angle: PI,
            pad_angle: 0.0,
        };
        let other = Slice {
            start_angle: PI,
            end_angle: TAU,
            ..half
        };
        return format!(
            "{} {}",
            arc_path(&half, cx, cy, outer, inner),
            arc_path(&other, cx, cy, outer, inner)
        );
    }

    let large = if a1 - a0 > PI { 1 } else { 0 };
    let (ox0, oy0) = polar(cx, cy, outer, a0);
    let (ox1, oy1) = polar(cx, cy, outer, a1);
    let mut d = String::new();
    let _ = write!(
        d,
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2}",
        ox0, oy0, outer, outer, large, ox1, oy1
    );
    if inner > 0.0 {
        let (ix1, iy1) = polar(cx, cy, inner, a1);
        let (ix0, iy0) = polar(cx, cy, inner, a0);
        let _ = write!(
            d,
            " L {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} Z",
            ix1, iy1, inner, inner, large, ix0, iy0
        );
    } else {
        let _ = write!(d, " L {:.2} {:.2} Z", cx, cy);
    }
    d
}

/// Outline of a ring segment as a closed polygon: the outer arc sampled
/// clockwise, then the inner arc back (or the centre for a wedge).
pub fn arc_points(slice: &Slice, cx: f64, cy: f64, outer: f64, inner: f64) -> Vec<(f64, f64)> {
    let Some((a0, a1)) = visible_span(slice) else {
        return Vec::new();
    };
    let steps = ((a1 - a0) / ARC_STEP).ceil().max(1.0) as usize;
    let at = |i: usize| a0 + (a1 - a0) * i as f64 / steps as f64;
    let mut points: Vec<(f64, f64)> = (0..=steps).map(|i| polar(cx, cy, outer, at(i))).collect();
    if inner > 0.0 {
        points.extend((0..=steps).rev().map(|i| polar(cx, cy, inner, at(i))));
    } else {
        points.push((cx, cy));
    }
    points
}

/// Income-versus-expense ring.
///
/// The arcs are drawn against `max(income, expense)` so they always fit the
/// circle, while `spent_percent` is measured against income and goes above
/// 100 when spending outstrips income.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsRing {
    pub slices: Vec<Slice>,
    pub reference: f64,
    pub spent_percent: Option<f64>,
    pub saved_percent: Option<f64>,
    pub overspent: bool,
}

pub fn savings_ring(income: f64, expense: f64, pad_angle: f64) -> SavingsRing {
    let income = income.max(0.0);
    let expense = expense.max(0.0);
    let overspent = expense > income;
    let reference = income.max(expense);
    // first slice is what income covered, second is the remainder
    let values = if overspent {
        [income, expense - income]
    } else {
        [expense, income - expense]
    };
    let (spent_percent, saved_percent) = if income > 0.0 {
        (
            Some(expense / income * 100.0),
            Some((income - expense) / income * 100.0),
        )
    } else {
        (None, None)
    };
    SavingsRing {
        slices: pie_layout(&values, pad_angle),
        reference,
        spent_percent,
        saved_percent,
        overspent,
    }
}
