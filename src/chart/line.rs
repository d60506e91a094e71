// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Canvas;
use super::scale::LinearScale;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Maps a series onto the canvas: `[min, max]` goes to
/// `[height - pad_y, pad_y]`, points are spread evenly across the plot
/// width and a lone point sits in the middle.
pub fn line_points(values: &[f64], canvas: &Canvas) -> Vec<Point> {
    let y_scale = LinearScale::new(
        LinearScale::extent(values),
        (canvas.height - canvas.pad_y, canvas.pad_y),
    );
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = if n == 1 {
                canvas.width / 2.0
            } else {
                canvas.pad_x + canvas.plot_width() * i as f64 / (n - 1) as f64
            };
            let v = if v.is_finite() { v } else { 0.0 };
            Point {
                x,
                y: y_scale.map(v),
            }
        })
        .collect()
}

/// `M x0 y0 L x1 y1 ...`; straight segments only.
pub fn line_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{} {:.2} {:.2}", cmd, p.x, p.y);
    }
    d
}
