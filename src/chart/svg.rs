// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Standalone SVG documents. Geometry comes from the chart mapper; plotters
//! only turns the resulting shapes into markup.

use super::Canvas;
use super::bars::bar_layout;
use super::line::line_points;
use super::pie::{arc_points, pie_layout, savings_ring};
use super::scale::LinearScale;
use crate::errors::ChartError;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub const PALETTE: [RGBColor; 8] = [
    RGBColor(0x4f, 0x46, 0xe5),
    RGBColor(0x16, 0xa3, 0x4a),
    RGBColor(0xdc, 0x26, 0x26),
    RGBColor(0xf5, 0x9e, 0x0b),
    RGBColor(0x08, 0x91, 0xb2),
    RGBColor(0x93, 0x33, 0xea),
    RGBColor(0xdb, 0x27, 0x77),
    RGBColor(0x65, 0xa3, 0x0d),
];
pub const INCOME_COLOR: RGBColor = RGBColor(0x16, 0xa3, 0x4a);
pub const EXPENSE_COLOR: RGBColor = RGBColor(0xdc, 0x26, 0x26);
const OVERSPENT_COLOR: RGBColor = RGBColor(0x7f, 0x1d, 0x1d);
const AXIS_COLOR: RGBColor = RGBColor(0xd1, 0xd5, 0xdb);
const LABEL_COLOR: RGBColor = RGBColor(0x6b, 0x72, 0x80);
const FONT: &str = "sans-serif";
const MAX_X_LABELS: usize = 12;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

#[derive(Debug, Clone, PartialEq)]
pub struct DonutItem {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

/// `#rrggbb` or `#rgb`; anything else is `None`.
pub fn parse_hex_color(raw: &str) -> Option<RGBColor> {
    let hex = raw.trim().strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(RGBColor(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(RGBColor(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

/// Compact axis label: `950`, `1.5k`, `2.3M`.
pub fn format_axis_value(v: f64) -> String {
    let a = v.abs();
    if a >= 1_000_000.0 {
        trim_decimal(format!("{:.1}", v / 1_000_000.0)) + "M"
    } else if a >= 1_000.0 {
        trim_decimal(format!("{:.1}", v / 1_000.0)) + "k"
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

fn trim_decimal(s: String) -> String {
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

fn x_label_every(n: usize) -> usize {
    n.div_ceil(MAX_X_LABELS).max(1)
}

fn px(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

fn label_style(size: f64, h: HPos) -> TextStyle<'static> {
    (FONT, size)
        .into_font()
        .color(&LABEL_COLOR)
        .pos(Pos::new(h, VPos::Center))
}

/// Runs `draw` against a fresh SVG surface of `width` x `height` and returns
/// the finished document.
fn render<F>(width: f64, height: f64, draw: F) -> Result<String, ChartError>
where
    F: FnOnce(&Area<'_>) -> Result<(), ChartError>,
{
    let size = (width.round().max(1.0) as u32, height.round().max(1.0) as u32);
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, size).into_drawing_area();
        draw(&root)?;
        root.present().map_err(draw_err)?;
    }
    Ok(out)
}

fn gridline(area: &Area<'_>, canvas: &Canvas, y: f64, value: f64) -> Result<(), ChartError> {
    area.draw(&PathElement::new(
        vec![px(canvas.pad_x, y), px(canvas.width - canvas.pad_x, y)],
        AXIS_COLOR.stroke_width(1),
    ))
    .map_err(draw_err)?;
    area.draw(&Text::new(
        format_axis_value(value),
        px(canvas.pad_x - 6.0, y),
        label_style(12.0, HPos::Right),
    ))
    .map_err(draw_err)
}

fn x_label(area: &Area<'_>, label: &str, x: f64, y: f64) -> Result<(), ChartError> {
    area.draw(&Text::new(
        label.to_string(),
        px(x, y),
        label_style(12.0, HPos::Center),
    ))
    .map_err(draw_err)
}

pub fn render_bar_chart(
    labels: &[String],
    values: &[f64],
    canvas: &Canvas,
    color: RGBColor,
) -> Result<String, ChartError> {
    let layout = bar_layout(values, canvas);
    render(canvas.width, canvas.height, |area| {
        for tick in &layout.ticks {
            gridline(area, canvas, layout.y_for(*tick, canvas), *tick)?;
        }
        let every = x_label_every(layout.bars.len());
        for bar in &layout.bars {
            area.draw(&Rectangle::new(
                [px(bar.x, bar.y), px(bar.x + bar.width, bar.y + bar.height)],
                color.filled(),
            ))
            .map_err(draw_err)?;
            if bar.index % every == 0 {
                if let Some(label) = labels.get(bar.index) {
                    x_label(area, label, bar.center_x(), canvas.height - canvas.pad_y / 2.0)?;
                }
            }
        }
        Ok(())
    })
}

pub fn render_line_chart(
    labels: &[String],
    values: &[f64],
    canvas: &Canvas,
    color: RGBColor,
) -> Result<String, ChartError> {
    let points = line_points(values, canvas);
    let (lo, hi) = LinearScale::extent(values);
    let y_scale = LinearScale::new((lo, hi), (canvas.height - canvas.pad_y, canvas.pad_y));
    let bounds: &[f64] = if lo == hi { &[lo] } else { &[lo, hi] };
    let baseline = canvas.height - canvas.pad_y;

    render(canvas.width, canvas.height, |area| {
        for v in bounds {
            gridline(area, canvas, y_scale.map(*v), *v)?;
        }
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            let mut outline: Vec<(i32, i32)> = points.iter().map(|p| px(p.x, p.y)).collect();
            outline.push(px(last.x, baseline));
            outline.push(px(first.x, baseline));
            area.draw(&Polygon::new(outline, color.mix(0.12).filled()))
                .map_err(draw_err)?;
            area.draw(&PathElement::new(
                points.iter().map(|p| px(p.x, p.y)).collect::<Vec<_>>(),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?;
        }
        let every = x_label_every(points.len());
        for (i, p) in points.iter().enumerate() {
            if i % every != 0 {
                continue;
            }
            if let Some(label) = labels.get(i) {
                x_label(area, label, p.x, canvas.height - canvas.pad_y / 2.0)?;
            }
        }
        Ok(())
    })
}

/// Donut with a legend on the right; `size` is the ring's bounding square.
pub fn render_donut(items: &[DonutItem], size: f64, pad_angle: f64) -> Result<String, ChartError> {
    let values: Vec<f64> = items.iter().map(|i| i.value).collect();
    let slices = pie_layout(&values, pad_angle);
    let legend_width = 220.0;
    let height = size.max(items.len() as f64 * 20.0 + 16.0);
    let (cx, cy) = (size / 2.0, size / 2.0);
    let outer = size / 2.0 - 4.0;
    let inner = outer * 0.6;

    render(size + legend_width, height, |area| {
        for (slice, item) in slices.iter().zip(items) {
            let color = item
                .color
                .as_deref()
                .and_then(parse_hex_color)
                .unwrap_or(PALETTE[slice.index % PALETTE.len()]);
            let outline: Vec<(i32, i32)> = arc_points(slice, cx, cy, outer, inner)
                .into_iter()
                .map(|(x, y)| px(x, y))
                .collect();
            if !outline.is_empty() {
                area.draw(&Polygon::new(outline, color.filled()))
                    .map_err(draw_err)?;
            }
            let y = 16.0 + slice.index as f64 * 20.0;
            area.draw(&Rectangle::new(
                [px(size + 12.0, y - 6.0), px(size + 24.0, y + 6.0)],
                color.filled(),
            ))
            .map_err(draw_err)?;
            area.draw(&Text::new(
                format!("{} ({})", item.label, format_axis_value(item.value)),
                px(size + 30.0, y),
                label_style(12.0, HPos::Left),
            ))
            .map_err(draw_err)?;
        }
        Ok(())
    })
}

/// Two-slice income ring: spent in red (or all of income when overspent),
/// remainder in green (or the overspend in dark red), percentage in the hole.
pub fn render_savings_ring(
    income: f64,
    expense: f64,
    size: f64,
    pad_angle: f64,
) -> Result<String, ChartError> {
    let ring = savings_ring(income, expense, pad_angle);
    let (cx, cy) = (size / 2.0, size / 2.0);
    let outer = size / 2.0 - 4.0;
    let inner = outer * 0.7;
    let colors = if ring.overspent {
        [EXPENSE_COLOR, OVERSPENT_COLOR]
    } else {
        [EXPENSE_COLOR, INCOME_COLOR]
    };
    let label = match ring.spent_percent {
        Some(p) => format!("{:.0}%", p),
        None => "-".to_string(),
    };

    render(size, size, |area| {
        if ring.reference <= 0.0 {
            area.draw(&Circle::new(
                px(cx, cy),
                ((outer + inner) / 2.0).round() as i32,
                AXIS_COLOR.stroke_width((outer - inner).round() as u32),
            ))
            .map_err(draw_err)?;
        }
        for slice in &ring.slices {
            let outline: Vec<(i32, i32)> = arc_points(slice, cx, cy, outer, inner)
                .into_iter()
                .map(|(x, y)| px(x, y))
                .collect();
            if !outline.is_empty() {
                area.draw(&Polygon::new(outline, colors[slice.index % 2].filled()))
                    .map_err(draw_err)?;
            }
        }
        area.draw(&Text::new(label, px(cx, cy), label_style(20.0, HPos::Center)))
            .map_err(draw_err)
    })
}
