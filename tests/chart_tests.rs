// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketlens::chart::svg::{
    DonutItem, PALETTE, format_axis_value, parse_hex_color, render_bar_chart, render_donut,
    render_line_chart, render_savings_ring,
};
use pocketlens::chart::{
    Canvas, LinearScale, arc_path, arc_points, bar_layout, line_path, line_points, nice_ceil_max,
    pie_layout, savings_ring, ticks,
};
use plotters::style::RGBColor;
use std::f64::consts::{PI, TAU};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn nice_max_rounds_up_to_one_two_five() {
    assert_eq!(nice_ceil_max(83.0), 100.0);
    assert_eq!(nice_ceil_max(101.0), 200.0);
    assert_eq!(nice_ceil_max(500.0), 500.0);
    assert_eq!(nice_ceil_max(0.03), 1.0);
}

#[test]
fn nice_max_is_positive_for_degenerate_input() {
    for raw in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let v = nice_ceil_max(raw);
        assert!(v > 0.0 && v.is_finite(), "{} -> {}", raw, v);
    }
}

#[test]
fn ticks_split_evenly() {
    assert_eq!(ticks(100.0, 4), [0.0, 25.0, 50.0, 75.0, 100.0]);
    assert_eq!(ticks(10.0, 0), [0.0]);
}

#[test]
fn degenerate_domain_maps_to_range_start() {
    let s = LinearScale::new((5.0, 5.0), (276.0, 24.0));
    assert_eq!(s.map(5.0), 276.0);
    assert_eq!(LinearScale::extent(&[]), (0.0, 0.0));
    assert_eq!(LinearScale::extent(&[3.0, f64::NAN, -1.0]), (-1.0, 3.0));
}

#[test]
fn bars_sit_on_the_baseline() {
    let canvas = Canvas::default();
    let layout = bar_layout(&[83.0, 0.0, 41.5], &canvas);
    assert_eq!(layout.max_y, 100.0);
    assert_eq!(layout.baseline, 275.0);
    assert_eq!(layout.ticks.len(), 5);
    for bar in &layout.bars {
        assert!(close(bar.y + bar.height, layout.baseline));
        assert!(bar.width <= 48.0 && bar.width >= 4.0);
    }
    assert_eq!(layout.bars[1].height, 0.0);
    assert!(close(layout.bars[0].height, 0.83 * 251.0));
    assert!(close(layout.bars[0].height, 2.0 * layout.bars[2].height));
}

#[test]
fn bars_for_empty_series() {
    let layout = bar_layout(&[], &Canvas::default());
    assert!(layout.bars.is_empty());
    assert_eq!(layout.max_y, 1.0);
}

#[test]
fn line_path_spans_the_plot() {
    let canvas = Canvas::default();
    let points = line_points(&[0.0, 10.0], &canvas);
    assert_eq!(line_path(&points), "M 48.00 276.00 L 952.00 24.00");
}

#[test]
fn single_point_line_is_centred() {
    let canvas = Canvas::default();
    let points = line_points(&[42.0], &canvas);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].x, 500.0);
    assert!(points[0].y.is_finite());
    assert_eq!(line_path(&[]), "");
}

#[test]
fn pie_covers_the_full_turn() {
    let slices = pie_layout(&[1.0, 1.0, 2.0], 0.0);
    assert_eq!(slices.len(), 3);
    assert!(close(slices[0].end_angle, PI / 2.0));
    assert!(close(slices[2].start_angle, PI));
    assert!(close(slices[2].end_angle, TAU));

    let padded = pie_layout(&[1.0, 1.0, 2.0], 0.02);
    assert!(close(padded.last().unwrap().end_angle, TAU));
    assert!(padded.iter().all(|s| s.pad_angle == 0.02));
}

#[test]
fn zero_values_get_no_arc() {
    let slices = pie_layout(&[0.0, 3.0, -1.0], 0.0);
    assert_eq!(arc_path(&slices[0], 50.0, 50.0, 40.0, 20.0), "");
    assert_eq!(arc_path(&slices[2], 50.0, 50.0, 40.0, 20.0), "");
    let full = arc_path(&slices[1], 50.0, 50.0, 40.0, 20.0);
    assert_eq!(full.matches('M').count(), 2);

    assert!(arc_points(&slices[0], 50.0, 50.0, 40.0, 20.0).is_empty());
    assert!(arc_points(&slices[2], 50.0, 50.0, 40.0, 20.0).is_empty());
}

#[test]
fn arc_outline_stays_between_the_radii() {
    let slices = pie_layout(&[1.0, 3.0], 0.0);
    let ring = arc_points(&slices[1], 50.0, 50.0, 40.0, 20.0);
    assert!(ring.len() > 4);
    for (x, y) in &ring {
        let r = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
        assert!(r > 20.0 - 1e-6 && r < 40.0 + 1e-6, "radius {}", r);
    }
    // first slice ends at three o'clock, so the second starts there
    let (x0, y0) = ring[0];
    assert!(close(x0, 90.0) && close(y0, 50.0));

    let wedge = arc_points(&slices[0], 50.0, 50.0, 40.0, 0.0);
    assert_eq!(wedge.last(), Some(&(50.0, 50.0)));
}

#[test]
fn hex_colors_parse() {
    assert_eq!(parse_hex_color("#ff0000"), Some(RGBColor(255, 0, 0)));
    assert_eq!(parse_hex_color(" #0f8 "), Some(RGBColor(0, 255, 136)));
    assert_eq!(parse_hex_color("red"), None);
    assert_eq!(parse_hex_color("#12345"), None);
    assert_eq!(parse_hex_color("#gg0000"), None);
    assert_eq!(parse_hex_color("#ééé"), None);
}

#[test]
fn savings_ring_measures_against_income() {
    let ring = savings_ring(1000.0, 600.0, 0.0);
    assert!(!ring.overspent);
    assert_eq!(ring.reference, 1000.0);
    assert!(close(ring.spent_percent.unwrap(), 60.0));
    assert!(close(ring.saved_percent.unwrap(), 40.0));

    let over = savings_ring(500.0, 800.0, 0.0);
    assert!(over.overspent);
    assert_eq!(over.reference, 800.0);
    assert!(close(over.spent_percent.unwrap(), 160.0));
    assert!(close(over.slices[1].span(), TAU * 300.0 / 800.0));

    let none = savings_ring(0.0, 0.0, 0.0);
    assert_eq!(none.spent_percent, None);
}

#[test]
fn axis_values_are_compact() {
    assert_eq!(format_axis_value(950.0), "950");
    assert_eq!(format_axis_value(1500.0), "1.5k");
    assert_eq!(format_axis_value(2000.0), "2k");
    assert_eq!(format_axis_value(2_300_000.0), "2.3M");
    assert_eq!(format_axis_value(12.5), "12.50");
}

#[test]
fn svg_documents_are_well_formed() {
    let labels: Vec<String> = ["a", "b", "R&D"].iter().map(|s| s.to_string()).collect();
    let bars =
        render_bar_chart(&labels, &[1.0, 2.0, 3.0], &Canvas::default(), PALETTE[0]).unwrap();
    assert!(bars.contains(r#"viewBox="0 0 1000 300""#));
    assert!(bars.trim_end().ends_with("</svg>"));
    assert_eq!(bars.matches("<rect").count(), 3);
    assert!(bars.contains("R&amp;D"));

    let line =
        render_line_chart(&labels, &[1.0, 2.0, 3.0], &Canvas::sparkline(), PALETTE[0]).unwrap();
    assert!(line.contains("stroke-width=\"2\""));
    assert!(line.contains("<polygon"));

    let donut = render_donut(
        &[
            DonutItem {
                label: "Food".into(),
                value: 30.0,
                color: Some("#ff0000".into()),
            },
            DonutItem {
                label: "Rent".into(),
                value: 70.0,
                color: None,
            },
        ],
        200.0,
        0.02,
    )
    .unwrap();
    assert!(donut.to_lowercase().contains("#ff0000"));
    assert_eq!(donut.matches("<polygon").count(), 2);
    assert!(donut.contains("Rent"));

    let ring = render_savings_ring(1000.0, 250.0, 180.0, 0.02).unwrap();
    assert!(ring.contains(">25%<"));

    let empty = render_savings_ring(0.0, 0.0, 180.0, 0.02).unwrap();
    assert!(empty.contains("<circle"));
    assert!(empty.contains(">-<"));
}
