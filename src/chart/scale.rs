// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// Rounds an axis maximum up to 1, 2, 5 or 10 times a power of ten so the
/// gridline labels come out round. Inputs below 1 (zero, negatives, NaN)
/// are treated as 1.
pub fn nice_ceil_max(raw: f64) -> f64 {
    let raw = if raw.is_finite() { raw.max(1.0) } else { 1.0 };
    let exp = raw.log10().floor();
    let base = 10f64.powf(exp);
    let f = raw / base;
    let nice = if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// `count + 1` evenly spaced gridline values from 0 to `max`.
pub fn ticks(max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return vec![0.0];
    }
    (0..=count)
        .map(|i| max * i as f64 / count as f64)
        .collect()
}

/// Linear map from a value domain onto a pixel range. A zero-width domain
/// divides by 1 instead of 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain spanning the finite values of `values`; `(0, 0)` when empty.
    pub fn extent(values: &[f64]) -> (f64, f64) {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let Some(first) = finite.next() else {
            return (0.0, 0.0);
        };
        finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let span = if span == 0.0 { 1.0 } else { span };
        r0 + (v - d0) / span * (r1 - r0)
    }
}
