// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures while turning user or server text into calendar values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    Month(String),
    #[error("Invalid ISO week '{0}', expected YYYY-Www")]
    IsoWeek(String),
}

/// Failures talking to the finance backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{method} {path} failed with status {status}: {body}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },
    #[error("Could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client-side checks that block a transaction from being submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(String),
    #[error("Amount must be greater than zero")]
    ZeroAmount,
    #[error("Invalid currency code '{0}', expected three letters like EUR")]
    Currency(String),
    #[error(transparent)]
    Date(#[from] DateError),
    #[error("Missing required field: {0}")]
    Missing(&'static str),
    #[error("Transfers need a destination wallet different from the source")]
    TransferTarget,
}

/// Why the transaction editor could not submit its draft.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("The transaction editor is not open")]
    Closed,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Chart markup could not be produced.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Could not draw chart: {0}")]
    Draw(String),
}
