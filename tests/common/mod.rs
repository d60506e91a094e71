// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use pocketlens::api::{FinanceApi, HttpMethod};
use pocketlens::errors::ApiError;
use pocketlens::models::TransactionRecord;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Call {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// In-memory backend: canned responses per `(method, path)`, every call recorded.
/// Writes without a canned response answer `{"ok": true}`; unknown reads are 404.
#[derive(Default)]
pub struct FakeApi {
    routes: HashMap<(HttpMethod, String), Value>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: HttpMethod, path: &str, response: Value) -> Self {
        self.routes.insert((method, path.to_string()), response);
        self
    }

    pub fn get(self, path: &str, response: Value) -> Self {
        self.route(HttpMethod::Get, path, response)
    }

    pub fn calls_to(&self, method: HttpMethod, path: &str) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .cloned()
            .collect()
    }
}

impl FinanceApi for FakeApi {
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.calls.borrow_mut().push(Call {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: body.cloned(),
        });
        match self.routes.get(&(method, path.to_string())) {
            Some(v) => Ok(v.clone()),
            None if method == HttpMethod::Get => Err(ApiError::NotFound(path.to_string())),
            None => Ok(json!({ "ok": true })),
        }
    }
}

/// JSON transaction as the backend sends it.
pub fn tx_json(id: u32, kind: &str, amount: f64, date: &str, category: Option<&str>) -> Value {
    let mut v = json!({
        "id": id,
        "type": kind,
        "amount": amount,
        "date": date,
        "walletId": "w1",
    });
    if let Some(name) = category {
        v["category"] = json!({ "id": format!("c-{}", name.to_lowercase()), "name": name });
    }
    v
}

pub fn record(id: u32, kind: &str, amount: f64, date: &str, category: Option<&str>) -> TransactionRecord {
    serde_json::from_value(tx_json(id, kind, amount, date, category)).unwrap()
}
