// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! REST access to the finance backend.
//!
//! [`FinanceApi`] is the single transport seam: one JSON request/response
//! call. Typed endpoints live on [`Endpoints`], implemented for every
//! transport, so commands and tests never depend on `reqwest` directly.

use crate::config::Config;
use crate::editor::TransactionDraft;
use crate::errors::ApiError;
use crate::models::{
    Asset, Category, InvestmentSummary, ManualMonth, Operation, TimelinePoint, TransactionKind,
    TransactionRecord, Trip, Wallet,
};
use crate::utils::http_client;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which occurrences of a recurring transaction an edit or delete touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditScope {
    #[default]
    Single,
    Future,
    Series,
}

impl EditScope {
    pub const NAMES: [&'static str; 3] = ["single", "future", "series"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditScope::Single => "single",
            EditScope::Future => "future",
            EditScope::Series => "series",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(EditScope::Single),
            "future" => Some(EditScope::Future),
            "series" => Some(EditScope::Series),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetAction {
    Buy,
    Sell,
    Deposit,
    Withdraw,
}

impl AssetAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetAction::Buy => "buy",
            AssetAction::Sell => "sell",
            AssetAction::Deposit => "deposit",
            AssetAction::Withdraw => "withdraw",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetActionRequest {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub wallet_id: Option<String>,
    pub kind: Option<TransactionKind>,
}

impl TransactionQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(from) = self.from {
            out.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            out.push(("to", to.to_string()));
        }
        if let Some(wallet) = &self.wallet_id {
            out.push(("walletId", wallet.clone()));
        }
        if let Some(kind) = self.kind {
            out.push(("type", kind.as_str().to_string()));
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
}

pub trait FinanceApi {
    /// Performs one JSON call. Empty response bodies come back as `Null`.
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError>;
}

/// Blocking HTTP transport with bearer authentication.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http: http_client(timeout_secs)?,
        })
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Self::new(&cfg.api_url, cfg.token.clone(), cfg.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl FinanceApi for ApiClient {
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = match method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Patch => self.http.patch(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!(%method, path, "sending request");
        let resp = req.send()?;
        let status = resp.status();
        tracing::debug!(%method, path, status = status.as_u16(), "received response");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        let text = resp.text()?;
        if !status.is_success() {
            tracing::warn!(%method, path, status = status.as_u16(), "request failed");
            return Err(ApiError::Status {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

fn decode<T: DeserializeOwned>(path: &str, v: Value) -> Result<T, ApiError> {
    serde_json::from_value(v).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Lists arrive either bare or wrapped as `{"data": [...]}` / `{"items": [...]}`.
fn decode_list<T: DeserializeOwned>(path: &str, v: Value) -> Result<Vec<T>, ApiError> {
    let v = match v {
        Value::Null => Value::Array(Vec::new()),
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("items")) {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    };
    decode(path, v)
}

fn to_body<T: Serialize>(path: &str, v: &T) -> Result<Value, ApiError> {
    serde_json::to_value(v).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Typed endpoints available on every transport.
pub trait Endpoints: FinanceApi {
    fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        decode_list(path, self.request(HttpMethod::Get, path, query, None)?)
    }

    fn transactions(&self, q: &TransactionQuery) -> Result<Vec<TransactionRecord>, ApiError> {
        let records: Vec<TransactionRecord> = self.get_list("/transactions", &q.params())?;
        tracing::debug!(count = records.len(), "fetched transactions");
        Ok(records)
    }

    fn transaction(&self, id: &str) -> Result<TransactionRecord, ApiError> {
        let path = format!("/transactions/{}", id);
        decode(&path, self.request(HttpMethod::Get, &path, &[], None)?)
    }

    fn create_transaction(&self, draft: &TransactionDraft) -> Result<Value, ApiError> {
        let body = to_body("/transactions", draft)?;
        self.request(HttpMethod::Post, "/transactions", &[], Some(&body))
    }

    fn update_transaction(
        &self,
        id: &str,
        draft: &TransactionDraft,
        scope: EditScope,
    ) -> Result<Value, ApiError> {
        let path = format!("/transactions/{}", id);
        let body = to_body(&path, draft)?;
        let query = [("scope", scope.as_str().to_string())];
        self.request(HttpMethod::Patch, &path, &query, Some(&body))
    }

    fn delete_transaction(&self, id: &str, scope: EditScope) -> Result<(), ApiError> {
        let path = format!("/transactions/{}", id);
        let query = [("scope", scope.as_str().to_string())];
        self.request(HttpMethod::Delete, &path, &query, None)?;
        Ok(())
    }

    fn wallets(&self) -> Result<Vec<Wallet>, ApiError> {
        self.get_list("/wallets", &[])
    }

    fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_list("/categories", &[])
    }

    fn create_category(
        &self,
        name: &str,
        kind: TransactionKind,
        emoji: Option<&str>,
        color: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = json!({ "name": name, "type": kind.as_str(), "emoji": emoji, "color": color });
        self.request(HttpMethod::Post, "/categories", &[], Some(&body))
    }

    fn rename_category(&self, id: &str, name: &str) -> Result<Value, ApiError> {
        let path = format!("/categories/{}", id);
        self.request(HttpMethod::Patch, &path, &[], Some(&json!({ "name": name })))
    }

    fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/categories/{}", id);
        self.request(HttpMethod::Delete, &path, &[], None)?;
        Ok(())
    }

    fn create_subcategory(&self, category_id: &str, name: &str) -> Result<Value, ApiError> {
        let path = format!("/categories/{}/subcategories", category_id);
        self.request(HttpMethod::Post, &path, &[], Some(&json!({ "name": name })))
    }

    fn manual_months(&self) -> Result<Vec<ManualMonth>, ApiError> {
        self.get_list("/manual-month", &[])
    }

    fn investment_assets(&self) -> Result<Vec<Asset>, ApiError> {
        self.get_list("/investments/assets", &[])
    }

    fn investment_asset(&self, id: &str) -> Result<Asset, ApiError> {
        let path = format!("/investments/assets/{}", id);
        decode(&path, self.request(HttpMethod::Get, &path, &[], None)?)
    }

    fn investment_summary(&self) -> Result<InvestmentSummary, ApiError> {
        let path = "/investments/summary";
        decode(path, self.request(HttpMethod::Get, path, &[], None)?)
    }

    fn investment_timeline(&self, asset_id: Option<&str>) -> Result<Vec<TimelinePoint>, ApiError> {
        let query: Vec<(&str, String)> =
            asset_id.map(|a| ("assetId", a.to_string())).into_iter().collect();
        self.get_list("/investments/timeline", &query)
    }

    fn investment_valuations(&self, asset_id: Option<&str>) -> Result<Vec<TimelinePoint>, ApiError> {
        let query: Vec<(&str, String)> =
            asset_id.map(|a| ("assetId", a.to_string())).into_iter().collect();
        self.get_list("/investments/valuations", &query)
    }

    fn investment_operations(&self, asset_id: Option<&str>) -> Result<Vec<Operation>, ApiError> {
        let query: Vec<(&str, String)> =
            asset_id.map(|a| ("assetId", a.to_string())).into_iter().collect();
        self.get_list("/investments/operations", &query)
    }

    fn asset_action(
        &self,
        asset_id: &str,
        action: AssetAction,
        req: &AssetActionRequest,
    ) -> Result<Value, ApiError> {
        let path = format!("/investments/assets/{}/{}", asset_id, action.as_str());
        let body = to_body(&path, req)?;
        self.request(HttpMethod::Post, &path, &[], Some(&body))
    }

    fn swap(
        &self,
        from_asset: &str,
        to_asset: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Value, ApiError> {
        let body = json!({
            "fromAssetId": from_asset,
            "toAssetId": to_asset,
            "amount": amount,
            "date": date,
        });
        self.request(HttpMethod::Post, "/investments/swap", &[], Some(&body))
    }

    fn trips(&self) -> Result<Vec<Trip>, ApiError> {
        self.get_list("/trips", &[])
    }

    fn create_trip(&self, draft: &TripDraft) -> Result<Value, ApiError> {
        let body = to_body("/trips", draft)?;
        self.request(HttpMethod::Post, "/trips", &[], Some(&body))
    }

    fn update_trip(&self, id: &str, draft: &TripDraft) -> Result<Value, ApiError> {
        let path = format!("/trips/{}", id);
        let body = to_body(&path, draft)?;
        self.request(HttpMethod::Patch, &path, &[], Some(&body))
    }

    fn delete_trip(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/trips/{}", id);
        self.request(HttpMethod::Delete, &path, &[], None)?;
        Ok(())
    }
}

impl<T: FinanceApi + ?Sized> Endpoints for T {}
