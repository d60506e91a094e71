// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The shared create/edit transaction editor, as an explicit service any
//! command can open with a prefilled draft.

use crate::api::{EditScope, Endpoints, FinanceApi};
use crate::errors::{EditorError, ValidationError};
use crate::models::{TransactionKind, TransactionRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Body sent to `POST/PATCH /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_wallet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub is_recurring: bool,
    pub exclude_from_stats: bool,
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind, date: NaiveDate) -> Self {
        Self {
            kind,
            amount: Decimal::ZERO,
            date,
            description: None,
            category_id: None,
            subcategory_id: None,
            wallet_id: None,
            to_wallet_id: None,
            currency: None,
            is_recurring: false,
            exclude_from_stats: false,
        }
    }

    pub fn from_record(tx: &TransactionRecord) -> Self {
        Self {
            kind: tx.kind,
            amount: tx.magnitude(),
            date: tx.date,
            description: tx.description.clone(),
            category_id: tx.category.as_ref().and_then(|c| c.id.clone()),
            subcategory_id: tx.subcategory.as_ref().and_then(|c| c.id.clone()),
            wallet_id: tx.wallet_id.clone(),
            to_wallet_id: tx.to_wallet_id.clone(),
            currency: None,
            is_recurring: tx.is_recurring,
            exclude_from_stats: tx.exclude_from_stats,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_fields()?;
        self.validate_transfer_target()
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(self.amount.to_string()));
        }
        if self.amount.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }
        if let Some(ccy) = &self.currency {
            validate_currency(ccy)?;
        }
        if self.wallet_id.is_none() {
            return Err(ValidationError::Missing("wallet"));
        }
        Ok(())
    }

    fn validate_transfer_target(&self) -> Result<(), ValidationError> {
        if self.kind != TransactionKind::Transfer {
            return Ok(());
        }
        match (&self.wallet_id, &self.to_wallet_id) {
            (Some(from), Some(to)) if to != from => Ok(()),
            _ => Err(ValidationError::TransferTarget),
        }
    }
}

/// Three ASCII letters, returned upper-cased.
pub fn validate_currency(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim().to_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(ValidationError::Currency(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    Create,
    Edit {
        id: String,
        recurring: bool,
        scope: EditScope,
        /// Destination wallet of the stored record, if it had one.
        stored_target: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct TransactionEditor {
    open: bool,
    mode: EditorMode,
    draft: Option<TransactionDraft>,
}

impl Default for TransactionEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionEditor {
    pub fn new() -> Self {
        Self {
            open: false,
            mode: EditorMode::Create,
            draft: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn open_create(&mut self, prefill: TransactionDraft) {
        self.open = true;
        self.mode = EditorMode::Create;
        self.draft = Some(prefill);
    }

    pub fn open_edit(&mut self, record: &TransactionRecord) {
        self.open = true;
        self.mode = EditorMode::Edit {
            id: record.id.clone(),
            recurring: record.is_recurring || record.parent_id.is_some(),
            scope: EditScope::Single,
            stored_target: record.to_wallet_id.clone(),
        };
        self.draft = Some(TransactionDraft::from_record(record));
    }

    /// Scope only applies to recurring records; anything else stays single.
    pub fn set_scope(&mut self, new_scope: EditScope) {
        if let EditorMode::Edit {
            recurring, scope, ..
        } = &mut self.mode
        {
            *scope = if *recurring {
                new_scope
            } else {
                EditScope::Single
            };
        }
    }

    pub fn draft(&self) -> Option<&TransactionDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut TransactionDraft> {
        self.draft.as_mut()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.mode = EditorMode::Create;
        self.draft = None;
    }

    /// Validates and sends the draft; the editor closes only on success.
    pub fn submit(&mut self, api: &dyn FinanceApi) -> Result<Value, EditorError> {
        if !self.open {
            return Err(EditorError::Closed);
        }
        let draft = self.draft.as_ref().ok_or(EditorError::Closed)?;
        match &self.mode {
            // An untouched destination is the server's to keep; only a changed one is checked.
            EditorMode::Edit { stored_target, .. }
                if draft.kind == TransactionKind::Transfer
                    && &draft.to_wallet_id == stored_target =>
            {
                draft.validate_fields()?
            }
            _ => draft.validate()?,
        }
        let resp = match &self.mode {
            EditorMode::Create => api.create_transaction(draft)?,
            EditorMode::Edit { id, scope, .. } => api.update_transaction(id, draft, *scope)?,
        };
        tracing::info!(mode = ?self.mode, "transaction saved");
        self.close();
        Ok(resp)
    }
}
