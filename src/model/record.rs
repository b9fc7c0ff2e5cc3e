//! Transaction records: what callers submit and what the ledger stores.

use crate::error::ValidationError;
use crate::model::{Amount, CategoryRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Determines which aggregation bucket a transaction lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Outcome,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

/// A new transaction as submitted by the caller, before the ledger assigns
/// an id and a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Free-text label, must be non-empty.
    pub name: String,
    /// Positive magnitude; the sign is carried by `kind`.
    pub amount: Amount,
    pub kind: TransactionKind,
    /// Key into the [`CategoryRegistry`], checked at append time.
    pub category: String,
}

impl TransactionInput {
    pub fn new(
        name: impl Into<String>,
        amount: Amount,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
            category: category.into(),
        }
    }

    /// Checks the append preconditions against `categories`.
    pub(crate) fn validate(&self, categories: &CategoryRegistry) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if !categories.contains(&self.category) {
            return Err(ValidationError::UnknownCategory(self.category.clone()));
        }
        Ok(())
    }
}

/// A single ledger entry. Records are immutable once appended; there is no
/// update or delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Opaque unique id, assigned at creation and stable for the record's
    /// lifetime.
    pub id: String,
    pub name: String,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub category: String,
    /// Timestamp of insertion.
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Promotes a validated input into a record by assigning an id and
    /// `created_at`.
    pub(crate) fn create(input: TransactionInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            amount: input.amount,
            kind: input.kind,
            category: input.category,
            created_at,
        }
    }
}
