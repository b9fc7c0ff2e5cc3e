//! The error taxonomy for ledger operations.
//!
//! Each failure mode is a distinct variant so that callers can choose an
//! appropriate response. Nothing in this crate converts a real failure into
//! a successful empty result, and nothing is retried; retry policy belongs
//! to the caller.

use crate::model::Amount;
use thiserror::Error;

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

/// Any error a [`crate::Ledger`] operation can produce.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An operation that requires an authenticated session was invoked
    /// without one. Detected before any store access; there is no fallback
    /// to a shared or default storage key.
    #[error("no authenticated session")]
    Unauthenticated,

    /// The submitted transaction failed validation. Detected before any
    /// store access.
    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    /// The underlying store failed, or the stored payload was unusable.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

/// Rejections of a [`crate::TransactionInput`] submitted to `append`.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("transaction name must not be empty")]
    EmptyName,

    #[error("transaction amount must be positive, got {0}")]
    NonPositiveAmount(Amount),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Failures at or below the key-value store boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying key-value store failed to read or write. Adapter
    /// implementations wrap whatever their backend produced.
    #[error("storage backend failure: {0}")]
    Backend(#[from] anyhow::Error),

    /// The stored payload could not be decoded. Surfaced as an error rather
    /// than an empty record set so that corruption is never mistaken for
    /// "no transactions yet".
    #[error("stored ledger at '{key}' is corrupted")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The stored payload decoded, but was written by an incompatible
    /// schema version.
    #[error("stored ledger at '{key}' has unsupported schema version {version}")]
    UnsupportedVersion { key: String, version: u32 },
}
