//! Durable append and full-read of a user's transaction records,
//! address-isolated by session identity.
//!
//! The ledger stores each user's full record sequence as one serialized
//! value at `@gofinances:transactions_user:<userId>`. The payload is a
//! versioned envelope so that a shape mismatch decodes loudly as a
//! [`StorageError`] instead of silently reading as an empty ledger.

use crate::error::{LedgerError, Result, StorageError};
use crate::model::{CategoryRegistry, TransactionInput, TransactionRecord};
use crate::session::SessionProvider;
use crate::store::KeyValueStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const STORAGE_KEY_PREFIX: &str = "@gofinances:transactions_user:";
const SCHEMA_VERSION: u32 = 1;

/// Builds the storage key for `user_id`. Pure and deterministic: the same
/// user always addresses the same stored value, and no two users share one.
fn storage_key(user_id: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{user_id}")
}

/// The serialized shape of a user's record sequence.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLedger {
    schema_version: u32,
    records: Vec<TransactionRecord>,
}

/// The per-user transaction ledger over a [`KeyValueStore`].
///
/// Every operation resolves the identity from the passed `SessionProvider`
/// at call time; an unauthenticated call fails with
/// [`LedgerError::Unauthenticated`] before the store is touched.
pub struct Ledger<S: KeyValueStore> {
    store: S,
    categories: CategoryRegistry,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Creates a ledger with the built-in category set.
    pub fn new(store: S) -> Self {
        Self::with_categories(store, CategoryRegistry::builtin())
    }

    pub fn with_categories(store: S, categories: CategoryRegistry) -> Self {
        Self { store, categories }
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Appends a new record to the current user's ledger and returns it with
    /// its assigned id and timestamp.
    ///
    /// The write is a read-modify-write of the full record sequence and is
    /// not atomic against concurrent appends from another process instance
    /// under the same identity: the underlying store has no compare-and-swap,
    /// so two racing appends may lose one writer's record (the last full-set
    /// write wins). Within a single process, sequential appends observe each
    /// other's effects.
    ///
    /// # Errors
    /// - [`LedgerError::Unauthenticated`] when there is no session; the
    ///   store is not touched.
    /// - [`LedgerError::Validation`] for an empty name, a non-positive
    ///   amount, or an unknown category; the store is not touched.
    /// - [`LedgerError::Storage`] when the underlying read or write fails,
    ///   or the existing payload is corrupted.
    pub async fn append(
        &self,
        session: &SessionProvider,
        input: TransactionInput,
    ) -> Result<TransactionRecord> {
        let identity = session.current().ok_or(LedgerError::Unauthenticated)?;
        input.validate(&self.categories)?;

        let key = storage_key(identity.user_id());
        trace!("append to {key}");

        let mut records = self.load(&key).await?;
        let record = TransactionRecord::create(input, Utc::now());
        records.push(record.clone());
        self.save(&key, records).await?;

        debug!("appended transaction {} at {key}", record.id);
        Ok(record)
    }

    /// Reads the current user's full record sequence in insertion order.
    ///
    /// An absent key is a normal state ("no transactions yet") and returns
    /// an empty sequence. A present-but-undecodable payload is a
    /// [`LedgerError::Storage`] error, never a silent empty result.
    pub async fn read_all(&self, session: &SessionProvider) -> Result<Vec<TransactionRecord>> {
        let identity = session.current().ok_or(LedgerError::Unauthenticated)?;
        let key = storage_key(identity.user_id());
        trace!("read_all from {key}");
        Ok(self.load(&key).await?)
    }

    async fn load(&self, key: &str) -> Result<Vec<TransactionRecord>, StorageError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };
        let stored: StoredLedger =
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupted {
                key: key.to_string(),
                source,
            })?;
        if stored.schema_version != SCHEMA_VERSION {
            return Err(StorageError::UnsupportedVersion {
                key: key.to_string(),
                version: stored.schema_version,
            });
        }
        Ok(stored.records)
    }

    async fn save(&self, key: &str, records: Vec<TransactionRecord>) -> Result<(), StorageError> {
        let stored = StoredLedger {
            schema_version: SCHEMA_VERSION,
            records,
        };
        let raw = serde_json::to_string(&stored).map_err(|e| StorageError::Backend(e.into()))?;
        self.store.set(key, &raw).await
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionKind};
    use crate::session::SessionInfo;
    use crate::store::MemoryStore;
    use crate::summary::summarize;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts every store access so tests can assert that precondition
    /// failures never reach the storage boundary.
    #[derive(Default)]
    struct SpyStore {
        inner: MemoryStore,
        gets: AtomicUsize,
        sets: AtomicUsize,
    }

    impl SpyStore {
        fn gets(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }

        fn sets(&self) -> usize {
            self.sets.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl KeyValueStore for SpyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value).await
        }
    }

    fn signed_in(user_id: &str) -> SessionProvider {
        let sessions = SessionProvider::new();
        sessions.sign_in(SessionInfo::new(user_id, "Test User"));
        sessions
    }

    fn salary() -> TransactionInput {
        TransactionInput::new(
            "Salary",
            Amount::from_str("1000").unwrap(),
            TransactionKind::Income,
            "salary",
        )
    }

    fn rent() -> TransactionInput {
        TransactionInput::new(
            "Rent",
            Amount::from_str("400").unwrap(),
            TransactionKind::Outcome,
            "housing",
        )
    }

    #[tokio::test]
    async fn test_read_all_is_empty_when_nothing_stored() {
        let ledger = Ledger::new(MemoryStore::new());
        let sessions = signed_in("u1");
        assert!(ledger.read_all(&sessions).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_read_preserves_insertion_order() {
        crate::init_logger(tracing_subscriber::filter::LevelFilter::TRACE);
        let ledger = Ledger::new(MemoryStore::new());
        let sessions = signed_in("u1");

        let first = ledger.append(&sessions, salary()).await.unwrap();
        let second = ledger.append(&sessions, rent()).await.unwrap();

        let records = ledger.read_all(&sessions).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], first);
        assert_eq!(records[1], second);
        assert_eq!(records[0].name, "Salary");
        assert_eq!(records[1].name, "Rent");
    }

    #[tokio::test]
    async fn test_canonical_scenario_totals() {
        let ledger = Ledger::new(MemoryStore::new());
        let sessions = signed_in("u1");

        ledger.append(&sessions, salary()).await.unwrap();
        ledger.append(&sessions, rent()).await.unwrap();

        let records = ledger.read_all(&sessions).await.unwrap();
        let summary = summarize(&records);
        assert_eq!(summary.income().total().value(), Decimal::from(1000));
        assert_eq!(summary.outcome().total().value(), Decimal::from(400));
        assert_eq!(summary.net_balance().value(), Decimal::from(600));
    }

    #[tokio::test]
    async fn test_unauthenticated_calls_do_not_touch_store() {
        let ledger = Ledger::new(SpyStore::default());
        let sessions = SessionProvider::new();

        let append_err = ledger.append(&sessions, salary()).await.unwrap_err();
        assert!(matches!(append_err, LedgerError::Unauthenticated));

        let read_err = ledger.read_all(&sessions).await.unwrap_err();
        assert!(matches!(read_err, LedgerError::Unauthenticated));

        assert_eq!(ledger.store().gets(), 0);
        assert_eq!(ledger.store().sets(), 0);
    }

    #[tokio::test]
    async fn test_signed_out_session_is_unauthenticated() {
        let ledger = Ledger::new(MemoryStore::new());
        let sessions = signed_in("u1");
        ledger.append(&sessions, salary()).await.unwrap();

        sessions.sign_out();
        let err = ledger.read_all(&sessions).await.unwrap_err();
        assert!(matches!(err, LedgerError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_validation_failure_performs_no_store_write() {
        let ledger = Ledger::new(SpyStore::default());
        let sessions = signed_in("u1");

        let zero = TransactionInput::new(
            "Nothing",
            Amount::ZERO,
            TransactionKind::Income,
            "salary",
        );
        let err = ledger.append(&sessions, zero).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let unknown = TransactionInput::new(
            "Mystery",
            Amount::from_str("10").unwrap(),
            TransactionKind::Outcome,
            "snacks",
        );
        let err = ledger.append(&sessions, unknown).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        assert_eq!(ledger.store().gets(), 0);
        assert_eq!(ledger.store().sets(), 0);
    }

    #[tokio::test]
    async fn test_records_are_isolated_per_user() {
        let ledger = Ledger::new(MemoryStore::new());
        let sessions = signed_in("u1");
        ledger.append(&sessions, salary()).await.unwrap();
        ledger.append(&sessions, rent()).await.unwrap();

        // A different user signing in on the same device sees nothing.
        sessions.sign_out();
        sessions.sign_in(SessionInfo::new("u2", "Other User"));
        assert!(ledger.read_all(&sessions).await.unwrap().is_empty());

        // And u1's records are still there.
        sessions.sign_out();
        sessions.sign_in(SessionInfo::new("u1", "Test User"));
        assert_eq!(ledger.read_all(&sessions).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_corrupted_payload_surfaces_storage_error() {
        let store = MemoryStore::new();
        store
            .set(&storage_key("u1"), "definitely not json")
            .await
            .unwrap();
        let ledger = Ledger::new(store);
        let sessions = signed_in("u1");

        let err = ledger.read_all(&sessions).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Storage(StorageError::Corrupted { .. })
        ));
    }

    #[tokio::test]
    async fn test_unsupported_schema_version_surfaces_storage_error() {
        let store = MemoryStore::new();
        store
            .set(&storage_key("u1"), r#"{"schemaVersion":2,"records":[]}"#)
            .await
            .unwrap();
        let ledger = Ledger::new(store);
        let sessions = signed_in("u1");

        let err = ledger.read_all(&sessions).await.unwrap_err();
        match err {
            LedgerError::Storage(StorageError::UnsupportedVersion { version, .. }) => {
                assert_eq!(version, 2)
            }
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stored_payload_shape() {
        let ledger = Ledger::new(MemoryStore::new());
        let sessions = signed_in("u1");
        ledger.append(&sessions, rent()).await.unwrap();

        let raw = ledger
            .store()
            .get(&storage_key("u1"))
            .await
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert_eq!(value["records"][0]["name"], "Rent");
        assert_eq!(value["records"][0]["kind"], "outcome");
        assert!(value["records"][0]["createdAt"].is_string());
    }

    #[test]
    fn test_storage_key_is_deterministic_and_user_scoped() {
        assert_eq!(storage_key("u1"), "@gofinances:transactions_user:u1");
        assert_eq!(storage_key("u1"), storage_key("u1"));
        assert_ne!(storage_key("u1"), storage_key("u2"));
    }
}
