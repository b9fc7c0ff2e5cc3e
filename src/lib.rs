//! Per-user transaction ledger and aggregation core.
//!
//! This crate holds the durable, append-only record store of a personal
//! finance app, keyed by authenticated-user identity, plus the derived
//! summary that is recomputed from the full record set on every read.
//! The durable store itself is external: anything that can implement the
//! [`KeyValueStore`] trait (async get/set over string keys) can back a
//! [`Ledger`].

mod error;
mod ledger;
mod model;
mod session;
mod store;
mod summary;

pub use error::{LedgerError, Result, StorageError, ValidationError};
pub use ledger::Ledger;
pub use model::{
    Amount, Category, CategoryRegistry, TransactionInput, TransactionKind, TransactionRecord,
};
pub use session::{SessionInfo, SessionProvider};
pub use store::{KeyValueStore, MemoryStore};
pub use summary::{summarize, AggregateSummary, KindSummary, NO_TRANSACTIONS};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber. Host applications and tests can call
/// this to see the crate's `trace!`/`debug!` output on stderr.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    // A host application may have installed a subscriber already; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
