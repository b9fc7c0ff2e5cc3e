//! Derives totals and display markers from a record sequence.
//!
//! The summary is never stored: it has no identity of its own and no
//! partial-update path. [`summarize`] is a pure function of the record set
//! at read time, cheap enough to run on every screen focus.

use crate::model::{Amount, TransactionKind, TransactionRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Sentinel rendered when a partition has no records.
pub const NO_TRANSACTIONS: &str = "No transactions";

/// The running total and most-recent-transaction marker for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSummary {
    total: Decimal,
    last_transaction: Option<DateTime<Utc>>,
}

impl KindSummary {
    /// Exact sum of this kind's amounts; zero when the partition is empty.
    pub fn total(&self) -> Amount {
        Amount::new(self.total)
    }

    /// `created_at` of the most recent record of this kind, if any.
    pub fn last_transaction(&self) -> Option<DateTime<Utc>> {
        self.last_transaction
    }

    /// The formatted date of the most recent transaction of this kind, or
    /// the sentinel when there is none.
    pub fn last_transaction_label(&self) -> String {
        match self.last_transaction {
            Some(at) => format_day(at),
            None => NO_TRANSACTIONS.to_string(),
        }
    }
}

/// Totals by kind, the net balance, and the observed activity span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateSummary {
    income: KindSummary,
    outcome: KindSummary,
    net_balance: Amount,
    period: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl AggregateSummary {
    pub fn income(&self) -> &KindSummary {
        &self.income
    }

    pub fn outcome(&self) -> &KindSummary {
        &self.outcome
    }

    /// Income total minus outcome total. May be negative.
    pub fn net_balance(&self) -> Amount {
        self.net_balance
    }

    /// Earliest-to-latest `created_at` span of the income partition.
    pub fn period(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.period
    }

    /// A "from first to last" label over the income partition's span, or the
    /// sentinel when there are no income records.
    pub fn period_label(&self) -> String {
        match self.period {
            Some((start, end)) => format!("{} to {}", format_day(start), format_day(end)),
            None => NO_TRANSACTIONS.to_string(),
        }
    }
}

/// Computes the summary for `records`.
///
/// Partitions by kind, sums amounts exactly, and tracks the most recent
/// record per kind by its own `created_at`. When two records carry exactly
/// equal timestamps, the later-inserted one wins.
pub fn summarize(records: &[TransactionRecord]) -> AggregateSummary {
    let mut income = KindSummary::default();
    let mut outcome = KindSummary::default();
    let mut period: Option<(DateTime<Utc>, DateTime<Utc>)> = None;

    for record in records {
        let bucket = match record.kind {
            TransactionKind::Income => &mut income,
            TransactionKind::Outcome => &mut outcome,
        };
        bucket.total += record.amount.value();
        if bucket
            .last_transaction
            .map_or(true, |at| record.created_at >= at)
        {
            bucket.last_transaction = Some(record.created_at);
        }

        if record.kind == TransactionKind::Income {
            period = Some(match period {
                Some((start, end)) => (start.min(record.created_at), end.max(record.created_at)),
                None => (record.created_at, record.created_at),
            });
        }
    }

    AggregateSummary {
        net_balance: Amount::new(income.total - outcome.total),
        income,
        outcome,
        period,
    }
}

/// Formats a timestamp as a day-of-month and month name, e.g. `12 April`.
fn format_day(at: DateTime<Utc>) -> String {
    at.format("%-d %B").to_string()
}
