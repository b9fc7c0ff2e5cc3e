//! Types that represent the core data model, such as `TransactionRecord` and
//! `Category`.

mod amount;
mod category;
mod record;

pub use amount::Amount;
pub use category::{Category, CategoryRegistry};
pub use record::{TransactionInput, TransactionKind, TransactionRecord};
