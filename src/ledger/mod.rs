//! Category model, money amounts, and the ledger operations over a row store.

pub mod amount;
pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod summary;

pub use amount::Amount;
pub use category::{Category, CollectionKind, Column, PLACEHOLDER_ID, PLACEHOLDER_NAME};
pub use ledger::{Ledger, Removal};
pub use summary::{CategoryListing, CollectionTotals, Standing, SummaryReport};
