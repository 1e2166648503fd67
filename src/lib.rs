#![doc(test(attr(deny(warnings))))]

//! Budget Tracker records income and expense categories with actual and
//! target amounts, lists them with totals, and reports variance against plan.

pub mod cli;
pub mod config;
pub mod core;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("budget tracker tracing initialized");
    });
}
