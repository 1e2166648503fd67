#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use budget_tracker::{ledger::Ledger, storage::JsonRowStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory usable as `BUDGET_TRACKER_HOME`.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn store_path(home: &std::path::Path) -> PathBuf {
    home.join("data").join("tracker.json")
}

/// Ledger over the JSON store inside `home`.
pub fn open_ledger(home: &std::path::Path) -> Ledger {
    let store = JsonRowStore::open(store_path(home)).expect("open json store");
    Ledger::open(Box::new(store)).expect("open ledger")
}
