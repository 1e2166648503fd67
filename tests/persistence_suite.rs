mod common;

use std::fs;

use budget_tracker::core::errors::TrackerError;
use budget_tracker::core::utils::tmp_path;
use budget_tracker::ledger::{Amount, CollectionKind};
use budget_tracker::storage::{JsonRowStore, RowStore};
use serde_json::Value;

use common::{open_ledger, store_path, temp_home};

#[test]
fn fresh_store_holds_both_placeholder_rows() {
    let home = temp_home();
    let ledger = open_ledger(&home);
    assert!(ledger
        .list_categories(CollectionKind::Income)
        .expect("list")
        .is_empty());

    let json: Value =
        serde_json::from_str(&fs::read_to_string(store_path(&home)).expect("read store"))
            .expect("parse store");
    assert_eq!(json["schema_version"], 1);
    for table in ["incomes", "expenses"] {
        let rows = json[table].as_array().expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], 1);
        assert_eq!(rows[0]["name"], "");
    }
}

#[test]
fn amounts_are_stored_as_cents() {
    let home = temp_home();
    let mut ledger = open_ledger(&home);
    ledger
        .add_category(CollectionKind::Expense, "Rent")
        .expect("add");
    ledger
        .update_actual(
            CollectionKind::Expense,
            "Rent",
            "1500.005".parse::<Amount>().expect("amount"),
        )
        .expect("update");

    let json: Value =
        serde_json::from_str(&fs::read_to_string(store_path(&home)).expect("read store"))
            .expect("parse store");
    assert_eq!(json["expenses"][0]["actual"], 150_001);
    assert_eq!(json["expenses"][0]["target"], 0);
}

#[test]
fn failed_write_preserves_file_and_ledger_state() {
    let home = temp_home();
    let mut ledger = open_ledger(&home);
    ledger
        .add_category(CollectionKind::Expense, "Rent")
        .expect("add");
    let path = store_path(&home);
    let original = fs::read_to_string(&path).expect("read original");

    // A directory at the staging path makes the next write fail.
    let tmp = tmp_path(&path);
    fs::create_dir_all(&tmp).expect("block tmp path");

    let err = ledger
        .add_category(CollectionKind::Expense, "Food")
        .expect_err("write fails");
    assert!(matches!(err, TrackerError::Persistence(_)));
    let err = ledger
        .update_target(CollectionKind::Expense, "Rent", Amount::from_cents(1_000))
        .expect_err("write fails");
    assert!(matches!(err, TrackerError::Persistence(_)));

    assert_eq!(fs::read_to_string(&path).expect("read after"), original);
    let listing = ledger
        .list_categories(CollectionKind::Expense)
        .expect("list");
    assert_eq!(listing.categories.len(), 1);
    assert!(listing.categories[0].target.is_zero());

    fs::remove_dir_all(&tmp).expect("unblock tmp path");
    let food = ledger
        .add_category(CollectionKind::Expense, "Food")
        .expect("write succeeds again");
    assert_eq!(food.id, 2);
}

#[test]
fn explicit_transaction_commits_once() {
    let home = temp_home();
    let mut store = JsonRowStore::open(store_path(&home)).expect("open");
    store
        .ensure_collection(CollectionKind::Income)
        .expect("ensure");
    store.begin().expect("begin");
    store
        .delete_by_name(CollectionKind::Income, "")
        .expect("staged delete");
    assert_eq!(store.max_id(CollectionKind::Income).expect("max"), None);
    store.commit().expect("commit");

    let reopened = JsonRowStore::open(store_path(&home)).expect("reopen");
    assert!(reopened
        .select_all(CollectionKind::Income)
        .expect("select")
        .is_empty());
}
