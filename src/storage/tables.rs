use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TrackerError};
use crate::ledger::{Amount, Category, CollectionKind, Column};

/// Both collections as row lists kept in id order. `None` means the collection
/// has not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomes: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<Category>>,
}

impl Tables {
    fn slot(&self, kind: CollectionKind) -> &Option<Vec<Category>> {
        match kind {
            CollectionKind::Income => &self.incomes,
            CollectionKind::Expense => &self.expenses,
        }
    }

    fn slot_mut(&mut self, kind: CollectionKind) -> &mut Option<Vec<Category>> {
        match kind {
            CollectionKind::Income => &mut self.incomes,
            CollectionKind::Expense => &mut self.expenses,
        }
    }

    pub fn has_collection(&self, kind: CollectionKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Creates the collection seeded with the placeholder row. Returns `false`
    /// when it already existed.
    pub fn ensure(&mut self, kind: CollectionKind) -> bool {
        let slot = self.slot_mut(kind);
        if slot.is_some() {
            return false;
        }
        *slot = Some(vec![Category::placeholder()]);
        true
    }

    pub fn rows(&self, kind: CollectionKind) -> &[Category] {
        self.slot(kind).as_deref().unwrap_or(&[])
    }

    /// Inserts `row`, replacing any row with the same id.
    pub fn upsert(&mut self, kind: CollectionKind, row: Category) {
        let rows = self.slot_mut(kind).get_or_insert_with(Vec::new);
        match rows.binary_search_by_key(&row.id, |existing| existing.id) {
            Ok(index) => rows[index] = row,
            Err(index) => rows.insert(index, row),
        }
    }

    pub fn delete_by_name(&mut self, kind: CollectionKind, name: &str) -> usize {
        let Some(rows) = self.slot_mut(kind).as_mut() else {
            return 0;
        };
        let before = rows.len();
        rows.retain(|row| row.name != name);
        before - rows.len()
    }

    pub fn max_id(&self, kind: CollectionKind) -> Option<u32> {
        self.rows(kind).iter().map(|row| row.id).max()
    }

    pub fn sum(&self, kind: CollectionKind, column: Column) -> Result<Amount> {
        self.rows(kind)
            .iter()
            .try_fold(Amount::ZERO, |total, row| total.checked_add(column.read(row)))
            .ok_or_else(|| {
                TrackerError::Persistence(format!("{kind} {column:?} total is out of range"))
            })
    }

    /// First row holding an amount no user input could have produced.
    pub fn out_of_range_row(&self) -> Option<(CollectionKind, &Category)> {
        CollectionKind::ALL.into_iter().find_map(|kind| {
            self.rows(kind)
                .iter()
                .find(|row| !row.actual.is_within_limit() || !row.target.is_within_limit())
                .map(|row| (kind, row))
        })
    }
}

/// Live tables plus the snapshot taken when a transaction began.
#[derive(Debug, Default)]
pub(crate) struct Staging {
    pub live: Tables,
    snapshot: Option<Tables>,
}

impl Staging {
    pub fn new(live: Tables) -> Self {
        Self {
            live,
            snapshot: None,
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn begin(&mut self) -> Result<()> {
        if self.snapshot.is_some() {
            return Err(TrackerError::Persistence(
                "a transaction is already open".into(),
            ));
        }
        self.snapshot = Some(self.live.clone());
        Ok(())
    }

    /// Closes the open transaction with the outcome of persisting it; a failed
    /// outcome restores the snapshot.
    pub fn finish(&mut self, persisted: Result<()>) -> Result<()> {
        let snapshot = self.snapshot.take();
        if persisted.is_err() {
            if let Some(snapshot) = snapshot {
                self.live = snapshot;
            }
        }
        persisted
    }

    pub fn rollback(&mut self) -> bool {
        match self.snapshot.take() {
            Some(snapshot) => {
                self.live = snapshot;
                true
            }
            None => false,
        }
    }
}
