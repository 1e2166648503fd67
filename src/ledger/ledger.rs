use std::collections::HashMap;

use strsim::levenshtein;

use crate::core::errors::{Result, TrackerError};
use crate::storage::RowStore;

use super::amount::Amount;
use super::category::{Category, CollectionKind, Column, PLACEHOLDER_ID, PLACEHOLDER_NAME};
use super::summary::{CategoryListing, CollectionTotals, SummaryReport};

const SUGGESTION_MAX_DISTANCE: usize = 3;

/// Outcome of a removal request that passed the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(Category),
    Aborted,
}

/// Income and expense categories over a row store.
///
/// Names are compared exactly (case-sensitive). Every write runs inside a store
/// transaction that is rolled back on failure.
pub struct Ledger {
    store: Box<dyn RowStore>,
    issued: HashMap<CollectionKind, u32>,
}

impl Ledger {
    /// Wraps `store`, creating both collections if this is their first use.
    pub fn open(mut store: Box<dyn RowStore>) -> Result<Self> {
        for kind in CollectionKind::ALL {
            store.ensure_collection(kind)?;
        }
        Ok(Self {
            store,
            issued: HashMap::new(),
        })
    }

    pub fn add_category(&mut self, kind: CollectionKind, name: &str) -> Result<Category> {
        let name = validate_name(name)?;
        self.store.ensure_collection(kind)?;
        let rows = self.store.select_all(kind)?;
        if rows.iter().any(|row| !row.is_placeholder() && row.name == name) {
            return Err(TrackerError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }

        let id = match rows.as_slice() {
            [only] if only.is_placeholder() => PLACEHOLDER_ID,
            _ => self.next_id(kind)?,
        };
        let category = Category::new(id, name);
        self.atomically("add_category", |store| store.upsert(kind, category.clone()))?;
        self.record_issued(kind, id);
        tracing::info!(collection = kind.table_name(), id, name, "category added");
        Ok(category)
    }

    /// Removes `name` once `confirm` approves the category about to go.
    pub fn remove_category(
        &mut self,
        kind: CollectionKind,
        name: &str,
        confirm: impl FnOnce(&Category) -> bool,
    ) -> Result<Removal> {
        let category = self.category(kind, name)?;
        if !confirm(&category) {
            tracing::info!(collection = kind.table_name(), name = %category.name, "removal aborted");
            return Ok(Removal::Aborted);
        }
        let removed = self.atomically("remove_category", |store| {
            store.delete_by_name(kind, &category.name)
        })?;
        if removed == 0 {
            return Err(not_found(kind, &category.name));
        }
        tracing::info!(collection = kind.table_name(), id = category.id, name = %category.name, "category removed");
        Ok(Removal::Removed(category))
    }

    pub fn update_actual(
        &mut self,
        kind: CollectionKind,
        name: &str,
        amount: Amount,
    ) -> Result<Category> {
        self.update(kind, name, Column::Actual, amount)
    }

    pub fn update_target(
        &mut self,
        kind: CollectionKind,
        name: &str,
        amount: Amount,
    ) -> Result<Category> {
        self.update(kind, name, Column::Target, amount)
    }

    /// Looks up a user category by exact name.
    pub fn category(&self, kind: CollectionKind, name: &str) -> Result<Category> {
        if name == PLACEHOLDER_NAME {
            return Err(not_found(kind, name));
        }
        self.store
            .select_by_name(kind, name)?
            .filter(|category| !category.is_placeholder())
            .ok_or_else(|| not_found(kind, name))
    }

    pub fn list_categories(&self, kind: CollectionKind) -> Result<CategoryListing> {
        let categories = self
            .store
            .select_all(kind)?
            .into_iter()
            .filter(|category| !category.is_placeholder())
            .collect();
        tracing::debug!(collection = kind.table_name(), "listing categories");
        Ok(CategoryListing::new(categories, self.totals(kind)?))
    }

    pub fn budget_summary(&self) -> Result<SummaryReport> {
        let income = self.totals(CollectionKind::Income)?;
        let expenses = self.totals(CollectionKind::Expense)?;
        Ok(SummaryReport::new(income, expenses))
    }

    /// Closest existing name to `name`, for "did you mean" hints.
    pub fn suggest(&self, kind: CollectionKind, name: &str) -> Option<String> {
        let rows = self.store.select_all(kind).ok()?;
        rows.into_iter()
            .filter(|category| !category.is_placeholder())
            .map(|category| (levenshtein(&category.name, name), category.name))
            .filter(|(distance, _)| *distance <= SUGGESTION_MAX_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    fn update(
        &mut self,
        kind: CollectionKind,
        name: &str,
        column: Column,
        amount: Amount,
    ) -> Result<Category> {
        let mut category = self.category(kind, name)?;
        match column {
            Column::Actual => category.actual = amount,
            Column::Target => category.target = amount,
        }
        self.atomically("update_category", |store| {
            store.upsert(kind, category.clone())
        })?;
        tracing::info!(
            collection = kind.table_name(),
            name = %category.name,
            column = ?column,
            %amount,
            "category updated"
        );
        Ok(category)
    }

    fn totals(&self, kind: CollectionKind) -> Result<CollectionTotals> {
        Ok(CollectionTotals {
            actual: self.store.sum(kind, Column::Actual)?,
            target: self.store.sum(kind, Column::Target)?,
        })
    }

    /// `max(existing ids, ids issued this session) + 1`, so a removed newest id
    /// is not handed out again while the session lasts.
    fn next_id(&self, kind: CollectionKind) -> Result<u32> {
        let existing = self.store.max_id(kind)?.unwrap_or(0);
        let issued = self.issued.get(&kind).copied().unwrap_or(0);
        existing
            .max(issued)
            .checked_add(1)
            .ok_or_else(|| TrackerError::Persistence(format!("{kind} category ids exhausted")))
    }

    fn record_issued(&mut self, kind: CollectionKind, id: u32) {
        let entry = self.issued.entry(kind).or_insert(0);
        *entry = (*entry).max(id);
    }

    fn atomically<T>(
        &mut self,
        operation: &'static str,
        work: impl FnOnce(&mut dyn RowStore) -> Result<T>,
    ) -> Result<T> {
        self.store.begin()?;
        let outcome = work(self.store.as_mut()).and_then(|value| {
            self.store.commit()?;
            Ok(value)
        });
        if let Err(err) = &outcome {
            self.store.rollback();
            tracing::warn!(operation, error = %err, "write rolled back");
        }
        outcome
    }
}

fn validate_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(TrackerError::InvalidName(
            "category name cannot be empty".into(),
        ));
    }
    Ok(name)
}

fn not_found(kind: CollectionKind, name: &str) -> TrackerError {
    TrackerError::NotFound {
        kind,
        name: name.to_string(),
    }
}
