use crate::{
    core::errors::{Result, TrackerError},
    ledger::{Amount, Category, CollectionKind, Column},
};

use super::{
    tables::{Staging, Tables},
    RowStore,
};

/// Process-local row store. Nothing outlives the value; commits can be made to
/// fail on demand to exercise rollback paths.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    staging: Staging,
    fail_commits: bool,
    commits: usize,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every subsequent commit reports a persistence failure.
    pub fn set_fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    /// Number of successful commits, including auto-committed writes.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    fn persist(&mut self) -> Result<()> {
        if self.fail_commits {
            return Err(TrackerError::Persistence(
                "simulated commit failure".into(),
            ));
        }
        self.commits += 1;
        Ok(())
    }

    fn write<T>(&mut self, change: impl FnOnce(&mut Tables) -> T) -> Result<T> {
        if self.staging.in_transaction() {
            return Ok(change(&mut self.staging.live));
        }
        self.staging.begin()?;
        let outcome = change(&mut self.staging.live);
        let persisted = self.persist();
        self.staging.finish(persisted)?;
        Ok(outcome)
    }
}

impl RowStore for MemoryRowStore {
    fn ensure_collection(&mut self, kind: CollectionKind) -> Result<()> {
        if self.staging.live.has_collection(kind) {
            return Ok(());
        }
        self.write(|tables| tables.ensure(kind)).map(|_| ())
    }

    fn upsert(&mut self, kind: CollectionKind, row: Category) -> Result<()> {
        self.write(|tables| tables.upsert(kind, row))
    }

    fn delete_by_name(&mut self, kind: CollectionKind, name: &str) -> Result<usize> {
        self.write(|tables| tables.delete_by_name(kind, name))
    }

    fn select_all(&self, kind: CollectionKind) -> Result<Vec<Category>> {
        Ok(self.staging.live.rows(kind).to_vec())
    }

    fn max_id(&self, kind: CollectionKind) -> Result<Option<u32>> {
        Ok(self.staging.live.max_id(kind))
    }

    fn sum(&self, kind: CollectionKind, column: Column) -> Result<Amount> {
        self.staging.live.sum(kind, column)
    }

    fn begin(&mut self) -> Result<()> {
        self.staging.begin()
    }

    fn commit(&mut self) -> Result<()> {
        if !self.staging.in_transaction() {
            return Ok(());
        }
        let persisted = self.persist();
        self.staging.finish(persisted)
    }

    fn rollback(&mut self) {
        self.staging.rollback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_commit_discards_staged_rows() {
        let mut store = MemoryRowStore::new();
        store
            .ensure_collection(CollectionKind::Income)
            .expect("ensure");
        store.set_fail_commits(true);

        store.begin().expect("begin");
        store
            .upsert(CollectionKind::Income, Category::new(2, "Salary"))
            .expect("staged");
        assert!(store.commit().is_err());
        assert_eq!(
            store.select_all(CollectionKind::Income).expect("select"),
            vec![Category::placeholder()]
        );
    }

    #[test]
    fn autocommit_write_fails_atomically() {
        let mut store = MemoryRowStore::new();
        store.set_fail_commits(true);
        assert!(store.ensure_collection(CollectionKind::Expense).is_err());
        assert_eq!(store.commit_count(), 0);

        // The collection was not left behind, so creating it writes again.
        store.set_fail_commits(false);
        store
            .ensure_collection(CollectionKind::Expense)
            .expect("ensure");
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn sums_ignore_missing_collections() {
        let store = MemoryRowStore::new();
        assert_eq!(
            store
                .sum(CollectionKind::Expense, Column::Actual)
                .expect("sum"),
            Amount::ZERO
        );
    }
}
