pub mod json_backend;
pub mod memory_backend;
pub mod tables;

use crate::core::errors::Result;
use crate::ledger::{Amount, Category, CollectionKind, Column};

/// Durable row storage grouped by collection.
///
/// Writes outside `begin`/`commit` are committed individually. Inside a
/// transaction they are staged, and `rollback` (or a failed `commit`) leaves the
/// store exactly as it was at `begin`.
pub trait RowStore {
    /// Creates the collection seeded with the placeholder row if it is absent.
    fn ensure_collection(&mut self, kind: CollectionKind) -> Result<()>;
    fn upsert(&mut self, kind: CollectionKind, row: Category) -> Result<()>;
    /// Removes rows whose name matches exactly and returns how many went.
    fn delete_by_name(&mut self, kind: CollectionKind, name: &str) -> Result<usize>;
    fn select_all(&self, kind: CollectionKind) -> Result<Vec<Category>>;
    fn max_id(&self, kind: CollectionKind) -> Result<Option<u32>>;
    fn sum(&self, kind: CollectionKind, column: Column) -> Result<Amount>;

    fn begin(&mut self) -> Result<()>;
    fn commit(&mut self) -> Result<()>;
    fn rollback(&mut self);

    fn select_by_name(&self, kind: CollectionKind, name: &str) -> Result<Option<Category>> {
        Ok(self
            .select_all(kind)?
            .into_iter()
            .find(|row| row.name == name))
    }
}

pub use json_backend::JsonRowStore;
pub use memory_backend::MemoryRowStore;
pub use tables::Tables;
