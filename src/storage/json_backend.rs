use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        errors::{Result, TrackerError},
        utils::{ensure_dir, write_atomic},
    },
    ledger::{Amount, Category, CollectionKind, Column},
};

use super::{
    tables::{Staging, Tables},
    RowStore,
};

pub const STORE_SCHEMA_VERSION: u32 = 1;

/// On-disk document: both collections plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    tables: Tables,
}

/// Row store persisted as a single pretty-printed JSON document.
///
/// Every commit rewrites the whole document through a staged temp file and a
/// rename, so a failed write never leaves a partially written store behind.
pub struct JsonRowStore {
    path: PathBuf,
    staging: Staging,
    updated_at: Option<DateTime<Utc>>,
}

impl JsonRowStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let (tables, updated_at) = if path.exists() {
            let file = load_store_file(&path)?;
            (file.tables, file.updated_at)
        } else {
            (Tables::default(), None)
        };
        tracing::debug!(path = %path.display(), "opened json row store");
        Ok(Self {
            path,
            staging: Staging::new(tables),
            updated_at,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn flush(&mut self) -> Result<()> {
        let now = Utc::now();
        let file = StoreFile {
            schema_version: STORE_SCHEMA_VERSION,
            updated_at: Some(now),
            tables: self.staging.live.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.path, &json)?;
        self.updated_at = Some(now);
        tracing::debug!(path = %self.path.display(), "row store flushed");
        Ok(())
    }

    /// Applies `change` to the live tables, flushing immediately unless a
    /// transaction is open.
    fn write<T>(&mut self, change: impl FnOnce(&mut Tables) -> T) -> Result<T> {
        if self.staging.in_transaction() {
            return Ok(change(&mut self.staging.live));
        }
        self.staging.begin()?;
        let outcome = change(&mut self.staging.live);
        let flushed = self.flush();
        self.staging.finish(flushed)?;
        Ok(outcome)
    }
}

impl RowStore for JsonRowStore {
    fn ensure_collection(&mut self, kind: CollectionKind) -> Result<()> {
        if self.staging.live.has_collection(kind) {
            return Ok(());
        }
        self.write(|tables| tables.ensure(kind))?;
        tracing::info!(collection = kind.table_name(), "created collection");
        Ok(())
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
        let flushed = self.flush();
        self.staging.finish(flushed)
    }

    fn rollback(&mut self) {
        if self.staging.rollback() {
            tracing::debug!(path = %self.path.display(), "transaction rolled back");
        }
    }
}

fn load_store_file(path: &Path) -> Result<StoreFile> {
    let data = fs::read_to_string(path)?;
    let file: StoreFile = serde_json::from_str(&data)?;
    if file.schema_version > STORE_SCHEMA_VERSION {
        return Err(TrackerError::Persistence(format!(
            "store `{}` was written by a newer version (schema {})",
            path.display(),
            file.schema_version
        )));
    }
    if let Some((kind, row)) = file.tables.out_of_range_row() {
        return Err(TrackerError::Persistence(format!(
            "store `{}` holds an out-of-range amount in {kind} category `{}`",
            path.display(),
            row.name
        )));
    }
    Ok(file)
}
