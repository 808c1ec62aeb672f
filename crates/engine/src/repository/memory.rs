use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use finagent_common::error::AppError;

use super::{Record, Repository};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

/// In-memory record store guarded by an async `RwLock`.
///
/// Ids come from a single monotonically increasing counter per table and are
/// never reused after a delete.
pub struct MemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn list(&self, owner_id: i64) -> Result<Vec<T>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|r| r.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, owner_id: i64, id: i64) -> Result<Option<T>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|r| r.owner_id() == owner_id)
            .cloned())
    }

    async fn create(&self, owner_id: i64, input: T::Input) -> Result<T, AppError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let record = T::from_input(id, owner_id, input, Utc::now());
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        input: T::Input,
    ) -> Result<Option<T>, AppError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(record) if record.owner_id() == owner_id => {
                record.apply(input, Utc::now());
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        let owned = table
            .rows
            .get(&id)
            .is_some_and(|r| r.owner_id() == owner_id);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }
}
