use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::model::{Entity, EntityKey, Identified};
use crate::store::traits::EntityStore;

#[derive(Debug, Clone)]
struct Row {
    key: String,
    data: Value,
}

/// In-process store keeping every entity type in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Vec<Row>>>,
    sequence: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_value(&self) -> i64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn decode<E: Entity>(row: &Row) -> Result<E> {
    serde_json::from_value(row.data.clone())
        .with_context(|| format!("Failed to decode stored {} '{}'", E::NAME, row.key))
}

#[async_trait::async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore {
    async fn find_all(&self) -> Result<Vec<E>> {
        let tables = self.tables.read();
        match tables.get(E::NAME) {
            Some(rows) => rows.iter().map(decode::<E>).collect(),
            None => Ok(Vec::new()),
        }
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>> {
        let key = id.to_string();
        let tables = self.tables.read();
        tables
            .get(E::NAME)
            .and_then(|rows| rows.iter().find(|row| row.key == key))
            .map(decode::<E>)
            .transpose()
    }

    async fn save(&self, mut entity: E) -> Result<E> {
        if entity.id().is_none() {
            entity.set_id(E::Id::generate(self.next_value()));
        }
        let key = entity
            .id()
            .map(ToString::to_string)
            .context("Entity has no identity after assignment")?;
        let data = serde_json::to_value(&entity)
            .with_context(|| format!("Failed to encode {} '{}'", E::NAME, key))?;

        let mut tables = self.tables.write();
        let rows = tables.entry(E::NAME).or_default();
        match rows.iter_mut().find(|row| row.key == key) {
            Some(row) => row.data = data,
            None => rows.push(Row { key, data }),
        }

        Ok(entity)
    }

    async fn delete(&self, id: &E::Id) -> Result<bool> {
        let key = id.to_string();
        let mut tables = self.tables.write();
        let Some(rows) = tables.get_mut(E::NAME) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|row| row.key != key);
        Ok(rows.len() != before)
    }
}
