use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool, Row};

use crate::model::{Entity, EntityKey, Identified};
use crate::store::traits::EntityStore;

/// PostgreSQL store. Every entity type lives in one JSONB table keyed by
/// entity kind and identity; integer identities come from one sequence.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the entity table and identity sequence if missing
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entities (
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (kind, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create entities table")?;

        sqlx::query("CREATE SEQUENCE IF NOT EXISTS entity_id_seq START WITH 1000")
            .execute(&self.pool)
            .await
            .context("Failed to create entity id sequence")?;

        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn next_value(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT nextval('entity_id_seq')")
            .fetch_one(&self.pool)
            .await
            .context("Failed to draw from entity id sequence")
    }
}

#[async_trait::async_trait]
impl<E: Entity> EntityStore<E> for PostgresStore {
    async fn find_all(&self) -> Result<Vec<E>> {
        let rows = sqlx::query("SELECT data FROM entities WHERE kind = $1 ORDER BY created_at, id")
            .bind(E::NAME)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list {}", E::NAME))?;

        rows.into_iter()
            .map(|row| -> Result<E> {
                let Json(entity): Json<E> = row.try_get("data")?;
                Ok(entity)
            })
            .collect()
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>> {
        let row = sqlx::query("SELECT data FROM entities WHERE kind = $1 AND id = $2")
            .bind(E::NAME)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch {} '{}'", E::NAME, id))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let Json(entity): Json<E> = row.try_get("data")?;
        Ok(Some(entity))
    }

    async fn save(&self, mut entity: E) -> Result<E> {
        if entity.id().is_none() {
            let next = if E::Id::SEQUENTIAL {
                self.next_value().await?
            } else {
                0
            };
            entity.set_id(E::Id::generate(next));
        }
        let key = entity
            .id()
            .map(ToString::to_string)
            .context("Entity has no identity after assignment")?;

        sqlx::query(
            r#"
            INSERT INTO entities (kind, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (kind, id) DO UPDATE SET
                data = EXCLUDED.data,
                updated_at = NOW()
            "#,
        )
        .bind(E::NAME)
        .bind(&key)
        .bind(Json(&entity))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to save {} '{}'", E::NAME, key))?;

        Ok(entity)
    }

    async fn delete(&self, id: &E::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM entities WHERE kind = $1 AND id = $2")
            .bind(E::NAME)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete {} '{}'", E::NAME, id))?;

        Ok(result.rows_affected() > 0)
    }
}
