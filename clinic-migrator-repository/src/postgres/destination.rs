use async_trait::async_trait;
use clinic_migrator_shared::{DestinationRecord, FieldValue, NaturalKey};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::{DestinationStore, DestinationStoreError};

/// Longest identifier PostgreSQL keeps without truncation.
const MAX_IDENTIFIER_LEN: usize = 63;

/// PostgreSQL-backed destination store.
///
/// The migration is strictly sequential, so the pool is opened with a single
/// connection that is reused for every lookup and insert of the run.
pub struct PostgresDestination {
    pool: PgPool,
}

impl PostgresDestination {
    /// Creates a destination over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a single-connection pool to `database_url`.
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresDestination)` - Connected store
    /// * `Err(DestinationStoreError)` - If the database is unreachable or the URL is invalid
    pub async fn connect(database_url: &str) -> Result<Self, DestinationStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl DestinationStore for PostgresDestination {
    async fn exists(&self, table: &str, key: &NaturalKey) -> Result<bool, DestinationStoreError> {
        let mut query = exists_query(table, key)?;
        debug!(sql = query.sql(), key = %key, "Checking natural key");
        let found = query
            .build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn insert(
        &self,
        table: &str,
        record: &DestinationRecord,
    ) -> Result<(), DestinationStoreError> {
        let mut query = insert_query(table, record)?;
        debug!(sql = query.sql(), source_id = %record.source_id, "Inserting record");
        query.build().execute(&self.pool).await?;
        Ok(())
    }
}

/// Builds `SELECT EXISTS (SELECT 1 FROM "table" WHERE "a" = $1 AND ...)`.
pub(crate) fn exists_query(
    table: &str,
    key: &NaturalKey,
) -> Result<QueryBuilder<'static, Postgres>, DestinationStoreError> {
    if key.parts().is_empty() {
        return Err(DestinationStoreError::EmptyFilter(table.to_string()));
    }

    let mut builder = QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM ");
    builder.push(quote_identifier(table)?);
    builder.push(" WHERE ");
    for (index, (column, value)) in key.parts().iter().enumerate() {
        if index > 0 {
            builder.push(" AND ");
        }
        builder.push(quote_identifier(column)?);
        builder.push(" = ");
        push_value(&mut builder, value);
    }
    builder.push(")");
    Ok(builder)
}

/// Builds `INSERT INTO "table" ("a", ...) VALUES ($1, ...)`.
pub(crate) fn insert_query(
    table: &str,
    record: &DestinationRecord,
) -> Result<QueryBuilder<'static, Postgres>, DestinationStoreError> {
    if record.is_empty() {
        return Err(DestinationStoreError::EmptyFilter(table.to_string()));
    }

    let mut builder = QueryBuilder::new("INSERT INTO ");
    builder.push(quote_identifier(table)?);
    builder.push(" (");
    for (index, (column, _)) in record.fields().iter().enumerate() {
        if index > 0 {
            builder.push(", ");
        }
        builder.push(quote_identifier(column)?);
    }
    builder.push(") VALUES (");
    for (index, (_, value)) in record.fields().iter().enumerate() {
        if index > 0 {
            builder.push(", ");
        }
        push_value(&mut builder, value);
    }
    builder.push(")");
    Ok(builder)
}

fn push_value(builder: &mut QueryBuilder<'static, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Text(text) => builder.push_bind(text.clone()),
        FieldValue::Number(number) => builder.push_bind(*number),
        FieldValue::Amount(amount) => builder.push_bind(amount.clone()),
        FieldValue::Date(date) => builder.push_bind(*date),
        FieldValue::Timestamp(ts) => builder.push_bind(*ts),
        FieldValue::Json(json) => builder.push_bind(sqlx::types::Json(json.clone())),
    };
}

/// Validates `name` as a plain SQL identifier and returns it double-quoted.
pub(crate) fn quote_identifier(name: &str) -> Result<String, DestinationStoreError> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
        return Err(DestinationStoreError::invalid_identifier(name));
    }
    Ok(format!("\"{}\"", name))
}
