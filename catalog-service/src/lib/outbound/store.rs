use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::errors::RepositoryError;

/// Document collections known to the service.
///
/// Each maps to a table `(id TEXT PRIMARY KEY, document JSONB, created_at)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Accounts,
    Products,
    Profiles,
}

impl Collection {
    fn table(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Products => "products",
            Collection::Profiles => "profiles",
        }
    }
}

/// JSON document store on PostgreSQL.
///
/// Supports lookup by id, lookup by exact field, substring search on a
/// field, full scans, insert, replace and delete. Table names only ever come
/// from [`Collection`]; field names and values are bound parameters.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, RepositoryError> {
        let sql = format!("SELECT document FROM {} WHERE id = $1", collection.table());

        sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(|row| read_document(&row))
            .transpose()
    }

    /// First document whose text `field` equals `value`.
    pub async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, RepositoryError> {
        let sql = format!(
            "SELECT document FROM {} WHERE document ->> $1 = $2 LIMIT 1",
            collection.table()
        );

        sqlx::query(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(|row| read_document(&row))
            .transpose()
    }

    /// Documents whose text `field` contains `needle`, ignoring case.
    pub async fn search_contains(
        &self,
        collection: Collection,
        field: &str,
        needle: &str,
    ) -> Result<Vec<Value>, RepositoryError> {
        let sql = format!(
            "SELECT document FROM {} WHERE document ->> $1 ILIKE '%' || $2 || '%' ORDER BY created_at",
            collection.table()
        );

        let rows = sqlx::query(&sql)
            .bind(field)
            .bind(escape_like(needle))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(read_document).collect()
    }

    /// Every document in insertion order.
    pub async fn scan(&self, collection: Collection) -> Result<Vec<Value>, RepositoryError> {
        let sql = format!(
            "SELECT document FROM {} ORDER BY created_at",
            collection.table()
        );

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(read_document).collect()
    }

    /// Every document with the key it is stored under, in insertion order.
    pub async fn scan_keyed(
        &self,
        collection: Collection,
    ) -> Result<Vec<(String, Value)>, RepositoryError> {
        let sql = format!(
            "SELECT id, document FROM {} ORDER BY created_at",
            collection.table()
        );

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter()
            .map(|row| {
                let key = row
                    .try_get::<String, _>("id")
                    .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;
                Ok((key, read_document(row)?))
            })
            .collect()
    }

    /// # Errors
    /// * `Duplicate` - The id or a unique field is already taken
    pub async fn insert(
        &self,
        collection: Collection,
        id: &str,
        document: &Value,
    ) -> Result<(), RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (id, document, created_at) VALUES ($1, $2, NOW())",
            collection.table()
        );

        sqlx::query(&sql)
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return RepositoryError::Duplicate(id.to_string());
                    }
                }
                database_error(e)
            })?;

        Ok(())
    }

    /// # Errors
    /// * `Missing` - No document with this id
    pub async fn replace(
        &self,
        collection: Collection,
        id: &str,
        document: &Value,
    ) -> Result<(), RepositoryError> {
        let sql = format!(
            "UPDATE {} SET document = $2 WHERE id = $1",
            collection.table()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Missing(id.to_string()));
        }

        Ok(())
    }

    /// # Returns
    /// Whether a document was removed
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<bool, RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.table());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn read_document(row: &PgRow) -> Result<Value, RepositoryError> {
    row.try_get::<Json<Value>, _>("document")
        .map(|Json(document)| document)
        .map_err(|e| RepositoryError::Corrupt(e.to_string()))
}

fn database_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

/// Escape LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("widget"), "widget");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_collection_tables() {
        assert_eq!(Collection::Accounts.table(), "accounts");
        assert_eq!(Collection::Products.table(), "products");
        assert_eq!(Collection::Profiles.table(), "profiles");
    }
}
