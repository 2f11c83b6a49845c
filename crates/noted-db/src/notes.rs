//! Durable note store backed by PostgreSQL.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Pool, Postgres};
use tracing::debug;

use noted_core::{Error, ListNotesRequest, ListNotesResponse, Note, NoteStore, Result};

use crate::escape_like;

/// PostgreSQL implementation of `NoteStore`.
///
/// Concurrency control is delegated to the database: every logical
/// operation is a single statement, and no in-process lock is held across
/// calls. `update` uses `UPDATE ... RETURNING` so the modified row comes
/// back in the same round trip; there is no read-after-write race window.
pub struct PgNoteStore {
    pool: Pool<Postgres>,
}

impl PgNoteStore {
    /// Create a new PgNoteStore with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Create the notes table if it does not exist yet.
///
/// Idempotent bootstrap for a single-table schema; full migration tooling
/// is out of scope.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS notes (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(Error::Database)?;
    Ok(())
}

const SELECT_COLUMNS: &str = "id, title, content, created_at, updated_at";

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn list(&self) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {SELECT_COLUMNS} FROM notes ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(notes)
    }

    async fn list_page(&self, req: ListNotesRequest) -> Result<ListNotesResponse> {
        let limit = req.limit.clamp(1, 100);
        let offset = req.offset();

        // Escaping LIKE wildcards makes the filter a literal substring
        // match. Postgres LIKE is case-sensitive, matching the in-memory
        // variant's `str::contains`.
        let pattern = {
            let q = req.query.trim();
            (!q.is_empty()).then(|| format!("%{}%", escape_like(q)))
        };

        let total: i64 = match &pattern {
            Some(p) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE title LIKE $1 OR content LIKE $1")
                    .bind(p)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(Error::Database)?
            }
            None => sqlx::query_scalar("SELECT COUNT(*) FROM notes")
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?,
        };

        if total == 0 {
            return Ok(ListNotesResponse {
                notes: Vec::new(),
                total: 0,
            });
        }

        // Sort column and direction come from the whitelist enums only.
        let order = format!("{} {}", req.sort_by.column(), req.sort_order.keyword());
        debug!(
            subsystem = "database",
            component = "notes",
            op = "list_page",
            %order,
            limit,
            offset,
            filtered = pattern.is_some(),
            "Listing notes page"
        );

        // Row decoding errors propagate and fail the page atomically, so
        // the returned notes are always consistent with `total`.
        let notes = match &pattern {
            Some(p) => {
                let sql = format!(
                    "SELECT {SELECT_COLUMNS} FROM notes \
                     WHERE title LIKE $1 OR content LIKE $1 \
                     ORDER BY {order} LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Note>(&sql)
                    .bind(p)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(Error::Database)?
            }
            None => {
                let sql = format!(
                    "SELECT {SELECT_COLUMNS} FROM notes ORDER BY {order} LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, Note>(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(Error::Database)?
            }
        };

        Ok(ListNotesResponse { notes, total })
    }

    async fn get(&self, id: i64) -> Result<Note> {
        sqlx::query_as::<_, Note>(&format!(
            "SELECT {SELECT_COLUMNS} FROM notes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, title: &str, content: &str) -> Result<Note> {
        let now = Utc::now();
        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (title, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(note)
    }

    async fn update(&self, id: i64, title: &str, content: &str) -> Result<Note> {
        let now = Utc::now();
        sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes SET title = $1, content = $2, updated_at = $3 \
             WHERE id = $4 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use noted_core::{SortBy, SortOrder};

    #[test]
    fn test_order_clause_from_whitelist() {
        let order = format!("{} {}", SortBy::Title.column(), SortOrder::Asc.keyword());
        assert_eq!(order, "title ASC");

        let order = format!(
            "{} {}",
            SortBy::default().column(),
            SortOrder::default().keyword()
        );
        assert_eq!(order, "created_at DESC");
    }

    #[test]
    fn test_pattern_wraps_escaped_query() {
        let pattern = format!("%{}%", crate::escape_like("50%_done"));
        assert_eq!(pattern, "%50\\%\\_done%");
    }
}
