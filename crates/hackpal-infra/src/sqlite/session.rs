//! SQLite session repository implementation.
//!
//! Owner-scoped statements filter on `id AND user_id` in a single query so
//! that a foreign session and a missing one are indistinguishable.

use hackpal_core::repository::session::SessionRepository;
use hackpal_types::chat::{
    DEFAULT_SESSION_STATUS, DEFAULT_SESSION_TITLE, Session, SessionMetadata, SessionPatch,
};
use hackpal_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, now, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `SessionRepository`.
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct SessionRow {
    id: String,
    user_id: String,
    title: String,
    status: String,
    has_pdf: bool,
    created_at: String,
    updated_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            status: row.try_get("status")?,
            has_pdf: row.try_get("has_pdf")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<Session, RepositoryError> {
        Ok(Session {
            id: parse_uuid(&self.id, "session id")?,
            user_id: parse_uuid(&self.user_id, "user_id")?,
            title: self.title,
            status: self.status,
            metadata: SessionMetadata {
                has_pdf: self.has_pdf,
            },
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn map_row(row: Option<sqlx::sqlite::SqliteRow>) -> Result<Option<Session>, RepositoryError> {
    match row {
        Some(row) => {
            let session_row =
                SessionRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            Ok(Some(session_row.into_session()?))
        }
        None => Ok(None),
    }
}

impl SessionRepository for SqliteSessionRepository {
    async fn create_session(
        &self,
        user_id: &Uuid,
        title: Option<&str>,
    ) -> Result<Session, RepositoryError> {
        let now = now();
        let session = Session {
            id: Uuid::now_v7(),
            user_id: *user_id,
            title: title.unwrap_or(DEFAULT_SESSION_TITLE).to_string(),
            status: DEFAULT_SESSION_STATUS.to_string(),
            metadata: SessionMetadata::default(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO sessions (id, user_id, title, status, has_pdf, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(&session.title)
        .bind(&session.status)
        .bind(session.metadata.has_pdf)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.message().contains("FOREIGN KEY") => {
                RepositoryError::Validation(format!("user '{user_id}' does not exist"))
            }
            _ => RepositoryError::Query(e.to_string()),
        })?;

        Ok(session)
    }

    async fn find_session(&self, id: &Uuid) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_row(row)
    }

    async fn find_session_for_owner(
        &self,
        id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_row(row)
    }

    async fn update_session(
        &self,
        id: &Uuid,
        user_id: &Uuid,
        patch: &SessionPatch,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query(
            r#"UPDATE sessions
               SET title = COALESCE(?, title), status = COALESCE(?, status), updated_at = ?
               WHERE id = ? AND user_id = ?
               RETURNING *"#,
        )
        .bind(patch.title.as_deref())
        .bind(patch.status.as_deref())
        .bind(format_datetime(&now()))
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        map_row(row)
    }

    async fn touch_session(&self, id: &Uuid, has_pdf: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE sessions SET updated_at = ?, has_pdf = MAX(has_pdf, ?) WHERE id = ?",
        )
        .bind(format_datetime(&now()))
        .bind(has_pdf)
        .bind(id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_sessions_by_user(&self, user_id: &Uuid) -> Result<Vec<Session>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM sessions WHERE user_id = ? ORDER BY updated_at DESC, id DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                SessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }
}
