//! SQLite user repository implementation.

use hackpal_core::repository::user::UserRepository;
use hackpal_types::error::RepositoryError;
use hackpal_types::user::{NewUser, User};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, now, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `UserRepository`.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User {
            id: parse_uuid(&self.id, "user id")?,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

impl SqliteUserRepository {
    async fn find_one(&self, column: &str, value: String) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT * FROM users WHERE {column} = ?");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let user_row =
                    UserRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(user_row.into_user()?))
            }
            None => Ok(None),
        }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let missing = user.missing_fields();
        if !missing.is_empty() {
            return Err(RepositoryError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let now = now();
        let created = User {
            id: Uuid::now_v7(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(created.id.to_string())
        .bind(&created.username)
        .bind(&created.email)
        .bind(&created.password_hash)
        .bind(format_datetime(&created.created_at))
        .bind(format_datetime(&created.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => {
                RepositoryError::Conflict(format!("email '{}' already exists", created.email))
            }
            _ => RepositoryError::Query(e.to_string()),
        })?;

        Ok(created)
    }

    async fn find_user_by_id(&self, id: &Uuid) -> Result<Option<User>, RepositoryError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one("email", email.to_string()).await
    }
}
