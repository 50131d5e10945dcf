//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use roomhub_app::ports::UserRepository;
use roomhub_domain::error::{RoomHubError, ValidationError};
use roomhub_domain::id::UserId;
use roomhub_domain::user::User;

use crate::decode;
use crate::error::StorageError;

struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: decode::parsed(row, "id")?,
            username: row.try_get("username")?,
            token_hash: row.try_get("token_hash")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (id, username, token_hash) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_TOKEN_HASH: &str = "SELECT * FROM users WHERE token_hash = ?";
const SELECT_BY_USERNAME: &str = "SELECT * FROM users WHERE username = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn find_one<T>(
    pool: &SqlitePool,
    query: &str,
    value: T,
) -> Result<Option<User>, RoomHubError>
where
    T: for<'q> sqlx::Encode<'q, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite> + Send + 'static,
{
    let row: Option<Wrapper> = sqlx::query_as(query)
        .bind(value)
        .fetch_optional(pool)
        .await
        .map_err(StorageError::from)?;

    Ok(row.map(|w| w.0))
}

/// A concurrent registration that lost the race on the username index.
fn is_username_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.message().contains("users.username")
        }
        _ => false,
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, RoomHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(user.id.to_string())
                .bind(&user.username)
                .bind(&user.token_hash)
                .execute(&pool)
                .await;

            match result {
                Ok(_) => Ok(user),
                Err(err) if is_username_conflict(&err) => {
                    tracing::debug!(username = %user.username, "username already taken");
                    Err(ValidationError::UsernameTaken.into())
                }
                Err(err) => Err(StorageError::from(err).into()),
            }
        }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send {
        let pool = self.pool.clone();
        async move { find_one(&pool, SELECT_BY_ID, id.to_string()).await }
    }

    fn find_by_token_hash(
        &self,
        token_hash: &[u8],
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send {
        let pool = self.pool.clone();
        let token_hash = token_hash.to_vec();
        async move { find_one(&pool, SELECT_BY_TOKEN_HASH, token_hash).await }
    }

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, RoomHubError>> + Send {
        let pool = self.pool.clone();
        let username = username.to_string();
        async move { find_one(&pool, SELECT_BY_USERNAME, username).await }
    }
}
