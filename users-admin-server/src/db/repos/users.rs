//! User repository
//!
//! Every method issues exactly one statement:
//! - list / get / search: SELECT
//! - create: INSERT ... RETURNING (store assigns the id)
//! - update: UPDATE ... SET <present fields> RETURNING
//! - delete: DELETE, zero rows affected is NotFound

use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{NewUser, UserFilter, UserPatch};

const SELECT_USERS: &str = "SELECT id, name, email, status FROM users";

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: String,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn user_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "user",
            id: id.to_string(),
        }
    }
}

/// Every user, ordered by id.
pub fn list_query() -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(SELECT_USERS);
    query.push(" ORDER BY id");
    query
}

pub fn get_query(id: i64) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(SELECT_USERS);
    query.push(" WHERE id = ").push_bind(id);
    query
}

/// Build the search statement: one bound equality predicate per present field.
pub fn search_query(filter: &UserFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(SELECT_USERS);

    let predicates = filter.predicates();
    if !predicates.is_empty() {
        query.push(" WHERE ");
        let mut clause = query.separated(" AND ");
        for (field, value) in predicates {
            clause.push(field.column());
            clause.push_unseparated(" = ");
            clause.push_bind_unseparated(value);
        }
    }

    query.push(" ORDER BY id");
    query
}

/// Build the update statement. Caller guarantees the patch is non-empty.
pub fn update_query(id: i64, patch: &UserPatch) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new("UPDATE users SET ");

    {
        let mut assignments = query.separated(", ");
        for (field, value) in patch.changes() {
            assignments.push(field.column());
            assignments.push_unseparated(" = ");
            assignments.push_bind_unseparated(value);
        }
    }

    query
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING id, name, email, status");
    query
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All users, ordered by id.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let mut query = list_query();
        let users = query
            .build_query_as::<User>()
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        let mut query = get_query(id);
        let user = query
            .build_query_as::<User>()
            .fetch_optional(self.pool)
            .await?;

        user.ok_or_else(|| DbError::user_not_found(id))
    }

    /// Insert a user; the store assigns the id and the default status.
    pub async fn create(&self, user: &NewUser) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, status)
            VALUES ($1, $2, COALESCE($3, 'active'))
            RETURNING id, name, email, status
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.status.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Change exactly the fields present in `patch`.
    ///
    /// An empty patch degrades to a plain fetch so the call still
    /// costs one statement and reports NotFound the same way.
    pub async fn update(&self, id: i64, patch: &UserPatch) -> Result<User, DbError> {
        if patch.changes().is_empty() {
            return self.get(id).await;
        }

        let mut query = update_query(id, patch);
        let user = query
            .build_query_as::<User>()
            .fetch_optional(self.pool)
            .await?;

        user.ok_or_else(|| DbError::user_not_found(id))
    }

    /// Delete by id, returning the number of rows removed.
    pub async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::user_not_found(id));
        }
        Ok(deleted)
    }

    /// Users matching every present filter field. An empty filter lists everyone.
    pub async fn search(&self, filter: &UserFilter) -> Result<Vec<User>, DbError> {
        let mut query = search_query(filter);
        let users = query
            .build_query_as::<User>()
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }
}
