//! MySQL user repository implementation.

use crate::traits::UserRepository;
use crate::DatabasePool;
use async_trait::async_trait;
use erudio_core::{ErudioError, ErudioResult};
use erudio_domain::{Permission, User};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    user_name: String,
    full_name: String,
    password: String,
    account_non_expired: bool,
    account_non_locked: bool,
    credentials_non_expired: bool,
    enabled: bool,
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: i64,
    description: String,
}

impl UserRow {
    fn into_user(self, permissions: Vec<PermissionRow>) -> User {
        User {
            id: Some(self.id),
            user_name: self.user_name,
            full_name: self.full_name,
            password: self.password,
            account_non_expired: self.account_non_expired,
            account_non_locked: self.account_non_locked,
            credentials_non_expired: self.credentials_non_expired,
            enabled: self.enabled,
            permissions: permissions
                .into_iter()
                .map(|row| Permission {
                    id: Some(row.id),
                    description: row.description,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, user_name: &str) -> ErudioResult<Option<User>> {
        debug!("Finding user by username: {}", user_name);

        let Some(row) = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, full_name, password, account_non_expired,
                   account_non_locked, credentials_non_expired, enabled
            FROM users
            WHERE user_name = ?
            "#,
        )
        .bind(user_name)
        .fetch_optional(self.pool.inner())
        .await?
        else {
            return Ok(None);
        };

        let permissions = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT p.id, p.description
            FROM permission p
            JOIN user_permission up ON up.id_permission = p.id
            WHERE up.id_user = ?
            ORDER BY p.id
            "#,
        )
        .bind(row.id)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(Some(row.into_user(permissions)))
    }

    async fn save(&self, user: &User) -> ErudioResult<User> {
        debug!("Saving user: {}", user.user_name);

        let mut tx = self.pool.inner().begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (user_name, full_name, password, account_non_expired,
                               account_non_locked, credentials_non_expired, enabled)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.full_name)
        .bind(&user.password)
        .bind(user.account_non_expired)
        .bind(user.account_non_locked)
        .bind(user.credentials_non_expired)
        .bind(user.enabled)
        .execute(&mut *tx)
        .await?;

        let user_id = i64::try_from(result.last_insert_id())
            .map_err(|_| ErudioError::internal("user id exceeds i64"))?;

        let mut permissions = Vec::with_capacity(user.permissions.len());
        for permission in &user.permissions {
            sqlx::query("INSERT IGNORE INTO permission (description) VALUES (?)")
                .bind(&permission.description)
                .execute(&mut *tx)
                .await?;

            let permission_id: i64 = sqlx::query_scalar("SELECT id FROM permission WHERE description = ?")
                .bind(&permission.description)
                .fetch_one(&mut *tx)
                .await?;

            sqlx::query("INSERT INTO user_permission (id_user, id_permission) VALUES (?, ?)")
                .bind(user_id)
                .bind(permission_id)
                .execute(&mut *tx)
                .await?;

            permissions.push(Permission {
                id: Some(permission_id),
                description: permission.description.clone(),
            });
        }

        tx.commit().await?;
        info!(id = user_id, user_name = %user.user_name, "User created");

        Ok(User {
            id: Some(user_id),
            permissions,
            ..user.clone()
        })
    }
}
