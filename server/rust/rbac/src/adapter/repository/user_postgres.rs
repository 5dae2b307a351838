use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;

/// UserPostgresRepository は sys_user テーブルを参照するユーザーリポジトリ。
pub struct UserPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl UserPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            metrics: None,
        }
    }

    pub fn with_metrics(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            pool,
            metrics: Some(metrics),
        }
    }
}

/// UserRow は sys_user テーブルの行を表す中間構造体。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password: row.password,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for UserPostgresRepository {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let start = std::time::Instant::now();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, created_at
            FROM sys_user
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration("find_by_username", "sys_user", start.elapsed().as_secs_f64());
        }

        Ok(row?.map(Into::into))
    }

    async fn find_by_id(&self, user_id: i64) -> anyhow::Result<Option<User>> {
        let start = std::time::Instant::now();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, created_at
            FROM sys_user
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration("find_by_id", "sys_user", start.elapsed().as_secs_f64());
        }

        Ok(row?.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_conversion() {
        let now = chrono::Utc::now();
        let user: User = UserRow {
            id: 5,
            username: "operator".to_string(),
            password: "$argon2id$x".to_string(),
            created_at: now,
        }
        .into();
        assert_eq!(user.id, 5);
        assert_eq!(user.username, "operator");
        assert_eq!(user.password, "$argon2id$x");
        assert_eq!(user.created_at, now);
    }
}
