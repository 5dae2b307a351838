use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::role::UserRole;
use crate::domain::repository::UserRoleRepository;

/// UserRolePostgresRepository は sys_user_role テーブルを参照する。
pub struct UserRolePostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl UserRolePostgresRepository {
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

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRoleRow {
    user_id: i64,
    role_id: i64,
}

#[async_trait]
impl UserRoleRepository for UserRolePostgresRepository {
    async fn find_all_by_user_id(&self, user_id: i64) -> anyhow::Result<Vec<UserRole>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, UserRoleRow>(
            "SELECT user_id, role_id FROM sys_user_role WHERE user_id = $1 ORDER BY role_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration(
                "find_all_by_user_id",
                "sys_user_role",
                start.elapsed().as_secs_f64(),
            );
        }

        Ok(rows?
            .into_iter()
            .map(|r| UserRole {
                user_id: r.user_id,
                role_id: r.role_id,
            })
            .collect())
    }
}
