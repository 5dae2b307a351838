use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::role::{Role, RoleStatus};
use crate::domain::repository::RoleRepository;

/// RolePostgresRepository は sys_role テーブルを参照するロールリポジトリ。
pub struct RolePostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl RolePostgresRepository {
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

/// RoleRow は sys_role テーブルの行を表す中間構造体。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: String,
    pub deleted: bool,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            description: row.description,
            status: RoleStatus::from_code(&row.status),
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
            deleted: row.deleted,
        }
    }
}

#[async_trait]
impl RoleRepository for RolePostgresRepository {
    async fn find_all_by_id_in(&self, role_ids: &[i64]) -> anyhow::Result<Vec<Role>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, status, created_at, created_by,
                   updated_at, updated_by, deleted
            FROM sys_role
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(role_ids)
        .fetch_all(&self.pool)
        .await;
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration("find_all_by_id_in", "sys_role", start.elapsed().as_secs_f64());
        }

        Ok(rows?.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_row_status_mapping() {
        let now = chrono::Utc::now();
        let row = RoleRow {
            id: 1,
            name: "admin".to_string(),
            description: "administrators".to_string(),
            status: "0".to_string(),
            created_at: now,
            created_by: "system".to_string(),
            updated_at: now,
            updated_by: "system".to_string(),
            deleted: true,
        };
        let role: Role = row.into();
        assert_eq!(role.status, RoleStatus::Disabled);
        assert!(role.deleted);
        assert_eq!(role.description, "administrators");
    }
}
