use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::role_link::RoleLink;
use crate::domain::repository::RoleLinkRepository;

/// RoleLinkPostgresRepository は sys_role_link テーブルを参照する。
pub struct RoleLinkPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl RoleLinkPostgresRepository {
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

    fn observe(&self, query_name: &str, start: std::time::Instant) {
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration(query_name, "sys_role_link", start.elapsed().as_secs_f64());
        }
    }
}

/// RoleLinkRow は sys_role_link テーブルの行を表す中間構造体。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleLinkRow {
    pub role_id: i64,
    pub menu_id: Option<i64>,
    pub element_id: Option<i64>,
}

impl From<RoleLinkRow> for RoleLink {
    fn from(row: RoleLinkRow) -> Self {
        RoleLink {
            role_id: row.role_id,
            menu_id: row.menu_id,
            element_id: row.element_id,
        }
    }
}

#[async_trait]
impl RoleLinkRepository for RoleLinkPostgresRepository {
    async fn find_all_by_role_id_in(&self, role_ids: &[i64]) -> anyhow::Result<Vec<RoleLink>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, RoleLinkRow>(
            r#"
            SELECT role_id, menu_id, element_id
            FROM sys_role_link
            WHERE role_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(role_ids)
        .fetch_all(&self.pool)
        .await;
        self.observe("find_all_by_role_id_in", start);

        Ok(rows?.into_iter().map(Into::into).collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<RoleLink>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, RoleLinkRow>(
            "SELECT role_id, menu_id, element_id FROM sys_role_link ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await;
        self.observe("find_all", start);

        Ok(rows?.into_iter().map(Into::into).collect())
    }
}
