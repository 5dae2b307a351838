use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::menu::Menu;
use crate::domain::repository::MenuRepository;

/// MenuPostgresRepository は sys_menu テーブルを参照する。
pub struct MenuPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl MenuPostgresRepository {
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
struct MenuRow {
    id: i64,
    parent_id: Option<i64>,
    code: String,
    name: String,
    href: String,
    sort: i32,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            parent_id: row.parent_id,
            code: row.code,
            name: row.name,
            href: row.href,
            sort: row.sort,
        }
    }
}

#[async_trait]
impl MenuRepository for MenuPostgresRepository {
    async fn find_all_by_id_in(&self, menu_ids: &[i64]) -> anyhow::Result<Vec<Menu>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, parent_id, code, name, href, sort
            FROM sys_menu
            WHERE id = ANY($1)
            ORDER BY sort, id
            "#,
        )
        .bind(menu_ids)
        .fetch_all(&self.pool)
        .await;
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration("find_all_by_id_in", "sys_menu", start.elapsed().as_secs_f64());
        }

        Ok(rows?.into_iter().map(Into::into).collect())
    }
}
