use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::element::Element;
use crate::domain::repository::ElementRepository;

/// ElementPostgresRepository は sys_element テーブルを参照する。
pub struct ElementPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl ElementPostgresRepository {
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
struct ElementRow {
    id: i64,
    menu_id: Option<i64>,
    code: String,
    name: String,
    href: String,
}

impl From<ElementRow> for Element {
    fn from(row: ElementRow) -> Self {
        Element {
            id: row.id,
            menu_id: row.menu_id,
            code: row.code,
            name: row.name,
            href: row.href,
        }
    }
}

#[async_trait]
impl ElementRepository for ElementPostgresRepository {
    async fn find_all_by_id_in(&self, element_ids: &[i64]) -> anyhow::Result<Vec<Element>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, ElementRow>(
            r#"
            SELECT id, menu_id, code, name, href
            FROM sys_element
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(element_ids)
        .fetch_all(&self.pool)
        .await;
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration(
                "find_all_by_id_in",
                "sys_element",
                start.elapsed().as_secs_f64(),
            );
        }

        Ok(rows?.into_iter().map(Into::into).collect())
    }
}
