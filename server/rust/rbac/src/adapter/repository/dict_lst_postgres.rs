use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::dict::DictLst;
use crate::domain::repository::DictLstRepository;

/// DictLstPostgresRepository は sys_dict_lst テーブルを参照する。
pub struct DictLstPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl DictLstPostgresRepository {
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
struct DictLstRow {
    id: i64,
    dict_id: i64,
    code: String,
    name: String,
    sort: i32,
}

#[async_trait]
impl DictLstRepository for DictLstPostgresRepository {
    async fn find_all_by_dict_id(&self, dict_id: i64) -> anyhow::Result<Vec<DictLst>> {
        let start = std::time::Instant::now();
        let rows = sqlx::query_as::<_, DictLstRow>(
            r#"
            SELECT id, dict_id, code, name, sort
            FROM sys_dict_lst
            WHERE dict_id = $1
            ORDER BY sort, id
            "#,
        )
        .bind(dict_id)
        .fetch_all(&self.pool)
        .await;
        if let Some(ref m) = self.metrics {
            m.record_db_query_duration(
                "find_all_by_dict_id",
                "sys_dict_lst",
                start.elapsed().as_secs_f64(),
            );
        }

        Ok(rows?
            .into_iter()
            .map(|r| DictLst {
                id: r.id,
                dict_id: r.dict_id,
                code: r.code,
                name: r.name,
                sort: r.sort,
            })
            .collect())
    }
}
