use std::sync::Arc;

use async_trait::async_trait;
use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::entity::sys_log::{SysLog, SysLogSearchParams};
use crate::domain::repository::SysLogRepository;

/// SysLogPostgresRepository は sys_log テーブルに操作ログを保存・検索する。
pub struct SysLogPostgresRepository {
    pool: PgPool,
    metrics: Option<Arc<Metrics>>,
}

impl SysLogPostgresRepository {
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
            m.record_db_query_duration(query_name, "sys_log", start.elapsed().as_secs_f64());
        }
    }
}

/// keyword_pattern は keyword を ILIKE の部分一致パターンに変換する。
/// `%` `_` `\` はエスケープし、リテラルとして照合させる。
fn keyword_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// 検索条件から WHERE 句を組み立て、次に使うバインド番号とともに返す。
/// バインド順は keyword, begin_time, end_time。
fn build_where_clause(params: &SysLogSearchParams) -> (String, u32) {
    let mut conditions = Vec::new();
    let mut bind_index = 1u32;

    if params.keyword.is_some() {
        conditions.push(format!(
            r"(operator ILIKE ${bi} ESCAPE '\' OR request_url ILIKE ${bi} ESCAPE '\' OR request_method ILIKE ${bi} ESCAPE '\')",
            bi = bind_index
        ));
        bind_index += 1;
    }
    if params.begin_time.is_some() {
        conditions.push(format!("created_at >= ${}", bind_index));
        bind_index += 1;
    }
    if params.end_time.is_some() {
        conditions.push(format!("created_at <= ${}", bind_index));
        bind_index += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, bind_index)
}

#[async_trait]
impl SysLogRepository for SysLogPostgresRepository {
    async fn create(&self, log: &SysLog) -> anyhow::Result<()> {
        let start = std::time::Instant::now();
        let result = sqlx::query(
            r#"
            INSERT INTO sys_log
                (id, operator, request_url, request_method, params, ip_address, duration_ms, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(log.id)
        .bind(&log.operator)
        .bind(&log.request_url)
        .bind(&log.request_method)
        .bind(&log.params)
        .bind(&log.ip_address)
        .bind(log.duration_ms)
        .bind(log.created_at)
        .execute(&self.pool)
        .await;
        self.observe("create", start);

        result?;
        Ok(())
    }

    async fn search(&self, params: &SysLogSearchParams) -> anyhow::Result<(Vec<SysLog>, i64)> {
        let (where_clause, bind_index) = build_where_clause(params);

        let count_query = format!("SELECT COUNT(*) FROM sys_log {}", where_clause);
        let data_query = format!(
            "SELECT id, operator, request_url, request_method, params, ip_address, duration_ms, created_at FROM sys_log {} ORDER BY created_at DESC, id LIMIT ${} OFFSET ${}",
            where_clause,
            bind_index,
            bind_index + 1
        );

        // count
        let pattern = params.keyword.as_deref().map(keyword_pattern);

        let mut count_q = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref v) = pattern {
            count_q = count_q.bind(v);
        }
        if let Some(v) = params.begin_time {
            count_q = count_q.bind(v);
        }
        if let Some(v) = params.end_time {
            count_q = count_q.bind(v);
        }
        let start = std::time::Instant::now();
        let total_count = count_q.fetch_one(&self.pool).await;
        self.observe("search_count", start);
        let total_count = total_count?;

        // data
        let mut data_q = sqlx::query_as::<_, SysLogRow>(&data_query);
        if let Some(ref v) = pattern {
            data_q = data_q.bind(v);
        }
        if let Some(v) = params.begin_time {
            data_q = data_q.bind(v);
        }
        if let Some(v) = params.end_time {
            data_q = data_q.bind(v);
        }
        data_q = data_q.bind(i64::from(params.page_size));
        data_q = data_q.bind(params.offset());

        let start = std::time::Instant::now();
        let rows = data_q.fetch_all(&self.pool).await;
        self.observe("search", start);

        let logs = rows?.into_iter().map(Into::into).collect();
        Ok((logs, total_count))
    }
}

/// SysLogRow は DB から取得した行を表す中間構造体。
#[derive(Debug, sqlx::FromRow)]
struct SysLogRow {
    id: uuid::Uuid,
    operator: String,
    request_url: String,
    request_method: String,
    params: Option<String>,
    ip_address: String,
    duration_ms: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<SysLogRow> for SysLog {
    fn from(row: SysLogRow) -> Self {
        SysLog {
            id: row.id,
            operator: row.operator,
            request_url: row.request_url,
            request_method: row.request_method,
            params: row.params,
            ip_address: row.ip_address,
            duration_ms: row.duration_ms,
            created_at: row.created_at,
        }
    }
}
