use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SysLog は管理画面で行われた操作の記録を表すドメインエンティティ。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct SysLog {
    pub id: Uuid,
    pub operator: String,
    pub request_url: String,
    pub request_method: String,
    pub params: Option<String>,
    pub ip_address: String,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

/// CreateSysLogRequest は操作ログ記録リクエストを表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct CreateSysLogRequest {
    pub operator: String,
    pub request_url: String,
    pub request_method: String,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub duration_ms: i64,
}

/// CreateSysLogResponse は操作ログ作成レスポンスを表す。
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateSysLogResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// SysLogSearchParams は操作ログ検索パラメータを表す。
/// keyword は操作者・リクエスト URL・HTTP メソッドのいずれかに部分一致する。
#[derive(Debug, Clone, Default)]
pub struct SysLogSearchParams {
    pub keyword: Option<String>,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub page: i32,
    pub page_size: i32,
}

impl SysLogSearchParams {
    /// matches はインメモリ実装向けに検索条件との一致を判定する。
    pub fn matches(&self, log: &SysLog) -> bool {
        if let Some(ref keyword) = self.keyword {
            let keyword = keyword.to_lowercase();
            let hit = [&log.operator, &log.request_url, &log.request_method]
                .iter()
                .any(|field| field.to_lowercase().contains(&keyword));
            if !hit {
                return false;
            }
        }
        if let Some(begin) = self.begin_time {
            if log.created_at < begin {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if log.created_at > end {
                return false;
            }
        }
        true
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * i64::from(self.page_size)
    }
}

/// Pagination はページング情報を表す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct Pagination {
    pub total_count: i64,
    pub page: i32,
    pub page_size: i32,
    pub has_next: bool,
}

/// SysLogSearchResult は操作ログ検索結果を表す。
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SysLogSearchResult {
    pub logs: Vec<SysLog>,
    pub pagination: Pagination,
}

impl SysLog {
    /// 新しい SysLog エンティティを作成する。
    pub fn new(req: CreateSysLogRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator: req.operator,
            request_url: req.request_url,
            request_method: req.request_method,
            params: req.params,
            ip_address: req.ip_address,
            duration_ms: req.duration_ms,
            created_at: Utc::now(),
        }
    }
}
