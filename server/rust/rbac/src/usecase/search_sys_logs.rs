use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::sys_log::{Pagination, SysLogSearchParams, SysLogSearchResult};
use crate::domain::repository::SysLogRepository;

const DEFAULT_PAGE_SIZE: i32 = 20;
const MAX_PAGE_SIZE: i32 = 200;

/// SearchSysLogsError は操作ログ検索に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum SearchSysLogsError {
    #[error("invalid page: {0}")]
    InvalidPage(String),

    #[error("invalid page_size: {0}")]
    InvalidPageSize(String),

    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// SearchSysLogsQueryParams は操作ログ検索のクエリパラメータを表す。
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SearchSysLogsQueryParams {
    pub keyword: Option<String>,
    pub begin_time: Option<String>,
    pub end_time: Option<String>,
    pub page: Option<i32>,
    pub page_size: Option<i32>,
}

/// SearchSysLogsUseCase は操作ログ検索ユースケース。
pub struct SearchSysLogsUseCase {
    sys_log_repo: Arc<dyn SysLogRepository>,
}

impl SearchSysLogsUseCase {
    pub fn new(sys_log_repo: Arc<dyn SysLogRepository>) -> Self {
        Self { sys_log_repo }
    }

    pub async fn execute(
        &self,
        query: &SearchSysLogsQueryParams,
    ) -> Result<SysLogSearchResult, SearchSysLogsError> {
        let page = query.page.unwrap_or(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(SearchSysLogsError::InvalidPage(
                "page must be >= 1".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(SearchSysLogsError::InvalidPageSize(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let begin_time = parse_time("begin_time", query.begin_time.as_deref())?;
        let end_time = parse_time("end_time", query.end_time.as_deref())?;
        if let (Some(begin), Some(end)) = (begin_time, end_time) {
            if begin > end {
                return Err(SearchSysLogsError::InvalidTimeRange(
                    "begin_time must not be after end_time".to_string(),
                ));
            }
        }

        let keyword = query
            .keyword
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let params = SysLogSearchParams {
            keyword,
            begin_time,
            end_time,
            page,
            page_size,
        };

        let (logs, total_count) = self
            .sys_log_repo
            .search(&params)
            .await
            .map_err(|e| SearchSysLogsError::Internal(e.to_string()))?;

        let has_next = i64::from(page) * i64::from(page_size) < total_count;

        Ok(SysLogSearchResult {
            logs,
            pagination: Pagination {
                total_count,
                page,
                page_size,
                has_next,
            },
        })
    }
}

/// RFC 3339 の日時をパースする。
fn parse_time(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, SearchSysLogsError> {
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    SearchSysLogsError::InvalidTimeRange(format!("invalid {}: {}", field, s))
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::sys_log::{CreateSysLogRequest, SysLog};
    use crate::domain::repository::sys_log_repository::MockSysLogRepository;

    fn make_log() -> SysLog {
        SysLog::new(CreateSysLogRequest {
            operator: "admin".to_string(),
            request_url: "/api/v1/roles".to_string(),
            request_method: "POST".to_string(),
            params: Some(r#"{"name":"auditor"}"#.to_string()),
            ip_address: "10.0.0.1".to_string(),
            duration_ms: 8,
        })
    }

    #[tokio::test]
    async fn test_search_defaults() {
        let mut repo = MockSysLogRepository::new();
        repo.expect_search()
            .withf(|p| p.page == 1 && p.page_size == 20 && p.keyword.is_none())
            .returning(|_| Ok((vec![make_log()], 1)));

        let uc = SearchSysLogsUseCase::new(Arc::new(repo));
        let result = uc
            .execute(&SearchSysLogsQueryParams::default())
            .await
            .unwrap();
        assert_eq!(result.logs.len(), 1);
        assert_eq!(result.pagination.total_count, 1);
        assert!(!result.pagination.has_next);
    }

    #[tokio::test]
    async fn test_search_has_next() {
        let mut repo = MockSysLogRepository::new();
        repo.expect_search()
            .returning(|_| Ok((vec![make_log(), make_log()], 5)));

        let uc = SearchSysLogsUseCase::new(Arc::new(repo));
        let query = SearchSysLogsQueryParams {
            page: Some(2),
            page_size: Some(2),
            ..Default::default()
        };
        let result = uc.execute(&query).await.unwrap();
        assert!(result.pagination.has_next);
        assert_eq!(result.pagination.page, 2);
    }

    #[tokio::test]
    async fn test_search_passes_trimmed_keyword_and_times() {
        let mut repo = MockSysLogRepository::new();
        repo.expect_search()
            .withf(|p| {
                p.keyword.as_deref() == Some("roles")
                    && p.begin_time.is_some()
                    && p.end_time.is_some()
            })
            .returning(|_| Ok((vec![], 0)));

        let uc = SearchSysLogsUseCase::new(Arc::new(repo));
        let query = SearchSysLogsQueryParams {
            keyword: Some("  roles ".to_string()),
            begin_time: Some("2026-01-01T00:00:00Z".to_string()),
            end_time: Some("2026-01-31T23:59:59+09:00".to_string()),
            ..Default::default()
        };
        assert!(uc.execute(&query).await.is_ok());
    }

    #[tokio::test]
    async fn test_blank_keyword_is_ignored() {
        let mut repo = MockSysLogRepository::new();
        repo.expect_search()
            .withf(|p| p.keyword.is_none())
            .returning(|_| Ok((vec![], 0)));

        let uc = SearchSysLogsUseCase::new(Arc::new(repo));
        let query = SearchSysLogsQueryParams {
            keyword: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(uc.execute(&query).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_page() {
        let uc = SearchSysLogsUseCase::new(Arc::new(MockSysLogRepository::new()));
        let query = SearchSysLogsQueryParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(&query).await.unwrap_err(),
            SearchSysLogsError::InvalidPage(_)
        ));
    }

    #[tokio::test]
    async fn test_invalid_page_size() {
        let uc = SearchSysLogsUseCase::new(Arc::new(MockSysLogRepository::new()));
        for size in [0, 201] {
            let query = SearchSysLogsQueryParams {
                page_size: Some(size),
                ..Default::default()
            };
            assert!(matches!(
                uc.execute(&query).await.unwrap_err(),
                SearchSysLogsError::InvalidPageSize(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_invalid_datetime() {
        let uc = SearchSysLogsUseCase::new(Arc::new(MockSysLogRepository::new()));
        let query = SearchSysLogsQueryParams {
            begin_time: Some("yesterday".to_string()),
            ..Default::default()
        };
        let err = uc.execute(&query).await.unwrap_err();
        assert!(matches!(err, SearchSysLogsError::InvalidTimeRange(ref m) if m.contains("begin_time")));
    }

    #[tokio::test]
    async fn test_begin_after_end_rejected() {
        let uc = SearchSysLogsUseCase::new(Arc::new(MockSysLogRepository::new()));
        let query = SearchSysLogsQueryParams {
            begin_time: Some("2026-02-01T00:00:00Z".to_string()),
            end_time: Some("2026-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(&query).await.unwrap_err(),
            SearchSysLogsError::InvalidTimeRange(_)
        ));
    }

    #[tokio::test]
    async fn test_repository_error() {
        let mut repo = MockSysLogRepository::new();
        repo.expect_search()
            .returning(|_| Err(anyhow::anyhow!("db error")));

        let uc = SearchSysLogsUseCase::new(Arc::new(repo));
        assert!(matches!(
            uc.execute(&SearchSysLogsQueryParams::default())
                .await
                .unwrap_err(),
            SearchSysLogsError::Internal(_)
        ));
    }
}
