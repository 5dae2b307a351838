use async_trait::async_trait;

use crate::domain::entity::sys_log::{SysLog, SysLogSearchParams};

/// SysLogRepository は操作ログの永続化と検索を担う。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SysLogRepository: Send + Sync {
    async fn create(&self, log: &SysLog) -> anyhow::Result<()>;

    /// 条件に一致するログを新しい順に 1 ページ分と、一致総件数を返す。
    async fn search(&self, params: &SysLogSearchParams) -> anyhow::Result<(Vec<SysLog>, i64)>;
}
