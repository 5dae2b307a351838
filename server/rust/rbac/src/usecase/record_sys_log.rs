use std::sync::Arc;

use crate::domain::entity::sys_log::{CreateSysLogRequest, CreateSysLogResponse, SysLog};
use crate::domain::repository::SysLogRepository;

/// RecordSysLogError は操作ログ記録に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum RecordSysLogError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// RecordSysLogUseCase は操作ログ記録ユースケース。
pub struct RecordSysLogUseCase {
    sys_log_repo: Arc<dyn SysLogRepository>,
}

impl RecordSysLogUseCase {
    pub fn new(sys_log_repo: Arc<dyn SysLogRepository>) -> Self {
        Self { sys_log_repo }
    }

    pub async fn execute(
        &self,
        req: CreateSysLogRequest,
    ) -> Result<CreateSysLogResponse, RecordSysLogError> {
        for (field, value) in [
            ("operator", &req.operator),
            ("request_url", &req.request_url),
            ("request_method", &req.request_method),
        ] {
            if value.trim().is_empty() {
                return Err(RecordSysLogError::Validation(format!(
                    "{} is required",
                    field
                )));
            }
        }
        if req.duration_ms < 0 {
            return Err(RecordSysLogError::Validation(
                "duration_ms must be >= 0".to_string(),
            ));
        }

        let log = SysLog::new(req);
        self.sys_log_repo
            .create(&log)
            .await
            .map_err(|e| RecordSysLogError::Internal(e.to_string()))?;

        tracing::debug!(id = %log.id, operator = %log.operator, "sys log recorded");

        Ok(CreateSysLogResponse {
            id: log.id,
            created_at: log.created_at,
        })
    }
}
