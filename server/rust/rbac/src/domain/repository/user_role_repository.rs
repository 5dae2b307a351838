use async_trait::async_trait;

use crate::domain::entity::role::UserRole;

/// UserRoleRepository はユーザーとロールの関連を取得する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    async fn find_all_by_user_id(&self, user_id: i64) -> anyhow::Result<Vec<UserRole>>;
}
