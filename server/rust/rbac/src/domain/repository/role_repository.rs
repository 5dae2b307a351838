use async_trait::async_trait;

use crate::domain::entity::role::Role;

/// RoleRepository はロールを取得する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// ID 集合に含まれるロールを ID 昇順で取得する。
    async fn find_all_by_id_in(&self, role_ids: &[i64]) -> anyhow::Result<Vec<Role>>;
}
