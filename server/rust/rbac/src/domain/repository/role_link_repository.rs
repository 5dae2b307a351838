use async_trait::async_trait;

use crate::domain::entity::role_link::RoleLink;

/// RoleLinkRepository はロールとメニュー / ボタン要素の関連を取得する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleLinkRepository: Send + Sync {
    /// 指定ロール群に紐づく関連を取得する。
    async fn find_all_by_role_id_in(&self, role_ids: &[i64]) -> anyhow::Result<Vec<RoleLink>>;

    /// システム内の全関連を取得する。
    async fn find_all(&self) -> anyhow::Result<Vec<RoleLink>>;
}
