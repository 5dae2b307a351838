use async_trait::async_trait;

use crate::domain::entity::user::User;

/// UserRepository はユーザー取得のためのリポジトリトレイト。
/// 該当行が無い場合は Ok(None) を返す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザー名でユーザーを取得する。
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;

    /// ユーザー ID でユーザーを取得する。
    async fn find_by_id(&self, user_id: i64) -> anyhow::Result<Option<User>>;
}
