use async_trait::async_trait;

use crate::domain::entity::dict::DictLst;

/// DictLstRepository はデータ辞書の選択肢を取得する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DictLstRepository: Send + Sync {
    /// 辞書 ID に属する選択肢を sort, id の昇順で取得する。
    async fn find_all_by_dict_id(&self, dict_id: i64) -> anyhow::Result<Vec<DictLst>>;
}
