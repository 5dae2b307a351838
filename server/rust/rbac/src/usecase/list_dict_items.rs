use std::sync::Arc;

use crate::domain::entity::dict::DictLst;
use crate::domain::repository::DictLstRepository;

/// ListDictItemsError はデータ辞書取得に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum ListDictItemsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// ListDictItemsUseCase は辞書 ID に属する選択肢を表示順に返す。
pub struct ListDictItemsUseCase {
    dict_repo: Arc<dyn DictLstRepository>,
}

impl ListDictItemsUseCase {
    pub fn new(dict_repo: Arc<dyn DictLstRepository>) -> Self {
        Self { dict_repo }
    }

    pub async fn execute(&self, dict_id: i64) -> Result<Vec<DictLst>, ListDictItemsError> {
        let mut items = self
            .dict_repo
            .find_all_by_dict_id(dict_id)
            .await
            .map_err(|e| ListDictItemsError::Internal(e.to_string()))?;
        items.sort_by_key(|item| (item.sort, item.id));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::dict_lst_repository::MockDictLstRepository;

    fn item(id: i64, code: &str, sort: i32) -> DictLst {
        DictLst {
            id,
            dict_id: 1,
            code: code.to_string(),
            name: code.to_string(),
            sort,
        }
    }

    #[tokio::test]
    async fn test_items_ordered_by_sort_then_id() {
        let mut repo = MockDictLstRepository::new();
        repo.expect_find_all_by_dict_id()
            .withf(|id| *id == 1)
            .returning(|_| Ok(vec![item(3, "c", 2), item(2, "b", 1), item(1, "a", 2)]));

        let uc = ListDictItemsUseCase::new(Arc::new(repo));
        let codes: Vec<_> = uc
            .execute(1)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.code)
            .collect();
        assert_eq!(codes, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_unknown_dict_is_empty() {
        let mut repo = MockDictLstRepository::new();
        repo.expect_find_all_by_dict_id().returning(|_| Ok(vec![]));

        let uc = ListDictItemsUseCase::new(Arc::new(repo));
        assert!(uc.execute(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repository_error() {
        let mut repo = MockDictLstRepository::new();
        repo.expect_find_all_by_dict_id()
            .returning(|_| Err(anyhow::anyhow!("timeout")));

        let uc = ListDictItemsUseCase::new(Arc::new(repo));
        assert!(matches!(
            uc.execute(1).await.unwrap_err(),
            ListDictItemsError::Internal(_)
        ));
    }
}
