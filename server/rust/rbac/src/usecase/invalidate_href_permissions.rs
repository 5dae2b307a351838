use crate::infrastructure::{PermissionCache, PermissionCacheKey};

/// InvalidateHrefPermissionsUseCase は href 権限キャッシュを明示的に破棄する。
/// ロール・ロール関連・メニュー・ボタン要素の更新後に呼び出される想定。
pub struct InvalidateHrefPermissionsUseCase {
    cache: PermissionCache,
}

impl InvalidateHrefPermissionsUseCase {
    pub fn new(cache: PermissionCache) -> Self {
        Self { cache }
    }

    /// 指定ユーザーのエントリのみ破棄する。全体版のエントリは残る。
    pub async fn invalidate_user(&self, user_id: i64) {
        self.cache.invalidate(PermissionCacheKey::User(user_id)).await;
        tracing::info!(user_id, "href permission cache invalidated");
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        tracing::info!("all href permission cache entries invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::href_permission::HrefPermissionSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_invalidate_user_keeps_global_entry() {
        let cache = PermissionCache::new(60, 100);
        cache
            .insert(PermissionCacheKey::User(1), Arc::new(HrefPermissionSet::new()))
            .await;
        cache
            .insert(PermissionCacheKey::All, Arc::new(HrefPermissionSet::new()))
            .await;

        let uc = InvalidateHrefPermissionsUseCase::new(cache.clone());
        uc.invalidate_user(1).await;

        assert!(cache.get(PermissionCacheKey::User(1)).await.is_none());
        assert!(cache.get(PermissionCacheKey::All).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = PermissionCache::new(60, 100);
        cache
            .insert(PermissionCacheKey::User(1), Arc::new(HrefPermissionSet::new()))
            .await;
        cache
            .insert(PermissionCacheKey::All, Arc::new(HrefPermissionSet::new()))
            .await;

        InvalidateHrefPermissionsUseCase::new(cache.clone()).invalidate_all();

        assert!(cache.get(PermissionCacheKey::User(1)).await.is_none());
        assert!(cache.get(PermissionCacheKey::All).await.is_none());
    }
}
