use std::sync::Arc;

use keep_telemetry::metrics::Metrics;

use crate::domain::entity::href_permission::HrefPermissionSet;
use crate::domain::entity::role_link::RoleLink;
use crate::domain::repository::{
    ElementRepository, MenuRepository, Repositories, RoleLinkRepository, UserRoleRepository,
};
use crate::domain::service::HrefPermissionDomainService;
use crate::infrastructure::{PermissionCache, PermissionCacheKey};

const CACHE_NAME: &str = "href_permission";

/// ResolveHrefPermissionsError は href 権限解決に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum ResolveHrefPermissionsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// ResolveHrefPermissionsUseCase はユーザーのロールから href 権限集合を解決する。
///
/// ユーザーロール → ロール関連 → メニュー / ボタン要素の順に辿り、
/// どの段階でも空になった時点で以降の検索を行わず空集合を返す。
/// 結果はユーザー単位、全体版は単一キーでキャッシュする。
pub struct ResolveHrefPermissionsUseCase {
    user_role_repo: Arc<dyn UserRoleRepository>,
    role_link_repo: Arc<dyn RoleLinkRepository>,
    menu_repo: Arc<dyn MenuRepository>,
    element_repo: Arc<dyn ElementRepository>,
    cache: PermissionCache,
    metrics: Option<Arc<Metrics>>,
}

impl ResolveHrefPermissionsUseCase {
    pub fn new(
        user_role_repo: Arc<dyn UserRoleRepository>,
        role_link_repo: Arc<dyn RoleLinkRepository>,
        menu_repo: Arc<dyn MenuRepository>,
        element_repo: Arc<dyn ElementRepository>,
        cache: PermissionCache,
    ) -> Self {
        Self {
            user_role_repo,
            role_link_repo,
            menu_repo,
            element_repo,
            cache,
            metrics: None,
        }
    }

    pub fn from_repositories(repos: &Repositories, cache: PermissionCache) -> Self {
        Self::new(
            repos.user_roles.clone(),
            repos.role_links.clone(),
            repos.menus.clone(),
            repos.elements.clone(),
            cache,
        )
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// ユーザーの href 権限集合を返す。
    pub async fn execute(
        &self,
        user_id: i64,
    ) -> Result<Arc<HrefPermissionSet>, ResolveHrefPermissionsError> {
        let key = PermissionCacheKey::User(user_id);
        if let Some(cached) = self.cached(key).await {
            return Ok(cached);
        }

        let generation = self.cache.generation();
        let permissions = Arc::new(
            self.resolve_for_user(user_id)
                .await
                .map_err(|e| ResolveHrefPermissionsError::Internal(e.to_string()))?,
        );
        self.store(key, "user", permissions.clone(), generation).await;
        tracing::debug!(user_id, count = permissions.len(), "resolved href permissions");
        Ok(permissions)
    }

    /// システム内の全ロール関連から href 権限集合を返す。
    pub async fn execute_all(&self) -> Result<Arc<HrefPermissionSet>, ResolveHrefPermissionsError> {
        let key = PermissionCacheKey::All;
        if let Some(cached) = self.cached(key).await {
            return Ok(cached);
        }

        let generation = self.cache.generation();
        let permissions = Arc::new(
            self.resolve_all()
                .await
                .map_err(|e| ResolveHrefPermissionsError::Internal(e.to_string()))?,
        );
        self.store(key, "all", permissions.clone(), generation).await;
        tracing::debug!(count = permissions.len(), "resolved global href permissions");
        Ok(permissions)
    }

    async fn cached(&self, key: PermissionCacheKey) -> Option<Arc<HrefPermissionSet>> {
        let hit = self.cache.get(key).await;
        if let Some(ref m) = self.metrics {
            if hit.is_some() {
                m.record_cache_hit(CACHE_NAME);
            } else {
                m.record_cache_miss(CACHE_NAME);
            }
        }
        hit
    }

    /// 解決中にキャッシュが無効化された場合、結果は呼び出し元に返すが保持しない。
    async fn store(
        &self,
        key: PermissionCacheKey,
        scope: &str,
        permissions: Arc<HrefPermissionSet>,
        generation: u64,
    ) {
        if !self
            .cache
            .insert_if_current(key, permissions, generation)
            .await
        {
            tracing::debug!(scope, "cache invalidated during resolution, result not cached");
        }
        if let Some(ref m) = self.metrics {
            m.record_permission_resolution(scope);
        }
    }

    async fn resolve_for_user(&self, user_id: i64) -> anyhow::Result<HrefPermissionSet> {
        let user_roles = self.user_role_repo.find_all_by_user_id(user_id).await?;
        if user_roles.is_empty() {
            return Ok(HrefPermissionSet::new());
        }

        let role_ids = HrefPermissionDomainService::role_ids(&user_roles);
        let links = self.role_link_repo.find_all_by_role_id_in(&role_ids).await?;
        self.resolve_links(&links).await
    }

    async fn resolve_all(&self) -> anyhow::Result<HrefPermissionSet> {
        let links = self.role_link_repo.find_all().await?;
        self.resolve_links(&links).await
    }

    async fn resolve_links(&self, links: &[RoleLink]) -> anyhow::Result<HrefPermissionSet> {
        let targets = HrefPermissionDomainService::collect_targets(links);
        if targets.is_empty() {
            return Ok(HrefPermissionSet::new());
        }

        let menus = if targets.menu_ids.is_empty() {
            Vec::new()
        } else {
            self.menu_repo.find_all_by_id_in(&targets.menu_ids).await?
        };
        let elements = if targets.element_ids.is_empty() {
            Vec::new()
        } else {
            self.element_repo
                .find_all_by_id_in(&targets.element_ids)
                .await?
        };

        Ok(HrefPermissionDomainService::merge(&menus, &elements))
    }
}
