use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::domain::entity::href_permission::HrefPermissionSet;
use crate::infrastructure::config::PermissionCacheConfig;

/// PermissionCacheKey はキャッシュエントリの識別子。ユーザー単位か全体かを区別する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionCacheKey {
    User(i64),
    All,
}

/// PermissionCache は href 権限集合のプロセス内キャッシュ。
/// 空集合も通常の結果と同様に保持する。
///
/// 無効化のたびに世代番号を進める。解決開始時の世代を `insert_if_current` に渡すと、
/// 解決中に無効化が起きた結果は保持されない。
#[derive(Clone)]
pub struct PermissionCache {
    cache: Cache<PermissionCacheKey, Arc<HrefPermissionSet>>,
    generation: Arc<AtomicU64>,
}

impl PermissionCache {
    pub fn new(ttl_secs: u64, max_capacity: u64) -> Self {
        Self::build(ttl_secs, max_capacity, None)
    }

    pub fn from_config(cfg: &PermissionCacheConfig) -> Self {
        Self::build(cfg.ttl_secs, cfg.max_capacity, cfg.tti_secs)
    }

    fn build(ttl_secs: u64, max_capacity: u64, tti_secs: Option<u64>) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs));
        if let Some(tti) = tti_secs {
            builder = builder.time_to_idle(Duration::from_secs(tti));
        }
        Self {
            cache: builder.build(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// generation は現在の世代番号を返す。解決を始める前に読み取る。
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn get(&self, key: PermissionCacheKey) -> Option<Arc<HrefPermissionSet>> {
        self.cache.get(&key).await
    }

    pub async fn insert(&self, key: PermissionCacheKey, permissions: Arc<HrefPermissionSet>) {
        self.cache.insert(key, permissions).await;
    }

    /// insert_if_current は generation 以降に無効化が無かった場合のみ保持し、保持したかを返す。
    /// 挿入と無効化が交差した場合は挿入後の再確認で自ら取り消す。
    pub async fn insert_if_current(
        &self,
        key: PermissionCacheKey,
        permissions: Arc<HrefPermissionSet>,
        generation: u64,
    ) -> bool {
        if self.generation() != generation {
            return false;
        }
        self.cache.insert(key, permissions).await;
        if self.generation() != generation {
            self.cache.invalidate(&key).await;
            return false;
        }
        true
    }

    pub async fn invalidate(&self, key: PermissionCacheKey) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate(&key).await;
    }

    /// invalidate_all はユーザー単位と全体のエントリをすべて破棄する。
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
    }
}
