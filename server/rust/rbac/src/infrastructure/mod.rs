pub mod config;
pub mod database;
pub mod password;
pub mod permission_cache;
pub mod seed;

pub use permission_cache::{PermissionCache, PermissionCacheKey};
