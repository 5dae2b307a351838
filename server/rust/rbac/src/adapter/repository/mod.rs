pub mod dict_lst_postgres;
pub mod element_postgres;
pub mod in_memory;
pub mod menu_postgres;
pub mod role_link_postgres;
pub mod role_postgres;
pub mod sys_log_postgres;
pub mod user_postgres;
pub mod user_role_postgres;

use std::sync::Arc;

use keep_telemetry::metrics::Metrics;
use sqlx::PgPool;

use crate::domain::repository::Repositories;

/// postgres_repositories は PostgreSQL 実装のリポジトリ一式を組み立てる。
pub fn postgres_repositories(pool: PgPool, metrics: Arc<Metrics>) -> Repositories {
    Repositories {
        users: Arc::new(user_postgres::UserPostgresRepository::with_metrics(
            pool.clone(),
            metrics.clone(),
        )),
        roles: Arc::new(role_postgres::RolePostgresRepository::with_metrics(
            pool.clone(),
            metrics.clone(),
        )),
        user_roles: Arc::new(user_role_postgres::UserRolePostgresRepository::with_metrics(
            pool.clone(),
            metrics.clone(),
        )),
        role_links: Arc::new(role_link_postgres::RoleLinkPostgresRepository::with_metrics(
            pool.clone(),
            metrics.clone(),
        )),
        menus: Arc::new(menu_postgres::MenuPostgresRepository::with_metrics(
            pool.clone(),
            metrics.clone(),
        )),
        elements: Arc::new(element_postgres::ElementPostgresRepository::with_metrics(
            pool.clone(),
            metrics.clone(),
        )),
        dict_items: Arc::new(dict_lst_postgres::DictLstPostgresRepository::with_metrics(
            pool.clone(),
            metrics.clone(),
        )),
        sys_logs: Arc::new(sys_log_postgres::SysLogPostgresRepository::with_metrics(
            pool, metrics,
        )),
    }
}

/// in_memory_repositories は単一のインメモリストアを全リポジトリとして共有する。
pub fn in_memory_repositories(store: Arc<in_memory::InMemoryRbacStore>) -> Repositories {
    Repositories {
        users: store.clone(),
        roles: store.clone(),
        user_roles: store.clone(),
        role_links: store.clone(),
        menus: store.clone(),
        elements: store.clone(),
        dict_items: store.clone(),
        sys_logs: store,
    }
}
