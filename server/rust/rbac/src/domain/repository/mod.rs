pub mod dict_lst_repository;
pub mod element_repository;
pub mod menu_repository;
pub mod role_link_repository;
pub mod role_repository;
pub mod sys_log_repository;
pub mod user_repository;
pub mod user_role_repository;

use std::sync::Arc;

pub use dict_lst_repository::DictLstRepository;
pub use element_repository::ElementRepository;
pub use menu_repository::MenuRepository;
pub use role_link_repository::RoleLinkRepository;
pub use role_repository::RoleRepository;
pub use sys_log_repository::SysLogRepository;
pub use user_repository::UserRepository;
pub use user_role_repository::UserRoleRepository;

/// Repositories はユースケースが利用するリポジトリ一式を束ねる。
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub user_roles: Arc<dyn UserRoleRepository>,
    pub role_links: Arc<dyn RoleLinkRepository>,
    pub menus: Arc<dyn MenuRepository>,
    pub elements: Arc<dyn ElementRepository>,
    pub dict_items: Arc<dyn DictLstRepository>,
    pub sys_logs: Arc<dyn SysLogRepository>,
}
