pub mod authenticate;
pub mod check_href_permission;
pub mod get_user_roles;
pub mod invalidate_href_permissions;
pub mod list_dict_items;
pub mod load_user_by_username;
pub mod record_sys_log;
pub mod resolve_href_permissions;
pub mod search_sys_logs;

pub use authenticate::AuthenticateUseCase;
pub use check_href_permission::CheckHrefPermissionUseCase;
pub use get_user_roles::GetUserRolesUseCase;
pub use invalidate_href_permissions::InvalidateHrefPermissionsUseCase;
pub use list_dict_items::ListDictItemsUseCase;
pub use load_user_by_username::LoadUserByUsernameUseCase;
pub use record_sys_log::RecordSysLogUseCase;
pub use resolve_href_permissions::ResolveHrefPermissionsUseCase;
pub use search_sys_logs::SearchSysLogsUseCase;
