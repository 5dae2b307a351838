pub mod dict;
pub mod element;
pub mod href_permission;
pub mod menu;
pub mod role;
pub mod role_link;
pub mod sys_log;
pub mod user;
