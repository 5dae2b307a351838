pub mod href_permission_service;

pub use href_permission_service::{HrefPermissionDomainService, LinkTargets};
