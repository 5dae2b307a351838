use std::sync::Arc;

use crate::domain::entity::role::Role;
use crate::domain::repository::{RoleRepository, UserRepository, UserRoleRepository};
use crate::domain::service::HrefPermissionDomainService;

/// GetUserRolesError はユーザーロール取得に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum GetUserRolesError {
    #[error("user not found: {0}")]
    NotFound(i64),

    #[error("internal error: {0}")]
    Internal(String),
}

/// GetUserRolesUseCase はユーザーに割り当てられたロール一覧を取得する。
pub struct GetUserRolesUseCase {
    user_repo: Arc<dyn UserRepository>,
    user_role_repo: Arc<dyn UserRoleRepository>,
    role_repo: Arc<dyn RoleRepository>,
}

impl GetUserRolesUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        user_role_repo: Arc<dyn UserRoleRepository>,
        role_repo: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            user_repo,
            user_role_repo,
            role_repo,
        }
    }

    pub async fn execute(&self, user_id: i64) -> Result<Vec<Role>, GetUserRolesError> {
        let internal = |e: anyhow::Error| GetUserRolesError::Internal(e.to_string());

        if self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(internal)?
            .is_none()
        {
            return Err(GetUserRolesError::NotFound(user_id));
        }

        let user_roles = self
            .user_role_repo
            .find_all_by_user_id(user_id)
            .await
            .map_err(internal)?;
        if user_roles.is_empty() {
            return Ok(Vec::new());
        }

        let role_ids = HrefPermissionDomainService::role_ids(&user_roles);
        self.role_repo
            .find_all_by_id_in(&role_ids)
            .await
            .map_err(internal)
    }
}
