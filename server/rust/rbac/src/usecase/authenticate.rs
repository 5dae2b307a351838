use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::domain::entity::href_permission::HrefPermission;
use crate::infrastructure::password;
use crate::usecase::load_user_by_username::{LoadUserByUsernameError, LoadUserByUsernameUseCase};

/// AuthenticateError は認証に関するエラーを表す。
/// 存在しないユーザーとパスワード不一致は区別しない。
#[derive(Debug, thiserror::Error)]
pub enum AuthenticateError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("internal error: {0}")]
    Internal(String),
}

/// AuthenticateInput はログインリクエストを表す。
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AuthenticateInput {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AuthenticateInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateInput")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// AuthenticateOutput は認証済みユーザーと付与された href 権限。
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AuthenticateOutput {
    pub user_id: i64,
    pub username: String,
    pub href_permissions: Vec<HrefPermission>,
}

/// AuthenticateUseCase はユーザー名とパスワードでログインを検証する。
pub struct AuthenticateUseCase {
    load_user_uc: Arc<LoadUserByUsernameUseCase>,
}

impl AuthenticateUseCase {
    pub fn new(load_user_uc: Arc<LoadUserByUsernameUseCase>) -> Self {
        Self { load_user_uc }
    }

    pub async fn execute(
        &self,
        input: &AuthenticateInput,
    ) -> Result<AuthenticateOutput, AuthenticateError> {
        let user = match self.load_user_uc.execute(&input.username).await {
            Ok(user) => user,
            Err(LoadUserByUsernameError::NotFound(_)) => {
                tracing::info!(username = %input.username, "login rejected: unknown user");
                return Err(AuthenticateError::InvalidCredentials);
            }
            Err(LoadUserByUsernameError::Internal(msg)) => {
                return Err(AuthenticateError::Internal(msg));
            }
        };

        let hash = user.password.expose_secret().clone();
        let candidate = input.password.clone();
        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&candidate, &hash))
                .await
                .map_err(|e| AuthenticateError::Internal(e.to_string()))?;

        match verified {
            Ok(true) => {
                tracing::info!(user_id = user.user_id, "login succeeded");
                Ok(AuthenticateOutput {
                    user_id: user.user_id,
                    username: user.username,
                    href_permissions: user.href_permissions,
                })
            }
            Ok(false) => {
                tracing::info!(user_id = user.user_id, "login rejected: password mismatch");
                Err(AuthenticateError::InvalidCredentials)
            }
            Err(e) => {
                tracing::warn!(user_id = user.user_id, error = %e, "stored password hash is unusable");
                Err(AuthenticateError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::User;
    use crate::domain::repository::element_repository::MockElementRepository;
    use crate::domain::repository::menu_repository::MockMenuRepository;
    use crate::domain::repository::role_link_repository::MockRoleLinkRepository;
    use crate::domain::repository::user_repository::MockUserRepository;
    use crate::domain::repository::user_role_repository::MockUserRoleRepository;
    use crate::infrastructure::PermissionCache;
    use crate::usecase::ResolveHrefPermissionsUseCase;

    fn make_uc(stored_password: String) -> AuthenticateUseCase {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_username()
            .returning(move |name| {
                if name == "admin" {
                    Ok(Some(User {
                        id: 1,
                        username: "admin".to_string(),
                        password: stored_password.clone(),
                        created_at: chrono::Utc::now(),
                    }))
                } else {
                    Ok(None)
                }
            });
        let mut user_roles = MockUserRoleRepository::new();
        user_roles
            .expect_find_all_by_user_id()
            .returning(|_| Ok(vec![]));

        let resolve_uc = Arc::new(ResolveHrefPermissionsUseCase::new(
            Arc::new(user_roles),
            Arc::new(MockRoleLinkRepository::new()),
            Arc::new(MockMenuRepository::new()),
            Arc::new(MockElementRepository::new()),
            PermissionCache::new(60, 100),
        ));
        AuthenticateUseCase::new(Arc::new(LoadUserByUsernameUseCase::new(
            Arc::new(user_repo),
            resolve_uc,
        )))
    }

    fn input(username: &str, password: &str) -> AuthenticateInput {
        AuthenticateInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let uc = make_uc(password::hash_password("s3cret").unwrap());
        let out = uc.execute(&input("admin", "s3cret")).await.unwrap();
        assert_eq!(out.user_id, 1);
        assert_eq!(out.username, "admin");
        assert!(out.href_permissions.is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let uc = make_uc(password::hash_password("s3cret").unwrap());
        let err = uc.execute(&input("admin", "guess")).await.unwrap_err();
        assert!(matches!(err, AuthenticateError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let uc = make_uc(password::hash_password("s3cret").unwrap());
        let err = uc.execute(&input("nobody", "s3cret")).await.unwrap_err();
        assert!(matches!(err, AuthenticateError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_with_malformed_stored_hash() {
        let uc = make_uc("plain-text".to_string());
        let err = uc.execute(&input("admin", "plain-text")).await.unwrap_err();
        assert!(matches!(err, AuthenticateError::InvalidCredentials));
    }

    #[test]
    fn test_input_debug_redacts_password() {
        let debug = format!("{:?}", input("admin", "s3cret"));
        assert!(!debug.contains("s3cret"));
    }
}
