use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::entity::href_permission::HrefPermission;
use crate::domain::repository::UserRepository;
use crate::usecase::resolve_href_permissions::ResolveHrefPermissionsUseCase;

/// LoadUserByUsernameError はユーザー詳細取得に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum LoadUserByUsernameError {
    #[error("user not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// UserAuth は認証処理に渡すユーザー詳細。
/// password は保存済みの PHC 文字列で、Debug 出力には現れない。
#[derive(Debug)]
pub struct UserAuth {
    pub user_id: i64,
    pub username: String,
    pub password: SecretString,
    pub href_permissions: Vec<HrefPermission>,
}

/// LoadUserByUsernameUseCase はユーザー名からユーザー詳細と href 権限を読み込む。
pub struct LoadUserByUsernameUseCase {
    user_repo: Arc<dyn UserRepository>,
    resolve_uc: Arc<ResolveHrefPermissionsUseCase>,
}

impl LoadUserByUsernameUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        resolve_uc: Arc<ResolveHrefPermissionsUseCase>,
    ) -> Self {
        Self {
            user_repo,
            resolve_uc,
        }
    }

    pub async fn execute(&self, username: &str) -> Result<UserAuth, LoadUserByUsernameError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| LoadUserByUsernameError::Internal(e.to_string()))?
            .ok_or_else(|| LoadUserByUsernameError::NotFound(username.to_string()))?;

        let permissions = self
            .resolve_uc
            .execute(user.id)
            .await
            .map_err(|e| LoadUserByUsernameError::Internal(e.to_string()))?;

        Ok(UserAuth {
            user_id: user.id,
            username: user.username,
            password: SecretString::new(user.password),
            href_permissions: permissions.iter().cloned().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::menu::Menu;
    use crate::domain::entity::role::UserRole;
    use crate::domain::entity::role_link::RoleLink;
    use crate::domain::entity::user::User;
    use crate::domain::repository::element_repository::MockElementRepository;
    use crate::domain::repository::menu_repository::MockMenuRepository;
    use crate::domain::repository::role_link_repository::MockRoleLinkRepository;
    use crate::domain::repository::user_repository::MockUserRepository;
    use crate::domain::repository::user_role_repository::MockUserRoleRepository;
    use crate::infrastructure::PermissionCache;
    use secrecy::ExposeSecret;

    fn make_resolve_uc() -> Arc<ResolveHrefPermissionsUseCase> {
        let mut user_roles = MockUserRoleRepository::new();
        user_roles
            .expect_find_all_by_user_id()
            .returning(|user_id| Ok(vec![UserRole { user_id, role_id: 1 }]));
        let mut role_links = MockRoleLinkRepository::new();
        role_links.expect_find_all_by_role_id_in().returning(|_| {
            Ok(vec![RoleLink {
                role_id: 1,
                menu_id: Some(10),
                element_id: None,
            }])
        });
        let mut menus = MockMenuRepository::new();
        menus.expect_find_all_by_id_in().returning(|_| {
            Ok(vec![Menu {
                id: 10,
                parent_id: None,
                code: "system".to_string(),
                name: "System".to_string(),
                href: "/system".to_string(),
                sort: 1,
            }])
        });

        Arc::new(ResolveHrefPermissionsUseCase::new(
            Arc::new(user_roles),
            Arc::new(role_links),
            Arc::new(menus),
            Arc::new(MockElementRepository::new()),
            PermissionCache::new(60, 100),
        ))
    }

    #[tokio::test]
    async fn test_load_user_attaches_permissions() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_username()
            .withf(|name| name == "admin")
            .returning(|_| {
                Ok(Some(User {
                    id: 1,
                    username: "admin".to_string(),
                    password: "$argon2id$stored".to_string(),
                    created_at: chrono::Utc::now(),
                }))
            });

        let uc = LoadUserByUsernameUseCase::new(Arc::new(user_repo), make_resolve_uc());
        let auth = uc.execute("admin").await.unwrap();

        assert_eq!(auth.user_id, 1);
        assert_eq!(auth.username, "admin");
        assert_eq!(auth.password.expose_secret(), "$argon2id$stored");
        assert_eq!(auth.href_permissions.len(), 1);
        assert_eq!(auth.href_permissions[0].href, "/system");
        assert!(!format!("{:?}", auth).contains("$argon2id$stored"));
    }

    #[tokio::test]
    async fn test_load_unknown_user_is_not_found() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_username().returning(|_| Ok(None));

        let uc = LoadUserByUsernameUseCase::new(Arc::new(user_repo), make_resolve_uc());
        let err = uc.execute("ghost").await.unwrap_err();
        assert!(matches!(err, LoadUserByUsernameError::NotFound(ref name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_load_user_repository_error_is_internal() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_username()
            .returning(|_| Err(anyhow::anyhow!("db down")));

        let uc = LoadUserByUsernameUseCase::new(Arc::new(user_repo), make_resolve_uc());
        let err = uc.execute("admin").await.unwrap_err();
        assert!(matches!(err, LoadUserByUsernameError::Internal(_)));
    }
}
