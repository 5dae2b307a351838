use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::service::HrefPermissionDomainService;
use crate::usecase::resolve_href_permissions::ResolveHrefPermissionsUseCase;

/// CheckHrefPermissionError は href 権限確認に関するエラーを表す。
#[derive(Debug, thiserror::Error)]
pub enum CheckHrefPermissionError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// CheckHrefPermissionInput は href 権限確認の入力。
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CheckHrefPermissionInput {
    pub user_id: i64,
    pub href: String,
}

/// CheckHrefPermissionOutput は href 権限確認の出力。
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CheckHrefPermissionOutput {
    pub allowed: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

/// CheckHrefPermissionUseCase はユーザーが href にアクセスできるかを判定する。
pub struct CheckHrefPermissionUseCase {
    resolve_uc: Arc<ResolveHrefPermissionsUseCase>,
}

impl CheckHrefPermissionUseCase {
    pub fn new(resolve_uc: Arc<ResolveHrefPermissionsUseCase>) -> Self {
        Self { resolve_uc }
    }

    pub async fn execute(
        &self,
        input: &CheckHrefPermissionInput,
    ) -> Result<CheckHrefPermissionOutput, CheckHrefPermissionError> {
        if input.href.is_empty() {
            return Ok(CheckHrefPermissionOutput {
                allowed: false,
                reason: "href must not be empty".to_string(),
            });
        }

        let permissions = self
            .resolve_uc
            .execute(input.user_id)
            .await
            .map_err(|e| CheckHrefPermissionError::Internal(e.to_string()))?;

        if HrefPermissionDomainService::grants_href(&permissions, &input.href) {
            Ok(CheckHrefPermissionOutput {
                allowed: true,
                reason: String::new(),
            })
        } else {
            Ok(CheckHrefPermissionOutput {
                allowed: false,
                reason: format!(
                    "insufficient permissions: user {} has no grant for '{}'",
                    input.user_id, input.href
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::element::Element;
    use crate::domain::entity::role::UserRole;
    use crate::domain::entity::role_link::RoleLink;
    use crate::domain::repository::element_repository::MockElementRepository;
    use crate::domain::repository::menu_repository::MockMenuRepository;
    use crate::domain::repository::role_link_repository::MockRoleLinkRepository;
    use crate::domain::repository::user_role_repository::MockUserRoleRepository;
    use crate::infrastructure::PermissionCache;

    fn make_uc() -> CheckHrefPermissionUseCase {
        let mut user_roles = MockUserRoleRepository::new();
        user_roles.expect_find_all_by_user_id().returning(|user_id| {
            if user_id == 1 {
                Ok(vec![UserRole { user_id, role_id: 1 }])
            } else {
                Ok(vec![])
            }
        });
        let mut role_links = MockRoleLinkRepository::new();
        role_links.expect_find_all_by_role_id_in().returning(|_| {
            Ok(vec![
                RoleLink {
                    role_id: 1,
                    menu_id: None,
                    element_id: Some(100),
                },
                RoleLink {
                    role_id: 1,
                    menu_id: None,
                    element_id: Some(101),
                },
            ])
        });
        let mut elements = MockElementRepository::new();
        elements.expect_find_all_by_id_in().returning(|_| {
            Ok(vec![
                Element {
                    id: 100,
                    menu_id: None,
                    code: "role:save".to_string(),
                    name: "Save".to_string(),
                    href: "/api/v1/roles/save".to_string(),
                },
                Element {
                    id: 101,
                    menu_id: None,
                    code: "role:noop".to_string(),
                    name: "Noop".to_string(),
                    href: String::new(),
                },
            ])
        });

        CheckHrefPermissionUseCase::new(Arc::new(ResolveHrefPermissionsUseCase::new(
            Arc::new(user_roles),
            Arc::new(role_links),
            Arc::new(MockMenuRepository::new()),
            Arc::new(elements),
            PermissionCache::new(60, 100),
        )))
    }

    fn input(user_id: i64, href: &str) -> CheckHrefPermissionInput {
        CheckHrefPermissionInput {
            user_id,
            href: href.to_string(),
        }
    }

    #[tokio::test]
    async fn test_granted_href_allowed() {
        let out = make_uc()
            .execute(&input(1, "/api/v1/roles/save"))
            .await
            .unwrap();
        assert!(out.allowed);
        assert!(out.reason.is_empty());
    }

    #[tokio::test]
    async fn test_other_href_denied() {
        let out = make_uc()
            .execute(&input(1, "/api/v1/roles/delete"))
            .await
            .unwrap();
        assert!(!out.allowed);
        assert!(out.reason.contains("insufficient permissions"));
    }

    #[tokio::test]
    async fn test_empty_href_never_allowed() {
        let out = make_uc().execute(&input(1, "")).await.unwrap();
        assert!(!out.allowed);
        assert!(out.reason.contains("must not be empty"));
    }

    #[tokio::test]
    async fn test_user_without_roles_denied() {
        let out = make_uc()
            .execute(&input(2, "/api/v1/roles/save"))
            .await
            .unwrap();
        assert!(!out.allowed);
    }
}
