use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entity::dict::DictLst;
use crate::domain::entity::element::Element;
use crate::domain::entity::menu::Menu;
use crate::domain::entity::role::{Role, UserRole};
use crate::domain::entity::role_link::RoleLink;
use crate::domain::entity::sys_log::{SysLog, SysLogSearchParams};
use crate::domain::entity::user::User;
use crate::domain::repository::{
    DictLstRepository, ElementRepository, MenuRepository, RoleLinkRepository, RoleRepository,
    SysLogRepository, UserRepository, UserRoleRepository,
};
use crate::infrastructure::seed::RbacSeed;

/// InMemoryRbacStore は DB 未設定時に使うインメモリ実装。
/// 参照系データはシードから読み込んだ後は不変で、操作ログのみ追記される。
#[derive(Default)]
pub struct InMemoryRbacStore {
    users: Vec<User>,
    roles: Vec<Role>,
    user_roles: Vec<UserRole>,
    role_links: Vec<RoleLink>,
    menus: Vec<Menu>,
    elements: Vec<Element>,
    dict_items: Vec<DictLst>,
    sys_logs: RwLock<Vec<SysLog>>,
}

impl InMemoryRbacStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: RbacSeed) -> Self {
        Self {
            users: seed.users,
            roles: seed.roles,
            user_roles: seed.user_roles,
            role_links: seed.role_links,
            menus: seed.menus,
            elements: seed.elements,
            dict_items: seed.dict_items,
            sys_logs: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRbacStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }
}

#[async_trait]
impl RoleRepository for InMemoryRbacStore {
    async fn find_all_by_id_in(&self, role_ids: &[i64]) -> anyhow::Result<Vec<Role>> {
        let mut roles: Vec<Role> = self
            .roles
            .iter()
            .filter(|r| role_ids.contains(&r.id))
            .cloned()
            .collect();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }
}

#[async_trait]
impl UserRoleRepository for InMemoryRbacStore {
    async fn find_all_by_user_id(&self, user_id: i64) -> anyhow::Result<Vec<UserRole>> {
        Ok(self
            .user_roles
            .iter()
            .filter(|ur| ur.user_id == user_id)
            .copied()
            .collect())
    }
}

#[async_trait]
impl RoleLinkRepository for InMemoryRbacStore {
    async fn find_all_by_role_id_in(&self, role_ids: &[i64]) -> anyhow::Result<Vec<RoleLink>> {
        Ok(self
            .role_links
            .iter()
            .filter(|l| role_ids.contains(&l.role_id))
            .copied()
            .collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<RoleLink>> {
        Ok(self.role_links.clone())
    }
}

#[async_trait]
impl MenuRepository for InMemoryRbacStore {
    async fn find_all_by_id_in(&self, menu_ids: &[i64]) -> anyhow::Result<Vec<Menu>> {
        Ok(self
            .menus
            .iter()
            .filter(|m| menu_ids.contains(&m.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ElementRepository for InMemoryRbacStore {
    async fn find_all_by_id_in(&self, element_ids: &[i64]) -> anyhow::Result<Vec<Element>> {
        Ok(self
            .elements
            .iter()
            .filter(|e| element_ids.contains(&e.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DictLstRepository for InMemoryRbacStore {
    async fn find_all_by_dict_id(&self, dict_id: i64) -> anyhow::Result<Vec<DictLst>> {
        let mut items: Vec<DictLst> = self
            .dict_items
            .iter()
            .filter(|d| d.dict_id == dict_id)
            .cloned()
            .collect();
        items.sort_by_key(|d| (d.sort, d.id));
        Ok(items)
    }
}

#[async_trait]
impl SysLogRepository for InMemoryRbacStore {
    async fn create(&self, log: &SysLog) -> anyhow::Result<()> {
        self.sys_logs.write().await.push(log.clone());
        Ok(())
    }

    async fn search(&self, params: &SysLogSearchParams) -> anyhow::Result<(Vec<SysLog>, i64)> {
        let logs = self.sys_logs.read().await;
        let mut filtered: Vec<&SysLog> = logs.iter().filter(|l| params.matches(l)).collect();
        // PostgreSQL 実装と同じ created_at DESC, id の順
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = i64::try_from(filtered.len())?;
        let offset = usize::try_from(params.offset())?;
        let limit = usize::try_from(params.page_size.max(0))?;
        let page = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
