use serde::Deserialize;

use crate::domain::entity::dict::DictLst;
use crate::domain::entity::element::Element;
use crate::domain::entity::menu::Menu;
use crate::domain::entity::role::{Role, UserRole};
use crate::domain::entity::role_link::RoleLink;
use crate::domain::entity::user::User;

/// RbacSeed はインメモリストアに投入する初期データ。
/// users[].password には Argon2 の PHC 文字列を記述する。
#[derive(Debug, Default, Deserialize)]
pub struct RbacSeed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub user_roles: Vec<UserRole>,
    #[serde(default)]
    pub role_links: Vec<RoleLink>,
    #[serde(default)]
    pub menus: Vec<Menu>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub dict_items: Vec<DictLst>,
}

impl RbacSeed {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let seed: RbacSeed = serde_yaml::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// ロール関連が存在しないロールを参照していないかを検証する。
    fn validate(&self) -> anyhow::Result<()> {
        for link in &self.role_links {
            if !self.roles.iter().any(|r| r.id == link.role_id) {
                anyhow::bail!("role link references unknown role: {}", link.role_id);
            }
        }
        Ok(())
    }
}
