use async_trait::async_trait;

use crate::domain::entity::menu::Menu;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_all_by_id_in(&self, menu_ids: &[i64]) -> anyhow::Result<Vec<Menu>>;
}
