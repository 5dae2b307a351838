use async_trait::async_trait;

use crate::domain::entity::element::Element;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ElementRepository: Send + Sync {
    async fn find_all_by_id_in(&self, element_ids: &[i64]) -> anyhow::Result<Vec<Element>>;
}
