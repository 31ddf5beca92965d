use crate::application_port::CatalogError;
use crate::domain_model::{Verdura, VerduraId, VerduraInput};

#[async_trait::async_trait]
pub trait VerduraRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<Verdura>, CatalogError>;
    async fn get(&self, id: VerduraId) -> Result<Option<Verdura>, CatalogError>;
    async fn insert(&self, input: VerduraInput) -> Result<Verdura, CatalogError>;
    async fn update(&self, id: VerduraId, input: VerduraInput)
    -> Result<Option<Verdura>, CatalogError>;
    /// Returns whether a row was actually removed.
    async fn delete(&self, id: VerduraId) -> Result<bool, CatalogError>;
}
