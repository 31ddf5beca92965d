use crate::domain_model::{Verdura, VerduraId, VerduraInput};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("verdura not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn list(&self) -> Result<Vec<Verdura>, CatalogError>;
    async fn get(&self, id: VerduraId) -> Result<Verdura, CatalogError>;
    async fn create(&self, input: VerduraInput) -> Result<Verdura, CatalogError>;
    async fn update(&self, id: VerduraId, input: VerduraInput) -> Result<Verdura, CatalogError>;
    async fn delete(&self, id: VerduraId) -> Result<(), CatalogError>;
}
