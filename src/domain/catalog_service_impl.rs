use crate::application_port::{CatalogError, CatalogService};
use crate::domain_model::{Verdura, VerduraId, VerduraInput};
use crate::domain_port::VerduraRepo;
use std::sync::Arc;

pub struct RealCatalogService {
    verdura_repo: Arc<dyn VerduraRepo>,
}

impl RealCatalogService {
    pub fn new(verdura_repo: Arc<dyn VerduraRepo>) -> Self {
        Self { verdura_repo }
    }
}

#[async_trait::async_trait]
impl CatalogService for RealCatalogService {
    async fn list(&self) -> Result<Vec<Verdura>, CatalogError> {
        self.verdura_repo.list().await
    }

    async fn get(&self, id: VerduraId) -> Result<Verdura, CatalogError> {
        self.verdura_repo.get(id).await?.ok_or(CatalogError::NotFound)
    }

    async fn create(&self, input: VerduraInput) -> Result<Verdura, CatalogError> {
        self.verdura_repo.insert(input).await
    }

    async fn update(&self, id: VerduraId, input: VerduraInput) -> Result<Verdura, CatalogError> {
        self.verdura_repo
            .update(id, input)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    async fn delete(&self, id: VerduraId) -> Result<(), CatalogError> {
        if self.verdura_repo.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound)
        }
    }
}
