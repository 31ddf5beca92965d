use crate::application_port::CatalogError;
use crate::domain_model::{Verdura, VerduraId, VerduraInput};
use crate::domain_port::VerduraRepo;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct MemVerduraRepo {
    rows: DashMap<i64, Verdura>,
    next_id: AtomicI64,
}

impl MemVerduraRepo {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn add_row(&self, nombre: &str, precio: f64, troceable: bool) -> Verdura {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = Verdura {
            id: VerduraId(id),
            nombre: nombre.to_string(),
            precio,
            troceable,
        };
        self.rows.insert(id, row.clone());
        row
    }
}

impl Default for MemVerduraRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VerduraRepo for MemVerduraRepo {
    async fn list(&self) -> Result<Vec<Verdura>, CatalogError> {
        let mut rows: Vec<Verdura> = self.rows.iter().map(|entry| entry.value().clone()).collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    async fn get(&self, id: VerduraId) -> Result<Option<Verdura>, CatalogError> {
        Ok(self.rows.get(&id.0).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, input: VerduraInput) -> Result<Verdura, CatalogError> {
        Ok(self.add_row(&input.nombre, input.precio, input.troceable))
    }

    async fn update(
        &self,
        id: VerduraId,
        input: VerduraInput,
    ) -> Result<Option<Verdura>, CatalogError> {
        match self.rows.get_mut(&id.0) {
            Some(mut entry) => {
                entry.nombre = input.nombre;
                entry.precio = input.precio;
                entry.troceable = input.troceable;
                Ok(Some(entry.value().clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: VerduraId) -> Result<bool, CatalogError> {
        Ok(self.rows.remove(&id.0).is_some())
    }
}
