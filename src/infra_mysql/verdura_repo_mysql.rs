use crate::application_port::CatalogError;
use crate::domain_model::{Verdura, VerduraId, VerduraInput};
use crate::domain_port::VerduraRepo;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlVerduraRepo {
    pool: MySqlPool,
}

impl MySqlVerduraRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlVerduraRepo { pool }
    }

    fn row_to_verdura(row: MySqlRow) -> Result<Verdura, CatalogError> {
        let id: VerduraId = row
            .try_get("id")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let nombre: String = row
            .try_get("nombre")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let precio: f64 = row
            .try_get("precio")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let troceable: bool = row
            .try_get("troceable")
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(Verdura {
            id,
            nombre,
            precio,
            troceable,
        })
    }
}

#[async_trait::async_trait]
impl VerduraRepo for MySqlVerduraRepo {
    async fn list(&self) -> Result<Vec<Verdura>, CatalogError> {
        let rows = sqlx::query(
            r#"
SELECT id, nombre, precio, troceable
FROM verduras
ORDER BY id
"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_verdura).collect()
    }

    async fn get(&self, id: VerduraId) -> Result<Option<Verdura>, CatalogError> {
        let row_opt = sqlx::query(
            r#"
SELECT id, nombre, precio, troceable
FROM verduras
WHERE id = ?
"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_verdura).transpose()
    }

    async fn insert(&self, input: VerduraInput) -> Result<Verdura, CatalogError> {
        let result = sqlx::query(
            r#"
INSERT INTO verduras (nombre, precio, troceable)
VALUES (?, ?, ?)
"#,
        )
        .bind(&input.nombre)
        .bind(input.precio)
        .bind(input.troceable)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(Verdura {
            id: VerduraId(result.last_insert_id() as i64),
            nombre: input.nombre,
            precio: input.precio,
            troceable: input.troceable,
        })
    }

    async fn update(
        &self,
        id: VerduraId,
        input: VerduraInput,
    ) -> Result<Option<Verdura>, CatalogError> {
        let result = sqlx::query(
            r#"
UPDATE verduras
SET nombre = ?, precio = ?, troceable = ?
WHERE id = ?
"#,
        )
        .bind(&input.nombre)
        .bind(input.precio)
        .bind(input.troceable)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Verdura {
            id,
            nombre: input.nombre,
            precio: input.precio,
            troceable: input.troceable,
        }))
    }

    async fn delete(&self, id: VerduraId) -> Result<bool, CatalogError> {
        let result = sqlx::query(r#"DELETE FROM verduras WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
