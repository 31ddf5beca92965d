use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct VerduraId(pub i64);

impl fmt::Display for VerduraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog row. Field names follow the upstream schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdura {
    pub id: VerduraId,
    pub nombre: String,
    pub precio: f64,
    pub troceable: bool,
}

/// Payload for create/update. Any client-sent `id` is ignored; ids are
/// store-generated.
#[derive(Debug, Clone, Deserialize)]
pub struct VerduraInput {
    pub nombre: String,
    pub precio: f64,
    pub troceable: bool,
}
