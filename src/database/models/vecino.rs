use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Resident record. `password_hash` is present only for residents with
/// portal access; residents without it cannot log in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vecino {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub cuil_cuit: Option<String>,
    pub domicilio: Option<String>,
    pub telefono: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
