use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// File metadata record. Byte storage lives outside this service; rows only
/// describe what was stored where and for which entity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Archivo {
    pub id: Uuid,
    pub entidad_origen: String,
    pub origen_id: Uuid,
    pub nombre_archivo: String,
    pub ruta_archivo: String,
    pub tipo_mime: String,
    pub fecha_subida: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Audit row written when an archivo record is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArchivoEliminado {
    pub id: Uuid,
    pub archivo_id: Uuid,
    pub entidad_origen: String,
    pub origen_id: Uuid,
    pub nombre_archivo: String,
    pub ruta_archivo: String,
    pub motivo: String,
    pub eliminado_at: DateTime<Utc>,
}
