use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Municipal employee account. The role is stored as plain text and parsed
/// into `auth::Rol` at the claims boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Empleado {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub dni: String,
    pub rol: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub requiere_cambio_password: bool,
    #[serde(skip_serializing)]
    pub intentos_login: i32,
    pub ultimo_login: Option<DateTime<Utc>>,
    pub activo: bool,
    pub fecha_alta: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serializes() {
        let empleado = Empleado {
            id: Uuid::new_v4(),
            nombre: "Marta".to_string(),
            apellido: "Quiroga".to_string(),
            email: "mquiroga@municipalidad.gob.ar".to_string(),
            dni: "28123456".to_string(),
            rol: "empleado".to_string(),
            password_hash: "$2b$06$secret".to_string(),
            requiere_cambio_password: false,
            intentos_login: 0,
            ultimo_login: None,
            activo: true,
            fecha_alta: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&empleado).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$"));
        assert!(!json.contains("intentos_login"));
    }
}
