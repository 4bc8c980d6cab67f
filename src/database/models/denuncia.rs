use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Complaint filed against a parcel or business. The optional references
/// are informational; no foreign keys back them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Denuncia {
    pub id: Uuid,
    pub fecha: NaiveDate,
    pub tipo: String,
    pub descripcion: String,
    pub denunciante: Option<String>,
    pub canal: Option<String>,
    pub estado: String,
    pub terreno_id: Option<Uuid>,
    pub negocio_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoDenuncia {
    Pendiente,
    EnRevision,
    Resuelta,
    Desestimada,
}

impl EstadoDenuncia {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoDenuncia::Pendiente => "pendiente",
            EstadoDenuncia::EnRevision => "en_revision",
            EstadoDenuncia::Resuelta => "resuelta",
            EstadoDenuncia::Desestimada => "desestimada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendiente" => Some(EstadoDenuncia::Pendiente),
            "en_revision" => Some(EstadoDenuncia::EnRevision),
            "resuelta" => Some(EstadoDenuncia::Resuelta),
            "desestimada" => Some(EstadoDenuncia::Desestimada),
            _ => None,
        }
    }
}

impl std::fmt::Display for EstadoDenuncia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_roundtrips_through_text() {
        for estado in [
            EstadoDenuncia::Pendiente,
            EstadoDenuncia::EnRevision,
            EstadoDenuncia::Resuelta,
            EstadoDenuncia::Desestimada,
        ] {
            assert_eq!(EstadoDenuncia::parse(estado.as_str()), Some(estado));
        }
        assert_eq!(EstadoDenuncia::parse("cerrada"), None);
    }
}
