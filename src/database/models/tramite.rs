use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Administrative procedure opened by (or for) a resident.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tramite {
    pub id: Uuid,
    pub vecino_id: Uuid,
    pub tipo: String,
    pub descripcion: String,
    pub estado: String,
    pub fecha_inicio: NaiveDate,
    /// Stamped when the estado moves to `resuelto`, cleared otherwise
    pub fecha_resolucion: Option<DateTime<Utc>>,
    pub resultado: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle states a tramite can be in. Stored as text; parsed here when
/// clients submit a state so typos become 400s instead of junk rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoTramite {
    Pendiente,
    EnCurso,
    Resuelto,
    Rechazado,
}

impl EstadoTramite {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoTramite::Pendiente => "pendiente",
            EstadoTramite::EnCurso => "en_curso",
            EstadoTramite::Resuelto => "resuelto",
            EstadoTramite::Rechazado => "rechazado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendiente" => Some(EstadoTramite::Pendiente),
            "en_curso" => Some(EstadoTramite::EnCurso),
            "resuelto" => Some(EstadoTramite::Resuelto),
            "rechazado" => Some(EstadoTramite::Rechazado),
            _ => None,
        }
    }
}

impl std::fmt::Display for EstadoTramite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_parse_rejects_unknown_values() {
        assert_eq!(EstadoTramite::parse("resuelto"), Some(EstadoTramite::Resuelto));
        assert_eq!(EstadoTramite::parse("archivado"), None);
        assert_eq!(EstadoTramite::parse(""), None);
    }

    #[test]
    fn estado_display_matches_stored_text() {
        assert_eq!(EstadoTramite::EnCurso.to_string(), "en_curso");
        assert_eq!(EstadoTramite::parse(EstadoTramite::Rechazado.as_str()), Some(EstadoTramite::Rechazado));
    }
}
