use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{EstadoTramite, Tramite};

#[derive(Debug, Clone)]
pub struct NewTramite {
    pub vecino_id: Uuid,
    pub tipo: String,
    pub descripcion: String,
}

pub struct TramiteRepository {
    pool: PgPool,
}

impl TramiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Tramite>, sqlx::Error> {
        sqlx::query_as::<_, Tramite>("SELECT * FROM tramites ORDER BY fecha_inicio DESC, created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tramite>, sqlx::Error> {
        sqlx::query_as::<_, Tramite>("SELECT * FROM tramites WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// New tramites always start `pendiente` with today's date
    pub async fn insert(&self, new: NewTramite) -> Result<Tramite, sqlx::Error> {
        sqlx::query_as::<_, Tramite>(
            r#"
            INSERT INTO tramites (vecino_id, tipo, descripcion, estado, fecha_inicio)
            VALUES ($1, $2, $3, 'pendiente', CURRENT_DATE)
            RETURNING *
            "#,
        )
        .bind(new.vecino_id)
        .bind(new.tipo)
        .bind(new.descripcion)
        .fetch_one(&self.pool)
        .await
    }

    /// Advance the lifecycle. `fecha_resolucion` is stamped exactly when the
    /// estado becomes `resuelto` and cleared on any other transition.
    pub async fn update_estado(
        &self,
        id: Uuid,
        estado: EstadoTramite,
        resultado: Option<String>,
    ) -> Result<Option<Tramite>, sqlx::Error> {
        sqlx::query_as::<_, Tramite>(
            r#"
            UPDATE tramites
            SET estado = $2,
                resultado = $3,
                fecha_resolucion = CASE WHEN $2 = 'resuelto' THEN now() ELSE NULL END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(estado.as_str())
        .bind(resultado)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tramites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
