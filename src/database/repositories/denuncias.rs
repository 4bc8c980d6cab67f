use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Denuncia, EstadoDenuncia};

#[derive(Debug, Clone)]
pub struct NewDenuncia {
    pub fecha: NaiveDate,
    pub tipo: String,
    pub descripcion: String,
    pub denunciante: Option<String>,
    pub canal: Option<String>,
    pub terreno_id: Option<Uuid>,
    pub negocio_id: Option<Uuid>,
}

pub struct DenunciaRepository {
    pool: PgPool,
}

impl DenunciaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Denuncia>, sqlx::Error> {
        sqlx::query_as::<_, Denuncia>("SELECT * FROM denuncias ORDER BY fecha DESC, created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Denuncia>, sqlx::Error> {
        sqlx::query_as::<_, Denuncia>("SELECT * FROM denuncias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, new: NewDenuncia) -> Result<Denuncia, sqlx::Error> {
        sqlx::query_as::<_, Denuncia>(
            r#"
            INSERT INTO denuncias (fecha, tipo, descripcion, denunciante, canal, estado, terreno_id, negocio_id)
            VALUES ($1, $2, $3, $4, $5, 'pendiente', $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.fecha)
        .bind(new.tipo)
        .bind(new.descripcion)
        .bind(new.denunciante)
        .bind(new.canal)
        .bind(new.terreno_id)
        .bind(new.negocio_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_estado(
        &self,
        id: Uuid,
        estado: EstadoDenuncia,
    ) -> Result<Option<Denuncia>, sqlx::Error> {
        sqlx::query_as::<_, Denuncia>(
            "UPDATE denuncias SET estado = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado.as_str())
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM denuncias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
