use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Archivo;

#[derive(Debug, Clone)]
pub struct NewArchivo {
    pub entidad_origen: String,
    pub origen_id: Uuid,
    pub nombre_archivo: String,
    pub ruta_archivo: String,
    pub tipo_mime: String,
}

pub struct ArchivoRepository {
    pool: PgPool,
}

impl ArchivoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Archivo>, sqlx::Error> {
        sqlx::query_as::<_, Archivo>("SELECT * FROM archivos ORDER BY fecha_subida DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Archivo>, sqlx::Error> {
        sqlx::query_as::<_, Archivo>("SELECT * FROM archivos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// The (entidad_origen, origen_id, nombre_archivo) unique constraint turns
    /// duplicate registrations into a 23505 the handler maps to 409.
    pub async fn insert(&self, new: NewArchivo) -> Result<Archivo, sqlx::Error> {
        sqlx::query_as::<_, Archivo>(
            r#"
            INSERT INTO archivos (entidad_origen, origen_id, nombre_archivo, ruta_archivo, tipo_mime)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new.entidad_origen)
        .bind(new.origen_id)
        .bind(new.nombre_archivo)
        .bind(new.ruta_archivo)
        .bind(new.tipo_mime)
        .fetch_one(&self.pool)
        .await
    }

    /// Delete a record, leaving an audit row behind. Both writes commit
    /// together or not at all.
    pub async fn delete_with_audit(&self, id: Uuid, motivo: &str) -> Result<Option<Archivo>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let archivo = sqlx::query_as::<_, Archivo>("SELECT * FROM archivos WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(archivo) = archivo else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO archivos_eliminados
                (archivo_id, entidad_origen, origen_id, nombre_archivo, ruta_archivo, motivo)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(archivo.id)
        .bind(&archivo.entidad_origen)
        .bind(archivo.origen_id)
        .bind(&archivo.nombre_archivo)
        .bind(&archivo.ruta_archivo)
        .bind(motivo)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM archivos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(archivo))
    }
}
