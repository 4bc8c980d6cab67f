use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Vecino;

#[derive(Debug, Clone)]
pub struct NewVecino {
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub cuil_cuit: Option<String>,
    pub domicilio: Option<String>,
    pub telefono: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct VecinoUpdate {
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub cuil_cuit: Option<String>,
    pub domicilio: Option<String>,
    pub telefono: Option<String>,
    pub email: String,
}

pub struct VecinoRepository {
    pool: PgPool,
}

impl VecinoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Vecino>, sqlx::Error> {
        sqlx::query_as::<_, Vecino>("SELECT * FROM vecinos ORDER BY apellido, nombre")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vecino>, sqlx::Error> {
        sqlx::query_as::<_, Vecino>("SELECT * FROM vecinos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Portal login accepts either email or DNI as the identifier
    pub async fn find_by_identificador(&self, identificador: &str) -> Result<Option<Vecino>, sqlx::Error> {
        sqlx::query_as::<_, Vecino>("SELECT * FROM vecinos WHERE email = $1 OR dni = $1")
            .bind(identificador)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, new: NewVecino) -> Result<Vecino, sqlx::Error> {
        sqlx::query_as::<_, Vecino>(
            r#"
            INSERT INTO vecinos (nombre, apellido, dni, cuil_cuit, domicilio, telefono, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.nombre)
        .bind(new.apellido)
        .bind(new.dni)
        .bind(new.cuil_cuit)
        .bind(new.domicilio)
        .bind(new.telefono)
        .bind(new.email)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(&self, id: Uuid, update: VecinoUpdate) -> Result<Option<Vecino>, sqlx::Error> {
        sqlx::query_as::<_, Vecino>(
            r#"
            UPDATE vecinos
            SET nombre = $2, apellido = $3, dni = $4, cuil_cuit = $5,
                domicilio = $6, telefono = $7, email = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.nombre)
        .bind(update.apellido)
        .bind(update.dni)
        .bind(update.cuil_cuit)
        .bind(update.domicilio)
        .bind(update.telefono)
        .bind(update.email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vecinos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
