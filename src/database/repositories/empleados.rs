use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Empleado;

/// Fields required to register a new employee. The caller hashes the
/// password; this layer never sees plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewEmpleado {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub dni: String,
    pub rol: String,
    pub password_hash: String,
    pub requiere_cambio_password: bool,
}

#[derive(Debug, Clone)]
pub struct EmpleadoUpdate {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub rol: String,
}

pub struct EmpleadoRepository {
    pool: PgPool,
}

impl EmpleadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active employees only, for the back-office listing
    pub async fn list_active(&self) -> Result<Vec<Empleado>, sqlx::Error> {
        sqlx::query_as::<_, Empleado>(
            "SELECT * FROM empleados WHERE activo = TRUE ORDER BY apellido, nombre",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Empleado>, sqlx::Error> {
        sqlx::query_as::<_, Empleado>("SELECT * FROM empleados WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Empleado>, sqlx::Error> {
        sqlx::query_as::<_, Empleado>("SELECT * FROM empleados WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, new: NewEmpleado) -> Result<Empleado, sqlx::Error> {
        sqlx::query_as::<_, Empleado>(
            r#"
            INSERT INTO empleados (nombre, apellido, email, dni, rol, password_hash, requiere_cambio_password)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.nombre)
        .bind(new.apellido)
        .bind(new.email)
        .bind(new.dni)
        .bind(new.rol)
        .bind(new.password_hash)
        .bind(new.requiere_cambio_password)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(&self, id: Uuid, update: EmpleadoUpdate) -> Result<Option<Empleado>, sqlx::Error> {
        sqlx::query_as::<_, Empleado>(
            r#"
            UPDATE empleados
            SET nombre = $2, apellido = $3, email = $4, rol = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.nombre)
        .bind(update.apellido)
        .bind(update.email)
        .bind(update.rol)
        .fetch_optional(&self.pool)
        .await
    }

    /// Soft delete: the row stays, the account can no longer log in
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE empleados SET activo = FALSE, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn record_login_failure(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE empleados SET intentos_login = intentos_login + 1, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn record_login_success(&self, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE empleados SET intentos_login = 0, ultimo_login = now(), updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Replace the stored hash. Also resets the failed-attempt counter and
    /// sets whether the account must change this password on next login.
    pub async fn set_password(
        &self,
        id: Uuid,
        password_hash: &str,
        requiere_cambio: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE empleados
            SET password_hash = $2, requiere_cambio_password = $3, intentos_login = 0, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .bind(requiere_cambio)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Gate for the first-run bootstrap: it stays open only while this is zero
    pub async fn count_active_admins(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM empleados WHERE rol = 'admin' AND activo = TRUE")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
