//! Postgres 管理员存储实现
//!
//! 通过 SQL 查询实现管理员 CRUD、登录查询与 refresh jti 绑定。

use crate::error::StorageError;
use crate::models::{AdminRecord, AdminUpdate};
use crate::traits::AdminStore;
use sqlx::{PgPool, Row};

pub struct PgAdminStore {
    pub pool: PgPool,
}

impl PgAdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn row_to_admin(row: &sqlx::postgres::PgRow) -> Result<AdminRecord, StorageError> {
    Ok(AdminRecord {
        admin_id: row.try_get("admin_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        image: row.try_get("image")?,
        role: row.try_get("role")?,
        refresh_jti: row.try_get("refresh_jti")?,
    })
}

#[async_trait::async_trait]
impl AdminStore for PgAdminStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let row = sqlx::query(
            "select admin_id, name, email, password, image, role, refresh_jti \
             from admins where name = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row_to_admin(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, StorageError> {
        let rows = sqlx::query(
            "select admin_id, name, email, password, image, role, refresh_jti from admins",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut admins = Vec::with_capacity(rows.len());
        for row in rows {
            admins.push(row_to_admin(&row)?);
        }
        Ok(admins)
    }

    async fn create_admin(&self, record: AdminRecord) -> Result<AdminRecord, StorageError> {
        sqlx::query(
            "insert into admins (admin_id, name, email, password, image, role, refresh_jti) \
             values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&record.admin_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password)
        .bind(&record.image)
        .bind(&record.role)
        .bind(&record.refresh_jti)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_admin(
        &self,
        admin_id: &str,
        update: AdminUpdate,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let row = sqlx::query(
            "update admins set \
             name = coalesce($2, name), \
             email = coalesce($3, email), \
             password = coalesce($4, password), \
             image = coalesce($5, image), \
             role = coalesce($6, role) \
             where admin_id = $1 \
             returning admin_id, name, email, password, image, role, refresh_jti",
        )
        .bind(admin_id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(&update.image)
        .bind(&update.role)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row_to_admin(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete_admin(&self, admin_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from admins where admin_id = $1")
            .bind(admin_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_password_hash(
        &self,
        admin_id: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("update admins set password = $2 where admin_id = $1")
            .bind(admin_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_refresh_jti(
        &self,
        admin_id: &str,
        jti: Option<&str>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("update admins set refresh_jti = $2 where admin_id = $1")
            .bind(admin_id)
            .bind(jti)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_refresh_jti(&self, admin_id: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("select refresh_jti from admins where admin_id = $1")
            .bind(admin_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(row.try_get("refresh_jti")?)
    }
}
