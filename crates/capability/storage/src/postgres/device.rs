//! Postgres 设备台账存储实现
//!
//! 通过 SQL 查询实现设备台账 CRUD 与过滤。
//!
//! 设计要点：
//! - device_barcode 为主键，条码唯一由约束保证
//! - 过滤语义：名称 ilike 子串，状态 lower() 全等

use crate::error::StorageError;
use crate::models::{DeviceFilter, DeviceRecord, DeviceUpdate};
use crate::traits::DeviceStore;
use sqlx::{PgPool, Row};

pub struct PgDeviceStore {
    pub pool: PgPool,
}

impl PgDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn row_to_device(row: &sqlx::postgres::PgRow) -> Result<DeviceRecord, StorageError> {
    Ok(DeviceRecord {
        device_barcode: row.try_get("device_barcode")?,
        device_name: row.try_get("device_name")?,
        device_model: row.try_get("device_model")?,
        device_price: row.try_get("device_price")?,
        device_status: row.try_get("device_status")?,
        device_location: row.try_get("device_location")?,
    })
}

#[async_trait::async_trait]
impl DeviceStore for PgDeviceStore {
    async fn list_devices(&self) -> Result<Vec<DeviceRecord>, StorageError> {
        let rows = sqlx::query(
            "select device_barcode, device_name, device_model, device_price, \
             device_status, device_location from devices",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut devices = Vec::with_capacity(rows.len());
        for row in rows {
            devices.push(row_to_device(&row)?);
        }
        Ok(devices)
    }

    async fn find_device(
        &self,
        device_barcode: &str,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let row = sqlx::query(
            "select device_barcode, device_name, device_model, device_price, \
             device_status, device_location from devices where device_barcode = $1",
        )
        .bind(device_barcode)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row_to_device(&row)?)),
            None => Ok(None),
        }
    }

    async fn create_device(&self, record: DeviceRecord) -> Result<DeviceRecord, StorageError> {
        sqlx::query(
            "insert into devices (device_barcode, device_name, device_model, \
             device_price, device_status, device_location) \
             values ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&record.device_barcode)
        .bind(&record.device_name)
        .bind(&record.device_model)
        .bind(record.device_price)
        .bind(&record.device_status)
        .bind(&record.device_location)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_device(
        &self,
        device_barcode: &str,
        update: DeviceUpdate,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let row = sqlx::query(
            "update devices set \
             device_name = coalesce($2, device_name), \
             device_model = coalesce($3, device_model), \
             device_price = coalesce($4, device_price), \
             device_status = coalesce($5, device_status), \
             device_location = coalesce($6, device_location) \
             where device_barcode = $1 \
             returning device_barcode, device_name, device_model, device_price, \
             device_status, device_location",
        )
        .bind(device_barcode)
        .bind(&update.device_name)
        .bind(&update.device_model)
        .bind(update.device_price)
        .bind(&update.device_status)
        .bind(&update.device_location)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row_to_device(&row)?)),
            None => Ok(None),
        }
    }

    async fn filter_devices(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let rows = sqlx::query(
            "select device_barcode, device_name, device_model, device_price, \
             device_status, device_location from devices \
             where ($1::text is null or device_name ilike '%' || $1 || '%') \
             and ($2::text is null or lower(device_status) = lower($2))",
        )
        .bind(&filter.device_name)
        .bind(&filter.device_status)
        .fetch_all(&self.pool)
        .await?;
        let mut devices = Vec::with_capacity(rows.len());
        for row in rows {
            devices.push(row_to_device(&row)?);
        }
        Ok(devices)
    }
}
