//! Postgres 楼层聚合文档存储实现
//!
//! 一行一个楼层文档：floor_name 唯一键，wings 整棵树存 JSONB。
//! seq 列保留插入顺序，list_floors 按其排序即树遍历顺序。
//!
//! 设计要点：
//! - 单楼层写入是单行 UPDATE/INSERT，具备文档级原子性
//! - save_floors 将多份文档放进同一个事务，跨楼层搬移不会出现
//!   设备两边都不在的中间状态

use crate::error::StorageError;
use crate::models::{FloorRecord, WingRecord};
use crate::traits::FloorStore;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

pub struct PgFloorStore {
    pub pool: PgPool,
}

impl PgFloorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn row_to_floor(row: &sqlx::postgres::PgRow) -> Result<FloorRecord, StorageError> {
    let wings: Json<Vec<WingRecord>> = row.try_get("wings")?;
    Ok(FloorRecord {
        floor_name: row.try_get("floor_name")?,
        wings: wings.0,
    })
}

#[async_trait::async_trait]
impl FloorStore for PgFloorStore {
    async fn list_floors(&self) -> Result<Vec<FloorRecord>, StorageError> {
        let rows = sqlx::query("select floor_name, wings from floors order by seq")
            .fetch_all(&self.pool)
            .await?;
        let mut floors = Vec::with_capacity(rows.len());
        for row in rows {
            floors.push(row_to_floor(&row)?);
        }
        Ok(floors)
    }

    async fn list_floors_matching(
        &self,
        floor_name: Option<&str>,
    ) -> Result<Vec<FloorRecord>, StorageError> {
        let rows = match floor_name {
            Some(needle) => {
                sqlx::query(
                    "select floor_name, wings from floors \
                     where floor_name ilike '%' || $1 || '%' order by seq",
                )
                .bind(needle)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("select floor_name, wings from floors order by seq")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        let mut floors = Vec::with_capacity(rows.len());
        for row in rows {
            floors.push(row_to_floor(&row)?);
        }
        Ok(floors)
    }

    async fn find_floor(&self, floor_name: &str) -> Result<Option<FloorRecord>, StorageError> {
        let row = sqlx::query("select floor_name, wings from floors where floor_name = $1")
            .bind(floor_name)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row_to_floor(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert_floor(&self, record: FloorRecord) -> Result<FloorRecord, StorageError> {
        sqlx::query("insert into floors (floor_name, wings) values ($1, $2)")
            .bind(&record.floor_name)
            .bind(Json(&record.wings))
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn save_floor(&self, record: FloorRecord) -> Result<FloorRecord, StorageError> {
        sqlx::query(
            "insert into floors (floor_name, wings) values ($1, $2) \
             on conflict (floor_name) do update set wings = excluded.wings",
        )
        .bind(&record.floor_name)
        .bind(Json(&record.wings))
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn replace_floor(
        &self,
        old_floor_name: &str,
        record: FloorRecord,
    ) -> Result<Option<FloorRecord>, StorageError> {
        let result = sqlx::query(
            "update floors set floor_name = $2, wings = $3 where floor_name = $1",
        )
        .bind(old_floor_name)
        .bind(&record.floor_name)
        .bind(Json(&record.wings))
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn delete_floor(&self, floor_name: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from floors where floor_name = $1")
            .bind(floor_name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_floors(&self, records: Vec<FloorRecord>) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;
        for record in &records {
            sqlx::query(
                "insert into floors (floor_name, wings) values ($1, $2) \
                 on conflict (floor_name) do update set wings = excluded.wings",
            )
            .bind(&record.floor_name)
            .bind(Json(&record.wings))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
