//! Postgres 报修单存储实现
//!
//! 状态以文本存储（new/confirmed/resolved），读出时解析为枚举；
//! 解析失败说明数据被手工改坏，作为存储错误上抛。

use crate::error::StorageError;
use crate::models::{ReportRecord, ReportUpdate};
use crate::traits::ReportStore;
use domain::ReportStatus;
use sqlx::{PgPool, Row};

pub struct PgReportStore {
    pub pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

fn row_to_report(row: &sqlx::postgres::PgRow) -> Result<ReportRecord, StorageError> {
    let status: String = row.try_get("status")?;
    let status = ReportStatus::parse(&status)
        .ok_or_else(|| StorageError::new(format!("invalid report status: {status}")))?;
    Ok(ReportRecord {
        report_id: row.try_get("report_id")?,
        device_barcode: row.try_get("device_barcode")?,
        device_name: row.try_get("device_name")?,
        device_status: row.try_get("device_status")?,
        status,
        created_at_ms: row.try_get("created_at_ms")?,
    })
}

#[async_trait::async_trait]
impl ReportStore for PgReportStore {
    async fn list_reports(&self) -> Result<Vec<ReportRecord>, StorageError> {
        let rows = sqlx::query(
            "select report_id, device_barcode, device_name, device_status, status, \
             created_at_ms from reports order by created_at_ms",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut reports = Vec::with_capacity(rows.len());
        for row in rows {
            reports.push(row_to_report(&row)?);
        }
        Ok(reports)
    }

    async fn find_report(&self, report_id: &str) -> Result<Option<ReportRecord>, StorageError> {
        let row = sqlx::query(
            "select report_id, device_barcode, device_name, device_status, status, \
             created_at_ms from reports where report_id = $1",
        )
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row_to_report(&row)?)),
            None => Ok(None),
        }
    }

    async fn create_report(&self, record: ReportRecord) -> Result<ReportRecord, StorageError> {
        sqlx::query(
            "insert into reports (report_id, device_barcode, device_name, device_status, \
             status, created_at_ms) values ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&record.report_id)
        .bind(&record.device_barcode)
        .bind(&record.device_name)
        .bind(&record.device_status)
        .bind(record.status.as_str())
        .bind(record.created_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_report(
        &self,
        report_id: &str,
        update: ReportUpdate,
    ) -> Result<Option<ReportRecord>, StorageError> {
        let status = update.status.map(|status| status.as_str().to_string());
        let row = sqlx::query(
            "update reports set \
             device_barcode = coalesce($2, device_barcode), \
             device_name = coalesce($3, device_name), \
             device_status = coalesce($4, device_status), \
             status = coalesce($5, status) \
             where report_id = $1 \
             returning report_id, device_barcode, device_name, device_status, status, \
             created_at_ms",
        )
        .bind(report_id)
        .bind(&update.device_barcode)
        .bind(&update.device_name)
        .bind(&update.device_status)
        .bind(&status)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row_to_report(&row)?)),
            None => Ok(None),
        }
    }

    async fn set_report_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<Option<ReportRecord>, StorageError> {
        let row = sqlx::query(
            "update reports set status = $2 where report_id = $1 \
             returning report_id, device_barcode, device_name, device_status, status, \
             created_at_ms",
        )
        .bind(report_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Ok(Some(row_to_report(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete_report(&self, report_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from reports where report_id = $1")
            .bind(report_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
