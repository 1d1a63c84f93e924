//! 报修单内存存储实现
//!
//! 仅用于本地演示和测试。

use crate::error::StorageError;
use crate::models::{ReportRecord, ReportUpdate};
use crate::traits::ReportStore;
use domain::ReportStatus;
use std::sync::RwLock;

/// 报修单内存存储
///
/// 用 Vec 保持创建顺序，报修单量级小，线性查找足够。
pub struct InMemoryReportStore {
    reports: RwLock<Vec<ReportRecord>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn list_reports(&self) -> Result<Vec<ReportRecord>, StorageError> {
        let items = self
            .reports
            .read()
            .map(|list| list.clone())
            .unwrap_or_default();
        Ok(items)
    }

    async fn find_report(&self, report_id: &str) -> Result<Option<ReportRecord>, StorageError> {
        let item = self.reports.read().ok().and_then(|list| {
            list.iter()
                .find(|report| report.report_id == report_id)
                .cloned()
        });
        Ok(item)
    }

    async fn create_report(&self, record: ReportRecord) -> Result<ReportRecord, StorageError> {
        let mut list = self
            .reports
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if list
            .iter()
            .any(|report| report.report_id == record.report_id)
        {
            return Err(StorageError::new("report exists"));
        }
        list.push(record.clone());
        Ok(record)
    }

    async fn update_report(
        &self,
        report_id: &str,
        update: ReportUpdate,
    ) -> Result<Option<ReportRecord>, StorageError> {
        let mut list = self
            .reports
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let report = match list.iter_mut().find(|report| report.report_id == report_id) {
            Some(report) => report,
            None => return Ok(None),
        };
        if let Some(device_barcode) = update.device_barcode {
            report.device_barcode = device_barcode;
        }
        if let Some(device_name) = update.device_name {
            report.device_name = device_name;
        }
        if let Some(device_status) = update.device_status {
            report.device_status = device_status;
        }
        if let Some(status) = update.status {
            report.status = status;
        }
        Ok(Some(report.clone()))
    }

    async fn set_report_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<Option<ReportRecord>, StorageError> {
        let mut list = self
            .reports
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match list.iter_mut().find(|report| report.report_id == report_id) {
            Some(report) => {
                report.status = status;
                Ok(Some(report.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_report(&self, report_id: &str) -> Result<bool, StorageError> {
        let mut list = self
            .reports
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let before = list.len();
        list.retain(|report| report.report_id != report_id);
        Ok(list.len() != before)
    }
}
