//! 设备台账内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 设备 CRUD（按条码建键，条码唯一由键保证）
//! - 名称子串 / 状态全等的过滤查询

use crate::error::StorageError;
use crate::models::{DeviceFilter, DeviceRecord, DeviceUpdate};
use crate::traits::DeviceStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// 设备台账内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryDeviceStore {
    devices: RwLock<HashMap<String, DeviceRecord>>,
}

impl InMemoryDeviceStore {
    /// 创建新的设备存储
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryDeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DeviceStore for InMemoryDeviceStore {
    /// 列出所有台账设备
    async fn list_devices(&self) -> Result<Vec<DeviceRecord>, StorageError> {
        let items = self
            .devices
            .read()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        Ok(items)
    }

    /// 按条码查找设备
    async fn find_device(
        &self,
        device_barcode: &str,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let item = self
            .devices
            .read()
            .ok()
            .and_then(|map| map.get(device_barcode).cloned());
        Ok(item)
    }

    /// 创建新设备，条码重复时报错
    async fn create_device(&self, record: DeviceRecord) -> Result<DeviceRecord, StorageError> {
        let mut map = self
            .devices
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.device_barcode) {
            return Err(StorageError::new("device exists"));
        }
        map.insert(record.device_barcode.clone(), record.clone());
        Ok(record)
    }

    /// 按条码更新设备
    async fn update_device(
        &self,
        device_barcode: &str,
        update: DeviceUpdate,
    ) -> Result<Option<DeviceRecord>, StorageError> {
        let mut map = self
            .devices
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let device = match map.get_mut(device_barcode) {
            Some(device) => device,
            None => return Ok(None),
        };
        if let Some(device_name) = update.device_name {
            device.device_name = device_name;
        }
        if let Some(device_model) = update.device_model {
            device.device_model = device_model;
        }
        if let Some(device_price) = update.device_price {
            device.device_price = device_price;
        }
        if let Some(device_status) = update.device_status {
            device.device_status = device_status;
        }
        if let Some(device_location) = update.device_location {
            device.device_location = device_location;
        }
        Ok(Some(device.clone()))
    }

    /// 过滤设备：名称子串（不敏感）+ 状态全等（不敏感）
    async fn filter_devices(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let name_needle = filter.device_name.as_ref().map(|name| name.to_lowercase());
        let status_needle = filter
            .device_status
            .as_ref()
            .map(|status| status.to_lowercase());
        let items = self
            .devices
            .read()
            .map(|map| {
                map.values()
                    .filter(|device| {
                        let name_hit = match &name_needle {
                            Some(needle) => {
                                device.device_name.to_lowercase().contains(needle)
                            }
                            None => true,
                        };
                        let status_hit = match &status_needle {
                            Some(needle) => device.device_status.to_lowercase() == *needle,
                            None => true,
                        };
                        name_hit && status_hit
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }
}
