//! 楼层聚合文档内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 楼层文档的插入/整体保存/替换/删除
//! - 按楼层名的精确查找与子串过滤
//! - 多文档一次性保存（单写锁临界区模拟事务）

use crate::error::StorageError;
use crate::models::FloorRecord;
use crate::traits::FloorStore;
use std::sync::RwLock;

/// 楼层内存存储
///
/// 用 RwLock + Vec 提供线程安全的内存存储。用 Vec 而不是 HashMap
/// 是为了保持插入顺序：list_floors 的顺序就是树遍历顺序。
pub struct InMemoryFloorStore {
    floors: RwLock<Vec<FloorRecord>>,
}

impl InMemoryFloorStore {
    /// 创建空的楼层存储
    pub fn new() -> Self {
        Self {
            floors: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryFloorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FloorStore for InMemoryFloorStore {
    /// 按插入顺序列出全部楼层
    async fn list_floors(&self) -> Result<Vec<FloorRecord>, StorageError> {
        let items = self
            .floors
            .read()
            .map(|list| list.clone())
            .unwrap_or_default();
        Ok(items)
    }

    /// 按楼层名子串（大小写不敏感）过滤楼层
    async fn list_floors_matching(
        &self,
        floor_name: Option<&str>,
    ) -> Result<Vec<FloorRecord>, StorageError> {
        let needle = floor_name.map(|name| name.to_lowercase());
        let items = self
            .floors
            .read()
            .map(|list| {
                list.iter()
                    .filter(|floor| match &needle {
                        Some(needle) => floor.floor_name.to_lowercase().contains(needle),
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    /// 按楼层名精确查找
    async fn find_floor(&self, floor_name: &str) -> Result<Option<FloorRecord>, StorageError> {
        let item = self.floors.read().ok().and_then(|list| {
            list.iter()
                .find(|floor| floor.floor_name == floor_name)
                .cloned()
        });
        Ok(item)
    }

    /// 插入新楼层，楼层名重复时报错
    async fn insert_floor(&self, record: FloorRecord) -> Result<FloorRecord, StorageError> {
        let mut list = self
            .floors
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if list.iter().any(|floor| floor.floor_name == record.floor_name) {
            return Err(StorageError::new("floor exists"));
        }
        list.push(record.clone());
        Ok(record)
    }

    /// 按楼层名整体保存（存在则替换，不存在则追加）
    async fn save_floor(&self, record: FloorRecord) -> Result<FloorRecord, StorageError> {
        let mut list = self
            .floors
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match list
            .iter_mut()
            .find(|floor| floor.floor_name == record.floor_name)
        {
            Some(slot) => *slot = record.clone(),
            None => list.push(record.clone()),
        }
        Ok(record)
    }

    /// 按旧楼层名整体替换（含改名），旧楼层缺失返回 None
    async fn replace_floor(
        &self,
        old_floor_name: &str,
        record: FloorRecord,
    ) -> Result<Option<FloorRecord>, StorageError> {
        let mut list = self
            .floors
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match list
            .iter_mut()
            .find(|floor| floor.floor_name == old_floor_name)
        {
            Some(slot) => {
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// 删除楼层，缺失返回 false
    async fn delete_floor(&self, floor_name: &str) -> Result<bool, StorageError> {
        let mut list = self
            .floors
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let before = list.len();
        list.retain(|floor| floor.floor_name != floor_name);
        Ok(list.len() != before)
    }

    /// 多文档一次性保存：单个写锁临界区内逐份替换
    async fn save_floors(&self, records: Vec<FloorRecord>) -> Result<(), StorageError> {
        let mut list = self
            .floors
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        for record in records {
            match list
                .iter_mut()
                .find(|floor| floor.floor_name == record.floor_name)
            {
                Some(slot) => *slot = record,
                None => list.push(record),
            }
        }
        Ok(())
    }
}
