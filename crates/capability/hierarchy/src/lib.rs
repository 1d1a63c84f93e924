//! 楼层层级能力：楼层 → 侧翼 → 房间 → 设备 树的维护与查询。
//!
//! 职责划分：
//! - [`tree`]：对已加载楼层文档的纯函数定位/摘取/过滤
//! - [`HierarchyService`]：在 `FloorStore` 之上编排结构性变更与查询
//!
//! 语义约定（与既有前端行为保持一致）：
//! - 变更路径按名称精确匹配，过滤查询按不敏感子串匹配，两者不混用
//! - 预期内的缺失/冲突以 [`HierarchyError`] 类型化返回，不用 panic
//! - 跨楼层搬移设备的两份文档通过 `FloorStore::save_floors` 作为
//!   一个单元落库

pub mod tree;

pub use tree::{DeviceLocation, FloorFilter};

use etrack_storage::{
    FloorRecord, FloorStore, RoomDeviceRecord, RoomRecord, StorageError, WingRecord,
};
use std::sync::Arc;

/// 层级操作错误。
///
/// NotFound 三种细分（楼层/设备/目标房间）对应调用方不同的 404 文案；
/// FloorExists 对应动态建层的重名冲突。
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("floor not found")]
    FloorNotFound,
    #[error("device not found")]
    DeviceNotFound,
    #[error("target room not found")]
    TargetRoomNotFound,
    #[error("floor already exists")]
    FloorExists,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 动态建层时单个侧翼的输入形状：侧翼名 + 房间名列表。
#[derive(Debug, Clone)]
pub struct WingLayout {
    pub wing_name: String,
    pub rooms: Vec<String>,
}

/// 楼层层级服务：所有结构性变更与层级查询的唯一入口。
pub struct HierarchyService {
    floors: Arc<dyn FloorStore>,
}

impl HierarchyService {
    pub fn new(floors: Arc<dyn FloorStore>) -> Self {
        Self { floors }
    }

    /// 三级追加式 upsert：楼层/侧翼/房间缺哪级建哪级，设备始终追加。
    ///
    /// 后置条件：(floor, wing, room) 对应的房间存在，且其设备列表
    /// 尾部追加了本次传入的设备。不去重、不替换。
    pub async fn upsert_floor(
        &self,
        floor_name: &str,
        wing_name: &str,
        room_name: &str,
        devices: Vec<RoomDeviceRecord>,
    ) -> Result<FloorRecord, HierarchyError> {
        let Some(mut floor) = self.floors.find_floor(floor_name).await? else {
            let floor = FloorRecord {
                floor_name: floor_name.to_string(),
                wings: vec![WingRecord {
                    wing_name: wing_name.to_string(),
                    rooms: vec![RoomRecord {
                        room_name: room_name.to_string(),
                        devices,
                    }],
                }],
            };
            let created = self.floors.insert_floor(floor).await?;
            tracing::info!(floor = %floor_name, "floor created");
            return Ok(created);
        };

        match tree::wing_index(&floor, wing_name) {
            None => floor.wings.push(WingRecord {
                wing_name: wing_name.to_string(),
                rooms: vec![RoomRecord {
                    room_name: room_name.to_string(),
                    devices,
                }],
            }),
            Some(wing_idx) => match tree::room_index(&floor.wings[wing_idx], room_name) {
                None => floor.wings[wing_idx].rooms.push(RoomRecord {
                    room_name: room_name.to_string(),
                    devices,
                }),
                Some(room_idx) => {
                    floor.wings[wing_idx].rooms[room_idx].devices.extend(devices);
                }
            },
        }
        let saved = self.floors.save_floor(floor).await?;
        tracing::info!(floor = %floor_name, wing = %wing_name, room = %room_name, "floor updated");
        Ok(saved)
    }

    /// 动态建层：重名直接冲突，房间以空设备列表创建。纯创建，无合并。
    pub async fn create_dynamic_floor(
        &self,
        floor_name: &str,
        wings: Vec<WingLayout>,
    ) -> Result<FloorRecord, HierarchyError> {
        if self.floors.find_floor(floor_name).await?.is_some() {
            return Err(HierarchyError::FloorExists);
        }
        let record = FloorRecord {
            floor_name: floor_name.to_string(),
            wings: wings
                .into_iter()
                .map(|wing| WingRecord {
                    wing_name: wing.wing_name,
                    rooms: wing
                        .rooms
                        .into_iter()
                        .map(|room_name| RoomRecord {
                            room_name,
                            devices: Vec::new(),
                        })
                        .collect(),
                })
                .collect(),
        };
        let created = self.floors.insert_floor(record).await?;
        tracing::info!(floor = %created.floor_name, "dynamic floor created");
        Ok(created)
    }

    /// 整体替换：改楼层名并以调用方提供的 wings 覆盖全部侧翼。
    ///
    /// 未包含在新 wings 里的旧子树会丢弃，保留与否由调用方负责。
    pub async fn replace_floor(
        &self,
        old_floor_name: &str,
        new_floor_name: &str,
        wings: Vec<WingRecord>,
    ) -> Result<FloorRecord, HierarchyError> {
        let record = FloorRecord {
            floor_name: new_floor_name.to_string(),
            wings,
        };
        let updated = self
            .floors
            .replace_floor(old_floor_name, record)
            .await?
            .ok_or(HierarchyError::FloorNotFound)?;
        tracing::info!(old = %old_floor_name, new = %new_floor_name, "floor replaced");
        Ok(updated)
    }

    /// 删除楼层，级联内嵌侧翼/房间/设备。不可逆，无软删除。
    pub async fn delete_floor(&self, floor_name: &str) -> Result<(), HierarchyError> {
        if !self.floors.delete_floor(floor_name).await? {
            return Err(HierarchyError::FloorNotFound);
        }
        tracing::info!(floor = %floor_name, "floor deleted");
        Ok(())
    }

    /// 搬移设备并更新状态。
    ///
    /// 流程：加载全部楼层 → 摘出遍历顺序上首个条码匹配的设备 →
    /// 设新状态 → 按精确名定位目标房间（不会自动创建）→ 追加 →
    /// 落库。同楼层搬移只保存一份文档；跨楼层的两份文档通过
    /// `save_floors` 在一个单元内保存，失败不会留下设备两边都不在
    /// 的中间状态。
    pub async fn relocate_device(
        &self,
        barcode: &str,
        new_floor_name: &str,
        new_wing_name: &str,
        new_room_name: &str,
        new_status: &str,
    ) -> Result<(), HierarchyError> {
        let mut floors = self.floors.list_floors().await?;

        let (source_idx, mut device) = tree::take_device_by_barcode(&mut floors, barcode)
            .ok_or(HierarchyError::DeviceNotFound)?;
        device.device_status = new_status.to_string();

        let target_idx = floors
            .iter()
            .position(|floor| floor.floor_name == new_floor_name)
            .ok_or(HierarchyError::TargetRoomNotFound)?;
        let wing_idx = tree::wing_index(&floors[target_idx], new_wing_name)
            .ok_or(HierarchyError::TargetRoomNotFound)?;
        let room_idx = tree::room_index(&floors[target_idx].wings[wing_idx], new_room_name)
            .ok_or(HierarchyError::TargetRoomNotFound)?;
        floors[target_idx].wings[wing_idx].rooms[room_idx]
            .devices
            .push(device);

        if source_idx == target_idx {
            self.floors.save_floor(floors[target_idx].clone()).await?;
        } else {
            let source = floors[source_idx].clone();
            let target = floors[target_idx].clone();
            self.floors.save_floors(vec![source, target]).await?;
        }
        tracing::info!(
            barcode = %barcode,
            floor = %new_floor_name,
            wing = %new_wing_name,
            room = %new_room_name,
            "device relocated"
        );
        Ok(())
    }

    /// 列出全部楼层，完整嵌套形状。
    pub async fn list_floors(&self) -> Result<Vec<FloorRecord>, HierarchyError> {
        Ok(self.floors.list_floors().await?)
    }

    /// 级联过滤查询：楼层名一级下推给存储，其余各级在内存过滤。
    pub async fn filter_floors(
        &self,
        filter: &FloorFilter,
    ) -> Result<Vec<FloorRecord>, HierarchyError> {
        let floors = self
            .floors
            .list_floors_matching(filter.floor_name.as_deref())
            .await?;
        Ok(floors
            .iter()
            .map(|floor| tree::filter_floor(floor, filter))
            .collect())
    }

    /// 条码定位：展平整棵森林，返回扁平定位记录（扫码端形状）。
    pub async fn locate_device(&self, barcode: &str) -> Result<DeviceLocation, HierarchyError> {
        let floors = self.floors.list_floors().await?;
        tree::locate_device(&floors, barcode).ok_or(HierarchyError::DeviceNotFound)
    }
}
