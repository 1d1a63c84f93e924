//! 楼层树的纯函数操作
//!
//! 对已加载的楼层文档做定位、摘取和过滤，不碰存储。
//!
//! 两套匹配语义并存，不能混用：
//! - 变更路径（定位侧翼/房间/设备）：精确全等匹配
//! - 过滤查询路径：名称大小写不敏感子串匹配，设备状态大小写不敏感全等

use etrack_storage::{FloorRecord, RoomDeviceRecord, RoomRecord, WingRecord};

/// 设备在楼层树中的扁平定位结果（扫码端消费的形状）。
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLocation {
    pub floor_name: String,
    pub wing_name: String,
    pub room_name: String,
    pub device: RoomDeviceRecord,
}

/// 层级过滤条件。各级名称为子串匹配，设备状态为全等匹配（均不敏感）。
#[derive(Debug, Clone, Default)]
pub struct FloorFilter {
    pub floor_name: Option<String>,
    pub wing_name: Option<String>,
    pub room_name: Option<String>,
    pub device_name: Option<String>,
    pub device_status: Option<String>,
}

/// 按名称精确定位侧翼，返回下标。
pub fn wing_index(floor: &FloorRecord, wing_name: &str) -> Option<usize> {
    floor
        .wings
        .iter()
        .position(|wing| wing.wing_name == wing_name)
}

/// 按名称精确定位房间，返回下标。
pub fn room_index(wing: &WingRecord, room_name: &str) -> Option<usize> {
    wing.rooms.iter().position(|room| room.room_name == room_name)
}

/// 从楼层树中摘出首个条码匹配的设备。
///
/// 线性遍历 楼层 → 侧翼 → 房间 → 设备；条码在树内不强制唯一，
/// 重复时只摘取遍历顺序上的第一个。命中则从源房间结构性移除，
/// 返回 (源楼层下标, 被摘设备)；未命中返回 None，树不变。
pub fn take_device_by_barcode(
    floors: &mut [FloorRecord],
    barcode: &str,
) -> Option<(usize, RoomDeviceRecord)> {
    for (floor_idx, floor) in floors.iter_mut().enumerate() {
        for wing in floor.wings.iter_mut() {
            for room in wing.rooms.iter_mut() {
                if let Some(device_idx) = room
                    .devices
                    .iter()
                    .position(|device| device.device_barcode == barcode)
                {
                    return Some((floor_idx, room.devices.remove(device_idx)));
                }
            }
        }
    }
    None
}

/// 展平定位：返回首个条码匹配设备的所属楼层/侧翼/房间名与设备快照。
pub fn locate_device(floors: &[FloorRecord], barcode: &str) -> Option<DeviceLocation> {
    for floor in floors {
        for wing in &floor.wings {
            for room in &wing.rooms {
                if let Some(device) = room
                    .devices
                    .iter()
                    .find(|device| device.device_barcode == barcode)
                {
                    return Some(DeviceLocation {
                        floor_name: floor.floor_name.clone(),
                        wing_name: wing.wing_name.clone(),
                        room_name: room.room_name.clone(),
                        device: device.clone(),
                    });
                }
            }
        }
    }
    None
}

/// 对单个楼层应用级联过滤，返回过滤后的完整楼层形状。
///
/// 各级数组过滤后保留（可以为空），不剪枝。楼层名一级的过滤由
/// 存储查询完成，这里只处理侧翼及以下。
pub fn filter_floor(floor: &FloorRecord, filter: &FloorFilter) -> FloorRecord {
    let wings = floor
        .wings
        .iter()
        .filter(|wing| match &filter.wing_name {
            Some(needle) => contains_ci(&wing.wing_name, needle),
            None => true,
        })
        .map(|wing| WingRecord {
            wing_name: wing.wing_name.clone(),
            rooms: wing
                .rooms
                .iter()
                .filter(|room| match &filter.room_name {
                    Some(needle) => contains_ci(&room.room_name, needle),
                    None => true,
                })
                .map(|room| RoomRecord {
                    room_name: room.room_name.clone(),
                    devices: room
                        .devices
                        .iter()
                        .filter(|device| {
                            let name_hit = match &filter.device_name {
                                Some(needle) => contains_ci(&device.device_name, needle),
                                None => true,
                            };
                            let status_hit = match &filter.device_status {
                                Some(needle) => {
                                    device.device_status.to_lowercase() == needle.to_lowercase()
                                }
                                None => true,
                            };
                            name_hit && status_hit
                        })
                        .cloned()
                        .collect(),
                })
                .collect(),
        })
        .collect();
    FloorRecord {
        floor_name: floor.floor_name.clone(),
        wings,
    }
}

/// 大小写不敏感的子串匹配。
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 楼层树中的设备总数（测试与守恒检查用）。
pub fn device_count(floors: &[FloorRecord]) -> usize {
    floors
        .iter()
        .flat_map(|floor| &floor.wings)
        .flat_map(|wing| &wing.rooms)
        .map(|room| room.devices.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(barcode: &str, name: &str, status: &str) -> RoomDeviceRecord {
        RoomDeviceRecord {
            device_barcode: barcode.to_string(),
            device_name: name.to_string(),
            device_model: "M1".to_string(),
            device_price: 10.0,
            device_status: status.to_string(),
        }
    }

    fn sample_floors() -> Vec<FloorRecord> {
        vec![
            FloorRecord {
                floor_name: "Floor 1".to_string(),
                wings: vec![WingRecord {
                    wing_name: "East Wing".to_string(),
                    rooms: vec![
                        RoomRecord {
                            room_name: "101".to_string(),
                            devices: vec![
                                device("D1", "Monitor", "working"),
                                device("D2", "BigMonster", "Working"),
                            ],
                        },
                        RoomRecord {
                            room_name: "102".to_string(),
                            devices: vec![device("D3", "Keyboard", "not working")],
                        },
                    ],
                }],
            },
            FloorRecord {
                floor_name: "Floor 2".to_string(),
                wings: vec![WingRecord {
                    wing_name: "West Wing".to_string(),
                    rooms: vec![RoomRecord {
                        room_name: "201".to_string(),
                        devices: vec![device("D1", "Duplicate", "working")],
                    }],
                }],
            },
        ]
    }

    #[test]
    fn exact_lookups_are_case_sensitive() {
        let floors = sample_floors();
        assert_eq!(wing_index(&floors[0], "East Wing"), Some(0));
        assert_eq!(wing_index(&floors[0], "east wing"), None);
        assert_eq!(room_index(&floors[0].wings[0], "101"), Some(0));
        assert_eq!(room_index(&floors[0].wings[0], "103"), None);
    }

    #[test]
    fn take_removes_first_match_in_traversal_order() {
        let mut floors = sample_floors();
        // D1 在两个楼层各出现一次，只摘遍历顺序上的第一个
        let (floor_idx, taken) = take_device_by_barcode(&mut floors, "D1").expect("take");
        assert_eq!(floor_idx, 0);
        assert_eq!(taken.device_name, "Monitor");
        assert_eq!(floors[0].wings[0].rooms[0].devices.len(), 1);
        assert_eq!(floors[1].wings[0].rooms[0].devices.len(), 1);
        assert_eq!(device_count(&floors), 3);
    }

    #[test]
    fn take_misses_leave_tree_unchanged() {
        let mut floors = sample_floors();
        assert!(take_device_by_barcode(&mut floors, "D9").is_none());
        assert_eq!(device_count(&floors), 4);
    }

    #[test]
    fn locate_returns_flat_shape() {
        let floors = sample_floors();
        let hit = locate_device(&floors, "D3").expect("locate");
        assert_eq!(hit.floor_name, "Floor 1");
        assert_eq!(hit.wing_name, "East Wing");
        assert_eq!(hit.room_name, "102");
        assert_eq!(hit.device.device_barcode, "D3");
        assert!(locate_device(&floors, "D9").is_none());
    }

    #[test]
    fn filter_device_name_is_ci_substring() {
        let floors = sample_floors();
        let filter = FloorFilter {
            device_name: Some("mon".to_string()),
            ..FloorFilter::default()
        };
        let filtered = filter_floor(&floors[0], &filter);
        let room_101 = &filtered.wings[0].rooms[0];
        // "Monitor" 与 "BigMonster" 都含 "mon"（不敏感）
        assert_eq!(room_101.devices.len(), 2);
        // 102 被过滤成空数组但仍保留
        assert!(filtered.wings[0].rooms[1].devices.is_empty());
    }

    #[test]
    fn filter_device_status_is_ci_equality() {
        let floors = sample_floors();
        let filter = FloorFilter {
            device_status: Some("WORKING".to_string()),
            ..FloorFilter::default()
        };
        let filtered = filter_floor(&floors[0], &filter);
        let statuses: Vec<&str> = filtered.wings[0].rooms[0]
            .devices
            .iter()
            .map(|device| device.device_status.as_str())
            .collect();
        assert_eq!(statuses, vec!["working", "Working"]);
        // "not working" 不是 "working" 的全等匹配
        assert!(filtered.wings[0].rooms[1].devices.is_empty());
    }

    #[test]
    fn filter_wing_and_room_cascade() {
        let floors = sample_floors();
        let filter = FloorFilter {
            wing_name: Some("east".to_string()),
            room_name: Some("10".to_string()),
            ..FloorFilter::default()
        };
        let filtered = filter_floor(&floors[0], &filter);
        assert_eq!(filtered.wings.len(), 1);
        assert_eq!(filtered.wings[0].rooms.len(), 2);

        let none = filter_floor(&floors[1], &filter);
        assert!(none.wings.is_empty());
    }
}
