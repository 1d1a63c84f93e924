use etrack_hierarchy::tree::device_count;
use etrack_hierarchy::{FloorFilter, HierarchyError, HierarchyService, WingLayout};
use etrack_storage::{FloorStore, InMemoryFloorStore, RoomDeviceRecord};
use std::sync::Arc;

fn device(barcode: &str, name: &str, status: &str) -> RoomDeviceRecord {
    RoomDeviceRecord {
        device_barcode: barcode.to_string(),
        device_name: name.to_string(),
        device_model: "M1".to_string(),
        device_price: 99.0,
        device_status: status.to_string(),
    }
}

fn service() -> (HierarchyService, Arc<InMemoryFloorStore>) {
    let store = Arc::new(InMemoryFloorStore::new());
    (HierarchyService::new(store.clone()), store)
}

#[tokio::test]
async fn upsert_creates_floor_wing_room() {
    let (service, _) = service();
    let floor = service
        .upsert_floor("Floor 1", "East Wing", "101", vec![device("D1", "Monitor", "working")])
        .await
        .expect("upsert");

    assert_eq!(floor.floor_name, "Floor 1");
    assert_eq!(floor.wings.len(), 1);
    assert_eq!(floor.wings[0].rooms[0].devices.len(), 1);
}

#[tokio::test]
async fn upsert_appends_devices_not_replaces() {
    let (service, _) = service();
    service
        .upsert_floor("Floor 1", "East Wing", "101", vec![device("D1", "Monitor", "working")])
        .await
        .expect("first");
    let floor = service
        .upsert_floor("Floor 1", "East Wing", "101", vec![device("D2", "Printer", "working")])
        .await
        .expect("second");

    let barcodes: Vec<&str> = floor.wings[0].rooms[0]
        .devices
        .iter()
        .map(|d| d.device_barcode.as_str())
        .collect();
    // 追加而非替换：D1 在前，D2 在后
    assert_eq!(barcodes, vec!["D1", "D2"]);
}

#[tokio::test]
async fn upsert_adds_missing_wing_and_room_levels() {
    let (service, _) = service();
    service
        .upsert_floor("Floor 1", "East Wing", "101", vec![])
        .await
        .expect("create");
    let floor = service
        .upsert_floor("Floor 1", "West Wing", "201", vec![device("D1", "Monitor", "working")])
        .await
        .expect("new wing");
    assert_eq!(floor.wings.len(), 2);

    let floor = service
        .upsert_floor("Floor 1", "East Wing", "102", vec![])
        .await
        .expect("new room");
    assert_eq!(floor.wings[0].rooms.len(), 2);
}

#[tokio::test]
async fn dynamic_create_conflicts_and_keeps_original() {
    let (service, store) = service();
    service
        .create_dynamic_floor(
            "Floor 1",
            vec![WingLayout {
                wing_name: "East Wing".to_string(),
                rooms: vec!["101".to_string(), "102".to_string()],
            }],
        )
        .await
        .expect("create");

    let err = service
        .create_dynamic_floor(
            "Floor 1",
            vec![WingLayout {
                wing_name: "Other Wing".to_string(),
                rooms: vec!["999".to_string()],
            }],
        )
        .await
        .expect_err("conflict");
    assert!(matches!(err, HierarchyError::FloorExists));

    // 第一次创建的侧翼原样保留
    let floor = store
        .find_floor("Floor 1")
        .await
        .expect("find")
        .expect("some");
    assert_eq!(floor.wings.len(), 1);
    assert_eq!(floor.wings[0].wing_name, "East Wing");
    assert!(floor.wings[0].rooms.iter().all(|room| room.devices.is_empty()));
}

#[tokio::test]
async fn replace_floor_renames_and_discards_old_wings() {
    let (service, store) = service();
    service
        .upsert_floor("Floor 1", "East Wing", "101", vec![device("D1", "Monitor", "working")])
        .await
        .expect("seed");

    service
        .replace_floor("Floor 1", "Level One", vec![])
        .await
        .expect("replace");

    assert!(store.find_floor("Floor 1").await.expect("find").is_none());
    let renamed = store
        .find_floor("Level One")
        .await
        .expect("find")
        .expect("some");
    assert!(renamed.wings.is_empty());

    let err = service
        .replace_floor("Floor 1", "X", vec![])
        .await
        .expect_err("missing");
    assert!(matches!(err, HierarchyError::FloorNotFound));
}

#[tokio::test]
async fn delete_floor_removes_everything_under_it() {
    let (service, _) = service();
    service
        .upsert_floor("Floor 1", "East Wing", "101", vec![device("D1", "Monitor", "working")])
        .await
        .expect("seed");

    service.delete_floor("Floor 1").await.expect("delete");

    assert!(service.list_floors().await.expect("list").is_empty());
    let err = service.locate_device("D1").await.expect_err("gone");
    assert!(matches!(err, HierarchyError::DeviceNotFound));
    let err = service.delete_floor("Floor 1").await.expect_err("again");
    assert!(matches!(err, HierarchyError::FloorNotFound));
}

#[tokio::test]
async fn relocate_moves_exactly_one_device_same_floor() {
    let (service, store) = service();
    // spec 场景：Floor 9 / Left Wing / 101 的 D1 移到同翼 102
    service
        .upsert_floor("Floor 9", "Left Wing", "101", vec![device("D1", "Monitor", "working")])
        .await
        .expect("seed 101");
    service
        .upsert_floor("Floor 9", "Left Wing", "102", vec![])
        .await
        .expect("seed 102");

    service
        .relocate_device("D1", "Floor 9", "Left Wing", "102", "not working")
        .await
        .expect("relocate");

    let floors = store.list_floors().await.expect("list");
    assert_eq!(device_count(&floors), 1);
    let wing = &floors[0].wings[0];
    assert!(wing.rooms[0].devices.is_empty());
    assert_eq!(wing.rooms[1].devices.len(), 1);
    assert_eq!(wing.rooms[1].devices[0].device_barcode, "D1");
    assert_eq!(wing.rooms[1].devices[0].device_status, "not working");
}

#[tokio::test]
async fn relocate_across_floors_conserves_device_count() {
    let (service, store) = service();
    service
        .upsert_floor(
            "Floor 1",
            "East Wing",
            "101",
            vec![device("D1", "Monitor", "working"), device("D2", "Printer", "working")],
        )
        .await
        .expect("seed");
    service
        .upsert_floor("Floor 2", "West Wing", "201", vec![device("D3", "Scanner", "working")])
        .await
        .expect("seed");

    service
        .relocate_device("D1", "Floor 2", "West Wing", "201", "under maintenance")
        .await
        .expect("relocate");

    let floors = store.list_floors().await.expect("list");
    assert_eq!(device_count(&floors), 3);
    assert_eq!(floors[0].wings[0].rooms[0].devices.len(), 1);
    let room_201 = &floors[1].wings[0].rooms[0];
    assert_eq!(room_201.devices.len(), 2);
    assert_eq!(room_201.devices[1].device_barcode, "D1");
    assert_eq!(room_201.devices[1].device_status, "under maintenance");
}

#[tokio::test]
async fn relocate_unknown_barcode_is_device_not_found() {
    let (service, _) = service();
    service
        .upsert_floor("Floor 1", "East Wing", "101", vec![])
        .await
        .expect("seed");

    let err = service
        .relocate_device("D9", "Floor 1", "East Wing", "101", "working")
        .await
        .expect_err("missing device");
    assert!(matches!(err, HierarchyError::DeviceNotFound));
}

#[tokio::test]
async fn relocate_missing_target_leaves_source_untouched() {
    let (service, store) = service();
    service
        .upsert_floor("Floor 1", "East Wing", "101", vec![device("D1", "Monitor", "working")])
        .await
        .expect("seed");

    let err = service
        .relocate_device("D1", "Floor 1", "East Wing", "999", "working")
        .await
        .expect_err("missing room");
    assert!(matches!(err, HierarchyError::TargetRoomNotFound));

    // 源房间没有发生部分移除
    let floor = store
        .find_floor("Floor 1")
        .await
        .expect("find")
        .expect("some");
    assert_eq!(floor.wings[0].rooms[0].devices.len(), 1);
    assert_eq!(floor.wings[0].rooms[0].devices[0].device_status, "working");
}

#[tokio::test]
async fn filter_floors_shapes_and_asymmetry() {
    let (service, _) = service();
    service
        .upsert_floor(
            "Floor 1",
            "East Wing",
            "101",
            vec![
                device("D1", "Monitor", "working"),
                device("D2", "BigMonster", "Working"),
                device("D3", "Keyboard", "not working"),
            ],
        )
        .await
        .expect("seed");

    // 状态为不敏感全等：不会带出 "not working"
    let by_status = service
        .filter_floors(&FloorFilter {
            device_status: Some("working".to_string()),
            ..FloorFilter::default()
        })
        .await
        .expect("filter");
    let devices = &by_status[0].wings[0].rooms[0].devices;
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().all(|d| d.device_status.to_lowercase() == "working"));

    // 名称为不敏感子串："mon" 命中 Monitor 与 BigMonster
    let by_name = service
        .filter_floors(&FloorFilter {
            device_name: Some("mon".to_string()),
            ..FloorFilter::default()
        })
        .await
        .expect("filter");
    let names: Vec<&str> = by_name[0].wings[0].rooms[0]
        .devices
        .iter()
        .map(|d| d.device_name.as_str())
        .collect();
    assert_eq!(names, vec!["Monitor", "BigMonster"]);

    // 楼层名子串不命中时返回空集
    let none = service
        .filter_floors(&FloorFilter {
            floor_name: Some("basement".to_string()),
            ..FloorFilter::default()
        })
        .await
        .expect("filter");
    assert!(none.is_empty());
}

#[tokio::test]
async fn locate_device_returns_flat_record() {
    let (service, _) = service();
    service
        .upsert_floor("Floor 3", "North Wing", "301", vec![device("D7", "Router", "working")])
        .await
        .expect("seed");

    let hit = service.locate_device("D7").await.expect("locate");
    assert_eq!(hit.floor_name, "Floor 3");
    assert_eq!(hit.wing_name, "North Wing");
    assert_eq!(hit.room_name, "301");
    assert_eq!(hit.device.device_name, "Router");
}
