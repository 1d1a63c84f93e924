use domain::ReportStatus;
use etrack_storage::{
    AdminRecord, AdminStore, AdminUpdate, DeviceFilter, DeviceRecord, DeviceStore,
    DeviceUpdate, InMemoryAdminStore, InMemoryDeviceStore, InMemoryReportStore, ReportRecord,
    ReportStore, ReportUpdate,
};

fn admin(id: &str, name: &str) -> AdminRecord {
    AdminRecord {
        admin_id: id.to_string(),
        name: name.to_string(),
        email: format!("{name}@etrack.local"),
        password: "$argon2id$fake".to_string(),
        image: None,
        role: "admin".to_string(),
        refresh_jti: None,
    }
}

fn device(barcode: &str, name: &str, status: &str) -> DeviceRecord {
    DeviceRecord {
        device_barcode: barcode.to_string(),
        device_name: name.to_string(),
        device_model: "M1".to_string(),
        device_price: 50.0,
        device_status: status.to_string(),
        device_location: "Floor 1 / 101".to_string(),
    }
}

fn report(id: &str, barcode: &str) -> ReportRecord {
    ReportRecord {
        report_id: id.to_string(),
        device_barcode: barcode.to_string(),
        device_name: "Projector".to_string(),
        device_status: "not working".to_string(),
        status: ReportStatus::New,
        created_at_ms: 1_700_000_000_000,
    }
}

#[tokio::test]
async fn admin_in_memory_crud() {
    let store = InMemoryAdminStore::new();
    let created = store.create_admin(admin("a1", "alice")).await.expect("create");
    assert_eq!(created.admin_id, "a1");

    assert!(store.create_admin(admin("a1", "bob")).await.is_err());

    let found = store.find_by_username("alice").await.expect("find");
    assert!(found.is_some());

    let updated = store
        .update_admin(
            "a1",
            AdminUpdate {
                name: None,
                email: Some("new@etrack.local".to_string()),
                password_hash: None,
                image: Some("avatars/a1.png".to_string()),
                role: None,
            },
        )
        .await
        .expect("update")
        .expect("some");
    assert_eq!(updated.email, "new@etrack.local");
    assert_eq!(updated.image.as_deref(), Some("avatars/a1.png"));

    assert!(store.delete_admin("a1").await.expect("delete"));
    assert!(!store.delete_admin("a1").await.expect("delete"));
}

#[tokio::test]
async fn admin_refresh_jti_binding() {
    let store = InMemoryAdminStore::with_default_admin();
    let admin = store
        .find_by_username("admin")
        .await
        .expect("find")
        .expect("some");

    assert!(store
        .set_refresh_jti(&admin.admin_id, Some("jti-1"))
        .await
        .expect("set"));
    assert_eq!(
        store.get_refresh_jti(&admin.admin_id).await.expect("get"),
        Some("jti-1".to_string())
    );

    assert!(store
        .set_refresh_jti(&admin.admin_id, None)
        .await
        .expect("clear"));
    assert_eq!(store.get_refresh_jti(&admin.admin_id).await.expect("get"), None);
}

#[tokio::test]
async fn device_in_memory_crud() {
    let store = InMemoryDeviceStore::new();
    store
        .create_device(device("D1", "Monitor", "working"))
        .await
        .expect("create");
    assert!(store.create_device(device("D1", "Other", "working")).await.is_err());

    let got = store.find_device("D1").await.expect("find").expect("some");
    assert_eq!(got.device_name, "Monitor");

    let updated = store
        .update_device(
            "D1",
            DeviceUpdate {
                device_name: None,
                device_model: None,
                device_price: Some(75.0),
                device_status: Some("maintenance".to_string()),
                device_location: None,
            },
        )
        .await
        .expect("update")
        .expect("some");
    assert_eq!(updated.device_price, 75.0);
    assert_eq!(updated.device_status, "maintenance");
}

#[tokio::test]
async fn device_filter_name_substring_status_exact() {
    let store = InMemoryDeviceStore::new();
    store
        .create_device(device("D1", "Monitor", "working"))
        .await
        .expect("create");
    store
        .create_device(device("D2", "BigMonster", "Working"))
        .await
        .expect("create");
    store
        .create_device(device("D3", "Keyboard", "not working"))
        .await
        .expect("create");

    let hits = store
        .filter_devices(&DeviceFilter {
            device_name: Some("mon".to_string()),
            device_status: Some("WORKING".to_string()),
        })
        .await
        .expect("filter");
    let mut barcodes: Vec<String> = hits.into_iter().map(|d| d.device_barcode).collect();
    barcodes.sort();
    assert_eq!(barcodes, vec!["D1", "D2"]);
}

#[tokio::test]
async fn report_in_memory_lifecycle() {
    let store = InMemoryReportStore::new();
    store.create_report(report("r1", "D1")).await.expect("create");

    let confirmed = store
        .set_report_status("r1", ReportStatus::Confirmed)
        .await
        .expect("confirm")
        .expect("some");
    assert_eq!(confirmed.status, ReportStatus::Confirmed);

    let updated = store
        .update_report(
            "r1",
            ReportUpdate {
                device_barcode: None,
                device_name: None,
                device_status: Some("working".to_string()),
                status: Some(ReportStatus::Resolved),
            },
        )
        .await
        .expect("update")
        .expect("some");
    assert_eq!(updated.status, ReportStatus::Resolved);
    assert_eq!(updated.device_status, "working");

    assert!(store.delete_report("r1").await.expect("delete"));
    assert!(store.list_reports().await.expect("list").is_empty());
    assert!(store
        .set_report_status("r1", ReportStatus::Confirmed)
        .await
        .expect("confirm")
        .is_none());
}
