use api_contract::{
    LoginResponse, RefreshTokenRequest, RelocateDeviceRequest, UpsertFloorRequest,
};
use serde_json::Value;

#[test]
fn login_response_is_camel_case() {
    let response = LoginResponse {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires: 1_700_000_000,
        username: "admin".to_string(),
        role: "admin".to_string(),
        image: None,
    };
    let value = serde_json::to_value(response).expect("serialize");
    assert!(value.get("accessToken").is_some());
    assert!(value.get("refreshToken").is_some());
    assert!(value.get("expires").is_some());
    assert!(value.get("access_token").is_none());
    assert!(value.get("refresh_token").is_none());
}

#[test]
fn refresh_token_request_accepts_camel_case() {
    let payload = r#"{"refreshToken":"token-1"}"#;
    let req: RefreshTokenRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.refresh_token, "token-1");
}

#[test]
fn refresh_token_request_accepts_snake_case() {
    let payload = r#"{"refresh_token":"token-2"}"#;
    let req: RefreshTokenRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.refresh_token, "token-2");
}

#[test]
fn upsert_floor_request_devices_default_to_empty() {
    let payload = r#"{"floorName":"Floor 1","wingName":"East Wing","roomName":"101"}"#;
    let req: UpsertFloorRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.floor_name, "Floor 1");
    assert!(req.devices.is_empty());
}

#[test]
fn relocate_request_parses_full_path() {
    let payload = r#"{
        "deviceBarcode": "D1",
        "newFloorName": "Floor 9",
        "newWingName": "Left Wing",
        "newRoomName": "102",
        "newStatus": "not working"
    }"#;
    let req: RelocateDeviceRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.device_barcode, "D1");
    assert_eq!(req.new_room_name, "102");
    assert_eq!(req.new_status, "not working");
}

#[test]
fn expires_is_number() {
    let response = LoginResponse {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires: 1_700_000_000,
        username: "admin".to_string(),
        role: "admin".to_string(),
        image: None,
    };
    let value = serde_json::to_value(response).expect("serialize");
    let expires = value.get("expires").expect("expires");
    assert!(matches!(expires, Value::Number(_)));
}
