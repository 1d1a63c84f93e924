use etrack_config::{AppConfig, StorageBackend};

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("ETRACK_JWT_SECRET", "secret");
        std::env::set_var("ETRACK_HTTP_ADDR", "127.0.0.1:8081");
        std::env::set_var("ETRACK_STORAGE", "memory");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert_eq!(config.storage_backend, StorageBackend::Memory);
    // TTL 未设置时取默认值
    assert_eq!(config.jwt_access_ttl_seconds, 900);
    assert_eq!(config.jwt_refresh_ttl_seconds, 604_800);
}
