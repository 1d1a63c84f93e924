//! E-Track 设施资产跟踪后端入口。
//!
//! 组装运行配置、存储后端、认证与楼层层级服务，挂载全部 HTTP 路由。
//! 路由同时暴露在 `/` 与 `/api/` 两个前缀下，兼容既有前端与扫码端。

mod handlers;
mod middleware;
mod routes;
mod utils;

use etrack_auth::{AuthService, JwtManager};
use etrack_config::{AppConfig, StorageBackend};
use etrack_hierarchy::HierarchyService;
use etrack_notify::Notifier;
use etrack_storage::{
    AdminStore, DeviceStore, FloorStore, InMemoryAdminStore, InMemoryDeviceStore,
    InMemoryFloorStore, InMemoryReportStore, PgAdminStore, PgDeviceStore, PgFloorStore,
    PgReportStore, ReportStore, connect_pool,
};
use etrack_telemetry::init_tracing;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 应用共享状态。
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub db_pool: Option<sqlx::PgPool>,
    pub admin_store: Arc<dyn AdminStore>,
    pub device_store: Arc<dyn DeviceStore>,
    pub report_store: Arc<dyn ReportStore>,
    pub hierarchy: Arc<HierarchyService>,
    pub notifier: Notifier,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let (db_pool, admin_store, device_store, report_store, floor_store): (
        Option<sqlx::PgPool>,
        Arc<dyn AdminStore>,
        Arc<dyn DeviceStore>,
        Arc<dyn ReportStore>,
        Arc<dyn FloorStore>,
    ) = match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("storage backend: in-memory");
            (
                None,
                Arc::new(InMemoryAdminStore::with_default_admin()),
                Arc::new(InMemoryDeviceStore::new()),
                Arc::new(InMemoryReportStore::new()),
                Arc::new(InMemoryFloorStore::new()),
            )
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("ETRACK_DATABASE_URL not set")?;
            let pool = connect_pool(database_url).await?;
            tracing::info!("storage backend: postgres");
            (
                Some(pool.clone()),
                Arc::new(PgAdminStore::new(pool.clone())),
                Arc::new(PgDeviceStore::new(pool.clone())),
                Arc::new(PgReportStore::new(pool.clone())),
                Arc::new(PgFloorStore::new(pool)),
            )
        }
    };

    let jwt = JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_access_ttl_seconds,
        config.jwt_refresh_ttl_seconds,
    );
    let auth = Arc::new(AuthService::new(admin_store.clone(), jwt));
    let hierarchy = Arc::new(HierarchyService::new(floor_store));
    let notifier = Notifier::default();

    // 报修事件落日志的默认订阅方
    spawn_notice_logger(&notifier);

    let state = AppState {
        auth,
        db_pool,
        admin_store,
        device_store,
        report_store,
        hierarchy,
        notifier,
    };

    let api = routes::create_api_router();
    let app = axum::Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http());

    tracing::info!(addr = %config.http_addr, "etrack-api listening");
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod test_support {
    //! handler 测试共用的内存版应用状态。

    use super::AppState;
    use axum::http::{HeaderMap, HeaderValue, header};
    use etrack_auth::{AuthService, JwtManager};
    use etrack_hierarchy::HierarchyService;
    use etrack_notify::Notifier;
    use etrack_storage::{
        InMemoryAdminStore, InMemoryDeviceStore, InMemoryFloorStore, InMemoryReportStore,
    };
    use std::sync::Arc;

    pub fn test_state() -> AppState {
        let admin_store = Arc::new(InMemoryAdminStore::with_default_admin());
        let jwt = JwtManager::new("secret".to_string(), 3600, 7200);
        let auth = Arc::new(AuthService::new(admin_store.clone(), jwt));
        AppState {
            auth,
            db_pool: None,
            admin_store,
            device_store: Arc::new(InMemoryDeviceStore::new()),
            report_store: Arc::new(InMemoryReportStore::new()),
            hierarchy: Arc::new(HierarchyService::new(Arc::new(InMemoryFloorStore::new()))),
            notifier: Notifier::default(),
        }
    }

    /// 以默认管理员登录并构造带 Bearer token 的请求头。
    pub async fn admin_headers(state: &AppState) -> HeaderMap {
        let (_, tokens) = state.auth.login("admin", "admin123").await.expect("login");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", tokens.access_token)).expect("header"),
        );
        headers
    }
}

/// 消费报修通知并写日志。接收端掉队时跳过丢失的事件继续消费。
fn spawn_notice_logger(notifier: &Notifier) {
    let mut rx = notifier.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notice) => {
                    tracing::info!(
                        event = ?notice.event,
                        report_id = %notice.report_id,
                        barcode = %notice.device_barcode,
                        "report notice"
                    );
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "report notice subscriber lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
