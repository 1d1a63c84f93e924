//! 追踪与请求 ID 生成。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub floors_created: u64,
    pub floors_deleted: u64,
    pub devices_relocated: u64,
    pub relocation_failures: u64,
    pub barcode_lookups: u64,
    pub reports_created: u64,
    pub reports_confirmed: u64,
    pub report_alerts_emitted: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    floors_created: AtomicU64,
    floors_deleted: AtomicU64,
    devices_relocated: AtomicU64,
    relocation_failures: AtomicU64,
    barcode_lookups: AtomicU64,
    reports_created: AtomicU64,
    reports_confirmed: AtomicU64,
    report_alerts_emitted: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            floors_created: AtomicU64::new(0),
            floors_deleted: AtomicU64::new(0),
            devices_relocated: AtomicU64::new(0),
            relocation_failures: AtomicU64::new(0),
            barcode_lookups: AtomicU64::new(0),
            reports_created: AtomicU64::new(0),
            reports_confirmed: AtomicU64::new(0),
            report_alerts_emitted: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            floors_created: self.floors_created.load(Ordering::Relaxed),
            floors_deleted: self.floors_deleted.load(Ordering::Relaxed),
            devices_relocated: self.devices_relocated.load(Ordering::Relaxed),
            relocation_failures: self.relocation_failures.load(Ordering::Relaxed),
            barcode_lookups: self.barcode_lookups.load(Ordering::Relaxed),
            reports_created: self.reports_created.load(Ordering::Relaxed),
            reports_confirmed: self.reports_confirmed.load(Ordering::Relaxed),
            report_alerts_emitted: self.report_alerts_emitted.load(Ordering::Relaxed),
        }
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录楼层创建次数（含动态建层）。
pub fn record_floor_created() {
    metrics().floors_created.fetch_add(1, Ordering::Relaxed);
}

/// 记录楼层删除次数。
pub fn record_floor_deleted() {
    metrics().floors_deleted.fetch_add(1, Ordering::Relaxed);
}

/// 记录设备搬移成功次数。
pub fn record_device_relocated() {
    metrics().devices_relocated.fetch_add(1, Ordering::Relaxed);
}

/// 记录设备搬移失败次数（源或目标缺失）。
pub fn record_relocation_failure() {
    metrics()
        .relocation_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录条码定位查询次数。
pub fn record_barcode_lookup() {
    metrics().barcode_lookups.fetch_add(1, Ordering::Relaxed);
}

/// 记录报修单创建次数。
pub fn record_report_created() {
    metrics().reports_created.fetch_add(1, Ordering::Relaxed);
}

/// 记录报修单确认次数。
pub fn record_report_confirmed() {
    metrics().reports_confirmed.fetch_add(1, Ordering::Relaxed);
}

/// 记录报修通知事件发布次数。
pub fn record_report_alert_emitted() {
    metrics()
        .report_alerts_emitted
        .fetch_add(1, Ordering::Relaxed);
}
