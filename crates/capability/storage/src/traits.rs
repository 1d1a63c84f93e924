//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - FloorStore：楼层聚合文档存储
//! - AdminStore：管理员存储
//! - DeviceStore：设备台账存储
//! - ReportStore：报修单存储
//!
//! 设计原则：
//! - 预期内的缺失返回 Ok(None)/Ok(false)，不抛错
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    AdminRecord, AdminUpdate, DeviceFilter, DeviceRecord, DeviceUpdate, FloorRecord, ReportRecord,
    ReportUpdate,
};
use async_trait::async_trait;
use domain::ReportStatus;

/// 楼层聚合文档存储接口
///
/// 一个楼层一份文档；单文档保存在底层具备文档级原子性。
/// 楼层在存储中保持插入顺序，`list_floors` 的返回顺序即树遍历顺序。
#[async_trait]
pub trait FloorStore: Send + Sync {
    /// 按存储顺序列出全部楼层文档
    async fn list_floors(&self) -> Result<Vec<FloorRecord>, StorageError>;

    /// 按楼层名列出楼层（大小写不敏感子串匹配；None 为全量）
    ///
    /// 仅用于层级过滤查询的第一级，不用于变更路径。
    async fn list_floors_matching(
        &self,
        floor_name: Option<&str>,
    ) -> Result<Vec<FloorRecord>, StorageError>;

    /// 按楼层名精确查找楼层
    async fn find_floor(&self, floor_name: &str) -> Result<Option<FloorRecord>, StorageError>;

    /// 插入新楼层，楼层名已存在时报错
    async fn insert_floor(&self, record: FloorRecord) -> Result<FloorRecord, StorageError>;

    /// 按楼层名整体保存楼层文档（存在则替换，不存在则创建）
    async fn save_floor(&self, record: FloorRecord) -> Result<FloorRecord, StorageError>;

    /// 按旧楼层名整体替换楼层文档（含改名），旧楼层缺失返回 None
    async fn replace_floor(
        &self,
        old_floor_name: &str,
        record: FloorRecord,
    ) -> Result<Option<FloorRecord>, StorageError>;

    /// 删除楼层文档（级联内嵌数据），缺失返回 false
    async fn delete_floor(&self, floor_name: &str) -> Result<bool, StorageError>;

    /// 将多份楼层文档作为一个单元保存
    ///
    /// 跨楼层搬移设备需要同时落两份文档；该方法在 PostgreSQL 实现中
    /// 使用单个事务，在内存实现中使用单个写锁临界区，保证不会出现
    /// 设备两边都不在的中间状态。
    async fn save_floors(&self, records: Vec<FloorRecord>) -> Result<(), StorageError>;
}

/// 管理员存储接口
///
/// 提供管理员 CRUD、登录查询与 refresh token 绑定。
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// 根据用户名（adminName）查找管理员
    async fn find_by_username(&self, username: &str)
    -> Result<Option<AdminRecord>, StorageError>;

    /// 列出所有管理员
    async fn list_admins(&self) -> Result<Vec<AdminRecord>, StorageError>;

    /// 创建管理员，admin_id 已存在时报错
    async fn create_admin(&self, record: AdminRecord) -> Result<AdminRecord, StorageError>;

    /// 更新管理员，缺失返回 None
    async fn update_admin(
        &self,
        admin_id: &str,
        update: AdminUpdate,
    ) -> Result<Option<AdminRecord>, StorageError>;

    /// 删除管理员，缺失返回 false
    async fn delete_admin(&self, admin_id: &str) -> Result<bool, StorageError>;

    /// 更新口令哈希（明文口令升级时使用）
    async fn update_password_hash(
        &self,
        admin_id: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError>;

    /// 绑定/清除 refresh token 的 jti
    async fn set_refresh_jti(
        &self,
        admin_id: &str,
        jti: Option<&str>,
    ) -> Result<bool, StorageError>;

    /// 读取当前绑定的 refresh jti
    async fn get_refresh_jti(&self, admin_id: &str) -> Result<Option<String>, StorageError>;
}

/// 设备台账存储接口
///
/// 平面库存表，按 device_barcode 定位；条码在台账内由主键保证唯一。
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// 列出所有台账设备
    async fn list_devices(&self) -> Result<Vec<DeviceRecord>, StorageError>;

    /// 按条码查找设备
    async fn find_device(&self, device_barcode: &str)
    -> Result<Option<DeviceRecord>, StorageError>;

    /// 创建设备，条码已存在时报错
    async fn create_device(&self, record: DeviceRecord) -> Result<DeviceRecord, StorageError>;

    /// 按条码更新设备，缺失返回 None
    async fn update_device(
        &self,
        device_barcode: &str,
        update: DeviceUpdate,
    ) -> Result<Option<DeviceRecord>, StorageError>;

    /// 按名称/状态过滤设备
    async fn filter_devices(
        &self,
        filter: &DeviceFilter,
    ) -> Result<Vec<DeviceRecord>, StorageError>;
}

/// 报修单存储接口
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// 列出所有报修单
    async fn list_reports(&self) -> Result<Vec<ReportRecord>, StorageError>;

    /// 按 ID 查找报修单
    async fn find_report(&self, report_id: &str) -> Result<Option<ReportRecord>, StorageError>;

    /// 创建报修单
    async fn create_report(&self, record: ReportRecord) -> Result<ReportRecord, StorageError>;

    /// 更新报修单，缺失返回 None
    async fn update_report(
        &self,
        report_id: &str,
        update: ReportUpdate,
    ) -> Result<Option<ReportRecord>, StorageError>;

    /// 设置报修单生命周期状态（确认/解决），缺失返回 None
    async fn set_report_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<Option<ReportRecord>, StorageError>;

    /// 删除报修单，缺失返回 false
    async fn delete_report(&self, report_id: &str) -> Result<bool, StorageError>;
}
