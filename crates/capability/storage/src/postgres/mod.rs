//! # PostgreSQL 存储实现模块
//!
//! 本模块提供所有存储接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有 SQL 查询使用参数绑定，防止 SQL 注入攻击
//! 2. **文档模型保留**：楼层聚合树整棵存入 `wings` JSONB 列，一行一个
//!    楼层文档，单行写入保持文档级原子性
//! 3. **多文档事务**：跨楼层搬移设备的两份文档在同一个事务内落库
//! 4. **连接池管理**：使用连接池复用数据库连接
//!
//! ## 包含的实现
//!
//! - **FloorStore** (`floor.rs`)：楼层聚合文档存储
//! - **AdminStore** (`admin.rs`)：管理员存储，支持登录查询与 jti 绑定
//! - **DeviceStore** (`device.rs`)：设备台账存储
//! - **ReportStore** (`report.rs`)：报修单存储
//!
//! ## 数据库模式要求
//!
//! 本模块依赖以下数据库表：
//!
//! - `floors`：楼层文档表（seq bigserial, floor_name text 唯一, wings jsonb）
//!   `seq` 保留插入顺序，`list_floors` 按其排序即树遍历顺序
//! - `admins`：管理员表（admin_id, name, email, password, image, role, refresh_jti）
//! - `devices`：设备台账表（device_barcode 主键, device_name, device_model,
//!   device_price, device_status, device_location）
//! - `reports`：报修单表（report_id, device_barcode, device_name,
//!   device_status, status, created_at_ms）

pub mod admin;
pub mod device;
pub mod floor;
pub mod report;

pub use admin::*;
pub use device::*;
pub use floor::*;
pub use report::*;
