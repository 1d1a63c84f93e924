//! # E-Track Storage 模块
//!
//! 本模块提供统一的数据存储抽象层，支持多种存储后端实现。
//!
//! ## 架构设计
//!
//! 该模块采用分层架构，遵循以下原则：
//!
//! 1. **接口抽象层** (`traits.rs`)：定义所有资源存储的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：定义存储相关的数据结构
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 模块说明
//!
//! - [`models`]：数据模型定义（楼层聚合树、管理员、设备台账、报修单）
//! - [`traits`]：存储接口定义（CRUD 操作 + 多文档保存）
//! - [`error`]：存储错误类型定义
//! - [`connection`]：PostgreSQL 连接池管理
//!
//! ### 存储实现
//!
//! - [`in_memory`]：内存存储实现
//!   - 使用 `RwLock` 提供线程安全的内存存储
//!   - 楼层用 Vec 保持插入顺序（树遍历顺序）
//!   - 内置默认 admin 账户
//!
//! - [`postgres`]：PostgreSQL 存储实现
//!   - 使用 sqlx 提供参数化的数据库访问
//!   - 楼层聚合树以 JSONB 整棵存储，一行一个楼层文档
//!   - 跨楼层多文档保存走同一个事务
//!
//! ## 楼层文档模型
//!
//! 楼层（Floor）是聚合根：一个楼层一份文档，侧翼（Wing）、房间（Room）、
//! 设备（Device）全部内嵌，归属纯靠嵌套结构表达，没有独立身份或反向
//! 引用。`floor_name` 是唯一的对外标识；楼层文档的保存始终是整棵树的
//! 整体替换。
//!
//! ## 设计约束
//!
//! - **禁止直接 SQL**：Handler 层禁止直接写 SQL，统一通过 storage 层
//! - **预期缺失不抛错**：查不到返回 Ok(None)/Ok(false)，错误保留给
//!   真正的存储故障

// 模块导出：将子模块的内容导出到 crate 根目录
pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;

// 导出常用类型到 crate 根目录，方便外部引用
pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;

// 导出内存存储实现类型
pub use in_memory::{
    InMemoryAdminStore, InMemoryDeviceStore, InMemoryFloorStore, InMemoryReportStore,
};

// 导出 PostgreSQL 存储实现类型
pub use postgres::{PgAdminStore, PgDeviceStore, PgFloorStore, PgReportStore};
