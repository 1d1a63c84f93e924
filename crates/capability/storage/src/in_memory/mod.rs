//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - FloorStore: InMemoryFloorStore
//! - AdminStore: InMemoryAdminStore
//! - DeviceStore: InMemoryDeviceStore
//! - ReportStore: InMemoryReportStore

pub mod admin;
pub mod device;
pub mod floor;
pub mod report;

pub use admin::*;
pub use device::*;
pub use floor::*;
pub use report::*;
