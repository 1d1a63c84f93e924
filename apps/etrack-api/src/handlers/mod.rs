//! Handlers 模块

pub mod admins;
pub mod auth;
pub mod devices;
pub mod floors;
pub mod metrics;
pub mod reports;

pub use admins::*;
pub use auth::*;
pub use devices::*;
pub use floors::*;
pub use metrics::*;
pub use reports::*;
