//! 管理员内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 内置 admin 账户（用户名：admin，密码：admin123）
//! - 管理员 CRUD、登录查询与 refresh jti 绑定

use crate::error::StorageError;
use crate::models::{AdminRecord, AdminUpdate};
use crate::traits::AdminStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// 管理员内存存储
///
/// 使用 RwLock + HashMap（按 admin_id 建键）提供线程安全的内存存储。
pub struct InMemoryAdminStore {
    admins: RwLock<HashMap<String, AdminRecord>>,
}

impl InMemoryAdminStore {
    /// 创建空的管理员存储
    pub fn new() -> Self {
        Self {
            admins: RwLock::new(HashMap::new()),
        }
    }

    /// 内置 admin 账户
    ///
    /// 密码以明文落库，首次登录成功后由认证层升级为 argon2 哈希。
    pub fn with_default_admin() -> Self {
        let mut admins = HashMap::new();
        admins.insert(
            "admin-1".to_string(),
            AdminRecord {
                admin_id: "admin-1".to_string(),
                name: "admin".to_string(),
                email: "admin@etrack.local".to_string(),
                password: "admin123".to_string(),
                image: None,
                role: "superadmin".to_string(),
                refresh_jti: None,
            },
        );
        Self {
            admins: RwLock::new(admins),
        }
    }
}

impl Default for InMemoryAdminStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AdminStore for InMemoryAdminStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let item = self.admins.read().ok().and_then(|map| {
            map.values()
                .find(|admin| admin.name == username)
                .cloned()
        });
        Ok(item)
    }

    async fn list_admins(&self) -> Result<Vec<AdminRecord>, StorageError> {
        let items = self
            .admins
            .read()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        Ok(items)
    }

    async fn create_admin(&self, record: AdminRecord) -> Result<AdminRecord, StorageError> {
        let mut map = self
            .admins
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        if map.contains_key(&record.admin_id) {
            return Err(StorageError::new("admin exists"));
        }
        map.insert(record.admin_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_admin(
        &self,
        admin_id: &str,
        update: AdminUpdate,
    ) -> Result<Option<AdminRecord>, StorageError> {
        let mut map = self
            .admins
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let admin = match map.get_mut(admin_id) {
            Some(admin) => admin,
            None => return Ok(None),
        };
        if let Some(name) = update.name {
            admin.name = name;
        }
        if let Some(email) = update.email {
            admin.email = email;
        }
        if let Some(password_hash) = update.password_hash {
            admin.password = password_hash;
        }
        if let Some(image) = update.image {
            admin.image = Some(image);
        }
        if let Some(role) = update.role {
            admin.role = role;
        }
        Ok(Some(admin.clone()))
    }

    async fn delete_admin(&self, admin_id: &str) -> Result<bool, StorageError> {
        let mut map = self
            .admins
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.remove(admin_id).is_some())
    }

    async fn update_password_hash(
        &self,
        admin_id: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let mut map = self
            .admins
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get_mut(admin_id) {
            Some(admin) => {
                admin.password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_refresh_jti(
        &self,
        admin_id: &str,
        jti: Option<&str>,
    ) -> Result<bool, StorageError> {
        let mut map = self
            .admins
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match map.get_mut(admin_id) {
            Some(admin) => {
                admin.refresh_jti = jti.map(|value| value.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_refresh_jti(&self, admin_id: &str) -> Result<Option<String>, StorageError> {
        let item = self
            .admins
            .read()
            .ok()
            .and_then(|map| map.get(admin_id).and_then(|admin| admin.refresh_jti.clone()));
        Ok(item)
    }
}
