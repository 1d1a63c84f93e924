use std::sync::Arc;

use etrack_auth::{AuthError, AuthService, JwtManager};
use etrack_storage::{AdminStore, InMemoryAdminStore};

#[tokio::test]
async fn refresh_token_is_single_use_after_rotation() {
    let admin_store: Arc<InMemoryAdminStore> = Arc::new(InMemoryAdminStore::with_default_admin());
    let jwt = JwtManager::new("secret".to_string(), 3600, 7200);
    let auth = AuthService::new(admin_store, jwt);

    let (_, tokens1) = auth.login("admin", "admin123").await.expect("login");
    let tokens2 = auth
        .refresh(&tokens1.refresh_token)
        .await
        .expect("refresh");
    assert_ne!(tokens1.refresh_token, tokens2.refresh_token);

    let result = auth.refresh(&tokens1.refresh_token).await;
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
}

#[tokio::test]
async fn login_upgrades_legacy_plaintext_password() {
    let admin_store: Arc<InMemoryAdminStore> = Arc::new(InMemoryAdminStore::with_default_admin());
    let jwt = JwtManager::new("secret".to_string(), 3600, 7200);
    let auth = AuthService::new(admin_store.clone(), jwt);

    let (admin, _) = auth.login("admin", "admin123").await.expect("login");
    let stored = admin_store
        .find_by_username(&admin.name)
        .await
        .expect("find")
        .expect("some");
    assert!(stored.password.starts_with("$argon2"));

    // 升级后旧口令仍然可登录
    auth.login("admin", "admin123").await.expect("second login");
    let result = auth.login("admin", "wrong").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}
