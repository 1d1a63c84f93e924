use crate::AuthError;
use argon2::{
    Argon2,
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    password_hash::SaltString,
};
use rand_core::OsRng;
use subtle::ConstantTimeEq;

pub struct PasswordCheck {
    pub verified: bool,
    pub upgrade_hash: Option<String>,
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AuthError::Internal(err.to_string()))?;
    Ok(hash.to_string())
}

/// 校验口令；存量明文口令校验通过后产出升级哈希。
///
/// 历史数据里管理员口令是明文存储的，首次登录成功即换成 argon2
/// 哈希。明文比较走常数时间。
pub fn verify_password_and_maybe_upgrade(
    stored_password: &str,
    password: &str,
) -> Result<PasswordCheck, AuthError> {
    if stored_password.starts_with("$argon2") {
        let parsed = PasswordHash::new(stored_password)
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        let argon2 = Argon2::default();
        let verified = argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        return Ok(PasswordCheck {
            verified,
            upgrade_hash: None,
        });
    }

    let verified: bool = stored_password.as_bytes().ct_eq(password.as_bytes()).into();
    if !verified {
        return Ok(PasswordCheck {
            verified: false,
            upgrade_hash: None,
        });
    }

    let new_hash = hash_password(password)?;
    Ok(PasswordCheck {
        verified: true,
        upgrade_hash: Some(new_hash),
    })
}
