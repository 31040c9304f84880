//! 密码哈希
//!
//! Argon2id, 固定工作参数 (19 MiB / t=2 / p=1)。

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use thiserror::Error;

/// 登录失败时的统一提示 (不区分账号不存在与密码错误)
pub const INCORRECT_CREDENTIALS: &str = "login or password is incorrect";

const MEMORY_KIB: u32 = 19 * 1024;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None)
        .map_err(|e| PasswordError::Params(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 生成密码的 PHC 哈希串 (随机盐)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// 校验密码
///
/// 匹配返回 `(true, "")`; 不匹配或哈希串无法解析返回
/// `(false, "login or password is incorrect")`。
pub fn verify_password(candidate: &str, stored_hash: &str) -> (bool, &'static str) {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return (false, INCORRECT_CREDENTIALS);
    };

    // 参数取自哈希串本身
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => (true, ""),
        Err(_) => (false, INCORRECT_CREDENTIALS),
    }
}
