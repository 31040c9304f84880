//! JWT 令牌服务
//!
//! 签发 access + refresh 令牌对，验证并解析令牌。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// access 令牌默认有效期: 24 小时
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 24 * 60;
/// refresh 令牌默认有效期: 7 天
pub const DEFAULT_REFRESH_TTL_MINUTES: i64 = 7 * 24 * 60;

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (至少 32 字节)
    pub secret: String,
    /// access 令牌有效期 (分钟)
    pub access_ttl_minutes: i64,
    /// refresh 令牌有效期 (分钟)
    pub refresh_ttl_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl JwtConfig {
    /// 从环境变量加载
    ///
    /// `JWT_SECRET` 未设置时: debug 构建生成临时密钥, release 构建返回错误。
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = load_jwt_secret()?;
        Ok(Self {
            secret,
            access_ttl_minutes: std::env::var("JWT_ACCESS_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_TTL_MINUTES),
            issuer: std::env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "restaurant-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "restaurant-clients".to_string()),
        })
    }

    /// 固定密钥配置 (测试用)
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_minutes: DEFAULT_ACCESS_TTL_MINUTES,
            refresh_ttl_minutes: DEFAULT_REFRESH_TTL_MINUTES,
            issuer: "restaurant-server".to_string(),
            audience: "restaurant-clients".to_string(),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户业务 ID (Subject)
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// `access` 或 `refresh`
    pub token_type: String,
    /// 过期时间戳 (秒)
    pub exp: i64,
    /// 签发时间戳 (秒)
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// 令牌主体 (签发令牌所需的用户信息)
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// access + refresh 令牌对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效令牌: {0}")]
    MalformedToken(String),

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("密钥生成失败: {0}")]
    KeyGenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes).map_err(|_| {
        JwtError::KeyGenerationFailed("Failed to generate secure random key".to_string())
    })?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "⚠️  JWT_SECRET not set! Generating secure temporary key for development."
                );
                generate_secure_printable_jwt_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户签发新的令牌对
    pub fn issue_token_pair(&self, subject: &TokenSubject) -> Result<TokenPair, JwtError> {
        let token = self.issue(
            subject,
            TOKEN_TYPE_ACCESS,
            Duration::minutes(self.config.access_ttl_minutes),
        )?;
        let refresh_token = self.issue(
            subject,
            TOKEN_TYPE_REFRESH,
            Duration::minutes(self.config.refresh_ttl_minutes),
        )?;
        Ok(TokenPair {
            token,
            refresh_token,
        })
    }

    fn issue(
        &self,
        subject: &TokenSubject,
        token_type: &str,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.user_id.clone(),
            email: subject.email.clone(),
            first_name: subject.first_name.clone(),
            last_name: subject.last_name.clone(),
            token_type: token_type.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌 (access 或 refresh)
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::MalformedToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 验证 access 令牌, refresh 令牌不能当作 access 令牌使用
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(JwtError::MalformedToken(format!(
                "expected access token, got {}",
                claims.token_type
            )));
        }
        Ok(claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求扩展
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户业务 ID
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-definitely-long-enough-0123456789";

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::with_secret(SECRET))
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: "user123".to_string(),
            email: "a@b.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let service = service();
        let pair = service.issue_token_pair(&subject()).unwrap();

        let claims = service.verify_access_token(&pair.token).unwrap();
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.exp - claims.iat, DEFAULT_ACCESS_TTL_MINUTES * 60);

        let refresh = service.verify_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.token_type, "refresh");
        assert_eq!(refresh.exp - refresh.iat, DEFAULT_REFRESH_TTL_MINUTES * 60);
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let token = service
            .issue(&subject(), TOKEN_TYPE_ACCESS, Duration::minutes(-5))
            .unwrap();
        assert!(matches!(
            service.verify_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_tampered_token() {
        let service = service();
        let pair = service.issue_token_pair(&subject()).unwrap();
        let mut tampered = pair.token.clone();
        // flip the last signature character
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            service.verify_token(&tampered),
            Err(JwtError::MalformedToken(_))
        ));
        assert!(matches!(
            service.verify_token("not.a.jwt"),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = JwtService::with_config(JwtConfig::with_secret(
            "another-secret-that-is-also-long-enough-abcdefgh",
        ));
        let pair = other.issue_token_pair(&subject()).unwrap();
        assert!(matches!(
            service().verify_token(&pair.token),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let service = service();
        let pair = service.issue_token_pair(&subject()).unwrap();
        assert!(matches!(
            service.verify_access_token(&pair.refresh_token),
            Err(JwtError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
    }

    #[test]
    fn test_printable_secret() {
        let a = generate_secure_printable_jwt_secret().unwrap();
        let b = generate_secure_printable_jwt_secret().unwrap();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
