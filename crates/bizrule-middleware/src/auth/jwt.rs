use anyhow::{ensure, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 拥有后台权限的角色
pub const STAFF_ROLES: [&str; 2] = ["staff", "admin"];

/// JWT 认证管理器
pub struct JwtAuth {
    secret: Arc<String>,
    expiration: Duration,
}

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // 用户 ID
    pub roles: Vec<String>,    // 用户角色
    pub exp: i64,              // 过期时间
    pub iat: i64,              // 签发时间
    pub jti: String,           // JWT ID
}

impl Claims {
    /// 是否为后台人员
    pub fn is_staff(&self) -> bool {
        self.roles
            .iter()
            .any(|role| STAFF_ROLES.contains(&role.as_str()))
    }
}

impl JwtAuth {
    /// 创建新的 JWT 认证管理器
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret: Arc::new(secret),
            expiration: Duration::hours(expiration_hours),
        }
    }

    /// 生成 JWT Token
    pub fn generate_token(&self, user_id: &str, roles: Vec<String>) -> Result<String> {
        ensure!(!user_id.trim().is_empty(), "token subject must not be empty");

        let now = Utc::now();
        let exp = (now + self.expiration).timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            roles,
            exp,
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// 验证 JWT Token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// 检查 Token 是否过期
    pub fn is_expired(&self, claims: &Claims) -> bool {
        let now = Utc::now().timestamp();
        claims.exp < now
    }
}
