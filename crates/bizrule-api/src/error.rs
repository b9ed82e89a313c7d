use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bizrule_rule::RuleError;
use serde_json::json;
use std::fmt;
use tracing::error;

/// API 错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 规则未找到
    RuleNotFound(String),
    /// 规则名称冲突
    RuleAlreadyExists(String),
    /// 验证错误
    ValidationError(String),
    /// 数据库错误
    DatabaseError(String),
    /// 内部错误
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RuleNotFound(id) => write!(f, "Business rule not found: {}", id),
            ApiError::RuleAlreadyExists(name) => {
                write!(f, "Business rule with this name already exists: {}", name)
            }
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::RuleNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RuleAlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                error!(error = %self, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

// 从 bizrule_rule::RuleError 转换
impl From<RuleError> for ApiError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::NotFound(id) => ApiError::RuleNotFound(id.to_string()),
            RuleError::AlreadyExists(name) => ApiError::RuleAlreadyExists(name),
            RuleError::ValidationError(msg) => ApiError::ValidationError(msg),
            RuleError::DatabaseError(err) => ApiError::DatabaseError(err.to_string()),
            RuleError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
