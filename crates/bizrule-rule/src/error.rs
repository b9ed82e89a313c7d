use thiserror::Error;

/// 业务规则错误类型
#[derive(Error, Debug)]
pub enum RuleError {
    /// 规则未找到（或已被软删除）
    #[error("Business rule not found: {0}")]
    NotFound(i32),

    /// 规则名称已被占用
    #[error("Business rule already exists: {0}")]
    AlreadyExists(String),

    /// 表单校验错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 数据库错误
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// 业务规则结果类型
pub type Result<T> = std::result::Result<T, RuleError>;

impl RuleError {
    /// 创建校验错误
    pub fn validation(msg: impl Into<String>) -> Self {
        RuleError::ValidationError(msg.into())
    }

    /// 创建内部错误
    pub fn internal(msg: impl Into<String>) -> Self {
        RuleError::InternalError(msg.into())
    }

    /// 转换写入错误：名称唯一约束冲突映射为 `AlreadyExists`
    pub(crate) fn from_write(err: sea_orm::DbErr, name: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                RuleError::AlreadyExists(name.to_string())
            }
            _ => RuleError::DatabaseError(err),
        }
    }
}
