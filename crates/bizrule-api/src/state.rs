use bizrule_middleware::JwtAuth;
use bizrule_rule::BusinessRuleRegistry;
use std::sync::Arc;

/// API 应用状态
#[derive(Clone)]
pub struct AppState {
    /// 规则注册表
    pub registry: Arc<BusinessRuleRegistry>,
    /// JWT 认证
    pub jwt_auth: Arc<JwtAuth>,
    /// 挂载路径，用于生成规则链接
    pub mount_path: String,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        registry: Arc<BusinessRuleRegistry>,
        jwt_auth: Arc<JwtAuth>,
        mount_path: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            jwt_auth,
            mount_path: mount_path.into(),
        }
    }
}
