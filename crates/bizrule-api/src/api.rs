use crate::{handlers, state::AppState};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use bizrule_middleware::{jwt_middleware, require_staff};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 创建 API 路由（路径相对于挂载点，由服务端嵌套到 `mount_path` 下）
pub fn create_router(state: AppState) -> Router {
    // 业务规则 API（仅限后台人员）
    let rules = Router::new()
        .route(
            "/business-rule/",
            get(handlers::list_rules).post(handlers::create_rule),
        )
        .route(
            "/business-rule/:rule_id/",
            get(handlers::get_rule)
                .post(handlers::save_rule)
                .delete(handlers::delete_rule),
        )
        .route_layer(from_fn(require_staff))
        .route_layer(from_fn_with_state(state.jwt_auth.clone(), jwt_middleware));

    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        .merge(rules)
        // 添加中间件
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查
async fn health_check() -> &'static str {
    "OK"
}
