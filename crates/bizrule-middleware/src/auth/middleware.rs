use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use super::{Claims, JwtAuth};

/// JWT 认证中间件
pub async fn jwt_middleware(
    State(jwt_auth): State<Arc<JwtAuth>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 从 Authorization header 提取 token
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!(path = %req.uri().path(), "Missing bearer token");
            StatusCode::UNAUTHORIZED
        })?;

    // 检查 Bearer 前缀
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 验证 token
    let claims = jwt_auth.verify_token(token).map_err(|e| {
        warn!(error = %e, "Rejected bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    // 检查是否过期
    if jwt_auth.is_expired(&claims) {
        warn!(sub = %claims.sub, "Expired bearer token");
        return Err(StatusCode::UNAUTHORIZED);
    }

    // 将 claims 注入到 request extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// 后台人员检查中间件
///
/// Must run after [`jwt_middleware`]; a request without claims is treated as
/// unauthenticated.
pub async fn require_staff(req: Request, next: Next) -> Result<Response, StatusCode> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !claims.is_staff() {
        warn!(sub = %claims.sub, roles = ?claims.roles, "Non-staff caller refused");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::Request as HttpRequest,
        middleware::{from_fn, from_fn_with_state},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn gated_app(jwt_auth: Arc<JwtAuth>) -> Router {
        Router::new()
            .route("/test", get(|| async { "ok" }))
            .route_layer(from_fn(require_staff))
            .route_layer(from_fn_with_state(jwt_auth, jwt_middleware))
    }

    async fn status_for(app: Router, auth_header: Option<String>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/test");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_jwt_middleware_no_header() {
        let jwt_auth = Arc::new(JwtAuth::new("test-secret".to_string(), 1));

        let status = status_for(gated_app(jwt_auth), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_jwt_middleware_wrong_scheme() {
        let jwt_auth = Arc::new(JwtAuth::new("test-secret".to_string(), 1));
        let token = jwt_auth.generate_token("alice", vec!["staff".to_string()]).unwrap();

        let status = status_for(gated_app(jwt_auth), Some(format!("Token {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_staff_forbidden() {
        let jwt_auth = Arc::new(JwtAuth::new("test-secret".to_string(), 1));
        let token = jwt_auth.generate_token("bob", vec!["viewer".to_string()]).unwrap();

        let status = status_for(gated_app(jwt_auth), Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_staff_allowed() {
        let jwt_auth = Arc::new(JwtAuth::new("test-secret".to_string(), 1));
        let token = jwt_auth.generate_token("alice", vec!["staff".to_string()]).unwrap();

        let status = status_for(gated_app(jwt_auth), Some(format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_require_staff_without_claims() {
        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .route_layer(from_fn(require_staff));

        let status = status_for(app, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
