// 导出配置模块供测试使用
pub mod config;

use anyhow::Result;
use axum::Router;
use bizrule_api::{create_router, AppState};
use bizrule_middleware::{JwtAuth, STAFF_ROLES};
use bizrule_rule::{setup_schema, BusinessRuleRegistry};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// 重新导出配置类型
pub use config::AppConfig;

/// 初始化日志；`RUST_LOG` 优先于配置中的级别
pub fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 连接数据库，并按配置创建表结构
pub async fn connect_database(config: &AppConfig) -> Result<DatabaseConnection> {
    let db = Database::connect(&config.database.url).await?;

    if config.database.create_schema {
        setup_schema(&db).await?;
    }

    info!(url = %config.database.url, "Database connected");
    Ok(db)
}

/// 组装应用路由，规则路由挂在 `server.mount_path` 之下
pub fn build_app(config: &AppConfig, db: DatabaseConnection) -> Router {
    let mount_path = config.server.normalized_mount_path();

    let registry = Arc::new(BusinessRuleRegistry::new(Arc::new(db)));
    let jwt_auth = Arc::new(JwtAuth::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_hours,
    ));

    let router = create_router(AppState::new(registry, jwt_auth, mount_path.clone()));

    if mount_path.is_empty() {
        router
    } else {
        Router::new().nest(&mount_path, router)
    }
}

/// 为后台人员签发访问令牌
pub fn issue_token(config: &AppConfig, subject: &str, roles: Vec<String>) -> Result<String> {
    let roles = if roles.is_empty() {
        vec![STAFF_ROLES[0].to_string()]
    } else {
        roles
    };

    let jwt_auth = JwtAuth::new(config.auth.jwt_secret.clone(), config.auth.token_ttl_hours);
    let token = jwt_auth.generate_token(subject, roles)?;

    info!(sub = %subject, "Access token issued");
    Ok(token)
}

/// 启动 HTTP 服务，直到收到 Ctrl-C
pub async fn run(config: AppConfig) -> Result<()> {
    let db = connect_database(&config).await?;
    let app = build_app(&config, db);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        mount_path = %config.server.normalized_mount_path(),
        "Business rule server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Business rule server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
