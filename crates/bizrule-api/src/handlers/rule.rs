use crate::{
    error::{ApiError, Result},
    models::*,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use bizrule_rule::{BusinessRule, RuleFilter};
use tracing::{debug, info};

/// 解析路径中的规则主键；只接受纯数字，其余一律视为不存在
fn parse_rule_id(raw: &str) -> Result<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::RuleNotFound(raw.to_string()));
    }

    raw.parse::<i32>()
        .map_err(|_| ApiError::RuleNotFound(raw.to_string()))
}

fn redirect_to(state: &AppState, rule: &BusinessRule) -> Redirect {
    Redirect::to(&rule.absolute_path(&state.mount_path))
}

/// 列出规则
pub async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<ListRulesQuery>,
) -> Result<Json<PaginatedResponse<RuleResponse>>> {
    debug!(include_deleted = query.include_deleted, "Listing business rules");

    let filter: RuleFilter = query.into();
    let (page, page_size) = if filter.is_paged() {
        (Some(filter.page()), Some(filter.page_size()))
    } else {
        (None, None)
    };
    let rules = state.registry.list(filter.clone()).await?;
    let total = state.registry.count(filter).await?;

    let data: Vec<RuleResponse> = rules
        .into_iter()
        .map(|rule| RuleResponse::new(rule, &state.mount_path))
        .collect();

    Ok(Json(PaginatedResponse {
        data,
        total,
        page,
        page_size,
    }))
}

/// 创建规则（无主键的表单提交）
pub async fn create_rule(
    State(state): State<AppState>,
    Json(req): Json<RuleFormRequest>,
) -> Result<Redirect> {
    info!(name = %req.name, "Creating business rule");

    let rule = state.registry.save(None, req.into()).await?;

    Ok(redirect_to(&state, &rule))
}

/// 获取规则（表单初始数据）
pub async fn get_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<Json<RuleResponse>> {
    debug!(rule_id = %rule_id, "Getting business rule");

    let id = parse_rule_id(&rule_id)?;
    let rule = state
        .registry
        .get(id, false)
        .await?
        .ok_or(ApiError::RuleNotFound(rule_id))?;

    Ok(Json(RuleResponse::new(rule, &state.mount_path)))
}

/// 保存规则（带主键的表单提交）
pub async fn save_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
    Json(req): Json<RuleFormRequest>,
) -> Result<Redirect> {
    info!(rule_id = %rule_id, "Saving business rule");

    let id = parse_rule_id(&rule_id)?;
    let rule = state.registry.save(Some(id), req.into()).await?;

    Ok(redirect_to(&state, &rule))
}

/// 删除规则（软删除）
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<StatusCode> {
    info!(rule_id = %rule_id, "Deleting business rule");

    let id = parse_rule_id(&rule_id)?;
    state.registry.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
