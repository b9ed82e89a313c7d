use bizrule_rule::{BusinessRule, RuleFilter, RuleForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 规则表单提交
#[derive(Debug, Deserialize)]
pub struct RuleFormRequest {
    pub name: String,
    pub description: Option<String>,
    pub rule_data: String,
    pub rules: Option<String>,
}

impl From<RuleFormRequest> for RuleForm {
    fn from(req: RuleFormRequest) -> Self {
        let mut form = RuleForm::new(req.name, req.rule_data);
        if let Some(description) = req.description {
            form = form.with_description(description);
        }
        if let Some(rules) = req.rules {
            form = form.with_rules(rules);
        }
        form
    }
}

/// 规则列表查询
#[derive(Debug, Default, Deserialize)]
pub struct ListRulesQuery {
    #[serde(default)]
    pub include_deleted: bool,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl From<ListRulesQuery> for RuleFilter {
    fn from(query: ListRulesQuery) -> Self {
        RuleFilter {
            include_deleted: query.include_deleted,
            ids: None,
            search: query.search,
            page: query.page,
            page_size: query.page_size,
        }
    }
}

/// 规则响应
#[derive(Debug, Serialize)]
pub struct RuleResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub rule_data: String,
    pub rules: String,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub updated_timestamp: Option<DateTime<Utc>>,
    pub deleted_timestamp: Option<DateTime<Utc>>,
    /// 规则表单页链接
    pub url: String,
}

impl RuleResponse {
    pub fn new(rule: BusinessRule, mount_path: &str) -> Self {
        let url = rule.absolute_path(mount_path);
        Self {
            id: rule.id,
            name: rule.name,
            description: rule.description,
            rule_data: rule.rule_data,
            rules: rule.rules,
            creation_timestamp: rule.lifecycle.creation_timestamp,
            updated_timestamp: rule.lifecycle.updated_timestamp,
            deleted_timestamp: rule.lifecycle.deleted_timestamp,
            url,
        }
    }
}

/// 分页响应（未请求分页时 `page` 与 `page_size` 为空）
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}
