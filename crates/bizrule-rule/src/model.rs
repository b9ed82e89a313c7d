use crate::{Result, RuleError};
use bizrule_core::Lifecycle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 规则名称最大长度（字符数）
pub const NAME_MAX_LENGTH: usize = 150;

/// `rules` 字段默认值
pub const DEFAULT_RULES: &str = "{}";

/// 列表默认分页大小（仅在请求分页时生效）
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// 列表分页大小上限
pub const MAX_PAGE_SIZE: u64 = 1000;

/// 业务规则（`rule_data` 与 `rules` 原样保存，不做解析）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRule {
    /// 主键
    pub id: i32,

    /// 规则名称（全局唯一，包括已删除的规则）
    pub name: String,

    /// 描述
    pub description: String,

    /// 规则数据（序列化文本）
    pub rule_data: String,

    /// 规则定义（序列化文本）
    pub rules: String,

    /// 创建、更新、删除时间
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

impl BusinessRule {
    pub fn is_alive(&self) -> bool {
        self.lifecycle.is_alive()
    }

    /// 规则表单页链接
    pub fn absolute_path(&self, mount_path: &str) -> String {
        format!("{}/business-rule/{}/", mount_path.trim_end_matches('/'), self.id)
    }
}

impl fmt::Display for BusinessRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 规则表单（创建与更新共用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleForm {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub rule_data: String,

    #[serde(default = "default_rules")]
    pub rules: String,
}

fn default_rules() -> String {
    DEFAULT_RULES.to_string()
}

impl RuleForm {
    pub fn new(name: impl Into<String>, rule_data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            rule_data: rule_data.into(),
            rules: default_rules(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }

    /// 校验并规范化表单：去掉名称首尾空白，检查必填项与名称长度
    pub fn clean(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();

        if self.name.is_empty() {
            return Err(RuleError::validation("name is required"));
        }

        let length = self.name.chars().count();
        if length > NAME_MAX_LENGTH {
            return Err(RuleError::validation(format!(
                "name has {} characters (max {})",
                length, NAME_MAX_LENGTH
            )));
        }

        if self.rule_data.trim().is_empty() {
            return Err(RuleError::validation("rule_data is required"));
        }

        Ok(self)
    }
}

/// 规则查询条件
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    /// 是否包含已软删除的规则
    pub include_deleted: bool,

    /// 限定主键
    pub ids: Option<Vec<i32>>,

    /// 名称关键词
    pub search: Option<String>,

    /// 页码（从 1 开始）
    pub page: Option<u64>,

    /// 每页数量
    pub page_size: Option<u64>,
}

impl RuleFilter {
    pub fn including_deleted() -> Self {
        Self {
            include_deleted: true,
            ..Default::default()
        }
    }

    pub fn with_ids(ids: Vec<i32>) -> Self {
        Self {
            ids: Some(ids),
            ..Default::default()
        }
    }

    pub(crate) fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// 是否请求了分页；未请求时列表返回全部匹配的规则
    pub fn is_paged(&self) -> bool {
        self.page.is_some() || self.page_size.is_some()
    }

    /// 页码（从 1 开始）
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// 每页数量（1 到 `MAX_PAGE_SIZE`）
    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// 分页窗口 `(offset, limit)`；未请求分页时为 `None`
    ///
    /// # 错误
    /// * `ValidationError` - 偏移量超出数据库可表示的范围
    pub fn page_window(&self) -> Result<Option<(u64, u64)>> {
        if !self.is_paged() {
            return Ok(None);
        }

        let limit = self.page_size();
        let offset = (self.page() - 1)
            .checked_mul(limit)
            .filter(|offset| *offset <= i64::MAX as u64)
            .ok_or_else(|| RuleError::validation(format!("page {} is out of range", self.page())))?;

        Ok(Some((offset, limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_trims_name() {
        let form = RuleForm::new("  discount  ", "{\"pct\": 5}").clean().unwrap();
        assert_eq!(form.name, "discount");
        assert_eq!(form.rules, DEFAULT_RULES);
        assert_eq!(form.description, "");
    }

    #[test]
    fn test_clean_rejects_missing_fields() {
        let err = RuleForm::new("   ", "data").clean().unwrap_err();
        assert!(matches!(err, RuleError::ValidationError(_)));

        let err = RuleForm::new("discount", " \n").clean().unwrap_err();
        assert!(matches!(err, RuleError::ValidationError(_)));
    }

    #[test]
    fn test_clean_counts_characters_not_bytes() {
        let at_limit = "规".repeat(NAME_MAX_LENGTH);
        assert!(RuleForm::new(at_limit, "data").clean().is_ok());

        let too_long = "a".repeat(NAME_MAX_LENGTH + 1);
        assert!(RuleForm::new(too_long, "data").clean().is_err());
    }

    #[test]
    fn test_form_defaults_from_json() {
        let form: RuleForm =
            serde_json::from_str(r#"{"name": "R1", "rule_data": "[]"}"#).unwrap();
        assert_eq!(form.description, "");
        assert_eq!(form.rules, "{}");
    }

    #[test]
    fn test_absolute_path() {
        let rule = BusinessRule {
            id: 7,
            name: "R7".to_string(),
            description: String::new(),
            rule_data: "[]".to_string(),
            rules: DEFAULT_RULES.to_string(),
            lifecycle: Lifecycle::default(),
        };

        assert_eq!(rule.absolute_path("/business-rules"), "/business-rules/business-rule/7/");
        assert_eq!(rule.absolute_path("/business-rules/"), "/business-rules/business-rule/7/");
        assert_eq!(rule.absolute_path(""), "/business-rule/7/");
        assert_eq!(rule.to_string(), "R7");
    }

    #[test]
    fn test_filter_paging_defaults() {
        let filter = RuleFilter {
            page: Some(0),
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.page_size(), 1);
        assert_eq!(RuleFilter::default().page_size(), DEFAULT_PAGE_SIZE);

        let oversized = RuleFilter {
            page_size: Some(u64::MAX),
            ..Default::default()
        };
        assert_eq!(oversized.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_window() {
        assert_eq!(RuleFilter::default().page_window().unwrap(), None);

        let third_page = RuleFilter {
            page: Some(3),
            page_size: Some(10),
            ..Default::default()
        };
        assert_eq!(third_page.page_window().unwrap(), Some((20, 10)));

        // 只给页码时使用默认分页大小
        let page_only = RuleFilter {
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(page_only.page_window().unwrap(), Some((DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE)));
    }

    #[test]
    fn test_page_window_out_of_range() {
        let huge_page = RuleFilter {
            page: Some(u64::MAX),
            page_size: Some(2),
            ..Default::default()
        };
        assert!(matches!(huge_page.page_window(), Err(RuleError::ValidationError(_))));

        // 不溢出 u64，但超出 i64 偏移量
        let past_i64 = RuleFilter {
            page: Some(u64::MAX / 2 + 2),
            page_size: Some(1),
            ..Default::default()
        };
        assert!(matches!(past_i64.page_window(), Err(RuleError::ValidationError(_))));
    }
}
