use super::business_rule;
use crate::{BusinessRule, RuleForm};
use bizrule_core::Lifecycle;
use sea_orm::ActiveValue::{NotSet, Set};

/// 新建规则：主键与时间戳交给数据库和保存钩子
impl From<RuleForm> for business_rule::ActiveModel {
    fn from(form: RuleForm) -> Self {
        Self {
            id: NotSet,
            name: Set(form.name),
            description: Set(form.description),
            rule_data: Set(form.rule_data),
            rules: Set(form.rules),
            creation_timestamp: NotSet,
            updated_timestamp: NotSet,
            deleted_timestamp: Set(None),
        }
    }
}

impl business_rule::ActiveModel {
    /// 用表单内容覆盖已加载的规则
    pub(crate) fn apply_form(&mut self, form: RuleForm) {
        self.name = Set(form.name);
        self.description = Set(form.description);
        self.rule_data = Set(form.rule_data);
        self.rules = Set(form.rules);
    }
}

impl From<business_rule::Model> for BusinessRule {
    fn from(model: business_rule::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            rule_data: model.rule_data,
            rules: model.rules,
            lifecycle: Lifecycle::new(
                model.creation_timestamp,
                model.updated_timestamp,
                model.deleted_timestamp,
            ),
        }
    }
}
