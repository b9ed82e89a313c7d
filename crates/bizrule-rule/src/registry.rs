use crate::db::business_rule;
use crate::{BusinessRule, Result, RuleError, RuleFilter, RuleForm};
use bizrule_core::{soft_delete_many, utc_now, SoftDelete, SoftDeletableModel};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use std::sync::Arc;
use tracing::{debug, info};

/// 业务规则注册表（删除只写入 `deleted_timestamp`，不移除行）
pub struct BusinessRuleRegistry {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl BusinessRuleRegistry {
    /// 创建新的规则注册表
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 创建规则
    ///
    /// # 错误
    /// * `ValidationError` - 表单校验失败
    /// * `AlreadyExists` - 名称已被占用（包括已删除的规则）
    /// * `DatabaseError` - 数据库操作失败
    pub async fn create(&self, form: RuleForm) -> Result<BusinessRule> {
        let form = form.clean()?;

        if self.exists_name(&form.name).await? {
            return Err(RuleError::AlreadyExists(form.name));
        }

        let name = form.name.clone();
        let active_model: business_rule::ActiveModel = form.into();
        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|e| RuleError::from_write(e, &name))?;

        info!(rule_id = model.id, rule_name = %model.name, "Business rule created");
        Ok(BusinessRule::from(model))
    }

    /// 按主键获取规则
    pub async fn get(&self, rule_id: i32, include_deleted: bool) -> Result<Option<BusinessRule>> {
        let model = business_rule::Entity::find_scoped(include_deleted)
            .filter(business_rule::Column::Id.eq(rule_id))
            .one(&*self.db)
            .await?;

        debug!(rule_id, found = model.is_some(), include_deleted, "Business rule lookup");
        Ok(model.map(BusinessRule::from))
    }

    /// 按名称获取规则
    pub async fn get_by_name(&self, name: &str, include_deleted: bool) -> Result<Option<BusinessRule>> {
        let model = business_rule::Entity::find_scoped(include_deleted)
            .filter(business_rule::Column::Name.eq(name))
            .one(&*self.db)
            .await?;

        Ok(model.map(BusinessRule::from))
    }

    /// 更新规则
    ///
    /// # 错误
    /// * `NotFound` - 规则不存在或已删除
    /// * `ValidationError` - 表单校验失败
    /// * `AlreadyExists` - 新名称已被其他规则占用
    pub async fn update(&self, rule_id: i32, form: RuleForm) -> Result<BusinessRule> {
        let form = form.clean()?;
        let current = self.find_alive_model(rule_id).await?;

        if form.name != current.name && self.exists_name(&form.name).await? {
            return Err(RuleError::AlreadyExists(form.name));
        }

        let name = form.name.clone();
        let mut active_model: business_rule::ActiveModel = current.into();
        active_model.apply_form(form);
        let model = active_model
            .update(&*self.db)
            .await
            .map_err(|e| RuleError::from_write(e, &name))?;

        info!(rule_id, rule_name = %model.name, "Business rule updated");
        Ok(BusinessRule::from(model))
    }

    /// 保存表单：无主键时创建，否则更新
    pub async fn save(&self, rule_id: Option<i32>, form: RuleForm) -> Result<BusinessRule> {
        match rule_id {
            Some(rule_id) => self.update(rule_id, form).await,
            None => self.create(form).await,
        }
    }

    /// 软删除规则（经由保存钩子，同时刷新 `updated_timestamp`）
    ///
    /// # 错误
    /// * `NotFound` - 规则不存在或已删除
    pub async fn delete(&self, rule_id: i32) -> Result<BusinessRule> {
        let current = self.find_alive_model(rule_id).await?;

        let mut active_model: business_rule::ActiveModel = current.into();
        if !active_model.mark_deleted(utc_now()) {
            return Err(RuleError::internal(format!(
                "business rule {} was loaded as alive but carries a deletion timestamp",
                rule_id
            )));
        }
        let model = active_model.update(&*self.db).await?;

        info!(rule_id, rule_name = %model.name, "Business rule soft-deleted");
        Ok(BusinessRule::from(model))
    }

    /// 批量软删除，返回被标记的规则数（忽略分页与 `include_deleted`）
    pub async fn delete_many(&self, filter: &RuleFilter) -> Result<u64> {
        let count =
            soft_delete_many::<business_rule::Entity, _, _>(&*self.db, Self::filter_condition(filter))
                .await?;

        info!(count, "Business rules soft-deleted in bulk");
        Ok(count)
    }

    /// 列出规则（按主键排序；仅在请求分页时分页）
    ///
    /// # 错误
    /// * `ValidationError` - 页码超出范围
    pub async fn list(&self, filter: RuleFilter) -> Result<Vec<BusinessRule>> {
        let mut query = Self::scoped_query(&filter).order_by_asc(business_rule::Column::Id);

        if let Some((offset, limit)) = filter.page_window()? {
            query = query.offset(offset).limit(limit);
        }

        let models = query.all(&*self.db).await?;

        let rules: Vec<BusinessRule> = models.into_iter().map(BusinessRule::from).collect();

        debug!(count = rules.len(), include_deleted = filter.include_deleted, "Business rules listed");
        Ok(rules)
    }

    /// 统计规则数量（忽略分页）
    pub async fn count(&self, filter: RuleFilter) -> Result<u64> {
        let count = Self::scoped_query(&filter).count(&*self.db).await?;
        Ok(count)
    }

    /// 名称是否已被任何规则占用（包括已删除的规则）
    pub async fn exists_name(&self, name: &str) -> Result<bool> {
        let count = business_rule::Entity::find_scoped(true)
            .filter(business_rule::Column::Name.eq(name))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    // ========== 私有辅助方法 ==========

    async fn find_alive_model(&self, rule_id: i32) -> Result<business_rule::Model> {
        business_rule::Entity::find_alive()
            .filter(business_rule::Column::Id.eq(rule_id))
            .one(&*self.db)
            .await?
            .ok_or(RuleError::NotFound(rule_id))
    }

    fn filter_condition(filter: &RuleFilter) -> Condition {
        let mut condition = Condition::all();

        if let Some(ids) = &filter.ids {
            condition = condition.add(business_rule::Column::Id.is_in(ids.iter().copied()));
        }
        if let Some(search) = filter.search_term() {
            let pattern = format!("%{}%", escape_like(search));
            condition = condition.add(
                Expr::col((business_rule::Entity, business_rule::Column::Name))
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }

        condition
    }

    fn scoped_query(filter: &RuleFilter) -> Select<business_rule::Entity> {
        business_rule::Entity::find_scoped(filter.include_deleted)
            .filter(Self::filter_condition(filter))
    }
}

// LIKE 转义字符；反斜杠按字面匹配
const LIKE_ESCAPE: char = '!';

/// 转义 LIKE 通配符，使关键词按字面匹配
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
