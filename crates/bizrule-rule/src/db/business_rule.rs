use bizrule_core::{utc_now, SoftDelete, SoftDeletableModel, TimestampedModel};
use chrono::{DateTime as ChronoDateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::{Deserialize, Serialize};

/// 业务规则实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(Some(150))", unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub rule_data: String,
    #[sea_orm(column_type = "Text")]
    pub rules: String,
    pub creation_timestamp: Option<ChronoDateTime<Utc>>,
    pub updated_timestamp: Option<ChronoDateTime<Utc>>,
    pub deleted_timestamp: Option<ChronoDateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        self.touch_timestamps(utc_now(), insert);
        Ok(self)
    }

    async fn before_delete<C>(self, _db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        Err(DbErr::Custom(
            "business rules are never hard-deleted; soft-delete them through the registry"
                .to_string(),
        ))
    }
}

impl TimestampedModel for ActiveModel {
    fn creation_timestamp_mut(&mut self) -> &mut ActiveValue<Option<ChronoDateTime<Utc>>> {
        &mut self.creation_timestamp
    }

    fn updated_timestamp_mut(&mut self) -> &mut ActiveValue<Option<ChronoDateTime<Utc>>> {
        &mut self.updated_timestamp
    }
}

impl SoftDeletableModel for ActiveModel {
    fn deleted_timestamp_mut(&mut self) -> &mut ActiveValue<Option<ChronoDateTime<Utc>>> {
        &mut self.deleted_timestamp
    }
}

impl SoftDelete for Entity {
    fn deleted_column() -> Column {
        Column::DeletedTimestamp
    }
}
