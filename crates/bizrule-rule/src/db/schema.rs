use super::business_rule;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DbErr, Schema};
use tracing::info;

/// 创建业务规则表及索引（已存在时跳过）
pub async fn setup_schema<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();

    let table = Schema::new(backend)
        .create_table_from_entity(business_rule::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&table)).await?;

    let indexes = [
        (
            "idx_business_rules_updated_timestamp",
            business_rule::Column::UpdatedTimestamp,
        ),
        (
            "idx_business_rules_deleted_timestamp",
            business_rule::Column::DeletedTimestamp,
        ),
    ];
    for (name, column) in indexes {
        let index = Index::create()
            .if_not_exists()
            .name(name)
            .table(business_rule::Entity)
            .col(column)
            .to_owned();
        db.execute(backend.build(&index)).await?;
    }

    info!("Business rule schema ready");
    Ok(())
}
