use crate::utc_now;
use sea_orm::sea_query::{Expr, IntoCondition, SimpleExpr};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityName, EntityTrait, QueryFilter, Select};
use tracing::debug;

/// 软删除实体：查询经由 `find_scoped` 显式决定是否包含已删除的行
pub trait SoftDelete: EntityTrait {
    fn deleted_column() -> Self::Column;

    fn alive_condition() -> SimpleExpr {
        Self::deleted_column().is_null()
    }

    fn deleted_condition() -> SimpleExpr {
        Self::deleted_column().is_not_null()
    }

    fn find_scoped(include_deleted: bool) -> Select<Self> {
        let query = Self::find();
        if include_deleted {
            query
        } else {
            query.filter(Self::alive_condition())
        }
    }

    fn find_alive() -> Select<Self> {
        Self::find_scoped(false)
    }
}

/// 单条 `UPDATE` 批量软删除匹配的未删除行，返回标记的行数
pub async fn soft_delete_many<E, C, F>(db: &C, filter: F) -> Result<u64, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
    F: IntoCondition,
{
    let result = E::update_many()
        .col_expr(E::deleted_column(), Expr::value(utc_now()))
        .filter(E::alive_condition())
        .filter(filter)
        .exec(db)
        .await?;

    debug!(
        table = %E::default().table_name(),
        rows = result.rows_affected,
        "Soft-deleted rows"
    );
    Ok(result.rows_affected)
}
