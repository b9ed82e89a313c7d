//! 实体公共组件：时间戳、时间窗口查询与软删除

pub mod lifecycle;
pub mod soft_delete;
pub mod time_query;

#[cfg(test)]
mod test_support;

pub use lifecycle::{utc_now, Lifecycle, SoftDeletableModel, TimestampedModel};
pub use soft_delete::{soft_delete_many, SoftDelete};
pub use time_query::{end_bound, start_bound, window_condition, TimeQueryExt, TimeWindow};

/// 初始化核心模块
pub fn init() {
    tracing::info!("bizrule core initialized");
}
