use crate::utc_now;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Select};

/// 带起止时间列的实体，窗口为 `start <= t < end`
pub trait TimeWindow: EntityTrait {
    fn start_column() -> Self::Column;

    fn end_column() -> Self::Column;
}

/// 起始边界：`include` 时 `start <= at`，否则 `start > at`
pub fn start_bound<E: TimeWindow>(at: DateTime<Utc>, include: bool) -> SimpleExpr {
    let column = E::start_column();
    if include {
        column.lte(at)
    } else {
        column.gt(at)
    }
}

/// 结束边界：`include` 时 `end > at`，否则 `end <= at`
pub fn end_bound<E: TimeWindow>(at: DateTime<Utc>, include: bool) -> SimpleExpr {
    let column = E::end_column();
    if include {
        column.gt(at)
    } else {
        column.lte(at)
    }
}

/// 同时满足两个边界
pub fn window_condition<E: TimeWindow>(at: DateTime<Utc>, include: bool) -> Condition {
    Condition::all()
        .add(start_bound::<E>(at, include))
        .add(end_bound::<E>(at, include))
}

// 活动窗口的补集；边界为 NULL 的行也算不活动
fn outside_window<E: TimeWindow>(at: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(start_bound::<E>(at, false))
        .add(end_bound::<E>(at, false))
        .add(E::start_column().is_null())
        .add(E::end_column().is_null())
}

/// `Select` 上的时间窗口过滤
pub trait TimeQueryExt: Sized {
    fn active_at_time(self, at: DateTime<Utc>) -> Self;

    fn inactive_at_time(self, at: DateTime<Utc>) -> Self;

    /// 已结束：`end <= now`
    fn past_at(self, now: DateTime<Utc>) -> Self;

    /// 未开始：`start > now`
    fn future_at(self, now: DateTime<Utc>) -> Self;

    fn past(self) -> Self {
        self.past_at(utc_now())
    }

    fn future(self) -> Self {
        self.future_at(utc_now())
    }

    fn active_now(self) -> Self {
        self.active_at_time(utc_now())
    }

    fn inactive_now(self) -> Self {
        self.inactive_at_time(utc_now())
    }
}

impl<E: TimeWindow> TimeQueryExt for Select<E> {
    fn active_at_time(self, at: DateTime<Utc>) -> Self {
        self.filter(window_condition::<E>(at, true))
    }

    fn inactive_at_time(self, at: DateTime<Utc>) -> Self {
        self.filter(outside_window::<E>(at))
    }

    fn past_at(self, now: DateTime<Utc>) -> Self {
        self.filter(end_bound::<E>(now, false))
    }

    fn future_at(self, now: DateTime<Utc>) -> Self {
        self.filter(start_bound::<E>(now, false))
    }
}
