use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue};
use serde::{Deserialize, Serialize};

/// 当前 UTC 时间（保存与删除钩子统一使用）
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// 记录的创建、更新、删除时间
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub updated_timestamp: Option<DateTime<Utc>>,
    pub deleted_timestamp: Option<DateTime<Utc>>,
}

impl Lifecycle {
    pub fn new(
        creation_timestamp: Option<DateTime<Utc>>,
        updated_timestamp: Option<DateTime<Utc>>,
        deleted_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            creation_timestamp,
            updated_timestamp,
            deleted_timestamp,
        }
    }

    /// 记录一次保存：首次写入创建时间，每次刷新更新时间
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if self.creation_timestamp.is_none() {
            self.creation_timestamp = Some(now);
        }
        self.updated_timestamp = Some(now);
    }

    /// 标记删除；已删除时返回 `false` 且不做修改
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) -> bool {
        if self.deleted_timestamp.is_some() {
            return false;
        }
        self.deleted_timestamp = Some(now);
        true
    }

    pub fn is_alive(&self) -> bool {
        self.deleted_timestamp.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        !self.is_alive()
    }
}

fn current_value(value: &ActiveValue<Option<DateTime<Utc>>>) -> Option<DateTime<Utc>> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => *v,
        ActiveValue::NotSet => None,
    }
}

/// 带创建/更新时间列的 ActiveModel，需在 `before_save` 中调用 `touch_timestamps`
pub trait TimestampedModel: ActiveModelTrait {
    fn creation_timestamp_mut(&mut self) -> &mut ActiveValue<Option<DateTime<Utc>>>;

    fn updated_timestamp_mut(&mut self) -> &mut ActiveValue<Option<DateTime<Utc>>>;

    fn touch_timestamps(&mut self, now: DateTime<Utc>, insert: bool) {
        let creation = self.creation_timestamp_mut();

        // 部分更新：未加载创建时间，保持不变
        if matches!(creation, ActiveValue::NotSet) && !insert {
            *self.updated_timestamp_mut() = ActiveValue::Set(Some(now));
            return;
        }

        let mut lifecycle = Lifecycle::new(current_value(creation), None, None);
        lifecycle.touch(now);

        *self.creation_timestamp_mut() = ActiveValue::Set(lifecycle.creation_timestamp);
        *self.updated_timestamp_mut() = ActiveValue::Set(lifecycle.updated_timestamp);
    }
}

/// 通过删除时间列软删除的 ActiveModel
pub trait SoftDeletableModel: TimestampedModel {
    fn deleted_timestamp_mut(&mut self) -> &mut ActiveValue<Option<DateTime<Utc>>>;

    /// 写入删除时间（仍需调用方保存）
    fn mark_deleted(&mut self, now: DateTime<Utc>) -> bool {
        let deleted = self.deleted_timestamp_mut();
        let mut lifecycle = Lifecycle::new(None, None, current_value(deleted));
        if !lifecycle.mark_deleted(now) {
            return false;
        }
        *deleted = ActiveValue::Set(lifecycle.deleted_timestamp);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{campaign, create_test_db};
    use chrono::{Duration, TimeZone};
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};
    use tokio::time::{sleep, Duration as TokioDuration};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_touch_sets_creation_once() {
        let mut lifecycle = Lifecycle::default();

        lifecycle.touch(at(8));
        assert_eq!(lifecycle.creation_timestamp, Some(at(8)));
        assert_eq!(lifecycle.updated_timestamp, Some(at(8)));

        lifecycle.touch(at(9));
        assert_eq!(lifecycle.creation_timestamp, Some(at(8)));
        assert_eq!(lifecycle.updated_timestamp, Some(at(9)));
    }

    #[test]
    fn test_mark_deleted_only_once() {
        let mut lifecycle = Lifecycle::default();
        assert!(lifecycle.is_alive());

        assert!(lifecycle.mark_deleted(at(10)));
        assert!(lifecycle.is_deleted());

        assert!(!lifecycle.mark_deleted(at(11)));
        assert_eq!(lifecycle.deleted_timestamp, Some(at(10)));
    }

    #[test]
    fn test_touch_keeps_unloaded_creation_on_update() {
        let mut model = campaign::ActiveModel {
            id: Set(1),
            ..Default::default()
        };

        model.touch_timestamps(at(12), false);

        assert!(matches!(model.creation_timestamp, ActiveValue::NotSet));
        assert_eq!(model.updated_timestamp, ActiveValue::Set(Some(at(12))));
    }

    #[test]
    fn test_mark_deleted_on_active_model() {
        let mut model = campaign::ActiveModel {
            deleted_timestamp: ActiveValue::Unchanged(None),
            ..Default::default()
        };

        assert!(model.mark_deleted(at(7)));
        assert_eq!(model.deleted_timestamp, ActiveValue::Set(Some(at(7))));

        assert!(!model.mark_deleted(at(8)));
        assert_eq!(model.deleted_timestamp, ActiveValue::Set(Some(at(7))));
    }

    #[tokio::test]
    async fn test_save_hook_stamps_insert_and_update() {
        let db = create_test_db().await;

        let inserted = campaign::ActiveModel {
            name: Set("spring".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let created = inserted.creation_timestamp.unwrap();
        assert_eq!(inserted.updated_timestamp, Some(created));

        sleep(TokioDuration::from_millis(5)).await;

        let mut active: campaign::ActiveModel = inserted.into();
        active.name = Set("spring sale".to_string());
        let updated = active.update(&db).await.unwrap();

        assert_eq!(updated.creation_timestamp, Some(created));
        assert!(updated.updated_timestamp.unwrap() > created);

        let stored = campaign::Entity::find_by_id(updated.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.creation_timestamp, Some(created));
        assert!(stored.updated_timestamp.unwrap() - created >= Duration::milliseconds(1));
    }
}
