//! 单元测试用的内存实体

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

pub mod campaign {
    use crate::{utc_now, SoftDelete, SoftDeletableModel, TimeWindow, TimestampedModel};
    use chrono::{DateTime as ChronoDateTime, Utc};
    use sea_orm::entity::prelude::*;
    use sea_orm::{ActiveValue, ConnectionTrait};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "campaigns")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub starts_at: Option<ChronoDateTime<Utc>>,
        pub ends_at: Option<ChronoDateTime<Utc>>,
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

    impl TimeWindow for Entity {
        fn start_column() -> Column {
            Column::StartsAt
        }

        fn end_column() -> Column {
            Column::EndsAt
        }
    }

    impl SoftDelete for Entity {
        fn deleted_column() -> Column {
            Column::DeletedTimestamp
        }
    }
}

pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(campaign::Entity);
    db.execute(backend.build(&stmt)).await.unwrap();

    db
}
