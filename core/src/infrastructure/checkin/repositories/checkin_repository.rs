use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Statement,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        checkin::{
            entities::Checkin,
            ports::CheckinRepository,
            value_objects::{CheckinFilter, RestaurantRanking, UserRanking},
        },
        common::{entities::app_errors::CoreError, round_to},
    },
    entity::checkins::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresCheckinRepository {
    pub db: DatabaseConnection,
}

impl PostgresCheckinRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CheckinRepository for PostgresCheckinRepository {
    async fn create(&self, checkin: Checkin) -> Result<Checkin, CoreError> {
        let created = Entity::insert(ActiveModel::from(&checkin))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create checkin: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(created.into())
    }

    async fn get_for_user(&self, checkin_id: Uuid, user_id: Uuid) -> Result<Option<Checkin>, CoreError> {
        let checkin = Entity::find()
            .filter(Column::Id.eq(checkin_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get checkin: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(checkin.map(Checkin::from))
    }

    async fn update(&self, checkin: Checkin) -> Result<Checkin, CoreError> {
        let updated = Entity::update(ActiveModel::from(&checkin))
            .filter(Column::UserId.eq(checkin.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::NotFound,
                e => {
                    error!("Failed to update checkin: {}", e);
                    CoreError::InternalServerError
                }
            })?;

        Ok(updated.into())
    }

    async fn delete(&self, checkin_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        let result = Entity::delete_many()
            .filter(Column::Id.eq(checkin_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete checkin: {}", e);
                CoreError::InternalServerError
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: Option<CheckinFilter>,
    ) -> Result<Vec<Checkin>, CoreError> {
        let mut query = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::CreatedAt);

        if let Some(filter) = filter {
            query = query.offset(filter.offset).limit(filter.limit);
        }

        let checkins = query.all(&self.db).await.map_err(|e| {
            error!("Failed to list checkins: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(checkins.into_iter().map(Checkin::from).collect())
    }

    async fn user_ranking(
        &self,
        from: NaiveDate,
        until: NaiveDate,
        limit: u64,
    ) -> Result<Vec<UserRanking>, CoreError> {
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT c.user_id, COALESCE(u.username, '') AS username, COUNT(*) AS checkin_count
            FROM checkins c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.date >= $1 AND c.date < $2
            GROUP BY c.user_id, u.username
            ORDER BY checkin_count DESC, username ASC
            LIMIT $3
            "#,
            [from.into(), until.into(), (limit as i64).into()],
        );

        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to compute user ranking: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(UserRanking {
                    user_id: row.try_get("", "user_id").ok()?,
                    username: row.try_get("", "username").ok()?,
                    checkin_count: row.try_get("", "checkin_count").ok()?,
                })
            })
            .collect())
    }

    async fn restaurant_ranking(
        &self,
        from: NaiveDate,
        until: NaiveDate,
        limit: u64,
    ) -> Result<Vec<RestaurantRanking>, CoreError> {
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT restaurant_name,
                   COUNT(*) AS checkin_count,
                   AVG(rating)::float8 AS avg_rating
            FROM checkins
            WHERE date >= $1 AND date < $2
            GROUP BY restaurant_name
            ORDER BY checkin_count DESC, avg_rating DESC, restaurant_name ASC
            LIMIT $3
            "#,
            [from.into(), until.into(), (limit as i64).into()],
        );

        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to compute restaurant ranking: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(RestaurantRanking {
                    restaurant_name: row.try_get("", "restaurant_name").ok()?,
                    checkin_count: row.try_get("", "checkin_count").ok()?,
                    avg_rating: round_to(row.try_get("", "avg_rating").ok()?, 1),
                })
            })
            .collect())
    }
}
