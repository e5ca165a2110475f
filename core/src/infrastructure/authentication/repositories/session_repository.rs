use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        authentication::{entities::Session, ports::SessionRepository},
        common::entities::app_errors::CoreError,
    },
    entity::sessions::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresSessionRepository {
    pub db: DatabaseConnection,
}

impl PostgresSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, CoreError> {
        let created = Entity::insert(ActiveModel {
            id: Set(session.id),
            user_id: Set(session.user_id),
            created_at: Set(session.created_at.fixed_offset()),
            expires_at: Set(session.expires_at.fixed_offset()),
            revoked_at: Set(session.revoked_at.map(|at| at.fixed_offset())),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create session: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created.into())
    }

    async fn get_by_id(&self, session_id: Uuid) -> Result<Option<Session>, CoreError> {
        let session = Entity::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get session: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(session.map(Session::from))
    }

    async fn revoke(&self, session_id: Uuid, revoked_at: DateTime<Utc>) -> Result<(), CoreError> {
        Entity::update_many()
            .col_expr(Column::RevokedAt, Expr::value(revoked_at.fixed_offset()))
            .filter(Column::Id.eq(session_id))
            .filter(Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to revoke session: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
