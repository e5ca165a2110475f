use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    domain::{
        authentication::{
            entities::{GoogleProfile, SocialAccount, User},
            ports::UserRepository,
        },
        common::{
            entities::app_errors::CoreError, generate_random_string, generate_uuid_v7,
        },
    },
    entity::{
        social_accounts::{
            ActiveModel as SocialAccountActiveModel, Column as SocialAccountColumn,
            Entity as SocialAccountEntity,
        },
        users::{ActiveModel, Column, Entity},
    },
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Usernames are unique, so a taken one gets a random suffix.
    async fn available_username(&self, base: String) -> Result<String, CoreError> {
        let taken = Entity::find()
            .filter(Column::Username.eq(base.clone()))
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to check username: {}", e);
                CoreError::InternalServerError
            })?;

        if taken == 0 {
            return Ok(base);
        }

        Ok(format!(
            "{}_{}",
            base,
            generate_random_string(6).to_lowercase()
        ))
    }
}

impl UserRepository for PostgresUserRepository {
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        let user = Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(user.map(User::from))
    }

    async fn upsert_social_user(
        &self,
        provider: String,
        profile: GoogleProfile,
    ) -> Result<User, CoreError> {
        let now = Utc::now().fixed_offset();
        let display_name = profile.name.clone().unwrap_or_else(|| profile.username());

        let account = SocialAccountEntity::find()
            .filter(SocialAccountColumn::Provider.eq(provider.clone()))
            .filter(SocialAccountColumn::ProviderUid.eq(profile.sub.clone()))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get social account: {}", e);
                CoreError::InternalServerError
            })?;

        if let Some(account) = account {
            let user = Entity::find_by_id(account.user_id)
                .one(&self.db)
                .await
                .map_err(|e| {
                    error!("Failed to get user for social account: {}", e);
                    CoreError::InternalServerError
                })?
                .ok_or(CoreError::NotFound)?;

            let mut active_user: ActiveModel = user.into();
            active_user.email = Set(profile.email.clone());
            active_user.display_name = Set(display_name);
            active_user.avatar_url = Set(profile.picture.clone());
            active_user.updated_at = Set(now);

            let updated = active_user.update(&self.db).await.map_err(|e| {
                error!("Failed to update user: {}", e);
                CoreError::InternalServerError
            })?;

            let mut active_account: SocialAccountActiveModel = account.into();
            active_account.extra_data = Set(profile.raw.clone());
            active_account.updated_at = Set(now);
            active_account.update(&self.db).await.map_err(|e| {
                error!("Failed to update social account: {}", e);
                CoreError::InternalServerError
            })?;

            return Ok(updated.into());
        }

        let username = self.available_username(profile.username()).await?;
        let user = User::new(
            username,
            profile.email.clone(),
            display_name,
            profile.picture.clone(),
        );

        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        let created = Entity::insert(ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            display_name: Set(user.display_name.clone()),
            avatar_url: Set(user.avatar_url.clone()),
            created_at: Set(user.created_at.fixed_offset()),
            updated_at: Set(user.updated_at.fixed_offset()),
        })
        .exec_with_returning(&txn)
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            CoreError::InternalServerError
        })?;

        SocialAccountEntity::insert(SocialAccountActiveModel {
            id: Set(generate_uuid_v7()),
            user_id: Set(created.id),
            provider: Set(provider.clone()),
            provider_uid: Set(profile.sub.clone()),
            extra_data: Set(profile.raw.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&txn)
        .await
        .map_err(|e| {
            error!("Failed to create social account: {}", e);
            CoreError::InternalServerError
        })?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit user creation: {}", e);
            CoreError::InternalServerError
        })?;

        info!(user_id = %created.id, provider = %provider, "registered new user");

        Ok(created.into())
    }

    async fn get_social_account(
        &self,
        user_id: Uuid,
        provider: String,
    ) -> Result<Option<SocialAccount>, CoreError> {
        let account = SocialAccountEntity::find()
            .filter(SocialAccountColumn::UserId.eq(user_id))
            .filter(SocialAccountColumn::Provider.eq(provider))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get social account: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(account.map(SocialAccount::from))
    }

    async fn count_users(&self) -> Result<u64, CoreError> {
        Entity::find().count(&self.db).await.map_err(|e| {
            error!("Failed to count users: {}", e);
            CoreError::InternalServerError
        })
    }
}
