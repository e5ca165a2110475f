use crate::{
    domain::authentication::entities::{Session, SocialAccount, User},
    entity::{sessions, social_accounts, users},
};

impl From<&users::Model> for User {
    fn from(model: &users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username.clone(),
            email: model.email.clone(),
            display_name: model.display_name.clone(),
            avatar_url: model.avatar_url.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self::from(&model)
    }
}

impl From<social_accounts::Model> for SocialAccount {
    fn from(model: social_accounts::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            provider: model.provider,
            provider_uid: model.provider_uid,
            extra_data: model.extra_data,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            created_at: model.created_at.to_utc(),
            expires_at: model.expires_at.to_utc(),
            revoked_at: model.revoked_at.map(|at| at.to_utc()),
        }
    }
}
