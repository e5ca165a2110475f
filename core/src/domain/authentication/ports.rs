use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::{GoogleProfile, Session, SocialAccount, User},
        value_objects::{AuthorizationUrl, CompleteLoginInput, Identity, LoginOutput, MeOutput},
    },
    common::entities::app_errors::CoreError,
};

pub trait AuthService: Send + Sync {
    fn begin_login(&self) -> impl Future<Output = Result<AuthorizationUrl, CoreError>> + Send;

    fn complete_login(
        &self,
        input: CompleteLoginInput,
    ) -> impl Future<Output = Result<LoginOutput, CoreError>> + Send;

    fn authorize(&self, token: String)
    -> impl Future<Output = Result<Identity, CoreError>> + Send;

    fn logout(&self, identity: Identity) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn me(&self, identity: Identity) -> impl Future<Output = Result<MeOutput, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn get_by_id(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Creates the user on first login, refreshes profile fields afterwards.
    fn upsert_social_user(
        &self,
        provider: String,
        profile: GoogleProfile,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_social_account(
        &self,
        user_id: Uuid,
        provider: String,
    ) -> impl Future<Output = Result<Option<SocialAccount>, CoreError>> + Send;

    fn count_users(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    fn create(&self, session: Session) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn get_by_id(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Option<Session>, CoreError>> + Send;

    fn revoke(
        &self,
        session_id: Uuid,
        revoked_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait OAuthProvider: Send + Sync {
    fn authorization_url(&self, state: String) -> String;

    /// Exchanges an authorization code and fetches the user's profile.
    fn exchange_code(
        &self,
        code: String,
    ) -> impl Future<Output = Result<GoogleProfile, CoreError>> + Send;
}
