use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{
    article::ports::ArticleRepository,
    authentication::{
        entities::{AuthError, GOOGLE_PROVIDER, JwtClaims, Session},
        ports::{AuthService, OAuthProvider, SessionRepository, UserRepository},
        tokens::{decode_access_token, encode_access_token},
        value_objects::{AuthorizationUrl, CompleteLoginInput, Identity, LoginOutput, MeOutput},
    },
    checkin::ports::CheckinRepository,
    common::{
        entities::app_errors::CoreError, generate_random_string, ports::CacheStore,
        services::Service,
    },
    health::ports::HealthCheckRepository,
    llm::ports::LLMClient,
    media::ports::MediaStorage,
    nutrition::ports::NutritionRepository,
    places::ports::PlacesClient,
    recommendation::ports::RecommendationRepository,
    restaurant::ports::RestaurantRepository,
};

const OAUTH_STATE_TTL: Duration = Duration::from_secs(600);

fn oauth_state_key(state: &str) -> String {
    format!("oauth_state:{state}")
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> AuthService
    for Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    RE: RestaurantRepository,
    NU: NutritionRepository,
    CK: CheckinRepository,
    AR: ArticleRepository,
    RC: RecommendationRepository,
    U: UserRepository,
    SS: SessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    PL: PlacesClient,
    MS: MediaStorage,
    OA: OAuthProvider,
    CS: CacheStore,
{
    async fn begin_login(&self) -> Result<AuthorizationUrl, CoreError> {
        let state = generate_random_string(32);

        self.cache_store.put(
            oauth_state_key(&state),
            serde_json::Value::Bool(true),
            OAUTH_STATE_TTL,
        );

        Ok(AuthorizationUrl {
            authorization_url: self.oauth_provider.authorization_url(state.clone()),
            state,
        })
    }

    async fn complete_login(&self, input: CompleteLoginInput) -> Result<LoginOutput, CoreError> {
        if self
            .cache_store
            .take(&oauth_state_key(&input.state))
            .is_none()
        {
            warn!("OAuth callback with unknown state");
            return Err(AuthError::InvalidState.into());
        }

        let profile = self.oauth_provider.exchange_code(input.code).await?;

        let user = self
            .user_repository
            .upsert_social_user(GOOGLE_PROVIDER.to_string(), profile)
            .await?;

        let session = self
            .session_repository
            .create(Session::new(user.id, self.auth.session_ttl_seconds))
            .await?;

        let claims = JwtClaims {
            sub: user.id,
            sid: session.id,
            iat: session.created_at.timestamp(),
            exp: session.expires_at.timestamp(),
        };
        let access_token = encode_access_token(&claims, &self.auth.jwt_secret)?;

        info!(user_id = %user.id, "User logged in with Google");

        Ok(LoginOutput {
            access_token,
            token_type: "Bearer".to_string(),
            expires_at: session.expires_at,
            user,
        })
    }

    async fn authorize(&self, token: String) -> Result<Identity, CoreError> {
        let claims = decode_access_token(&token, &self.auth.jwt_secret)?;

        let session = self
            .session_repository
            .get_by_id(claims.sid)
            .await?
            .filter(|session| session.user_id == claims.sub)
            .ok_or(AuthError::InvalidToken)?;

        if session.revoked_at.is_some() {
            return Err(AuthError::SessionRevoked.into());
        }
        if !session.is_active_at(Utc::now()) {
            return Err(AuthError::TokenExpired.into());
        }

        let user = self
            .user_repository
            .get_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(Identity {
            user,
            session_id: session.id,
        })
    }

    async fn logout(&self, identity: Identity) -> Result<(), CoreError> {
        self.session_repository
            .revoke(identity.session_id, Utc::now())
            .await?;

        info!(user_id = %identity.id(), "User logged out");

        Ok(())
    }

    async fn me(&self, identity: Identity) -> Result<MeOutput, CoreError> {
        let social_account = self
            .user_repository
            .get_social_account(identity.id(), GOOGLE_PROVIDER.to_string())
            .await?;

        Ok(MeOutput {
            user: identity.user,
            social_account,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        authentication::{
            entities::AuthError,
            ports::AuthService,
            value_objects::CompleteLoginInput,
        },
        common::{entities::app_errors::CoreError, testing::TestContext},
    };

    #[tokio::test]
    async fn login_round_trip_issues_usable_token() {
        let ctx = TestContext::new();
        let service = ctx.service();

        let url = service.begin_login().await.unwrap();
        assert!(url.authorization_url.contains(&url.state));

        let login = service
            .complete_login(CompleteLoginInput {
                code: "code".to_string(),
                state: url.state,
            })
            .await
            .unwrap();

        let identity = service.authorize(login.access_token).await.unwrap();
        assert_eq!(identity.user.id, login.user.id);
    }

    #[tokio::test]
    async fn state_can_only_be_used_once() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let url = service.begin_login().await.unwrap();

        service
            .complete_login(CompleteLoginInput {
                code: "code".to_string(),
                state: url.state.clone(),
            })
            .await
            .unwrap();

        let replay = service
            .complete_login(CompleteLoginInput {
                code: "code".to_string(),
                state: url.state,
            })
            .await;

        assert_eq!(
            replay.unwrap_err(),
            CoreError::Authentication(AuthError::InvalidState)
        );
    }

    #[tokio::test]
    async fn logout_revokes_the_session() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let url = service.begin_login().await.unwrap();
        let login = service
            .complete_login(CompleteLoginInput {
                code: "code".to_string(),
                state: url.state,
            })
            .await
            .unwrap();

        let identity = service.authorize(login.access_token.clone()).await.unwrap();
        service.logout(identity).await.unwrap();

        assert_eq!(
            service.authorize(login.access_token).await.unwrap_err(),
            CoreError::Authentication(AuthError::SessionRevoked)
        );
    }
}
