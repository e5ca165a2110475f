use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    article::ports::ArticleRepository,
    authentication::{
        ports::{OAuthProvider, SessionRepository, UserRepository},
        value_objects::Identity,
    },
    checkin::{
        entities::{Checkin, CheckinConfig},
        ports::{CheckinRepository, CheckinService},
        value_objects::{
            CalendarEvent, CheckinFilter, CreateCheckinInput, MapMarker, Month, MyPoints,
            RANKING_LIMIT, RestaurantRankingBoard, UpdateCheckinInput, UserRankingBoard,
        },
    },
    common::{entities::app_errors::CoreError, ports::CacheStore, services::Service},
    health::ports::HealthCheckRepository,
    llm::ports::LLMClient,
    media::ports::MediaStorage,
    nutrition::ports::NutritionRepository,
    places::ports::PlacesClient,
    recommendation::ports::RecommendationRepository,
    restaurant::ports::RestaurantRepository,
};

fn validate_checkin(checkin: &Checkin) -> Result<(), CoreError> {
    let within = |value: &str| {
        let len = value.trim().chars().count();
        (1..=100).contains(&len)
    };

    if !within(&checkin.restaurant_name) {
        return Err(CoreError::Invalid(
            "restaurant_name must be between 1 and 100 characters".to_string(),
        ));
    }
    if !within(&checkin.item) {
        return Err(CoreError::Invalid(
            "item must be between 1 and 100 characters".to_string(),
        ));
    }
    if checkin.price < 0 {
        return Err(CoreError::Invalid("price must not be negative".to_string()));
    }
    if !(1..=5).contains(&checkin.rating) {
        return Err(CoreError::Invalid(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

fn month_range(month: &Month) -> Result<(chrono::NaiveDate, chrono::NaiveDate), CoreError> {
    month
        .range()
        .ok_or_else(|| CoreError::Invalid(format!("invalid month: {month}")))
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
    Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    CK: CheckinRepository,
    CS: CacheStore,
{
    async fn owned_checkin(&self, identity: &Identity, checkin_id: Uuid) -> Result<Checkin, CoreError> {
        self.checkin_repository
            .get_for_user(checkin_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)
    }

    fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.cache_store.get(key)?;
        match serde_json::from_value(value) {
            Ok(parsed) => {
                debug!("Ranking cache hit for {}", key);
                Some(parsed)
            }
            Err(e) => {
                warn!("Discarding malformed ranking cache entry {}: {}", key, e);
                None
            }
        }
    }

    fn remember<T: Serialize>(&self, key: String, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.cache_store.put(key, json, self.ranking_ttl),
            Err(e) => warn!("Failed to cache ranking {}: {}", key, e),
        }
    }
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> CheckinService
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
    async fn create_checkin(
        &self,
        identity: Identity,
        input: CreateCheckinInput,
    ) -> Result<Checkin, CoreError> {
        let checkin = Checkin::new(CheckinConfig {
            user_id: identity.id(),
            date: input.date,
            restaurant_name: input.restaurant_name.trim().to_string(),
            item: input.item.trim().to_string(),
            price: input.price,
            rating: input.rating,
            mood: input.mood,
            comment: input.comment,
            photo_url: input.photo_url,
            latitude: input.latitude,
            longitude: input.longitude,
        });
        validate_checkin(&checkin)?;

        let checkin = self.checkin_repository.create(checkin).await?;
        info!(user_id = %identity.id(), checkin_id = %checkin.id, "Check-in created");

        Ok(checkin)
    }

    async fn get_checkin(&self, identity: Identity, checkin_id: Uuid) -> Result<Checkin, CoreError> {
        self.owned_checkin(&identity, checkin_id).await
    }

    async fn update_checkin(
        &self,
        identity: Identity,
        input: UpdateCheckinInput,
    ) -> Result<Checkin, CoreError> {
        let mut checkin = self.owned_checkin(&identity, input.checkin_id).await?;

        if let Some(date) = input.date {
            checkin.date = date;
        }
        if let Some(restaurant_name) = input.restaurant_name {
            checkin.restaurant_name = restaurant_name.trim().to_string();
        }
        if let Some(item) = input.item {
            checkin.item = item.trim().to_string();
        }
        if let Some(price) = input.price {
            checkin.price = price;
        }
        if let Some(rating) = input.rating {
            checkin.rating = rating;
        }
        if let Some(mood) = input.mood {
            checkin.mood = mood;
        }
        if let Some(comment) = input.comment {
            checkin.comment = comment;
        }
        if input.photo_url.is_some() {
            checkin.photo_url = input.photo_url;
        }
        if input.latitude.is_some() {
            checkin.latitude = input.latitude;
        }
        if input.longitude.is_some() {
            checkin.longitude = input.longitude;
        }
        checkin.updated_at = Utc::now();
        validate_checkin(&checkin)?;

        self.checkin_repository.update(checkin).await
    }

    async fn delete_checkin(&self, identity: Identity, checkin_id: Uuid) -> Result<(), CoreError> {
        let checkin = self.owned_checkin(&identity, checkin_id).await?;

        self.checkin_repository
            .delete(checkin.id, identity.id())
            .await?;
        info!(user_id = %identity.id(), checkin_id = %checkin_id, "Check-in deleted");

        Ok(())
    }

    async fn list_checkins(
        &self,
        identity: Identity,
        filter: CheckinFilter,
    ) -> Result<Vec<Checkin>, CoreError> {
        self.checkin_repository
            .list_for_user(identity.id(), Some(filter))
            .await
    }

    async fn calendar(&self, identity: Identity) -> Result<Vec<CalendarEvent>, CoreError> {
        let checkins = self
            .checkin_repository
            .list_for_user(identity.id(), None)
            .await?;

        Ok(checkins
            .into_iter()
            .map(|c| CalendarEvent {
                title: format!("{} - {}", c.restaurant_name, c.item),
                start: c.date.format("%Y-%m-%d").to_string(),
                url: format!("/checkins/{}", c.id),
            })
            .collect())
    }

    async fn map_markers(&self, identity: Identity) -> Result<Vec<MapMarker>, CoreError> {
        let checkins = self
            .checkin_repository
            .list_for_user(identity.id(), None)
            .await?;

        Ok(checkins
            .into_iter()
            .filter_map(|c| {
                let (latitude, longitude) = c.coordinates()?;
                Some(MapMarker {
                    id: c.id,
                    restaurant_name: c.restaurant_name,
                    item: c.item,
                    date: c.date,
                    rating: c.rating,
                    mood: c.mood,
                    latitude,
                    longitude,
                })
            })
            .collect())
    }

    async fn user_ranking(&self, month: Option<Month>) -> Result<UserRankingBoard, CoreError> {
        let month = month.unwrap_or_else(Month::current);
        let key = format!("ranking:users:{month}");
        if let Some(board) = self.cached::<UserRankingBoard>(&key) {
            return Ok(board);
        }

        let (from, until) = month_range(&month)?;
        let entries = self
            .checkin_repository
            .user_ranking(from, until, RANKING_LIMIT)
            .await?;
        let board = UserRankingBoard {
            month: month.to_string(),
            entries,
        };

        self.remember(key, &board);
        Ok(board)
    }

    async fn restaurant_ranking(
        &self,
        month: Option<Month>,
    ) -> Result<RestaurantRankingBoard, CoreError> {
        let month = month.unwrap_or_else(Month::current);
        let key = format!("ranking:restaurants:{month}");
        if let Some(board) = self.cached::<RestaurantRankingBoard>(&key) {
            return Ok(board);
        }

        let (from, until) = month_range(&month)?;
        let entries = self
            .checkin_repository
            .restaurant_ranking(from, until, RANKING_LIMIT)
            .await?;
        let board = RestaurantRankingBoard {
            month: month.to_string(),
            entries,
        };

        self.remember(key, &board);
        Ok(board)
    }

    async fn my_points(&self, identity: Identity) -> Result<MyPoints, CoreError> {
        let checkins = self
            .checkin_repository
            .list_for_user(identity.id(), None)
            .await?;
        let month = Month::current();

        let (month_checkins, month_points) = checkins
            .iter()
            .filter(|c| month.contains(c.date))
            .fold((0, 0), |(count, points), c| (count + 1, points + c.points()));

        Ok(MyPoints {
            total_checkins: checkins.len() as i64,
            month_checkins,
            total_points: checkins.iter().map(Checkin::points).sum(),
            month_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;

    use crate::domain::{
        checkin::{
            entities::Mood,
            ports::CheckinService,
            value_objects::{CheckinFilter, CreateCheckinInput, Month, UpdateCheckinInput},
        },
        common::{entities::app_errors::CoreError, testing::TestContext},
    };

    fn input(date: NaiveDate) -> CreateCheckinInput {
        CreateCheckinInput {
            date,
            restaurant_name: "鬍鬚張".to_string(),
            item: "魯肉飯".to_string(),
            price: 60,
            rating: 4,
            mood: Mood::Happy,
            comment: "好吃".to_string(),
            photo_url: None,
            latitude: Some(24.968),
            longitude: Some(121.195),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn empty_update(checkin_id: uuid::Uuid) -> UpdateCheckinInput {
        UpdateCheckinInput {
            checkin_id,
            date: None,
            restaurant_name: None,
            item: None,
            price: Some(80),
            rating: None,
            mood: None,
            comment: None,
            photo_url: None,
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn other_users_cannot_touch_a_checkin() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let owner = ctx.identity("owner");
        let intruder = ctx.identity("intruder");

        let checkin = service
            .create_checkin(owner.clone(), input(date(1)))
            .await
            .unwrap();

        assert_eq!(
            service.get_checkin(intruder.clone(), checkin.id).await.unwrap_err(),
            CoreError::NotFound
        );
        assert_eq!(
            service
                .update_checkin(intruder.clone(), empty_update(checkin.id))
                .await
                .unwrap_err(),
            CoreError::NotFound
        );
        assert_eq!(
            service.delete_checkin(intruder, checkin.id).await.unwrap_err(),
            CoreError::NotFound
        );

        let updated = service
            .update_checkin(owner.clone(), empty_update(checkin.id))
            .await
            .unwrap();
        assert_eq!(updated.price, 80);
        service.delete_checkin(owner, checkin.id).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_rating_is_rejected() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let mut bad = input(date(2));
        bad.rating = 0;

        assert!(matches!(
            service.create_checkin(ctx.identity("owner"), bad).await,
            Err(CoreError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_calendar_links_entries() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let owner = ctx.identity("owner");

        service.create_checkin(owner.clone(), input(date(3))).await.unwrap();
        let latest = service
            .create_checkin(owner.clone(), input(date(9)))
            .await
            .unwrap();

        let list = service
            .list_checkins(owner.clone(), CheckinFilter { offset: 0, limit: 20 })
            .await
            .unwrap();
        assert_eq!(list[0].id, latest.id);

        let events = service.calendar(owner).await.unwrap();
        let event = events.iter().find(|e| e.start == "2025-03-09").unwrap();
        assert_eq!(event.title, "鬍鬚張 - 魯肉飯");
        assert_eq!(event.url, format!("/checkins/{}", latest.id));
    }

    #[tokio::test]
    async fn rankings_are_memoized() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let month = Month::parse("2025-03").unwrap();

        service.user_ranking(Some(month)).await.unwrap();
        service.user_ranking(Some(month)).await.unwrap();

        assert_eq!(ctx.ranking_queries(), 1);
    }

    #[tokio::test]
    async fn expired_rankings_are_queried_again() {
        let ctx = TestContext::new();
        let service = ctx.service_with_ranking_ttl(Duration::ZERO);
        let month = Month::parse("2025-03").unwrap();

        service.restaurant_ranking(Some(month)).await.unwrap();
        service.restaurant_ranking(Some(month)).await.unwrap();

        assert_eq!(ctx.ranking_queries(), 2);
    }
}
