//! In-memory adapters for service tests.
//!
//! Every fake shares one [`State`] so a test can seed data through
//! [`TestContext`] and observe what the service wrote.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::{
    article::{
        entities::{Article, ArticleSummary, Comment},
        ports::ArticleRepository,
    },
    authentication::{
        entities::{GoogleProfile, Session, SocialAccount, User},
        ports::{OAuthProvider, SessionRepository, UserRepository},
        value_objects::Identity,
    },
    checkin::{
        entities::Checkin,
        ports::CheckinRepository,
        value_objects::{CheckinFilter, RestaurantRanking, UserRanking},
    },
    common::{
        AuthConfig, CampusConfig, entities::app_errors::CoreError, ports::CacheStore, round_to,
        services::Service,
    },
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
    llm::{entities::CompletionRequest, ports::LLMClient},
    media::{entities::MediaFolder, ports::MediaStorage},
    nutrition::{
        entities::{FoodRecord, NutritionInfo, PreferenceKind},
        ports::NutritionRepository,
        value_objects::{
            FoodRecordFilter, HealthyChoice, IngredientUsage, NutritionAverages, PreferenceGroup,
            RestaurantCalories,
        },
    },
    places::{
        entities::{NearbySearch, PlaceDetails, PlaceSummary},
        ports::PlacesClient,
    },
    recommendation::{entities::AiRecommendation, ports::RecommendationRepository},
    restaurant::{
        entities::{Category, MenuItem, RatingStats, Restaurant, RestaurantConfig, RestaurantSummary, Review},
        ports::RestaurantRepository,
        value_objects::{
            CategoryMatch, LocalMatchCriteria, MenuItemIngredient, MenuItemPreference,
            RestaurantQuery,
        },
    },
};

#[derive(Default)]
pub struct State {
    users: Vec<User>,
    social_accounts: Vec<SocialAccount>,
    sessions: Vec<Session>,
    categories: Vec<Category>,
    restaurants: Vec<Restaurant>,
    reviews: Vec<Review>,
    menu_items: Vec<MenuItem>,
    food_records: Vec<FoodRecord>,
    checkins: Vec<Checkin>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    recommendations: Vec<AiRecommendation>,
    cache: HashMap<String, (Value, Instant)>,
    llm_reply: Option<Result<String, CoreError>>,
    llm_calls: usize,
    nearby: Vec<PlaceSummary>,
    places_fail: bool,
    nearby_searches: usize,
    text_searches: Vec<String>,
    recommendation_log_fails: bool,
    ranking_queries: usize,
}

type Shared = Arc<Mutex<State>>;

fn lock(state: &Shared) -> MutexGuard<'_, State> {
    state.lock().unwrap()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl State {
    fn stats(&self, restaurant_id: Uuid) -> RatingStats {
        let ratings: Vec<i16> = self
            .reviews
            .iter()
            .filter(|r| r.restaurant_id == restaurant_id)
            .map(|r| r.rating)
            .collect();
        RatingStats::from_ratings(&ratings)
    }

    fn summary(&self, restaurant: &Restaurant) -> RestaurantSummary {
        let stats = self.stats(restaurant.id);
        RestaurantSummary {
            restaurant: restaurant.clone(),
            avg_rating: stats.avg_rating,
            review_count: stats.review_count,
        }
    }

    fn matching(&self, query: &RestaurantQuery) -> Vec<RestaurantSummary> {
        self.restaurants
            .iter()
            .filter(|r| r.is_active)
            .filter(|r| {
                query
                    .category_id
                    .is_none_or(|id| r.categories.iter().any(|c| c.id == id))
            })
            .filter(|r| {
                query.name_or_address.as_deref().is_none_or(|q| {
                    contains_ci(&r.name, q) || contains_ci(&r.address, q)
                })
            })
            .map(|r| self.summary(r))
            .filter(|s| query.min_rating.is_none_or(|min| s.avg_rating >= min))
            .collect()
    }

    fn username(&self, user_id: Option<Uuid>) -> Option<String> {
        let user_id = user_id?;
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.username.clone())
    }

    fn article_summary(&self, article: &Article) -> ArticleSummary {
        ArticleSummary {
            article: article.clone(),
            comment_count: self
                .comments
                .iter()
                .filter(|c| c.article_id == article.id)
                .count() as i64,
        }
    }
}

#[derive(Clone)]
pub struct FakeRestaurants(Shared);

impl RestaurantRepository for FakeRestaurants {
    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(lock(&self.0).categories.clone())
    }

    async fn get_categories_by_ids(&self, category_ids: Vec<Uuid>) -> Result<Vec<Category>, CoreError> {
        Ok(lock(&self.0)
            .categories
            .iter()
            .filter(|c| category_ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create_category(&self, category: Category) -> Result<Category, CoreError> {
        lock(&self.0).categories.push(category.clone());
        Ok(category)
    }

    async fn search_categories(&self, query: String, limit: u64) -> Result<Vec<CategoryMatch>, CoreError> {
        let state = lock(&self.0);
        Ok(state
            .categories
            .iter()
            .filter(|c| contains_ci(&c.name, &query))
            .take(limit as usize)
            .map(|c| CategoryMatch {
                category: c.clone(),
                restaurant_count: state
                    .restaurants
                    .iter()
                    .filter(|r| r.is_active && r.categories.iter().any(|rc| rc.id == c.id))
                    .count() as i64,
            })
            .collect())
    }

    async fn top_rated(&self, limit: u64) -> Result<Vec<RestaurantSummary>, CoreError> {
        let state = lock(&self.0);
        let mut summaries = state.matching(&RestaurantQuery::default());
        summaries.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
        summaries.truncate(limit as usize);
        Ok(summaries)
    }

    async fn count_restaurants(&self, query: RestaurantQuery) -> Result<u64, CoreError> {
        Ok(lock(&self.0).matching(&query).len() as u64)
    }

    async fn search_restaurants(
        &self,
        query: RestaurantQuery,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<RestaurantSummary>, CoreError> {
        Ok(lock(&self.0)
            .matching(&query)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn get_restaurant(&self, restaurant_id: Uuid) -> Result<Option<Restaurant>, CoreError> {
        Ok(lock(&self.0)
            .restaurants
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned())
    }

    async fn find_by_name_with_coordinates(&self, name: String) -> Result<Option<Restaurant>, CoreError> {
        Ok(lock(&self.0)
            .restaurants
            .iter()
            .find(|r| r.name == name && r.has_coordinates())
            .cloned())
    }

    async fn match_local(&self, criteria: LocalMatchCriteria) -> Result<Vec<Restaurant>, CoreError> {
        let state = lock(&self.0);
        Ok(state
            .restaurants
            .iter()
            .filter(|r| r.is_active)
            .filter(|r| {
                criteria
                    .cuisine_type
                    .as_deref()
                    .is_none_or(|cuisine| r.categories.iter().any(|c| contains_ci(&c.name, cuisine)))
            })
            .filter(|r| {
                criteria.specific_foods.is_empty()
                    || state.menu_items.iter().any(|m| {
                        m.restaurant_id == r.id
                            && criteria.specific_foods.iter().any(|f| contains_ci(&m.name, f))
                    })
            })
            .filter(|r| {
                criteria.search_keywords.is_empty()
                    || criteria.search_keywords.iter().any(|k| {
                        contains_ci(&r.name, k)
                            || r.description.as_deref().is_some_and(|d| contains_ci(d, k))
                    })
            })
            .cloned()
            .collect())
    }

    async fn create_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, CoreError> {
        lock(&self.0).restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn update_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, CoreError> {
        let mut state = lock(&self.0);
        let slot = state
            .restaurants
            .iter_mut()
            .find(|r| r.id == restaurant.id)
            .ok_or(CoreError::NotFound)?;
        *slot = restaurant.clone();
        Ok(restaurant)
    }

    async fn delete_restaurant(&self, restaurant_id: Uuid) -> Result<(), CoreError> {
        let mut state = lock(&self.0);
        state.restaurants.retain(|r| r.id != restaurant_id);
        state.reviews.retain(|r| r.restaurant_id != restaurant_id);
        state.menu_items.retain(|m| m.restaurant_id != restaurant_id);
        Ok(())
    }

    async fn rating_stats(&self, restaurant_id: Uuid) -> Result<RatingStats, CoreError> {
        Ok(lock(&self.0).stats(restaurant_id))
    }

    async fn list_reviews(&self, restaurant_id: Uuid) -> Result<Vec<Review>, CoreError> {
        Ok(lock(&self.0)
            .reviews
            .iter()
            .rev()
            .filter(|r| r.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn create_review(&self, review: Review) -> Result<Review, CoreError> {
        lock(&self.0).reviews.push(review.clone());
        Ok(review)
    }

    async fn list_menu_items(&self, restaurant_id: Uuid, only_available: bool) -> Result<Vec<MenuItem>, CoreError> {
        Ok(lock(&self.0)
            .menu_items
            .iter()
            .filter(|m| m.restaurant_id == restaurant_id && (!only_available || m.is_available))
            .cloned()
            .collect())
    }

    async fn get_menu_item(&self, menu_item_id: Uuid) -> Result<Option<MenuItem>, CoreError> {
        Ok(lock(&self.0)
            .menu_items
            .iter()
            .find(|m| m.id == menu_item_id)
            .cloned())
    }

    async fn list_available_menu_items(&self) -> Result<Vec<MenuItem>, CoreError> {
        Ok(lock(&self.0)
            .menu_items
            .iter()
            .filter(|m| m.is_available)
            .cloned()
            .collect())
    }

    async fn create_menu_item(&self, menu_item: MenuItem) -> Result<MenuItem, CoreError> {
        lock(&self.0).menu_items.push(menu_item.clone());
        Ok(menu_item)
    }

    async fn count_all(&self) -> Result<u64, CoreError> {
        Ok(lock(&self.0).restaurants.len() as u64)
    }
}

#[derive(Clone)]
pub struct FakeNutrition(Shared);

impl NutritionRepository for FakeNutrition {
    async fn averages(&self) -> Result<NutritionAverages, CoreError> {
        Ok(NutritionAverages::default())
    }

    async fn healthy_choices(&self, _max_calories: i32, _limit: u64) -> Result<Vec<HealthyChoice>, CoreError> {
        Ok(Vec::new())
    }

    async fn restaurant_calories(&self) -> Result<Vec<RestaurantCalories>, CoreError> {
        Ok(Vec::new())
    }

    async fn preference_groups(
        &self,
        _kind: PreferenceKind,
        _compatible: bool,
        _sample_size: u64,
    ) -> Result<Vec<PreferenceGroup>, CoreError> {
        Ok(Vec::new())
    }

    async fn top_ingredients(&self, _limit: u64, _sample_size: u64) -> Result<Vec<IngredientUsage>, CoreError> {
        Ok(Vec::new())
    }

    async fn get_nutrition_info(&self, _menu_item_id: Uuid) -> Result<Option<NutritionInfo>, CoreError> {
        Ok(None)
    }

    async fn list_menu_item_ingredients(&self, _menu_item_id: Uuid) -> Result<Vec<MenuItemIngredient>, CoreError> {
        Ok(Vec::new())
    }

    async fn list_menu_item_preferences(&self, _menu_item_id: Uuid) -> Result<Vec<MenuItemPreference>, CoreError> {
        Ok(Vec::new())
    }

    async fn create_food_record(&self, record: FoodRecord) -> Result<FoodRecord, CoreError> {
        lock(&self.0).food_records.push(record.clone());
        Ok(record)
    }

    async fn list_food_records(&self, user_id: Uuid, filter: FoodRecordFilter) -> Result<Vec<FoodRecord>, CoreError> {
        let mut records: Vec<FoodRecord> = lock(&self.0)
            .food_records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.consumed_at.cmp(&a.consumed_at));
        Ok(records
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn get_food_record(&self, record_id: Uuid) -> Result<Option<FoodRecord>, CoreError> {
        Ok(lock(&self.0)
            .food_records
            .iter()
            .find(|r| r.id == record_id)
            .cloned())
    }

    async fn delete_food_record(&self, record_id: Uuid) -> Result<(), CoreError> {
        lock(&self.0).food_records.retain(|r| r.id != record_id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeCheckins(Shared);

impl FakeCheckins {
    fn in_range(state: &State, from: NaiveDate, until: NaiveDate) -> Vec<Checkin> {
        state
            .checkins
            .iter()
            .filter(|c| c.date >= from && c.date < until)
            .cloned()
            .collect()
    }
}

impl CheckinRepository for FakeCheckins {
    async fn create(&self, checkin: Checkin) -> Result<Checkin, CoreError> {
        lock(&self.0).checkins.push(checkin.clone());
        Ok(checkin)
    }

    async fn get_for_user(&self, checkin_id: Uuid, user_id: Uuid) -> Result<Option<Checkin>, CoreError> {
        Ok(lock(&self.0)
            .checkins
            .iter()
            .find(|c| c.id == checkin_id && c.user_id == user_id)
            .cloned())
    }

    async fn update(&self, checkin: Checkin) -> Result<Checkin, CoreError> {
        let mut state = lock(&self.0);
        let slot = state
            .checkins
            .iter_mut()
            .find(|c| c.id == checkin.id && c.user_id == checkin.user_id)
            .ok_or(CoreError::NotFound)?;
        *slot = checkin.clone();
        Ok(checkin)
    }

    async fn delete(&self, checkin_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        lock(&self.0)
            .checkins
            .retain(|c| !(c.id == checkin_id && c.user_id == user_id));
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid, filter: Option<CheckinFilter>) -> Result<Vec<Checkin>, CoreError> {
        let mut checkins: Vec<Checkin> = lock(&self.0)
            .checkins
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        checkins.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        Ok(match filter {
            Some(filter) => checkins
                .into_iter()
                .skip(filter.offset as usize)
                .take(filter.limit as usize)
                .collect(),
            None => checkins,
        })
    }

    async fn user_ranking(&self, from: NaiveDate, until: NaiveDate, limit: u64) -> Result<Vec<UserRanking>, CoreError> {
        let mut state = lock(&self.0);
        state.ranking_queries += 1;

        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for checkin in Self::in_range(&state, from, until) {
            *counts.entry(checkin.user_id).or_default() += 1;
        }
        let mut ranking: Vec<UserRanking> = counts
            .into_iter()
            .map(|(user_id, checkin_count)| UserRanking {
                user_id,
                username: state.username(Some(user_id)).unwrap_or_default(),
                checkin_count,
            })
            .collect();
        ranking.sort_by(|a, b| b.checkin_count.cmp(&a.checkin_count));
        ranking.truncate(limit as usize);
        Ok(ranking)
    }

    async fn restaurant_ranking(
        &self,
        from: NaiveDate,
        until: NaiveDate,
        limit: u64,
    ) -> Result<Vec<RestaurantRanking>, CoreError> {
        let mut state = lock(&self.0);
        state.ranking_queries += 1;

        let mut ratings: HashMap<String, Vec<i16>> = HashMap::new();
        for checkin in Self::in_range(&state, from, until) {
            ratings.entry(checkin.restaurant_name).or_default().push(checkin.rating);
        }
        let mut ranking: Vec<RestaurantRanking> = ratings
            .into_iter()
            .map(|(restaurant_name, ratings)| RestaurantRanking {
                restaurant_name,
                checkin_count: ratings.len() as i64,
                avg_rating: round_to(RatingStats::from_ratings(&ratings).avg_rating, 1),
            })
            .collect();
        ranking.sort_by(|a, b| b.checkin_count.cmp(&a.checkin_count));
        ranking.truncate(limit as usize);
        Ok(ranking)
    }
}

#[derive(Clone)]
pub struct FakeArticles(Shared);

impl ArticleRepository for FakeArticles {
    async fn list_articles(&self, offset: u64, limit: u64) -> Result<Vec<ArticleSummary>, CoreError> {
        let state = lock(&self.0);
        let mut articles = state.articles.clone();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|a| state.article_summary(a))
            .collect())
    }

    async fn most_commented(&self, limit: u64) -> Result<Vec<ArticleSummary>, CoreError> {
        let state = lock(&self.0);
        let mut summaries: Vec<ArticleSummary> =
            state.articles.iter().map(|a| state.article_summary(a)).collect();
        summaries.sort_by(|a, b| b.comment_count.cmp(&a.comment_count));
        summaries.truncate(limit as usize);
        Ok(summaries)
    }

    async fn get_article(&self, article_id: Uuid) -> Result<Option<Article>, CoreError> {
        Ok(lock(&self.0)
            .articles
            .iter()
            .find(|a| a.id == article_id)
            .cloned())
    }

    async fn related_articles(&self, author_id: Uuid, exclude_id: Uuid, limit: u64) -> Result<Vec<Article>, CoreError> {
        Ok(lock(&self.0)
            .articles
            .iter()
            .filter(|a| a.author_id == Some(author_id) && a.id != exclude_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create_article(&self, article: Article) -> Result<Article, CoreError> {
        lock(&self.0).articles.push(article.clone());
        Ok(article)
    }

    async fn update_article(&self, article: Article) -> Result<Article, CoreError> {
        let mut state = lock(&self.0);
        let slot = state
            .articles
            .iter_mut()
            .find(|a| a.id == article.id)
            .ok_or(CoreError::NotFound)?;
        *slot = article.clone();
        Ok(article)
    }

    async fn delete_article(&self, article_id: Uuid) -> Result<(), CoreError> {
        let mut state = lock(&self.0);
        state.comments.retain(|c| c.article_id != article_id);
        state.articles.retain(|a| a.id != article_id);
        Ok(())
    }

    async fn count_articles(&self) -> Result<u64, CoreError> {
        Ok(lock(&self.0).articles.len() as u64)
    }

    async fn count_comments(&self) -> Result<u64, CoreError> {
        Ok(lock(&self.0).comments.len() as u64)
    }

    async fn list_comments(&self, article_id: Uuid) -> Result<Vec<Comment>, CoreError> {
        Ok(lock(&self.0)
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect())
    }

    async fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, CoreError> {
        Ok(lock(&self.0)
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .cloned())
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, CoreError> {
        lock(&self.0).comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), CoreError> {
        lock(&self.0).comments.retain(|c| c.id != comment_id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeRecommendations(Shared);

impl RecommendationRepository for FakeRecommendations {
    async fn save(&self, recommendation: AiRecommendation) -> Result<AiRecommendation, CoreError> {
        let mut state = lock(&self.0);
        if state.recommendation_log_fails {
            return Err(CoreError::InternalServerError);
        }
        state.recommendations.push(recommendation.clone());
        Ok(recommendation)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<AiRecommendation>, CoreError> {
        Ok(lock(&self.0)
            .recommendations
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Clone)]
pub struct FakeUsers(Shared);

impl UserRepository for FakeUsers {
    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        Ok(lock(&self.0).users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn upsert_social_user(&self, provider: String, profile: GoogleProfile) -> Result<User, CoreError> {
        let mut state = lock(&self.0);
        let existing = state
            .social_accounts
            .iter()
            .find(|s| s.provider == provider && s.provider_uid == profile.sub)
            .map(|s| s.user_id);

        if let Some(user_id) = existing {
            let user = state
                .users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(CoreError::NotFound)?;
            user.email = profile.email.clone();
            user.updated_at = Utc::now();
            return Ok(user.clone());
        }

        let username = profile.username();
        let user = User::new(
            username.clone(),
            profile.email.clone(),
            profile.name.clone().unwrap_or(username),
            profile.picture.clone(),
        );
        state.social_accounts.push(SocialAccount {
            id: Uuid::new_v4(),
            user_id: user.id,
            provider,
            provider_uid: profile.sub,
            extra_data: profile.raw,
            created_at: user.created_at,
            updated_at: user.created_at,
        });
        state.users.push(user.clone());
        Ok(user)
    }

    async fn get_social_account(&self, user_id: Uuid, provider: String) -> Result<Option<SocialAccount>, CoreError> {
        Ok(lock(&self.0)
            .social_accounts
            .iter()
            .find(|s| s.user_id == user_id && s.provider == provider)
            .cloned())
    }

    async fn count_users(&self) -> Result<u64, CoreError> {
        Ok(lock(&self.0).users.len() as u64)
    }
}

#[derive(Clone)]
pub struct FakeSessions(Shared);

impl SessionRepository for FakeSessions {
    async fn create(&self, session: Session) -> Result<Session, CoreError> {
        lock(&self.0).sessions.push(session.clone());
        Ok(session)
    }

    async fn get_by_id(&self, session_id: Uuid) -> Result<Option<Session>, CoreError> {
        Ok(lock(&self.0)
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned())
    }

    async fn revoke(&self, session_id: Uuid, revoked_at: DateTime<Utc>) -> Result<(), CoreError> {
        if let Some(session) = lock(&self.0).sessions.iter_mut().find(|s| s.id == session_id) {
            session.revoked_at = Some(revoked_at);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeHealth;

impl HealthCheckRepository for FakeHealth {
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        Ok(DatabaseHealthStatus::up("postgres".to_string(), 1))
    }

    async fn health(&self) -> Result<u64, CoreError> {
        Ok(1)
    }
}

#[derive(Clone)]
pub struct FakeLLM(Shared);

impl LLMClient for FakeLLM {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, CoreError> {
        let mut state = lock(&self.0);
        state.llm_calls += 1;
        state.llm_reply.clone().unwrap_or_else(|| Ok(String::new()))
    }
}

#[derive(Clone)]
pub struct FakePlaces(Shared);

impl PlacesClient for FakePlaces {
    async fn nearby_search(&self, _search: NearbySearch) -> Result<Vec<PlaceSummary>, CoreError> {
        let mut state = lock(&self.0);
        state.nearby_searches += 1;
        if state.places_fail {
            return Err(CoreError::ExternalServiceError("places unavailable".to_string()));
        }
        Ok(state.nearby.clone())
    }

    async fn text_search(&self, query: String) -> Result<Vec<PlaceSummary>, CoreError> {
        let mut state = lock(&self.0);
        if state.places_fail {
            return Err(CoreError::ExternalServiceError("places unavailable".to_string()));
        }
        state.text_searches.push(query);
        Ok(Vec::new())
    }

    async fn place_details(&self, _place_id: String) -> Result<PlaceDetails, CoreError> {
        Ok(PlaceDetails {
            name: None,
            formatted_address: None,
            rating: Some(4.5),
            website: Some("https://example.com".to_string()),
        })
    }

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!("https://maps.example/photo?maxwidth={max_width}&photoreference={photo_reference}")
    }
}

#[derive(Clone)]
pub struct FakeMedia;

impl MediaStorage for FakeMedia {
    async fn save(&self, folder: MediaFolder, extension: String, content: Bytes) -> Result<String, CoreError> {
        Ok(format!("/media/{folder}/{:08x}.{extension}", content.len()))
    }
}

#[derive(Clone)]
pub struct FakeOAuth;

impl OAuthProvider for FakeOAuth {
    fn authorization_url(&self, state: String) -> String {
        format!("https://accounts.google.com/o/oauth2/v2/auth?state={state}")
    }

    async fn exchange_code(&self, _code: String) -> Result<GoogleProfile, CoreError> {
        Ok(GoogleProfile {
            sub: "google-sub-1".to_string(),
            email: "student@cc.ncu.edu.tw".to_string(),
            name: Some("Student".to_string()),
            picture: None,
            raw: json!({"sub": "google-sub-1"}),
        })
    }
}

#[derive(Clone)]
pub struct FakeCache(Shared);

impl CacheStore for FakeCache {
    fn get(&self, key: &str) -> Option<Value> {
        lock(&self.0)
            .cache
            .get(key)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(value, _)| value.clone())
    }

    fn put(&self, key: String, value: Value, ttl: Duration) {
        lock(&self.0).cache.insert(key, (value, Instant::now() + ttl));
    }

    fn take(&self, key: &str) -> Option<Value> {
        lock(&self.0)
            .cache
            .remove(key)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(value, _)| value)
    }
}

pub type TestService = Service<
    FakeRestaurants,
    FakeNutrition,
    FakeCheckins,
    FakeArticles,
    FakeRecommendations,
    FakeUsers,
    FakeSessions,
    FakeHealth,
    FakeLLM,
    FakePlaces,
    FakeMedia,
    FakeOAuth,
    FakeCache,
>;

#[derive(Default)]
pub struct TestContext {
    state: Shared,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service(&self) -> TestService {
        self.service_with_ranking_ttl(Duration::from_secs(300))
    }

    pub fn service_with_ranking_ttl(&self, ranking_ttl: Duration) -> TestService {
        let state = &self.state;
        Service::new(
            FakeRestaurants(state.clone()),
            FakeNutrition(state.clone()),
            FakeCheckins(state.clone()),
            FakeArticles(state.clone()),
            FakeRecommendations(state.clone()),
            FakeUsers(state.clone()),
            FakeSessions(state.clone()),
            FakeHealth,
            FakeLLM(state.clone()),
            FakePlaces(state.clone()),
            FakeMedia,
            FakeOAuth,
            FakeCache(state.clone()),
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                session_ttl_seconds: 3600,
            },
            CampusConfig::default(),
            ranking_ttl,
        )
    }

    /// Registers a user with an active session.
    pub fn identity(&self, username: &str) -> Identity {
        let user = User::new(
            username.to_string(),
            format!("{username}@cc.ncu.edu.tw"),
            username.to_string(),
            None,
        );
        let session = Session::new(user.id, 3600);

        let mut state = lock(&self.state);
        state.users.push(user.clone());
        state.sessions.push(session.clone());

        Identity {
            user,
            session_id: session.id,
        }
    }

    pub fn seed_restaurant(&self, name: &str, address: &str) -> Restaurant {
        let restaurant = Restaurant::new(RestaurantConfig {
            name: name.to_string(),
            address: address.to_string(),
            phone: None,
            description: None,
            website: None,
            latitude: None,
            longitude: None,
            image_url: None,
            categories: Vec::new(),
        });
        lock(&self.state).restaurants.push(restaurant.clone());
        restaurant
    }

    pub fn seed_restaurant_at(&self, name: &str, latitude: f64, longitude: f64, image_url: &str) -> Restaurant {
        let restaurant = Restaurant::new(RestaurantConfig {
            name: name.to_string(),
            address: "桃園市中壢區".to_string(),
            phone: None,
            description: None,
            website: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
            image_url: Some(image_url.to_string()),
            categories: Vec::new(),
        });
        lock(&self.state).restaurants.push(restaurant.clone());
        restaurant
    }

    pub fn deactivate_restaurant(&self, restaurant_id: Uuid) {
        if let Some(restaurant) = lock(&self.state)
            .restaurants
            .iter_mut()
            .find(|r| r.id == restaurant_id)
        {
            restaurant.is_active = false;
        }
    }

    pub fn llm_replies(&self, text: &str) {
        lock(&self.state).llm_reply = Some(Ok(text.to_string()));
    }

    pub fn llm_fails(&self) {
        lock(&self.state).llm_reply = Some(Err(CoreError::ExternalServiceError(
            "completion endpoint unreachable".to_string(),
        )));
    }

    pub fn llm_calls(&self) -> usize {
        lock(&self.state).llm_calls
    }

    pub fn nearby_places(&self, places: Vec<PlaceSummary>) {
        lock(&self.state).nearby = places;
    }

    pub fn places_fail(&self) {
        lock(&self.state).places_fail = true;
    }

    pub fn nearby_searches(&self) -> usize {
        lock(&self.state).nearby_searches
    }

    pub fn recommendation_log_fails(&self) {
        lock(&self.state).recommendation_log_fails = true;
    }

    pub fn text_searches(&self) -> Vec<String> {
        lock(&self.state).text_searches.clone()
    }

    pub fn recommendation_log(&self) -> Vec<AiRecommendation> {
        lock(&self.state).recommendations.clone()
    }

    pub fn ranking_queries(&self) -> usize {
        lock(&self.state).ranking_queries
    }

    pub fn comment_count(&self) -> usize {
        lock(&self.state).comments.len()
    }
}
