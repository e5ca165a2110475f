use std::collections::HashSet;

use tracing::{error, info, warn};

use crate::domain::{
    article::ports::ArticleRepository,
    authentication::ports::{OAuthProvider, SessionRepository, UserRepository},
    checkin::ports::CheckinRepository,
    common::{entities::app_errors::CoreError, ports::CacheStore, round_to, services::Service},
    health::ports::HealthCheckRepository,
    llm::{
        entities::CompletionRequest,
        parsing::{extract_json_object, strip_code_fences},
        ports::LLMClient,
    },
    media::ports::MediaStorage,
    nutrition::ports::NutritionRepository,
    places::{
        entities::{NearbySearch, PlaceSummary},
        geo::haversine_km,
        ports::PlacesClient,
    },
    recommendation::{
        entities::{
            AiRecommendation, AiRecommendationConfig, MatchedRestaurant, Recommendation,
            errors::RecommendationError,
        },
        ports::{RecommendationRepository, RecommendationService},
        prompts::{matcher_prompt, store_type_prompt},
        value_objects::{
            LOCAL_MATCH_THRESHOLD, MAX_RECOMMENDATIONS, MAX_REMOTE_MATCHES, MatchOutput,
            MatcherAnalysis, PHOTO_MAX_WIDTH, StoreSuggestion,
        },
    },
    restaurant::{ports::RestaurantRepository, value_objects::LocalMatchCriteria},
};

const MATCHER_UNAVAILABLE: &str = "AI服務暫時不可用，請稍後再試。";
const MATCHER_UNPARSEABLE: &str = "無法解析AI回應，請換個說法再試一次。";

fn places_failure(e: CoreError) -> CoreError {
    error!("Place search failed: {}", e);
    RecommendationError::PlacesFailure.into()
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
    Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    RE: RestaurantRepository,
    RC: RecommendationRepository,
    LLM: LLMClient,
    PL: PlacesClient,
{
    async fn suggest_store_type(&self, query: &str) -> Result<StoreSuggestion, CoreError> {
        let request = CompletionRequest::new(store_type_prompt(query), 1000)
            .with_top_k(50)
            .with_top_p(0.7)
            .with_repetition_penalty(1.1);

        let text = self.llm_client.complete(request).await.map_err(|e| {
            error!("Store type completion failed: {}", e);
            RecommendationError::AiFailure(e.to_string())
        })?;

        let cleaned = strip_code_fences(&text);
        StoreSuggestion::parse(cleaned).map_err(|e| {
            error!("Unusable store type response {:?}: {}", cleaned, e);
            e.into()
        })
    }

    async fn candidate_places(&self, store_type: &str) -> Result<Vec<PlaceSummary>, CoreError> {
        let search = NearbySearch::restaurants(
            self.campus.latitude,
            self.campus.longitude,
            self.campus.radius_km,
            store_type.to_string(),
        );
        let nearby = self
            .places_client
            .nearby_search(search)
            .await
            .map_err(places_failure)?;
        if !nearby.is_empty() {
            return Ok(nearby);
        }

        self.places_client
            .text_search(format!("{store_type} 中央大學附近"))
            .await
            .map_err(places_failure)
    }

    async fn accept_place(
        &self,
        query: &str,
        suggestion: &StoreSuggestion,
        place: PlaceSummary,
        distance: f64,
    ) -> Result<Recommendation, CoreError> {
        let details = self
            .places_client
            .place_details(place.place_id.clone())
            .await
            .map_err(places_failure)?;
        let photo_url = place
            .photo_reference
            .as_deref()
            .map(|reference| self.places_client.photo_url(reference, PHOTO_MAX_WIDTH));
        let local_image_url = self
            .restaurant_repository
            .find_by_name_with_coordinates(place.name.clone())
            .await
            .map_err(places_failure)?
            .and_then(|restaurant| restaurant.image_url);

        let address = details
            .formatted_address
            .filter(|a| !a.is_empty())
            .unwrap_or(place.address);

        self.recommendation_repository
            .save(AiRecommendation::new(AiRecommendationConfig {
                query: query.to_string(),
                store_type: suggestion.store_type.clone(),
                store_name: place.name.clone(),
                address: address.clone(),
                latitude: place.latitude,
                longitude: place.longitude,
                ai_analysis: suggestion.analysis.clone(),
            }))
            .await
            .map_err(places_failure)?;

        Ok(Recommendation {
            name: place.name,
            address,
            lat: place.latitude,
            lng: place.longitude,
            store_type: suggestion.store_type.clone(),
            analysis: suggestion.analysis.clone(),
            distance: round_to(distance, 2),
            rating: details.rating.unwrap_or(0.0),
            photo_url,
            local_image_url,
            website: details.website.unwrap_or_default(),
        })
    }

    async fn local_matches(
        &self,
        analysis: &MatcherAnalysis,
    ) -> Result<Vec<MatchedRestaurant>, CoreError> {
        let criteria = LocalMatchCriteria {
            cuisine_type: (!analysis.cuisine_type.is_empty()).then(|| analysis.cuisine_type.clone()),
            specific_foods: analysis.specific_foods.clone(),
            search_keywords: analysis.search_keywords.clone(),
        };
        let restaurants = self.restaurant_repository.match_local(criteria).await?;

        let mut matches = Vec::with_capacity(restaurants.len());
        for restaurant in restaurants {
            let stats = self.restaurant_repository.rating_stats(restaurant.id).await?;
            matches.push(MatchedRestaurant {
                id: Some(restaurant.id),
                place_id: None,
                name: restaurant.name,
                address: restaurant.address,
                lat: restaurant.latitude,
                lng: restaurant.longitude,
                rating: stats.rounded(),
                image_url: restaurant.image_url,
                from_google: false,
            });
        }

        Ok(matches)
    }

    async fn remote_matches(&self, analysis: &MatcherAnalysis) -> Vec<PlaceSummary> {
        let Some(keyword) = analysis.remote_keyword() else {
            return Vec::new();
        };
        let search = NearbySearch::restaurants(
            self.campus.latitude,
            self.campus.longitude,
            self.campus.radius_km,
            keyword,
        );

        match self.places_client.nearby_search(search).await {
            Ok(mut places) => {
                places.truncate(MAX_REMOTE_MATCHES);
                places
            }
            Err(e) => {
                warn!("Matcher places search failed: {}", e);
                Vec::new()
            }
        }
    }
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> RecommendationService
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
    async fn recommend(&self, query: String) -> Result<Vec<Recommendation>, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RecommendationError::EmptyQuery.into());
        }
        info!(query = %query, "Recommending restaurants");

        let suggestion = self.suggest_store_type(query).await?;
        let places = self.candidate_places(&suggestion.store_type).await?;
        if places.is_empty() {
            return Err(RecommendationError::NoPlacesFound.into());
        }

        let mut recommendations = Vec::new();
        for place in places {
            if recommendations.len() >= MAX_RECOMMENDATIONS {
                break;
            }
            let distance = haversine_km(
                self.campus.latitude,
                self.campus.longitude,
                place.latitude,
                place.longitude,
            );
            if distance > self.campus.radius_km {
                continue;
            }
            recommendations.push(self.accept_place(query, &suggestion, place, distance).await?);
        }

        if recommendations.is_empty() {
            return Err(RecommendationError::NothingWithinRadius.into());
        }
        recommendations.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        Ok(recommendations)
    }

    async fn match_restaurants(&self, query: String) -> Result<MatchOutput, CoreError> {
        let query = query.trim().to_string();
        if query.is_empty() {
            return Err(RecommendationError::EmptyQuery.into());
        }

        let failed = |query: String, message: &str| MatchOutput {
            query,
            analysis: None,
            error: Some(message.to_string()),
            results: Vec::new(),
        };

        let text = match self
            .llm_client
            .complete(CompletionRequest::new(matcher_prompt(&query), 800))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                error!("Matcher completion failed: {}", e);
                return Ok(failed(query, MATCHER_UNAVAILABLE));
            }
        };
        let Some(value) = extract_json_object(&text) else {
            warn!("Matcher response had no JSON object: {:?}", text);
            return Ok(failed(query, MATCHER_UNPARSEABLE));
        };
        let analysis = MatcherAnalysis::from_value(&value);

        let mut results = self.local_matches(&analysis).await?;
        if results.len() < LOCAL_MATCH_THRESHOLD {
            let mut seen: HashSet<String> = results.iter().map(|r| r.name.clone()).collect();
            for place in self.remote_matches(&analysis).await {
                if !seen.insert(place.name.clone()) {
                    continue;
                }
                let image_url = place
                    .photo_reference
                    .as_deref()
                    .map(|reference| self.places_client.photo_url(reference, PHOTO_MAX_WIDTH));
                results.push(MatchedRestaurant {
                    id: None,
                    place_id: Some(place.place_id),
                    name: place.name,
                    address: place.address,
                    lat: Some(place.latitude),
                    lng: Some(place.longitude),
                    rating: place.rating.unwrap_or(0.0),
                    image_url,
                    from_google: true,
                });
            }
        }

        Ok(MatchOutput {
            query,
            analysis: Some(analysis),
            error: None,
            results,
        })
    }

    async fn history(&self, limit: u64) -> Result<Vec<AiRecommendation>, CoreError> {
        self.recommendation_repository
            .recent(limit.clamp(1, 100))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        common::{entities::app_errors::CoreError, testing::TestContext},
        places::entities::PlaceSummary,
        recommendation::{entities::errors::RecommendationError, ports::RecommendationService},
    };

    fn place(name: &str, latitude: f64, longitude: f64) -> PlaceSummary {
        PlaceSummary {
            place_id: format!("pid-{name}"),
            name: name.to_string(),
            address: "桃園市中壢區".to_string(),
            latitude,
            longitude,
            rating: Some(4.0),
            photo_reference: Some(format!("ref-{name}")),
        }
    }

    const STORE_TYPE_REPLY: &str =
        "```json\n{\"store_type\": \"拉麵\", \"analysis\": \"天冷適合熱湯\"}\n```";

    fn expect_recommendation_error(result: Result<impl std::fmt::Debug, CoreError>) -> RecommendationError {
        match result {
            Err(CoreError::Recommendation(e)) => e,
            other => panic!("expected a recommendation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_query_is_rejected_without_calling_the_model() {
        let ctx = TestContext::new();

        let result = ctx.service().recommend("   ".to_string()).await;

        assert_eq!(expect_recommendation_error(result), RecommendationError::EmptyQuery);
        assert_eq!(ctx.llm_calls(), 0);
    }

    #[tokio::test]
    async fn malformed_reply_is_reported() {
        let ctx = TestContext::new();
        ctx.llm_replies("我推薦拉麵店");

        let result = ctx.service().recommend("想吃熱的".to_string()).await;

        assert_eq!(
            expect_recommendation_error(result),
            RecommendationError::MalformedAiResponse
        );
    }

    #[tokio::test]
    async fn model_failure_is_reported() {
        let ctx = TestContext::new();
        ctx.llm_fails();

        let result = ctx.service().recommend("想吃熱的".to_string()).await;

        assert!(matches!(
            expect_recommendation_error(result),
            RecommendationError::AiFailure(_)
        ));
    }

    #[tokio::test]
    async fn places_within_radius_are_sorted_logged_and_enriched() {
        let ctx = TestContext::new();
        ctx.llm_replies(STORE_TYPE_REPLY);
        ctx.nearby_places(vec![
            place("遠一點拉麵", 24.9900, 121.2100),
            place("太遠拉麵", 25.0478, 121.5170),
            place("隔壁拉麵", 24.9690, 121.1960),
        ]);
        ctx.seed_restaurant_at("隔壁拉麵", 24.9690, 121.1960, "/media/restaurant_images/a.jpg");

        let recommendations = ctx.service().recommend("想吃熱的".to_string()).await.unwrap();

        let names: Vec<_> = recommendations.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["隔壁拉麵", "遠一點拉麵"]);
        assert_eq!(
            recommendations[0].local_image_url.as_deref(),
            Some("/media/restaurant_images/a.jpg")
        );
        assert_eq!(recommendations[0].store_type, "拉麵");
        assert!(recommendations[0].photo_url.as_deref().unwrap().contains("ref-隔壁拉麵"));
        assert_eq!(ctx.recommendation_log().len(), 2);
    }

    #[tokio::test]
    async fn falls_back_to_text_search_then_gives_up() {
        let ctx = TestContext::new();
        ctx.llm_replies(STORE_TYPE_REPLY);

        let result = ctx.service().recommend("想吃熱的".to_string()).await;

        assert_eq!(expect_recommendation_error(result), RecommendationError::NoPlacesFound);
        assert_eq!(ctx.text_searches(), vec!["拉麵 中央大學附近".to_string()]);
    }

    #[tokio::test]
    async fn nothing_within_radius() {
        let ctx = TestContext::new();
        ctx.llm_replies(STORE_TYPE_REPLY);
        ctx.nearby_places(vec![place("台北拉麵", 25.0478, 121.5170)]);

        let result = ctx.service().recommend("想吃熱的".to_string()).await;

        assert_eq!(
            expect_recommendation_error(result),
            RecommendationError::NothingWithinRadius
        );
        assert!(ctx.recommendation_log().is_empty());
    }

    #[tokio::test]
    async fn places_failure_is_reported() {
        let ctx = TestContext::new();
        ctx.llm_replies(STORE_TYPE_REPLY);
        ctx.places_fail();

        let result = ctx.service().recommend("想吃熱的".to_string()).await;

        assert_eq!(expect_recommendation_error(result), RecommendationError::PlacesFailure);
    }

    #[tokio::test]
    async fn matcher_merges_local_results_first_without_duplicates() {
        let ctx = TestContext::new();
        ctx.llm_replies(
            r#"分析如下：{"cuisine_type": "", "specific_foods": [], "search_keywords": ["拉麵",],}"#,
        );
        ctx.seed_restaurant("中大拉麵", "中壢區中大路1號");
        ctx.nearby_places(vec![
            place("中大拉麵", 24.9690, 121.1960),
            place("一風堂", 24.9600, 121.2000),
        ]);

        let output = ctx
            .service()
            .match_restaurants("想吃拉麵".to_string())
            .await
            .unwrap();

        let flags: Vec<_> = output
            .results
            .iter()
            .map(|r| (r.name.as_str(), r.from_google))
            .collect();
        assert_eq!(flags, [("中大拉麵", false), ("一風堂", true)]);
        assert_eq!(output.analysis.unwrap().search_keywords, ["拉麵"]);
    }

    #[tokio::test]
    async fn failing_recommendation_log_is_reported_as_search_error() {
        let ctx = TestContext::new();
        ctx.llm_replies(STORE_TYPE_REPLY);
        ctx.nearby_places(vec![place("隔壁拉麵", 24.9690, 121.1960)]);
        ctx.recommendation_log_fails();

        let result = ctx.service().recommend("想吃熱的".to_string()).await;

        assert_eq!(expect_recommendation_error(result), RecommendationError::PlacesFailure);
    }

    #[tokio::test]
    async fn matcher_skips_places_when_enough_local_results() {
        let ctx = TestContext::new();
        ctx.llm_replies(r#"{"cuisine_type": "", "search_keywords": ["拉麵"]}"#);
        for name in ["中大拉麵", "後門拉麵", "宵夜拉麵"] {
            ctx.seed_restaurant(name, "中壢區中大路");
        }
        ctx.nearby_places(vec![place("一風堂", 24.9600, 121.2000)]);

        let output = ctx
            .service()
            .match_restaurants("想吃拉麵".to_string())
            .await
            .unwrap();

        assert_eq!(output.results.len(), 3);
        assert!(output.results.iter().all(|r| !r.from_google));
        assert_eq!(ctx.nearby_searches(), 0);
    }

    #[tokio::test]
    async fn matcher_keeps_at_most_ten_remote_results() {
        let ctx = TestContext::new();
        ctx.llm_replies(r#"{"cuisine_type": "", "search_keywords": ["咖哩"]}"#);
        ctx.nearby_places(
            (0..12)
                .map(|i| place(&format!("咖哩屋{i}"), 24.9690, 121.1960))
                .collect(),
        );

        let output = ctx
            .service()
            .match_restaurants("想吃咖哩".to_string())
            .await
            .unwrap();

        assert_eq!(output.results.len(), 10);
        assert!(output.results.iter().all(|r| r.from_google));
        assert_eq!(output.results[0].name, "咖哩屋0");
        assert_eq!(ctx.nearby_searches(), 1);
    }

    #[tokio::test]
    async fn matcher_reports_unavailable_model() {
        let ctx = TestContext::new();
        ctx.llm_fails();

        let output = ctx
            .service()
            .match_restaurants("想吃拉麵".to_string())
            .await
            .unwrap();

        assert!(output.error.is_some());
        assert!(output.results.is_empty());
    }
}
