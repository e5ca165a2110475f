use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::domain::{
    common::entities::app_errors::CoreError,
    places::{
        entities::{NearbySearch, PlaceDetails, PlaceSummary},
        ports::PlacesClient,
    },
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const LANGUAGE: &str = "zh-TW";
const DETAIL_FIELDS: &str = "name,formatted_address,rating,website";

#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: Geometry,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Photo {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    name: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    website: Option<String>,
}

impl From<PlaceResult> for PlaceSummary {
    fn from(result: PlaceResult) -> Self {
        Self {
            place_id: result.place_id,
            name: result.name,
            address: result
                .vicinity
                .or(result.formatted_address)
                .unwrap_or_default(),
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
            rating: result.rating,
            photo_reference: result.photos.into_iter().next().map(|p| p.photo_reference),
        }
    }
}

fn check_status(status: &str, error_message: Option<String>) -> Result<(), CoreError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => {
            let message = error_message.unwrap_or_default();
            error!("Places API returned {}: {}", other, message);
            Err(CoreError::ExternalServiceError(format!(
                "Places API returned {other}"
            )))
        }
    }
}

impl GooglePlacesClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, CoreError> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        debug!(endpoint, "calling Places API");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await
            .map_err(|e| {
                error!("Places API request failed: {}", e);
                CoreError::ExternalServiceError(format!("Places API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Places API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Places API returned error: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse Places response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse Places response: {}", e))
        })
    }
}

impl PlacesClient for GooglePlacesClient {
    async fn nearby_search(&self, search: NearbySearch) -> Result<Vec<PlaceSummary>, CoreError> {
        let response: SearchResponse = self
            .get(
                "nearbysearch",
                &[
                    (
                        "location",
                        format!("{},{}", search.latitude, search.longitude),
                    ),
                    ("radius", search.radius_m.to_string()),
                    ("keyword", search.keyword),
                    ("type", search.place_type),
                ],
            )
            .await?;
        check_status(&response.status, response.error_message)?;

        Ok(response.results.into_iter().map(PlaceSummary::from).collect())
    }

    async fn text_search(&self, query: String) -> Result<Vec<PlaceSummary>, CoreError> {
        let response: SearchResponse = self.get("textsearch", &[("query", query)]).await?;
        check_status(&response.status, response.error_message)?;

        Ok(response.results.into_iter().map(PlaceSummary::from).collect())
    }

    async fn place_details(&self, place_id: String) -> Result<PlaceDetails, CoreError> {
        let response: DetailsResponse = self
            .get(
                "details",
                &[
                    ("place_id", place_id),
                    ("fields", DETAIL_FIELDS.to_string()),
                ],
            )
            .await?;
        check_status(&response.status, response.error_message)?;

        Ok(response
            .result
            .map(|result| PlaceDetails {
                name: result.name,
                formatted_address: result.formatted_address,
                rating: result.rating,
                website: result.website,
            })
            .unwrap_or_default())
    }

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!(
            "{}/photo?maxwidth={}&photoreference={}&key={}",
            self.base_url,
            max_width,
            urlencoding::encode(photo_reference),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_result_prefers_vicinity() {
        let body = r#"{
            "status": "OK",
            "results": [{
                "place_id": "abc",
                "name": "小木屋鬆餅",
                "vicinity": "中壢區中大路300號",
                "formatted_address": "320桃園市中壢區中大路300號",
                "geometry": {"location": {"lat": 24.968, "lng": 121.192}},
                "rating": 4.3,
                "photos": [{"photo_reference": "ref-1"}, {"photo_reference": "ref-2"}]
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let place = PlaceSummary::from(response.results.into_iter().next().unwrap());

        assert_eq!(place.address, "中壢區中大路300號");
        assert_eq!(place.photo_reference.as_deref(), Some("ref-1"));
        assert_eq!(place.rating, Some(4.3));
    }

    #[test]
    fn zero_results_is_not_an_error() {
        assert!(check_status("ZERO_RESULTS", None).is_ok());
        assert!(check_status("REQUEST_DENIED", Some("bad key".to_string())).is_err());
    }

    #[test]
    fn photo_url_encodes_reference() {
        let client = GooglePlacesClient::with_base_url("k".to_string(), "https://places.test/".to_string());
        assert_eq!(
            client.photo_url("a b", 400),
            "https://places.test/photo?maxwidth=400&photoreference=a%20b&key=k"
        );
    }
}
