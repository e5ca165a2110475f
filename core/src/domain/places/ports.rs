use crate::domain::{
    common::entities::app_errors::CoreError,
    places::entities::{NearbySearch, PlaceDetails, PlaceSummary},
};

#[cfg_attr(test, mockall::automock)]
pub trait PlacesClient: Send + Sync {
    fn nearby_search(
        &self,
        search: NearbySearch,
    ) -> impl Future<Output = Result<Vec<PlaceSummary>, CoreError>> + Send;

    fn text_search(
        &self,
        query: String,
    ) -> impl Future<Output = Result<Vec<PlaceSummary>, CoreError>> + Send;

    fn place_details(
        &self,
        place_id: String,
    ) -> impl Future<Output = Result<PlaceDetails, CoreError>> + Send;

    /// Public photo URL for a photo reference returned by a search.
    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String;
}
