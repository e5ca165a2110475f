use serde::{Deserialize, Serialize};

/// One hit of a nearby or text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    /// `vicinity` for nearby searches, `formatted_address` for text searches.
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub photo_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: u32,
    pub keyword: String,
    pub place_type: String,
}

impl NearbySearch {
    pub fn restaurants(latitude: f64, longitude: f64, radius_km: f64, keyword: String) -> Self {
        Self {
            latitude,
            longitude,
            radius_m: (radius_km * 1000.0).round() as u32,
            keyword,
            place_type: "restaurant".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_converted_to_meters() {
        let search = NearbySearch::restaurants(24.9684, 121.1955, 5.0, "拉麵".to_string());
        assert_eq!(search.radius_m, 5000);
        assert_eq!(search.place_type, "restaurant");
    }
}
