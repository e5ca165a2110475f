use std::{collections::HashMap, str::FromStr};

use axum::{extract::FromRequestParts, http::request::Parts};

use super::server::api_entities::api_error::ApiError;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub offset: u64,
    pub limit: u64,
}

impl PaginationParams {
    pub fn new(offset: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            offset: offset.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Raw query string, read leniently: a value that does not parse counts as absent.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn from_query_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn from_query_string(query: &str) -> Self {
        Self::from_query_map(serde_urlencoded::from_str(query).unwrap_or_default())
    }

    /// Trimmed text value; blank counts as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.text(key).and_then(|v| v.parse().ok())
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.parsed("offset"), self.parsed("limit"))
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query_string(parts.uri.query().unwrap_or("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let params = QueryParams::from_query_string("");
        assert_eq!(
            params.pagination(),
            PaginationParams {
                offset: 0,
                limit: 20
            }
        );
    }

    #[test]
    fn pagination_parse() {
        let params = QueryParams::from_query_string("offset=10&limit=50");
        assert_eq!(params.pagination().offset, 10);
        assert_eq!(params.pagination().limit, 50);
    }

    #[test]
    fn limit_is_clamped() {
        let cases = [("limit=0", 1), ("limit=500", 100), ("limit=-3", 20), ("limit=abc", 20)];

        for (query, expected) in cases {
            let params = QueryParams::from_query_string(query);
            assert_eq!(params.pagination().limit, expected, "query {query}");
        }
    }

    #[test]
    fn invalid_values_count_as_absent() {
        let params = QueryParams::from_query_string("page=two&min_rating=4.5&q=%20%20");
        assert_eq!(params.parsed::<u64>("page"), None);
        assert_eq!(params.parsed::<f64>("min_rating"), Some(4.5));
        assert_eq!(params.text("q"), None);
    }

    #[test]
    fn text_is_url_decoded_and_trimmed() {
        let params = QueryParams::from_query_string("q=%E6%8B%89%E9%BA%B5+");
        assert_eq!(params.text("q").as_deref(), Some("拉麵"));
    }
}
