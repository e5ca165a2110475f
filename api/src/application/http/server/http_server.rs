use std::sync::{Arc, OnceLock};

use crate::application::http::article::router::article_routes;
use crate::application::http::authentication::router::authentication_routes;
use crate::application::http::checkin::router::checkin_routes;
use crate::application::http::health::router::health_routes;
use crate::application::http::media::router::media_routes;
use crate::application::http::nutrition::router::nutrition_routes;
use crate::application::http::recommendation::router::recommendation_routes;
use crate::application::http::restaurant::router::restaurant_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use axum::Router;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::{PrometheusMetricLayer, metrics_exporter_prometheus::PrometheusHandle};
use ncufoodmap_core::{application::create_service, domain::common::NcuFoodMapConfig};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = NcuFoodMapConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect()
}

/// The recorder is process-global, so the pair is built once.
fn metrics() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static METRICS: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    METRICS.get_or_init(PrometheusMetricLayer::pair).clone()
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = allowed_origins(&state.args.server.allowed_origins);

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_origin(allowed_origins)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT,
            LOCATION,
        ])
        .allow_credentials(true);

    let (prometheus_layer, metric_handle) = metrics();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .merge(authentication_routes(state.clone()))
        .merge(restaurant_routes(state.clone()))
        .merge(nutrition_routes(state.clone()))
        .merge(checkin_routes(state.clone()))
        .merge(article_routes(state.clone()))
        .merge(recommendation_routes(state.clone()))
        .merge(media_routes(state.clone()))
        .merge(health_routes(&root_path))
        .nest_service(
            &format!("{}/media", root_path),
            ServeDir::new(&state.args.server.media_root),
        )
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use clap::Parser;
    use ncufoodmap_core::application::build_service;
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};

    use super::*;

    fn test_server() -> TestServer {
        let args = Args::parse_from(["ncufoodmap-api", "--jwt-secret", "test-secret"]);
        let config = NcuFoodMapConfig::from(args.clone());
        let service = build_service(DatabaseConnection::Disconnected, &config);
        let state = AppState::new(Arc::new(args), service);

        TestServer::new(router(state).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn liveness_does_not_need_the_database() {
        let server = test_server();

        let response = server.get("/health/live").await;
        response.assert_status_ok();
        response.assert_json(&json!({"status": "UP"}));
    }

    #[tokio::test]
    async fn readiness_reports_an_unreachable_database() {
        let server = test_server();

        let response = server.get("/health/ready").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["code"], "E_SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn protected_routes_require_a_bearer_token() {
        let server = test_server();

        let response = server.get("/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["code"], "E_UNAUTHORIZED");

        server
            .get("/checkins")
            .authorization_bearer("not-a-jwt")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_returns_a_google_authorization_url() {
        let server = test_server();

        let response = server.get("/auth/google/login").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        let state = body["state"].as_str().unwrap();
        let url = body["authorization_url"].as_str().unwrap();
        assert!(url.starts_with("https://accounts.google.com/"));
        assert!(url.contains(state));
    }

    #[tokio::test]
    async fn callback_without_code_is_a_bad_request() {
        let server = test_server();

        server
            .get("/auth/google/callback")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_recommendation_query_is_answered_in_the_body() {
        let server = test_server();

        let response = server
            .post("/recommendations")
            .json(&json!({"query": "   "}))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({"success": false, "error": "請輸入搜尋內容"}));
    }

    #[tokio::test]
    async fn short_search_text_yields_no_suggestions() {
        let server = test_server();

        let response = server.get("/search/suggestions").add_query_param("q", "麵").await;
        response.assert_status_ok();
        response.assert_json(&json!({"query": "麵", "suggestions": []}));
    }

    #[tokio::test]
    async fn invalid_ranking_month_is_rejected() {
        let server = test_server();

        server
            .get("/rankings/users")
            .add_query_param("month", "2025-13")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn review_with_out_of_range_rating_fails_validation() {
        let server = test_server();

        let response = server
            .post("/restaurants/0190b5f2-7c4e-7d2a-9a51-3b1f2c4d5e6f/reviews")
            .json(&json!({"author": "小明", "rating": 9, "comment": "好吃"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "E_VALIDATION");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let server = test_server();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();

        let paths = response.json::<Value>()["paths"].clone();
        assert!(paths.get("/restaurants/{restaurant_id}").is_some());
        assert!(paths.get("/recommendations").is_some());
    }
}
