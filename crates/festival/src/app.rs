use axum::{
    http::{header, Method, StatusCode},
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        events::{delete_event, list_events, search_events, update_event},
        health::{livez, readyz},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/events", get(list_events))
        .route("/events/", get(list_events))
        .route("/events/search/{query}", get(search_events))
        .route("/events/{id}", put(update_event).delete(delete_event))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use festival_core::event::Event;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_events(app: &Router, uri: &str) -> Vec<Event> {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn put_json(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn delete(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn titles(events: &[Event]) -> Vec<&str> {
        events.iter().filter_map(|e| e.title.as_deref()).collect()
    }

    #[tokio::test]
    async fn test_list_events_empty() {
        let app = create_app(AppState::default());

        let events = get_events(&app, "/api/events").await;

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_list_events_decorates_every_event() {
        let app = create_app(AppState::with_demo_data().await);

        let events = get_events(&app, "/api/events").await;

        assert_eq!(
            titles(&events),
            vec![
                "GrasPop Metal Meeting [2]",
                "Rock Werchter [1]",
                "Hellfest [3]",
                "Download Festival [0]"
            ]
        );
        let graspop_bands: Vec<_> = events[0]
            .bands()
            .iter()
            .flatten()
            .filter_map(|b| b.name.as_deref())
            .collect();
        assert_eq!(graspop_bands, vec!["Metallica [2]", "Muse [1]"]);
    }

    #[tokio::test]
    async fn test_list_events_trailing_slash() {
        let app = create_app(AppState::with_demo_data().await);

        let events = get_events(&app, "/api/events/").await;

        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn test_list_events_serializes_camel_case() {
        let app = create_app(AppState::with_demo_data().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

        assert_eq!(json[0]["imgUrl"], "img/1000.jpeg");
        assert_eq!(json[0]["nbStars"], 5);
        assert_eq!(json[3]["comment"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_search_by_path() {
        let app = create_app(AppState::with_demo_data().await);

        let events = get_events(&app, "/api/events/search/Wa").await;

        assert_eq!(
            titles(&events),
            vec![
                "GrasPop Metal Meeting [2]",
                "Rock Werchter [1]",
                "Hellfest [3]"
            ]
        );
    }

    #[tokio::test]
    async fn test_search_by_query_parameter() {
        let app = create_app(AppState::with_demo_data().await);

        let events = get_events(&app, "/api/events?query=alice").await;

        assert_eq!(
            titles(&events),
            vec!["GrasPop Metal Meeting [2]", "Rock Werchter [1]"]
        );
    }

    #[tokio::test]
    async fn test_search_blank_query_parameter_returns_everything() {
        let app = create_app(AppState::with_demo_data().await);

        let events = get_events(&app, "/api/events?query=%20%20").await;

        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn test_search_without_match_returns_empty_list() {
        let app = create_app(AppState::with_demo_data().await);

        let events = get_events(&app, "/api/events/search/zzz").await;

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_update_event_keeps_absent_fields() {
        let state = AppState::with_demo_data().await;
        let app = create_app(state.clone());

        let response = put_json(
            &app,
            "/api/events/1",
            r#"{"title":"GrasPop 2025","nbStars":3,"comment":"Muddy"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let stored = state.event_repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.title.as_deref(), Some("GrasPop 2025"));
        assert_eq!(stored.nb_stars, Some(3));
        assert_eq!(stored.comment.as_deref(), Some("Muddy"));
        assert_eq!(stored.img_url.as_deref(), Some("img/1000.jpeg"));
        assert_eq!(stored.bands().len(), 2);
    }

    #[tokio::test]
    async fn test_update_then_list_shows_undecorated_title_decorated_once() {
        let app = create_app(AppState::with_demo_data().await);

        put_json(&app, "/api/events/2", r#"{"title":"Werchter"}"#).await;
        let events = get_events(&app, "/api/events").await;

        assert_eq!(events[1].title.as_deref(), Some("Werchter [1]"));
    }

    #[tokio::test]
    async fn test_update_unknown_event_returns_404() {
        let state = AppState::with_demo_data().await;
        let app = create_app(state.clone());

        let response = put_json(&app, "/api/events/999", r#"{"title":"Ghost"}"#).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.event_repo.find_by_id(999).await.unwrap(), None);
        assert_eq!(state.event_repo.find_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_malformed_json_returns_400() {
        let state = AppState::with_demo_data().await;
        let app = create_app(state.clone());

        let response = put_json(&app, "/api/events/1", r#"{"title":"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let stored = state.event_repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.title.as_deref(), Some("GrasPop Metal Meeting"));
    }

    #[tokio::test]
    async fn test_delete_event_removes_it() {
        let app = create_app(AppState::with_demo_data().await);

        let response = delete(&app, "/api/events/1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let events = get_events(&app, "/api/events").await;
        let ids: Vec<_> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_delete_unknown_event_returns_200() {
        let app = create_app(AppState::with_demo_data().await);

        let response = delete(&app, "/api/events/999").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_events(&app, "/api/events").await.len(), 4);
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_reports_event_count() {
        let app = create_app(AppState::with_demo_data().await);

        let response = app
            .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["healthy"], true);
        assert_eq!(json["events"], 4);
    }
}
