use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        entries::{create_entry, delete_entry, get_entry, list_entries, update_entry},
        health::livez,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn bearer(owner_id: Uuid) -> String {
        format!("Bearer {owner_id}")
    }

    fn entry_body(piece: &str, played_on: &str) -> String {
        format!(
            "played_on={played_on}&duration_min=30&piece={piece}&bpm=100&tags=warmup&rating=4&notes="
        )
    }

    async fn create_entry_for(
        app: &Router,
        owner_id: Uuid,
        piece: &str,
        played_on: &str,
    ) -> serde_json::Value {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entries")
                    .header(AUTHORIZATION, bearer(owner_id))
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(entry_body(piece, played_on)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/livez")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_requires_authentication() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entries")
                    .header(AUTHORIZATION, bearer(Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert!(json.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_get_entry() {
        let app = create_app(AppState::default());
        let owner_id = Uuid::new_v4();

        let created = create_entry_for(&app, owner_id, "Nocturne", "2024-06-15").await;
        let entry_id = created["id"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let entry: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(entry["piece"], "Nocturne");
        assert_eq!(entry["owner_id"], owner_id.to_string());
    }

    #[tokio::test]
    async fn test_create_then_list_includes_entry() {
        let app = create_app(AppState::default());
        let owner_id = Uuid::new_v4();

        // Prime the cache before writing.
        let _ = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/entries")
                    .header(AUTHORIZATION, bearer(owner_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let created = create_entry_for(&app, owner_id, "Etude", "2024-06-15").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entries")
                    .header(AUTHORIZATION, bearer(owner_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 1);
        assert_eq!(json[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_create_invalid_duration_is_unprocessable() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/entries")
                    .header(AUTHORIZATION, bearer(Uuid::new_v4()))
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "played_on=2024-06-15&duration_min=0&piece=Etude&rating=4",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let message = String::from_utf8(body.to_vec()).unwrap();
        assert!(message.contains("duration_min"));
    }

    #[tokio::test]
    async fn test_unknown_selectors_fall_back_to_defaults() {
        let app = create_app(AppState::default());
        let owner_id = Uuid::new_v4();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entries?range=fortnight&sort=loudest")
                    .header(AUTHORIZATION, bearer(owner_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_entry() {
        let app = create_app(AppState::default());
        let owner_id = Uuid::new_v4();

        let created = create_entry_for(&app, owner_id, "Draft", "2024-06-15").await;
        let entry_id = created["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_id))
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(entry_body("Final", "2024-06-16")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let entry: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(entry["piece"], "Final");
        assert_eq!(entry["played_on"], "2024-06-16");
    }

    #[tokio::test]
    async fn test_cross_owner_access_is_not_found() {
        let app = create_app(AppState::default());
        let owner_a = Uuid::new_v4();
        let owner_b = Uuid::new_v4();

        let created = create_entry_for(&app, owner_a, "Private", "2024-06-15").await;
        let entry_id = created["id"].as_str().unwrap();

        // Read, update and delete as another owner all behave as not-found.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_b))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_b))
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(Body::from(entry_body("Hijacked", "2024-06-16")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_b))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The entry is still intact for its owner.
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_a))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let app = create_app(AppState::default());
        let owner_id = Uuid::new_v4();

        let created = create_entry_for(&app, owner_id, "Short-lived", "2024-06-15").await;
        let entry_id = created["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/entries/{entry_id}"))
                    .header(AUTHORIZATION, bearer(owner_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_not_found() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/entries/{}", Uuid::new_v4()))
                    .header(AUTHORIZATION, bearer(Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
