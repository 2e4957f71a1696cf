use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use velto_config::{Config, UserConfig};
use velto_core::{MockAuthProvider, RequestStore};

use crate::{create_router, AppState};

fn test_state() -> AppState {
    let mut config = Config::default();
    config.requests.creation_latency_ms = 0;
    config.auth.latency_ms = 0;
    let store = RequestStore::sample().unwrap();
    AppState::new(config, store, Arc::new(MockAuthProvider::new(Duration::ZERO)))
}

fn test_router() -> (AppState, Router) {
    let state = test_state();
    (state.clone(), create_router(state))
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Sign in through the form and return the `name=token` cookie pair
async fn sign_in(router: &Router) -> String {
    let response = router
        .clone()
        .oneshot(post_form(
            "/sign-in",
            None,
            "email=alice%40example.com&password=secret",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (_, router) = test_router();
    let response = router.oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_index_redirects_anonymous_to_sign_in() {
    let (_, router) = test_router();
    let response = router.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/sign-in");
}

#[tokio::test]
async fn test_protected_page_redirects_anonymous() {
    let (_, router) = test_router();
    let response = router.oneshot(get("/dashboard", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/sign-in");
}

#[tokio::test]
async fn test_protected_api_returns_unauthorized() {
    let (_, router) = test_router();
    let response = router.oneshot(get("/api/requests", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_cookie_is_anonymous() {
    let (_, router) = test_router();
    let response = router
        .oneshot(get("/dashboard", Some("velto_session=bogus")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_sign_in_opens_dashboard() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(get("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Welcome back, Alice!"));
    assert!(html.contains("€ 495,50"));
    assert!(html.contains("€ 175,00"));

    let response = router.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");
}

#[tokio::test]
async fn test_sign_in_with_missing_password_fails() {
    let (_, router) = test_router();
    let response = router
        .oneshot(post_form("/sign-in", None, "email=alice%40example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_htmx_sign_in_failure_returns_alert() {
    let (_, router) = test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/sign-in")
        .header("hx-request", "true")
        .body(Body::from("email=&password="))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("role='alert'"));
    assert!(!html.contains("<html"));
}

#[tokio::test]
async fn test_sign_out_invalidates_session() {
    let (state, router) = test_router();
    let cookie = sign_in(&router).await;
    assert_eq!(state.sessions.active_sessions(), 1);

    let response = router
        .clone()
        .oneshot(post_form("/sign-out", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.sessions.active_sessions(), 0);

    let response = router.oneshot(get("/dashboard", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_api_requests_filters_by_query() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;
    let response = router
        .oneshot(get("/api/requests?q=COFFEE", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["requests"][0]["id"], "5");
    assert_eq!(json["status"], "all");
}

#[tokio::test]
async fn test_api_requests_keeps_whitespace_in_query() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(get("/api/requests?q=payment%20", Some(&cookie)))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["query"], "payment ");
    assert_eq!(json["total_count"], 0);

    let response = router
        .oneshot(get("/api/requests?q=%20%20%20", Some(&cookie)))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["query"], "   ");
    assert_eq!(json["total_count"], 0);
}

#[tokio::test]
async fn test_search_results_whitespace_query_matches_nothing() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;
    let response = router
        .oneshot(get("/search/results?q=%20%20&status=all", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No results found"));
    assert!(!html.contains("Coffee meetup payment"));
}

#[tokio::test]
async fn test_anonymous_stats_reports_unauthorized_code() {
    let (_, router) = test_router();
    let response = router.oneshot(get("/api/stats", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_sign_in_again_replaces_previous_session() {
    let (state, router) = test_router();
    let first = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(post_form(
            "/sign-in",
            Some(&first),
            "email=alice%40example.com&password=secret",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let second = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();
    assert_ne!(first, second);
    assert_eq!(state.sessions.active_sessions(), 1);

    let response = router
        .clone()
        .oneshot(get("/dashboard", Some(&first)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = router.oneshot(get("/dashboard", Some(&second))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_requests_rejects_invalid_status() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;
    let response = router
        .oneshot(get("/api/requests?status=refunded", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_request_detail_and_missing() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(get("/api/requests/5", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["payments"].as_array().unwrap().len(), 3);

    let response = router
        .oneshot(get("/api/requests/999", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["code"], "REQUEST_NOT_FOUND");
}

#[tokio::test]
async fn test_api_request_share() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;
    let response = router
        .oneshot(get("/api/requests/2/share", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["share"]["title"], "Dinner split with friends at Restaurant De Kas");
    assert_eq!(json["share"]["url"], "https://velto.app/pay/def456");
    assert!(json["whatsapp_url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/?text="));
}

#[tokio::test]
async fn test_search_results_fragment() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(get("/search/results?q=coffee&status=all", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Coffee meetup payment"));
    assert!(!html.contains("Restaurant De Kas"));

    let response = router
        .oneshot(get("/search/results?q=coffee&status=expired", Some(&cookie)))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("No results found"));
}

#[tokio::test]
async fn test_request_detail_page() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;

    let response = router
        .clone()
        .oneshot(get("/request/1", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Payments Received (1)"));
    assert!(html.contains("Alice Johnson"));

    let response = router
        .oneshot(get("/request/999", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Request not found"));
}

#[tokio::test]
async fn test_create_rejects_zero_amount() {
    let (state, router) = test_router();
    let cookie = sign_in(&router).await;
    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .header("hx-request", "true")
        .header(header::COOKIE, &cookie)
        .body(Body::from("amount=0&description=Lunch"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Amount must be greater than 0"));
    assert!(!html.contains("Payment Link Created!"));
    assert_eq!(state.store.len(), 5);
}

#[tokio::test]
async fn test_create_rejects_amount_below_cent() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;
    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .header("hx-request", "true")
        .header(header::COOKIE, &cookie)
        .body(Body::from("amount=0.001&description=Gum"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Amount can have at most 2 decimal places"));
    assert!(!html.contains("Payment Link Created!"));
}

#[tokio::test]
async fn test_create_returns_link() {
    let (state, router) = test_router();
    let cookie = sign_in(&router).await;
    let request = Request::builder()
        .method("POST")
        .uri("/create")
        .header("hx-request", "true")
        .header(header::COOKIE, &cookie)
        .body(Body::from("amount=12%2C50&description=Team+lunch"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Payment Link Created!"));
    assert!(html.contains("€ 12,50"));
    assert!(html.contains(&state.config.requests.link_base_url));
    assert!(html.contains("https://wa.me/?text="));
    assert_eq!(state.store.len(), 5);
}

#[tokio::test]
async fn test_api_create_request() {
    let (_, router) = test_router();
    let cookie = sign_in(&router).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/requests")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from(r#"{"amount": "20.00", "description": "Pizza night"}"#))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["request"]["description"], "Pizza night");
    assert_eq!(json["share"]["title"], "Payment Request");

    let request = Request::builder()
        .method("POST")
        .uri("/api/requests")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from(r#"{"amount": "5", "description": "  "}"#))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_redirects_without_mutation() {
    let (state, router) = test_router();
    let cookie = sign_in(&router).await;
    let response = router
        .oneshot(post_form("/request/2/delete", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");
    assert!(state.store.get("2").is_some());
}

#[tokio::test]
async fn test_settings_hides_passwords() {
    let mut state = test_state();
    state.config.auth.users.push(UserConfig {
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        password: "hunter2".to_string(),
        avatar_url: None,
    });
    let router = create_router(state);
    let cookie = sign_in(&router).await;
    let response = router
        .oneshot(get("/api/settings", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    assert!(!text.contains("hunter2"));
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["currency"]["code"], "EUR");
    assert_eq!(json["auth"]["users"][0]["email"], "john@example.com");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (_, router) = test_router();
    let response = router.oneshot(get("/nowhere", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page Not Found"));
}
