use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use iptv_catalog::{
    config::Config,
    repositories::JsonChannelRepository,
    services::CatalogService,
    web::{create_router, AppState},
};

const ADMIN_USER: &str = "admin";
const ADMIN_PASSWORD: &str = "test-password";

struct TestApp {
    router: Router,
    catalog: Arc<CatalogService>,
}

async fn test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let mut config = Config::default();
    config.admin.username = ADMIN_USER.to_string();
    config.admin.password = ADMIN_PASSWORD.to_string();
    configure(&mut config);

    let repository = Arc::new(JsonChannelRepository::in_memory());
    let catalog = Arc::new(CatalogService::new(repository, &config.import).await);
    catalog.seed_defaults().await.unwrap();

    let router = create_router(AppState::new(config, catalog.clone()).unwrap());
    TestApp { router, catalog }
}

async fn test_app() -> TestApp {
    test_app_with(|_| {}).await
}

fn admin_auth() -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", ADMIN_USER, ADMIN_PASSWORD))
    )
}

// Helper function to send requests to the app
async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Body>,
    content_type: &str,
) -> (StatusCode, Value) {
    let mut request_builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        request_builder = request_builder.header(header::AUTHORIZATION, auth);
    }

    let request = match body {
        Some(body) => request_builder
            .header(header::CONTENT_TYPE, content_type)
            .body(body)
            .unwrap(),
        None => request_builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send_request(app, Method::GET, uri, None, None, "").await
}

async fn admin_json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    send_request(
        app,
        method,
        uri,
        Some(&admin_auth()),
        Some(Body::from(body.to_string())),
        "application/json",
    )
    .await
}

async fn admin_playlist(app: &Router, uri: &str, playlist: &str) -> (StatusCode, Value) {
    send_request(
        app,
        Method::POST,
        uri,
        Some(&admin_auth()),
        Some(Body::from(playlist.to_string())),
        "audio/x-mpegurl",
    )
    .await
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;
    let (status, body) = get(&app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["channels"], 8);
}

#[tokio::test]
async fn test_categories_start_with_pseudo_categories() {
    let app = test_app().await;
    let (status, body) = get(&app.router, "/api/v1/categories").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["all", "favorites", "news", "entertainment", "sports", "music", "documentary", "movies"]
    );
}

#[tokio::test]
async fn test_list_filter_and_search() {
    let app = test_app().await;

    let (status, body) = get(&app.router, "/api/v1/channels").await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["channel_number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());

    let (_, body) = get(&app.router, "/api/v1/channels?category=entertainment").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, body) = get(&app.router, "/api/v1/channels?search=cl%C3%A1ssicos").await;
    assert_eq!(body["data"][0]["name"], "Cine Clássicos");

    let (status, _) = get(&app.router, "/api/v1/channels?category=cartoons").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_channel_and_stream_redirect() {
    let app = test_app().await;
    let (_, body) = get(&app.router, "/api/v1/channels?search=Amazon").await;
    let id = body["data"][0]["id"].as_str().unwrap().to_string();
    let stream_url = body["data"][0]["stream_url"].as_str().unwrap().to_string();

    let (status, body) = get(&app.router, &format!("/api/v1/channels/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Amazon Sat");

    let request = Request::builder()
        .uri(format!("/api/v1/channels/{}/stream", id))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], stream_url.as_str());

    let (status, _) = get(&app.router, &format!("/api/v1/channels/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app.router, "/api/v1/channels/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorite_toggle_bumps_version() {
    let app = test_app().await;
    let (_, before) = get(&app.router, "/api/v1/catalog/version").await;
    let id = app.catalog.search("Music Hits").await.unwrap()[0].id;

    let uri = format!("/api/v1/channels/{}/favorite", id);
    let (status, body) = send_request(&app.router, Method::POST, &uri, None, None, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_favorite"], true);

    let (_, favorites) = get(&app.router, "/api/v1/channels?category=favorites").await;
    assert_eq!(favorites["data"].as_array().unwrap().len(), 1);

    let (_, after) = get(&app.router, "/api/v1/catalog/version").await;
    assert!(after["data"]["version"].as_i64().unwrap() > before["data"]["version"].as_i64().unwrap());
    assert!(after["data"]["param"].as_str().unwrap().starts_with("v="));
}

#[tokio::test]
async fn test_admin_routes_require_credentials() {
    let app = test_app().await;
    let body = json!({"name": "X", "stream_url": "https://x"});

    let (status, _) = send_request(
        &app.router,
        Method::POST,
        "/api/v1/admin/channels",
        None,
        Some(Body::from(body.to_string())),
        "application/json",
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = format!("Basic {}", STANDARD.encode("admin:wrong"));
    let (status, _) = send_request(
        &app.router,
        Method::POST,
        "/api/v1/admin/import/sample",
        Some(&wrong),
        None,
        "",
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.catalog.search("").await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_admin_channel_crud() {
    let app = test_app().await;

    let (status, body) = admin_json(
        &app.router,
        Method::POST,
        "/api/v1/admin/channels",
        json!({
            "name": "Rede Nova",
            "stream_url": "https://nova.example/live.m3u8",
            "category": "news",
            "description": "Canal de teste"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["channel_number"], 9);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = admin_json(
        &app.router,
        Method::PUT,
        &format!("/api/v1/admin/channels/{}", id),
        json!({
            "name": "Rede Nova HD",
            "stream_url": "https://nova.example/hd.m3u8",
            "category": "movies"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Rede Nova HD");
    assert_eq!(body["data"]["channel_number"], 9);

    let (status, _) = send_request(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/admin/channels/{}", id),
        Some(&admin_auth()),
        None,
        "",
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app.router, &format!("/api/v1/channels/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_create_rejects_invalid_channel() {
    let app = test_app().await;
    let (status, body) = admin_json(
        &app.router,
        Method::POST,
        "/api/v1/admin/channels",
        json!({"name": "", "stream_url": "rtmp://nope"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_import_playlist_body() {
    let app = test_app().await;
    let playlist = "#EXTM3U\n\
        #EXTINF:-1 tvg-logo=\"https://x/logo.png\" group-title=\"Sports\",ESPN Test\n\
        https://example.com/stream.m3u8\n\
        #EXTINF:-1 group-title=\"info-doc\",Info Doc\n\
        https://example.com/info.m3u8\n";

    let (status, body) = admin_playlist(&app.router, "/api/v1/admin/import/preview", playlist).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["channels"].as_array().unwrap().len(), 2);
    assert_eq!(app.catalog.search("").await.unwrap().len(), 8);

    let (status, body) = admin_playlist(&app.router, "/api/v1/admin/import", playlist).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["imported"], 2);
    assert_eq!(body["data"]["channels"][0]["channel_number"], 9);
    assert_eq!(body["data"]["channels"][0]["category"], "sports");
    assert_eq!(body["data"]["channels"][1]["category"], "news");

    let (status, body) = admin_playlist(&app.router, "/api/v1/admin/import", playlist).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imported"], 0);
    assert_eq!(body["data"]["duplicates"], 2);
}

#[tokio::test]
async fn test_import_without_valid_channels_is_unprocessable() {
    let app = test_app().await;
    let (status, body) =
        admin_playlist(&app.router, "/api/v1/admin/import", "#EXTM3U\nhttp://orphan\n").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "no valid channels found in playlist");
}

#[tokio::test]
async fn test_import_over_size_limit_is_rejected() {
    let app = test_app_with(|config| config.import.max_playlist_bytes = 64).await;
    let playlist = format!("#EXTM3U\n#EXTINF:-1,Big\nhttps://example.com/{}\n", "a".repeat(128));

    let (status, _) = admin_playlist(&app.router, "/api/v1/admin/import", &playlist).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_import_sample_playlist() {
    let app = test_app().await;
    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/v1/admin/import/sample",
        Some(&admin_auth()),
        None,
        "",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["imported"], 7);
    assert_eq!(body["data"]["warnings"][0], "missing_header");
}

#[tokio::test]
async fn test_import_respects_channel_limit() {
    let app = test_app_with(|config| config.import.max_channels = 10).await;
    let (status, body) = send_request(
        &app.router,
        Method::POST,
        "/api/v1/admin/import/sample",
        Some(&admin_auth()),
        None,
        "",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["imported"], 2);
    assert_eq!(body["data"]["rejected"], 5);
}
