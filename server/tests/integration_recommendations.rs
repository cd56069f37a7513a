use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use server::AppContext;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;
use vidrec_core::VectorizerOptions;

fn write_dataset(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("cleaned.csv");
    fs::write(
        &path,
        "id,title,channelName,viewCount\n\
         a,Cocomelon Nursery Rhymes,Cocomelon,1234567\n\
         b,Cooking Show,ChefTV,\n\
         c,ABC Song for Kids,KidsTV,42\n",
    )
    .unwrap();
    path
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn recommendations_are_ranked() {
    let dir = tempdir().unwrap();
    let app = server::build_app_from_path(write_dataset(dir.path()));

    let (status, json) = call(app, "/api/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[2]["id"], "b");
    assert_eq!(arr[2]["views"], "N/A");
    let a = arr.iter().find(|v| v["id"] == "a").unwrap();
    assert_eq!(a["views"], "1,234,567");
    assert_eq!(a["channelName"], "Cocomelon");
    assert_eq!(a["imageUrl"], "https://img.youtube.com/vi/a/hqdefault.jpg");
}

#[tokio::test]
async fn repeated_calls_are_identical() {
    let dir = tempdir().unwrap();
    let app = server::build_app_from_path(write_dataset(dir.path()));
    let (_, first) = call(app.clone(), "/api/recommendations").await;
    let (_, second) = call(app, "/api/recommendations").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_dataset_returns_server_error() {
    let dir = tempdir().unwrap();
    let app = server::build_app_from_path(dir.path().join("absent.csv"));

    let (status, json) = call(app, "/api/recommendations").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Data could not be loaded.");
}

#[tokio::test]
async fn header_only_dataset_returns_empty_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cleaned.csv");
    fs::write(&path, "id,title,channelName,viewCount\n").unwrap();
    let app = server::build_app_from_path(path);

    let (status, json) = call(app, "/api/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Array(vec![]));
}

#[tokio::test]
async fn home_serves_banner_and_cors() {
    let dir = tempdir().unwrap();
    let app = server::build_app_from_path(dir.path().join("absent.csv"));
    let req = Request::get("/").header("Origin", "http://localhost:3000").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("/api/recommendations"));
}

#[tokio::test]
async fn stemming_context_matches_plural_keywords() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cleaned.csv");
    fs::write(&path, "id,title,channelName\nx,Weather,News\ny,Phonic Song,Teacher\n").unwrap();
    let options = VectorizerOptions { stem: true, ..VectorizerOptions::default() };
    let app = server::build_app(AppContext::load(&path, "phonics songs", options));

    let (status, json) = call(app, "/api/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["id"], "y");
}
