// tests/set_language.rs

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};

use common::{send, test_app, MemoryLeadStore, ScriptedCrm, ScriptedNotifier};

fn app() -> common::TestApp {
    test_app(MemoryLeadStore::default(), ScriptedCrm::failing(), ScriptedNotifier::failing())
}

#[tokio::test]
async fn valid_language_sets_cookie_and_returns_to_referer() {
    let app = app();
    let request = Request::builder()
        .uri("/i18n/setlang?language=ru")
        .header(header::HOST, "faw.uz")
        .header(header::REFERER, "https://faw.uz/products/")
        .body(Body::empty())
        .unwrap();

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "https://faw.uz/products/");
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("django_language=ru"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=31536000"));
}

#[tokio::test]
async fn form_post_is_accepted() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/i18n/setlang")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("language=en"))
        .unwrap();

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(response.headers()[header::SET_COOKIE].to_str().unwrap().starts_with("django_language=en"));
}

#[tokio::test]
async fn unsupported_language_changes_nothing() {
    let app = app();
    let request = Request::builder()
        .uri("/i18n/setlang?language=fr")
        .header(header::REFERER, "/news/")
        .body(Body::empty())
        .unwrap();

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn health_is_up() {
    let app = app();
    let response = send(&app.router, Request::builder().uri("/api/health").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
}
