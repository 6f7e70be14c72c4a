// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Rejected uploads flash a message, redirect to `/` and never reach the
//! classifiers or the upload directory

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use dog_breed_app::storage::UploadStore;
use tower::ServiceExt;

use crate::common::{body_text, png_bytes, set_cookie_pair, upload_request, Part, TestApp};

/// POST the request, assert the flash redirect, then follow it and return
/// the rendered page
async fn post_and_follow(app: &TestApp, request: Request<Body>) -> String {
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = set_cookie_pair(&response).expect("flash cookie set on redirect");

    let follow = Request::builder()
        .uri("/")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let page = app.router.clone().oneshot(follow).await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    body_text(page).await
}

#[tokio::test]
async fn test_missing_file_part() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let request = upload_request(&[Part {
        name: "caption",
        filename: None,
        data: b"hello",
    }]);

    let page = post_and_follow(&app, request).await;

    assert!(page.contains("No file part"));
    assert_eq!(app.classifier_calls(), 0);
    assert!(app.uploads.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_multipart_post_is_missing_file_part() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("file=dog.jpg"))
        .unwrap();

    let page = post_and_follow(&app, request).await;

    assert!(page.contains("No file part"));
    assert_eq!(app.classifier_calls(), 0);
    assert!(app.uploads.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_field_without_filename_is_missing_file_part() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let png = png_bytes(8, 8);
    let request = upload_request(&[Part {
        name: "file",
        filename: None,
        data: &png,
    }]);

    let page = post_and_follow(&app, request).await;

    assert!(page.contains("No file part"));
    assert!(!page.contains("No image selected"));
    assert_eq!(app.classifier_calls(), 0);
    assert!(app.uploads.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_filename() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let request = upload_request(&[Part {
        name: "file",
        filename: Some(""),
        data: b"",
    }]);

    let page = post_and_follow(&app, request).await;

    assert!(page.contains("No image selected for uploading"));
    assert_eq!(app.classifier_calls(), 0);
    assert!(app.uploads.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_disallowed_extension() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let png = png_bytes(8, 8);
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("photo.exe"),
        data: &png,
    }]);

    let page = post_and_follow(&app, request).await;

    assert!(page.contains("Allowed image types are -&gt; png, jpg, jpeg"));
    assert_eq!(app.classifier_calls(), 0);
    assert!(app.uploads.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_flash_is_consumed_once() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("notes.txt"),
        data: b"not an image",
    }]);

    let response = app.router.clone().oneshot(request).await.unwrap();
    let cookie = set_cookie_pair(&response).unwrap();

    let first = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The page clears the cookie it just rendered
    let cleared = set_cookie_pair(&first).expect("flash cookie removed");
    assert_eq!(cleared, "flash=");
    assert!(body_text(first).await.contains("Allowed image types"));

    let second = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(!body_text(second).await.contains("Allowed image types"));
}
