// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Accepted uploads: saved under the static uploads folder, classified, and
//! rendered with the composed message

use axum::http::StatusCode;
use dog_breed_app::storage::UploadStore;
use std::sync::atomic::Ordering;
use tower::ServiceExt;

use crate::common::{body_text, png_bytes, upload_request, Part, TestApp};

#[tokio::test]
async fn test_dog_upload_renders_breed_message() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let png = png_bytes(32, 24);
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("dog.jpg"),
        data: &png,
    }]);

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("What a cute dog! Is that a Labrador_retriever?<br>I'm 85% certain!"));
    assert!(page.contains("<img src=\"/display/dog.jpg\""));

    // A dog short-circuits the face detector
    assert_eq!(app.dog.calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.face.calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.breed.calls.load(Ordering::SeqCst), 1);

    let saved = app.config.upload_dir().join("dog.jpg");
    assert_eq!(std::fs::read(saved).unwrap(), png);
}

#[tokio::test]
async fn test_person_upload() {
    let app = TestApp::new(20, 1, "Dachshund").await;
    let png = png_bytes(16, 16);
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("me.png"),
        data: &png,
    }]);

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("That's not a dog, that's a person...<br>and they look like a Dachshund!"));
    assert_eq!(app.face.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_upload() {
    let app = TestApp::new(999, 0, "Beagle").await;
    let png = png_bytes(16, 16);
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("car.JPEG"),
        data: &png,
    }]);

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("I don't think that's a dog, but if I had to guess...<br>you look like a Beagle!"));
}

#[tokio::test]
async fn test_filename_is_sanitized_before_saving() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let png = png_bytes(8, 8);
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("../../my dog.png"),
        data: &png,
    }]);

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.uploads.list().await.unwrap(), vec!["my_dog.png".to_string()]);
    assert!(body_text(response).await.contains("/display/my_dog.png"));
}

#[tokio::test]
async fn test_other_fields_are_ignored() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let png = png_bytes(8, 8);
    let request = upload_request(&[
        Part {
            name: "caption",
            filename: None,
            data: b"my dog",
        },
        Part {
            name: "file",
            filename: Some("dog.png"),
            data: &png,
        },
    ]);

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.uploads.list().await.unwrap(), vec!["dog.png".to_string()]);
}

#[tokio::test]
async fn test_same_name_overwrites_previous_upload() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let first = png_bytes(8, 8);
    let second = png_bytes(12, 12);

    for data in [&first, &second] {
        let request = upload_request(&[Part {
            name: "file",
            filename: Some("dog.png"),
            data,
        }]);
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let saved = std::fs::read(app.config.upload_dir().join("dog.png")).unwrap();
    assert_eq!(saved, second);
}

#[tokio::test]
async fn test_undecodable_image_is_server_error() {
    let app = TestApp::new(200, 0, "Labrador_retriever").await;
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("broken.png"),
        data: b"definitely not a png",
    }]);

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // The file is persisted before decoding
    assert_eq!(app.uploads.list().await.unwrap(), vec!["broken.png".to_string()]);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = TestApp::with_limit(200, 0, "Labrador_retriever", 1024).await;
    let data = vec![0u8; 64 * 1024];
    let request = upload_request(&[Part {
        name: "file",
        filename: Some("big.png"),
        data: &data,
    }]);

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(app.classifier_calls(), 0);
    assert!(app.uploads.list().await.unwrap().is_empty());
}
