// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Classifier set construction and the end-to-end decision over fakes

use dog_breed_app::{
    vision::{ClassifierSet, VisionModelConfig},
    Verdict,
};
use std::sync::Arc;
use tempfile::TempDir;

use crate::common::{FixedBreedClassifier, FixedFaceDetector, FixedLabelDogDetector};

fn write_png(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("input.png");
    image::RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3]))
        .save(&path)
        .unwrap();
    path
}

fn fake_set(dog_label: usize, faces: usize) -> ClassifierSet {
    ClassifierSet::new(
        Arc::new(FixedFaceDetector::new(faces)),
        Arc::new(FixedLabelDogDetector::new(dog_label)),
        Arc::new(FixedBreedClassifier::new("Labrador_retriever")),
    )
}

#[test]
fn test_config_from_dir() {
    let config = VisionModelConfig::from_dir("/opt/models").with_intra_threads(0);

    assert_eq!(config.resnet50_model.to_str(), Some("/opt/models/resnet50.onnx"));
    assert_eq!(config.dog_names.to_str(), Some("/opt/models/dog_names.txt"));
    assert_eq!(config.intra_threads, 1);
}

#[test]
fn test_load_fails_without_models() {
    let dir = TempDir::new().unwrap();
    let config = VisionModelConfig::from_dir(dir.path());

    let err = ClassifierSet::load(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("dog_names.txt"));
}

#[test]
fn test_load_fails_with_labels_but_no_cascade() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("dog_names.txt"), "001.Affenpinscher\n").unwrap();
    let config = VisionModelConfig::from_dir(dir.path());

    let err = ClassifierSet::load(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("face detector"));
}

#[test]
fn test_dog_index_200_is_a_dog() {
    let dir = TempDir::new().unwrap();
    let image = write_png(&dir);

    let result = fake_set(200, 0).classify(&image).unwrap();

    assert_eq!(result.verdict, Verdict::Dog);
    assert_eq!(result.breed, "Labrador_retriever");
    assert!(result
        .message
        .starts_with("What a cute dog! Is that a Labrador_retriever?"));
}

#[test]
fn test_range_edges_through_the_set() {
    let dir = TempDir::new().unwrap();
    let image = write_png(&dir);

    assert_eq!(fake_set(150, 0).verdict(&image).unwrap(), Verdict::Unknown);
    assert_eq!(fake_set(151, 0).verdict(&image).unwrap(), Verdict::Dog);
    assert_eq!(fake_set(268, 0).verdict(&image).unwrap(), Verdict::Dog);
    assert_eq!(fake_set(269, 1).verdict(&image).unwrap(), Verdict::Person);
}

#[test]
fn test_app_message_for_person() {
    let dir = TempDir::new().unwrap();
    let image = write_png(&dir);

    let message = fake_set(0, 2).app_message(&image, "Poodle").unwrap();
    assert_eq!(
        message,
        "That's not a dog, that's a person...\nand they look like a Poodle!"
    );
}
