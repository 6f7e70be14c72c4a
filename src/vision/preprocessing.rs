// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Model-specific normalization of the shared `[1, 224, 224, 3]` RGB tensor

use ndarray::{Array4, Axis};

/// Per-channel ImageNet means in BGR order, as used by ResNet50 ("caffe" mode)
pub const RESNET50_BGR_MEAN: [f32; 3] = [103.939, 116.779, 123.68];

/// Prepare a raw RGB tensor for ResNet50
///
/// Steps:
/// 1. Reorder channels RGB -> BGR
/// 2. Subtract the ImageNet mean of each channel (no scaling)
pub fn preprocess_resnet50(tensor: &Array4<f32>) -> Array4<f32> {
    let mut out = tensor.clone();
    for (bgr_channel, mean) in RESNET50_BGR_MEAN.iter().enumerate() {
        let rgb_channel = 2 - bgr_channel;
        let source = tensor.index_axis(Axis(3), rgb_channel);
        out.index_axis_mut(Axis(3), bgr_channel)
            .zip_mut_with(&source, |dst, &src| *dst = src - mean);
    }
    out
}

/// Prepare a raw RGB tensor for Xception: scale pixels to `[-1, 1]`
pub fn preprocess_xception(tensor: &Array4<f32>) -> Array4<f32> {
    tensor.mapv(|v| v / 127.5 - 1.0)
}

/// Index of the highest score, or `None` for an empty vector
///
/// NaN scores never win.
pub fn top1_index(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
