// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Turns classifier outputs into the message shown to the user

use std::path::Path;
use tracing::debug;

use crate::vision::{ClassifierSet, VisionError};

/// What the picture most likely shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Dog,
    Person,
    Unknown,
}

impl Verdict {
    /// Dog wins over person; person wins over nothing
    pub fn from_flags(dog: bool, face: bool) -> Self {
        if dog {
            Verdict::Dog
        } else if face {
            Verdict::Person
        } else {
            Verdict::Unknown
        }
    }

    pub fn message(self, breed: &str) -> String {
        match self {
            Verdict::Dog => format!("What a cute dog! Is that a {breed}?\nI'm 85% certain!"),
            Verdict::Person => {
                format!("That's not a dog, that's a person...\nand they look like a {breed}!")
            }
            Verdict::Unknown => format!(
                "I don't think that's a dog, but if I had to guess...\nyou look like a {breed}!"
            ),
        }
    }
}

/// Message for a picture given both detector flags and the predicted breed
pub fn compose_message(dog: bool, face: bool, breed: &str) -> String {
    Verdict::from_flags(dog, face).message(breed)
}

/// Result of running the whole classification pipeline on one upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub breed: String,
    pub verdict: Verdict,
    pub message: String,
}

impl ClassifierSet {
    /// Decide which message applies to the image at `path`
    ///
    /// The face detector only runs when no dog was found.
    pub fn verdict(&self, path: &Path) -> Result<Verdict, VisionError> {
        if self.dog.is_dog(path)? {
            return Ok(Verdict::Dog);
        }
        if self.face.has_face(path)? {
            return Ok(Verdict::Person);
        }
        Ok(Verdict::Unknown)
    }

    /// Message for the image at `path` given its predicted `breed`
    pub fn app_message(&self, path: &Path, breed: &str) -> Result<String, VisionError> {
        Ok(self.verdict(path)?.message(breed))
    }

    /// Predict the breed, then compose the message
    pub fn classify(&self, path: &Path) -> Result<Classification, VisionError> {
        let breed = self.breed.predict_breed(path)?;
        let verdict = self.verdict(path)?;
        debug!("{} -> {:?}, breed {}", path.display(), verdict, breed);
        Ok(Classification {
            message: verdict.message(&breed),
            breed,
            verdict,
        })
    }
}
