//! Cached image lookup for the picture screen.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::data::repository::PictureRepository;

/// A base64 image payload that passed validation on its way out of the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Image(String);

impl Base64Image {
    pub(crate) fn new(payload: String) -> Self {
        Self(payload)
    }

    /// The raw base64 text.
    pub fn data(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Decode to image bytes for rendering.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.0)
    }
}

/// Reads a signed-in user's image out of the cache.
pub struct GetImageUseCase {
    repository: Arc<PictureRepository>,
}

impl GetImageUseCase {
    pub fn new(repository: Arc<PictureRepository>) -> Self {
        Self { repository }
    }

    /// The cached image for `username`, if present and still valid.
    pub fn execute(&self, username: &str) -> Option<Base64Image> {
        self.repository.read(username).map(Base64Image::new)
    }
}
