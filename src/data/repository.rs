//! In-memory picture store and fetch pipeline.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::network::api::ApiOutcome;

use super::base64::Base64Validator;
use super::source::PictureSource;

/// Outcome of a fetch-and-store attempt, as seen by the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The payload arrived and is now cached for the user.
    Stored,
    /// The server rejected the credentials.
    Unauthorized,
    /// Anything else went wrong; `code` and `reason` mirror the transport.
    Failed { code: u16, reason: String },
}

/// Caches image payloads per username and mediates access to the source.
///
/// Entries live for the process lifetime. A fresh fetch for the same user
/// overwrites the previous payload, and reads re-validate the payload so a
/// corrupted entry reads as a miss.
pub struct PictureRepository {
    source: Arc<dyn PictureSource>,
    validator: Base64Validator,
    images: Mutex<HashMap<String, String>>,
}

impl PictureRepository {
    pub fn new(source: Arc<dyn PictureSource>) -> Self {
        Self {
            source,
            validator: Base64Validator::new(),
            images: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the image for the credentials and cache it on success.
    ///
    /// The payload is stored before the outcome is returned, so by the time
    /// the UI sees a success the image is already readable.
    pub async fn fetch_image(&self, username: &str, password: &str) -> FetchOutcome {
        match self.source.load_image(username, password).await {
            ApiOutcome::Success(payload) => {
                self.store(username, payload);
                info!("Image stored for user '{}'", username);
                FetchOutcome::Stored
            }
            ApiOutcome::Unauthorized => {
                debug!("Fetch rejected for user '{}'", username);
                FetchOutcome::Unauthorized
            }
            ApiOutcome::Failed { code, reason } => {
                warn!("Fetch failed for user '{}' ({}): {}", username, code, reason);
                FetchOutcome::Failed { code, reason }
            }
        }
    }

    /// Store a payload for a user, replacing any previous entry.
    pub fn store(&self, username: &str, payload: String) {
        self.images
            .lock()
            .unwrap()
            .insert(username.to_string(), payload);
    }

    /// Read the cached payload for a user.
    ///
    /// Returns None for a missing entry or one that no longer passes base64
    /// validation. An invalid entry stays put; only the read is refused.
    pub fn read(&self, username: &str) -> Option<String> {
        let images = self.images.lock().unwrap();
        match images.get(username) {
            Some(payload) if self.validator.validate(payload) => Some(payload.clone()),
            Some(_) => {
                warn!("Cached image for user '{}' failed validation", username);
                None
            }
            None => None,
        }
    }
}
