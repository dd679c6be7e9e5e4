//! Picture source abstraction.
//!
//! The repository talks to a [`PictureSource`] rather than the HTTP client
//! directly, so the demo fake and test doubles slot in without touching the
//! sign-in flow.

use async_trait::async_trait;

use crate::network::api::{ApiOutcome, ImageApiClient};

/// Supplies image payloads for a set of credentials.
#[async_trait]
pub trait PictureSource: Send + Sync {
    /// Attempt to load the image for the given credentials.
    async fn load_image(&self, username: &str, password: &str) -> ApiOutcome;
}

/// Production source backed by the image API.
pub struct NetworkPictureSource {
    client: ImageApiClient,
}

impl NetworkPictureSource {
    pub fn new(client: ImageApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PictureSource for NetworkPictureSource {
    async fn load_image(&self, username: &str, password: &str) -> ApiOutcome {
        self.client.fetch_image(username, password).await
    }
}
