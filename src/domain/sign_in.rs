//! Sign-in use case.

use std::sync::Arc;

use crate::data::repository::{FetchOutcome, PictureRepository};

use super::credentials::Credentials;

/// How a sign-in attempt ended, from the orchestrator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInResult {
    /// Credentials accepted; the image is cached and readable.
    Success,
    /// Credentials rejected by the server.
    Unauthorized,
    /// Transport or server failure.
    Error,
}

/// Runs one sign-in attempt against the picture repository.
pub struct SignInUseCase {
    repository: Arc<PictureRepository>,
}

impl SignInUseCase {
    pub fn new(repository: Arc<PictureRepository>) -> Self {
        Self { repository }
    }

    /// Fetch and cache the image for the credentials.
    pub async fn execute(&self, credentials: &Credentials) -> SignInResult {
        match self
            .repository
            .fetch_image(&credentials.username, &credentials.password)
            .await
        {
            FetchOutcome::Stored => SignInResult::Success,
            FetchOutcome::Unauthorized => SignInResult::Unauthorized,
            FetchOutcome::Failed { .. } => SignInResult::Error,
        }
    }
}
