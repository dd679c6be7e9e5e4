//! Picture screen state.
//!
//! The picture screen only ever reads the cache: sign-in stored the payload
//! before it reported success. The controller exposes the lookup as
//! observable state so the UI can render a spinner, the image, or a miss.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::get_image::{Base64Image, GetImageUseCase};

/// States of the picture screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureUiState {
    /// The cached image is being looked up.
    Loading,
    /// The image is ready to render.
    Success(Base64Image),
    /// No usable image was found for the user.
    Error,
}

/// Loads one user's image out of the cache and exposes it as screen state.
pub struct PictureController {
    username: String,
    state_rx: watch::Receiver<PictureUiState>,
    loader: JoinHandle<()>,
}

impl PictureController {
    /// Start the lookup for `username`.
    pub fn start(get_image: Arc<GetImageUseCase>, username: &str) -> Self {
        debug!("Picture controller started for user '{}'", username);
        let (state_tx, state_rx) = watch::channel(PictureUiState::Loading);

        let owner = username.to_string();
        let loader = tokio::spawn(async move {
            let next = match get_image.execute(&owner) {
                Some(image) => PictureUiState::Success(image),
                None => PictureUiState::Error,
            };
            let _ = state_tx.send(next);
        });

        Self {
            username: username.to_string(),
            state_rx,
            loader,
        }
    }

    /// Current screen state.
    pub fn current_state(&self) -> PictureUiState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to screen state changes.
    pub fn state_receiver(&self) -> watch::Receiver<PictureUiState> {
        self.state_rx.clone()
    }

    /// The user whose picture this screen shows.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Drop for PictureController {
    fn drop(&mut self) {
        debug!("Picture controller for user '{}' cleared", self.username);
        self.loader.abort();
    }
}
