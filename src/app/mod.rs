//! Application wiring and screen controllers.
//!
//! This module contains the composition root [`App`] and the two screen
//! controllers a UI shell drives:
//! - [`SignInController`] - The sign-in state machine
//! - [`PictureController`] - The picture screen lookup
//!
//! Everything is constructed once in [`App`] and handed down by constructor,
//! so tests can rebuild the graph with any piece swapped out. There are no
//! globals.

pub mod picture;
pub mod sign_in;

pub use picture::{PictureController, PictureUiState};
pub use sign_in::{SignInController, SignInEvent, SignInState, NAVIGATE_DELAY_MS};

use std::sync::Arc;

use tracing::info;

use crate::data::repository::PictureRepository;
use crate::data::source::{NetworkPictureSource, PictureSource};
use crate::domain::get_image::GetImageUseCase;
use crate::domain::sign_in::SignInUseCase;
use crate::network::api::{ApiConfig, ImageApiClient};
use crate::network::connectivity::{ConnectivityConfig, ConnectivityMonitor};
use crate::network::encoder::Sha1PasswordEncoder;
use crate::network::probe::{ReachabilityProbe, TcpProbe};

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub connectivity: ConnectivityConfig,
}

/// The assembled component graph.
///
/// Construct from within a Tokio runtime; the connectivity monitor and the
/// sign-in controller spawn background tasks that stop when the App drops.
pub struct App {
    connectivity: ConnectivityMonitor,
    repository: Arc<PictureRepository>,
    get_image: Arc<GetImageUseCase>,
    sign_in: SignInController,
}

impl App {
    /// Build the production graph with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Build the production graph: TCP probe, SHA-1 encoder, network source.
    pub fn with_config(config: AppConfig) -> Self {
        let encoder = Arc::new(Sha1PasswordEncoder::new());
        let client = ImageApiClient::with_config(config.api.clone(), encoder);
        let source = Arc::new(NetworkPictureSource::new(client));
        Self::with_source(config, source)
    }

    /// Build the graph around a custom picture source, keeping the TCP probe.
    pub fn with_source(config: AppConfig, source: Arc<dyn PictureSource>) -> Self {
        let probe = Arc::new(TcpProbe::with_config(&config.connectivity));
        Self::with_source_and_probe(source, probe)
    }

    /// Build the graph with both the source and the probe injected.
    pub fn with_source_and_probe(
        source: Arc<dyn PictureSource>,
        probe: Arc<dyn ReachabilityProbe>,
    ) -> Self {
        let connectivity = ConnectivityMonitor::start(probe);

        let repository = Arc::new(PictureRepository::new(source));
        let get_image = Arc::new(GetImageUseCase::new(repository.clone()));
        let sign_in_use_case = SignInUseCase::new(repository.clone());
        let sign_in = SignInController::new(sign_in_use_case, connectivity.subscribe());

        info!("Application graph assembled");

        Self {
            connectivity,
            repository,
            get_image,
            sign_in,
        }
    }

    /// The sign-in flow.
    pub fn sign_in(&self) -> &SignInController {
        &self.sign_in
    }

    /// The connectivity monitor. The platform boundary pushes network events
    /// into it through [`ConnectivityMonitor::notifier`].
    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    /// The picture repository backing both flows.
    pub fn repository(&self) -> &Arc<PictureRepository> {
        &self.repository
    }

    /// Open the picture screen for a signed-in user.
    pub fn open_picture(&self, username: &str) -> PictureController {
        PictureController::start(self.get_image.clone(), username)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
