//! Common test utilities for integration tests.
//!
//! Provides the scripted reachability probe and controller builders shared
//! by the connectivity and sign-in flow tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use picgate::app::sign_in::SignInController;
use picgate::data::fake::FakePictureSource;
use picgate::data::repository::PictureRepository;
use picgate::domain::sign_in::SignInUseCase;
use picgate::network::connectivity::NetworkId;
use picgate::network::probe::ReachabilityProbe;

/// Probe returning scripted results per network id, optionally after a
/// delay. Unscripted networks get the default result.
#[allow(dead_code)]
pub struct ScriptedProbe {
    results: Mutex<HashMap<u64, bool>>,
    default_result: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    #[allow(dead_code)]
    pub fn new(results: &[(u64, bool)]) -> Self {
        Self {
            results: Mutex::new(results.iter().map(|&(id, ok)| (id, ok)).collect()),
            default_result: false,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A probe that passes every network.
    #[allow(dead_code)]
    pub fn always_reachable() -> Self {
        let mut probe = Self::new(&[]);
        probe.default_result = true;
        probe
    }

    #[allow(dead_code)]
    pub fn with_delay(results: &[(u64, bool)], delay: Duration) -> Self {
        let mut probe = Self::new(results);
        probe.delay = Some(delay);
        probe
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReachabilityProbe for ScriptedProbe {
    async fn check(&self, network: NetworkId) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        *self
            .results
            .lock()
            .unwrap()
            .get(&network.0)
            .unwrap_or(&self.default_result)
    }
}

/// Build a sign-in controller over the demo fake source, with the
/// connectivity signal controlled by the returned sender.
#[allow(dead_code)]
pub fn build_sign_in(
    online: bool,
) -> (Arc<FakePictureSource>, SignInController, watch::Sender<bool>) {
    let fake = Arc::new(FakePictureSource::new());
    let repository = Arc::new(PictureRepository::new(fake.clone()));
    let use_case = SignInUseCase::new(repository);
    let (connectivity_tx, connectivity_rx) = watch::channel(online);
    let controller = SignInController::new(use_case, connectivity_rx);
    (fake, controller, connectivity_tx)
}
