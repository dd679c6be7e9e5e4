//! Fake picture source for demos and tests.
//!
//! Mirrors the shape of the network source but serves scripted outcomes from
//! memory, so the whole sign-in flow can run without a backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::network::api::ApiOutcome;

use super::source::PictureSource;

/// Base64 payload served by the default demo script ("hello picgate").
pub const DEMO_IMAGE: &str = "aGVsbG8gcGljZ2F0ZQ==";

/// In-memory picture source with per-credential scripted outcomes.
///
/// Ships with the demo script the app ran on before the backend existed:
/// `success`/`password` gets a valid payload, `wrongp`/`invalid` is rejected,
/// and any other pair hits the fallback. Outcomes are replaceable per
/// credential pair, and every call is counted for interaction tests.
pub struct FakePictureSource {
    /// Scripted outcomes keyed by (username, password)
    outcomes: Mutex<HashMap<(String, String), ApiOutcome>>,
    /// Outcome for unscripted credential pairs
    fallback: Mutex<ApiOutcome>,
    /// Number of load_image calls made so far
    calls: AtomicUsize,
}

impl FakePictureSource {
    /// Create a fake with the demo script.
    pub fn new() -> Self {
        let fake = Self::empty();
        fake.script(
            "success",
            "password",
            ApiOutcome::Success(DEMO_IMAGE.to_string()),
        );
        fake.script("wrongp", "invalid", ApiOutcome::Unauthorized);
        fake
    }

    /// Create a fake with no scripted outcomes; every call hits the fallback.
    pub fn empty() -> Self {
        Self {
            outcomes: Mutex::new(HashMap::new()),
            fallback: Mutex::new(ApiOutcome::Failed {
                code: 500,
                reason: "no scripted outcome".to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script the outcome returned for a credential pair.
    pub fn script(&self, username: &str, password: &str, outcome: ApiOutcome) {
        self.outcomes
            .lock()
            .unwrap()
            .insert((username.to_string(), password.to_string()), outcome);
    }

    /// Replace the outcome returned for unscripted credential pairs.
    pub fn set_fallback(&self, outcome: ApiOutcome) {
        *self.fallback.lock().unwrap() = outcome;
    }

    /// Number of load calls made against this source.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FakePictureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PictureSource for FakePictureSource {
    async fn load_image(&self, username: &str, password: &str) -> ApiOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .outcomes
            .lock()
            .unwrap()
            .get(&(username.to_string(), password.to_string()))
            .cloned();
        match scripted {
            Some(outcome) => outcome,
            None => self.fallback.lock().unwrap().clone(),
        }
    }
}
