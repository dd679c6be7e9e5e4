//! Sign-in state machine.
//!
//! Drives one sign-in attempt at a time and exposes the result as observable
//! state for a UI shell: the screen state, the two text field values, and a
//! one-shot navigation event after a successful attempt. All failures
//! converge to a state the user can react to; nothing here returns an error.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::credentials::{is_valid_login_field, Credentials};
use crate::domain::sign_in::{SignInResult, SignInUseCase};

/// Delay between publishing the success state and emitting the navigation
/// event, giving the UI a beat to render the success affordance.
pub const NAVIGATE_DELAY_MS: u64 = 300;

/// Screen states of the sign-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInState {
    /// Nothing in flight; the form is editable.
    #[default]
    Idle,
    /// An attempt is running.
    Loading,
    /// The attempt succeeded; navigation follows shortly.
    Success,
    /// The server rejected the credentials.
    Unauthorized,
    /// The device is offline. Clears back to Idle when connectivity returns.
    NetworkError,
    /// The attempt failed for any other reason.
    GenericError,
}

/// One-shot events emitted by the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInEvent {
    /// Navigate to the picture screen for the signed-in user.
    NavigateToPicture { username: String },
}

/// Orchestrates sign-in attempts and exposes their state.
///
/// State is published through a watch channel with change-only semantics:
/// publishing a value equal to the current one notifies nobody. Events go
/// through a single-consumer channel handed out once by [`take_events`];
/// late subscribers never see a replay.
///
/// [`take_events`]: SignInController::take_events
pub struct SignInController {
    use_case: Arc<SignInUseCase>,
    /// Live connectivity signal, read at submit time
    connectivity: watch::Receiver<bool>,
    state_tx: Arc<watch::Sender<SignInState>>,
    username_tx: watch::Sender<String>,
    password_tx: watch::Sender<String>,
    event_tx: mpsc::Sender<SignInEvent>,
    /// Event receiver parked here until the single consumer takes it
    events_rx: Mutex<Option<mpsc::Receiver<SignInEvent>>>,
    /// Handle of the attempt currently in flight, if any
    attempt: Mutex<Option<JoinHandle<()>>>,
    /// Handle of the connectivity recovery watcher
    watcher: JoinHandle<()>,
}

impl SignInController {
    /// Create the controller and spawn its connectivity recovery watcher.
    pub fn new(use_case: SignInUseCase, connectivity: watch::Receiver<bool>) -> Self {
        let (state_tx, _state_rx) = watch::channel(SignInState::Idle);
        let state_tx = Arc::new(state_tx);
        let (username_tx, _) = watch::channel(String::new());
        let (password_tx, _) = watch::channel(String::new());
        let (event_tx, events_rx) = mpsc::channel::<SignInEvent>(1);

        let watcher_connectivity = connectivity.clone();
        let watcher_state = state_tx.clone();
        let watcher = tokio::spawn(async move {
            run_recovery_watcher(watcher_connectivity, watcher_state).await;
        });

        debug!("Sign-in controller started");

        Self {
            use_case: Arc::new(use_case),
            connectivity,
            state_tx,
            username_tx,
            password_tx,
            event_tx,
            events_rx: Mutex::new(Some(events_rx)),
            attempt: Mutex::new(None),
            watcher,
        }
    }

    /// Current screen state.
    pub fn current_state(&self) -> SignInState {
        *self.state_tx.borrow()
    }

    /// Subscribe to screen state changes.
    pub fn state_receiver(&self) -> watch::Receiver<SignInState> {
        self.state_tx.subscribe()
    }

    /// Current username field value.
    pub fn username(&self) -> String {
        self.username_tx.borrow().clone()
    }

    /// Subscribe to username field changes.
    pub fn username_receiver(&self) -> watch::Receiver<String> {
        self.username_tx.subscribe()
    }

    /// Current password field value.
    pub fn password(&self) -> String {
        self.password_tx.borrow().clone()
    }

    /// Subscribe to password field changes.
    pub fn password_receiver(&self) -> watch::Receiver<String> {
        self.password_tx.subscribe()
    }

    /// Take the one-shot event receiver.
    ///
    /// Yields Some exactly once; there is a single consumer by design.
    pub fn take_events(&self) -> Option<mpsc::Receiver<SignInEvent>> {
        self.events_rx.lock().unwrap().take()
    }

    /// Record a username edit. Any displayed result goes back to Idle, even
    /// while an attempt is in flight.
    pub fn on_username_change(&self, value: &str) {
        self.username_tx.send_replace(value.to_string());
        publish(&self.state_tx, SignInState::Idle);
    }

    /// Record a password edit. Same eager reset as a username edit.
    pub fn on_password_change(&self, value: &str) {
        self.password_tx.send_replace(value.to_string());
        publish(&self.state_tx, SignInState::Idle);
    }

    /// Submit the current credentials.
    ///
    /// Both fields must pass [`is_valid_login_field`]; the UI enforces that
    /// before enabling submission, so a violation here is a programming
    /// error and panics. When the device is offline the state goes straight
    /// to NetworkError and the API is never touched. Otherwise the state
    /// goes to Loading and the attempt runs on a background task: Success is
    /// published first, then after [`NAVIGATE_DELAY_MS`] the navigation
    /// event fires.
    pub fn sign_in(&self) {
        let username = self.username();
        let password = self.password();

        assert!(
            is_valid_login_field(&username),
            "sign_in called with invalid username"
        );
        assert!(
            is_valid_login_field(&password),
            "sign_in called with invalid password"
        );

        if !*self.connectivity.borrow() {
            info!("Sign-in blocked: device is offline");
            publish(&self.state_tx, SignInState::NetworkError);
            return;
        }

        publish(&self.state_tx, SignInState::Loading);

        let credentials = Credentials::new(&username, &password);
        let use_case = self.use_case.clone();
        let state_tx = self.state_tx.clone();
        let event_tx = self.event_tx.clone();
        let handle = tokio::spawn(async move {
            run_attempt(use_case, state_tx, event_tx, credentials).await;
        });

        // Supersede any attempt still in flight
        if let Some(previous) = self.attempt.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }

    /// Reset after the result was consumed: state back to Idle and both text
    /// fields cleared.
    pub fn clear_result(&self) {
        debug!("Clearing sign-in result");
        self.username_tx.send_replace(String::new());
        self.password_tx.send_replace(String::new());
        publish(&self.state_tx, SignInState::Idle);
    }

    /// Abort the in-flight attempt and the recovery watcher.
    pub fn shutdown(&self) {
        debug!("Shutting down sign-in controller");
        if let Some(handle) = self.attempt.lock().unwrap().take() {
            handle.abort();
        }
        self.watcher.abort();
    }
}

impl Drop for SignInController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Publish a state transition, skipping the send when nothing changes.
fn publish(state_tx: &watch::Sender<SignInState>, next: SignInState) {
    state_tx.send_if_modified(|state| {
        if *state != next {
            *state = next;
            true
        } else {
            false
        }
    });
}

/// Run one sign-in attempt and publish its terminal state.
async fn run_attempt(
    use_case: Arc<SignInUseCase>,
    state_tx: Arc<watch::Sender<SignInState>>,
    event_tx: mpsc::Sender<SignInEvent>,
    credentials: Credentials,
) {
    match use_case.execute(&credentials).await {
        SignInResult::Success => {
            info!("Sign-in succeeded for user '{}'", credentials.username);
            publish(&state_tx, SignInState::Success);
            tokio::time::sleep(Duration::from_millis(NAVIGATE_DELAY_MS)).await;
            let event = SignInEvent::NavigateToPicture {
                username: credentials.username,
            };
            if event_tx.try_send(event).is_err() {
                debug!("Navigation event dropped: no active consumer");
            }
        }
        SignInResult::Unauthorized => {
            info!("Sign-in rejected for user '{}'", credentials.username);
            publish(&state_tx, SignInState::Unauthorized);
        }
        SignInResult::Error => {
            publish(&state_tx, SignInState::GenericError);
        }
    }
}

/// Clear a NetworkError the moment connectivity comes back. No retry is
/// issued; the user resubmits.
async fn run_recovery_watcher(
    mut connectivity: watch::Receiver<bool>,
    state_tx: Arc<watch::Sender<SignInState>>,
) {
    while connectivity.changed().await.is_ok() {
        let online = *connectivity.borrow();
        if online && *state_tx.borrow() == SignInState::NetworkError {
            info!("Connectivity restored, clearing network error");
            publish(&state_tx, SignInState::Idle);
        }
    }
}
