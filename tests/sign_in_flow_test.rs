//! Integration tests for the sign-in flow end to end.
//!
//! These tests drive the controller the way a UI shell would:
//! - Happy path from submission to the navigation event
//! - Unauthorized and generic failures
//! - Offline submission and recovery when connectivity returns
//! - Superseding an attempt with a fresh submission

mod common;

use std::time::Duration;

use common::build_sign_in;
use picgate::app::sign_in::{SignInEvent, SignInState, NAVIGATE_DELAY_MS};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::Instant;

/// Let spawned attempt tasks run under paused time.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// ============================================================================
// Test 1: Happy path publishes Success, then navigates after the delay
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_happy_path_reaches_success_then_navigates() {
    let (fake, controller, _connectivity) = build_sign_in(true);
    let mut state_rx = controller.state_receiver();
    let mut events = controller.take_events().unwrap();

    controller.on_username_change("success");
    controller.on_password_change("password");

    let submitted_at = Instant::now();
    controller.sign_in();

    // Loading is published synchronously at submission
    assert_eq!(controller.current_state(), SignInState::Loading);
    state_rx.changed().await.unwrap();
    assert_eq!(*state_rx.borrow(), SignInState::Loading);

    // Success lands before the navigation event is emitted
    state_rx.changed().await.unwrap();
    assert_eq!(*state_rx.borrow(), SignInState::Success);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    let event = events.recv().await.unwrap();
    assert_eq!(
        event,
        SignInEvent::NavigateToPicture {
            username: "success".to_string(),
        }
    );
    assert!(submitted_at.elapsed() >= Duration::from_millis(NAVIGATE_DELAY_MS));
    assert_eq!(fake.call_count(), 1);

    // Exactly one event per successful attempt
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

// ============================================================================
// Test 2: Rejected credentials surface Unauthorized and never navigate
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_rejected_credentials_surface_unauthorized() {
    let (fake, controller, _connectivity) = build_sign_in(true);
    let mut events = controller.take_events().unwrap();

    controller.on_username_change("wrongp");
    controller.on_password_change("invalid");
    controller.sign_in();
    settle().await;

    assert_eq!(controller.current_state(), SignInState::Unauthorized);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(fake.call_count(), 1);
}

// ============================================================================
// Test 3: Any other failure surfaces GenericError
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_unscripted_failure_surfaces_generic_error() {
    let (_, controller, _connectivity) = build_sign_in(true);

    controller.on_username_change("ghost");
    controller.on_password_change("boo");
    controller.sign_in();
    settle().await;

    assert_eq!(controller.current_state(), SignInState::GenericError);
}

// ============================================================================
// Test 4: Offline submission blocks, recovery clears without a retry
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_offline_submission_clears_on_recovery_without_retry() {
    let (fake, controller, connectivity) = build_sign_in(false);
    let mut state_rx = controller.state_receiver();

    controller.on_username_change("success");
    controller.on_password_change("password");
    controller.sign_in();

    assert_eq!(controller.current_state(), SignInState::NetworkError);
    assert_eq!(fake.call_count(), 0);

    // Connectivity returns; the error clears but nothing is resubmitted
    connectivity.send(true).unwrap();
    loop {
        state_rx.changed().await.unwrap();
        if *state_rx.borrow() == SignInState::Idle {
            break;
        }
    }
    assert_eq!(fake.call_count(), 0);

    // The user resubmits by hand
    controller.sign_in();
    settle().await;
    assert_eq!(controller.current_state(), SignInState::Success);
    assert_eq!(fake.call_count(), 1);
}

// ============================================================================
// Test 5: Recovery only clears NetworkError, never other results
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_recovery_does_not_clobber_other_results() {
    let (_, controller, connectivity) = build_sign_in(true);

    controller.on_username_change("wrongp");
    controller.on_password_change("invalid");
    controller.sign_in();
    settle().await;
    assert_eq!(controller.current_state(), SignInState::Unauthorized);

    // A connectivity flap must leave the result alone
    connectivity.send(false).unwrap();
    settle().await;
    connectivity.send(true).unwrap();
    settle().await;

    assert_eq!(controller.current_state(), SignInState::Unauthorized);
}

// ============================================================================
// Test 6: A fresh submission supersedes the one in flight
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_fresh_submission_supersedes_in_flight_attempt() {
    let (fake, controller, _connectivity) = build_sign_in(true);

    // First submission never gets to run; it is replaced immediately
    controller.on_username_change("ghost");
    controller.on_password_change("boo");
    controller.sign_in();

    controller.on_username_change("success");
    controller.on_password_change("password");
    controller.sign_in();
    settle().await;

    assert_eq!(controller.current_state(), SignInState::Success);
    assert_eq!(fake.call_count(), 1);
}

// ============================================================================
// Test 7: Editing a field discards the displayed result
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_editing_a_field_discards_displayed_result() {
    let (_, controller, _connectivity) = build_sign_in(true);

    controller.on_username_change("wrongp");
    controller.on_password_change("invalid");
    controller.sign_in();
    settle().await;
    assert_eq!(controller.current_state(), SignInState::Unauthorized);

    controller.on_password_change("invalid2");
    assert_eq!(controller.current_state(), SignInState::Idle);
}
