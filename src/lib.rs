//! Picgate - sign-in and picture fetch client core
//!
//! Orchestration layer for a credential-gated image download: connectivity
//! monitoring, credential hashing, the image API call, an in-memory payload
//! cache, and the observable sign-in state machine a UI shell drives.

pub mod app;
pub mod data;
pub mod domain;
pub mod network;
