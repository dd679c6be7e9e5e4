//! Data layer for the picture service.
//!
//! Owns the in-memory picture cache, payload validation, and the source
//! abstraction that separates the sign-in flow from the transport.
//!
//! ## Components
//!
//! - [`PictureRepository`] - Caches payloads per user and mediates fetches
//! - [`Base64Validator`] - Grammar check applied to payloads on the way out
//! - [`NetworkPictureSource`] - Production source backed by the image API
//! - [`FakePictureSource`] - Scripted in-memory source for demos and tests

pub mod base64;
pub mod fake;
pub mod repository;
pub mod source;

pub use self::base64::Base64Validator;
pub use fake::{FakePictureSource, DEMO_IMAGE};
pub use repository::{FetchOutcome, PictureRepository};
pub use source::{NetworkPictureSource, PictureSource};
