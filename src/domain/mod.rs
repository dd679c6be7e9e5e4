//! Domain layer for the picture service.
//!
//! Small use cases sitting between the UI controllers and the data layer,
//! plus the credential rules both sides share.
//!
//! ## Components
//!
//! - [`Credentials`] - Transient username/password pair and its field rules
//! - [`SignInUseCase`] - Runs one sign-in attempt
//! - [`GetImageUseCase`] - Reads a signed-in user's image out of the cache

pub mod credentials;
pub mod get_image;
pub mod sign_in;

pub use credentials::{is_valid_login_field, Credentials};
pub use get_image::{Base64Image, GetImageUseCase};
pub use sign_in::{SignInResult, SignInUseCase};
