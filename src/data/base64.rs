//! Base64 payload validation.
//!
//! The image API returns pictures as base64 text. Payloads are checked
//! against the base64 grammar on their way out of the cache, so a corrupted
//! entry surfaces as a miss instead of garbage pixels.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anchored base64 grammar: any number of 4-character groups followed by an
/// optional padded tail of 2 or 3 data characters.
static BASE64_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
        .expect("Invalid base64 regex")
});

/// Validates candidate base64 payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Validator;

impl Base64Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check whether `candidate` is non-empty, well-formed base64.
    ///
    /// The empty string matches the grammar but is rejected anyway; an empty
    /// payload is never a usable image.
    pub fn validate(&self, candidate: &str) -> bool {
        !candidate.is_empty() && BASE64_REGEX.is_match(candidate)
    }
}
