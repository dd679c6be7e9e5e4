//! Credential value type and login field rules.

/// A login field is usable when it is non-empty and contains no uppercase
/// characters. The rule is shared by the UI shell, which uses it to enable
/// the sign-in button, and by the sign-in entry point, which asserts it.
pub fn is_valid_login_field(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|c| c.is_uppercase())
}

/// A username/password pair held only for the duration of a sign-in attempt.
/// Never persisted and never logged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Both fields pass the login field rule.
    pub fn is_valid(&self) -> bool {
        is_valid_login_field(&self.username) && is_valid_login_field(&self.password)
    }
}
