//! Authentication module for staff key verification.

mod extractor;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

pub use extractor::StaffAuth;

/// Wrapper type for the staff key protecting order administration endpoints.
/// Uses `SecretString` to prevent accidental logging and zeroize on drop.
#[derive(Clone)]
pub struct StaffKey(Option<SecretString>);

impl StaffKey {
    /// Create a new StaffKey from an optional string.
    pub fn new(key: Option<String>) -> Self {
        Self(key.map(SecretString::from))
    }

    /// Securely compare the provided key with the stored staff key.
    ///
    /// Uses `subtle::ConstantTimeEq`, which examines equal-length buffers in
    /// full rather than stopping at the first difference, so the key content
    /// does not leak through timing. A length mismatch still returns early;
    /// only the content comparison is constant-time.
    pub fn verify(&self, provided: &str) -> bool {
        match &self.0 {
            Some(secret) => {
                let expected = secret.expose_secret();
                expected.as_bytes().ct_eq(provided.as_bytes()).into()
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for StaffKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "StaffKey([REDACTED])"),
            None => write!(f, "StaffKey(None)"),
        }
    }
}
