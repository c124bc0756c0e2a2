//! Shared-secret admin check.
//!
//! The built-in password is stored obfuscated with the same key as score
//! fields so it does not sit in the source as plain text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::codec::xor_with_key;

const OBFUSCATED_DEFAULT_PASSWORD: &str = "Gg4AGAIdDQENVx1aVQ==";

/// Obfuscate a password for embedding in source or config.
pub fn encode_password(password: &str) -> String {
    STANDARD.encode(xor_with_key(password.as_bytes()))
}

fn decode_password(obfuscated: &str) -> Option<String> {
    let bytes = STANDARD.decode(obfuscated).ok()?;
    String::from_utf8(xor_with_key(&bytes)).ok()
}

/// Accepted admin passwords: the built-in default plus an optional configured one.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    default_password: Option<String>,
    configured: Option<String>,
}

impl AdminCredential {
    pub fn new(configured: Option<String>) -> Self {
        Self {
            default_password: decode_password(OBFUSCATED_DEFAULT_PASSWORD),
            configured: configured.filter(|p| !p.is_empty()),
        }
    }

    pub fn verify(&self, input: &str) -> bool {
        if input.is_empty() {
            return false;
        }
        [&self.default_password, &self.configured]
            .into_iter()
            .flatten()
            .any(|accepted| accepted == input)
    }
}

impl Default for AdminCredential {
    fn default() -> Self {
        Self::new(None)
    }
}
