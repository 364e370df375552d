//! Login credential and device identifier derivation.
//!
//! Neither function provides security. They reproduce the values the mobile
//! app sends so that the server accepts the session.

use rand::rngs::OsRng;
use rand::Rng;
use sha1::{Digest, Sha1};

/// Literal prefix of a generated device identifier.
pub const DEVICE_IDENTIFIER_PREFIX: &str = "APA91";

/// Total length of a generated device identifier.
pub const DEVICE_IDENTIFIER_LEN: usize = 152;

const DEVICE_IDENTIFIER_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Lowercase hex SHA-1 of the trimmed password, as the login endpoint expects it.
#[must_use]
pub fn derive_login_credential(raw_password: &str) -> String {
    hex::encode(Sha1::digest(raw_password.trim().as_bytes()))
}

/// A random push-token-shaped identifier for logins that supply none.
#[must_use]
pub fn derive_device_identifier() -> String {
    let mut rng = OsRng;
    let body: String = (DEVICE_IDENTIFIER_PREFIX.len()..DEVICE_IDENTIFIER_LEN)
        .map(|_| {
            let index = rng.gen_range(0..DEVICE_IDENTIFIER_ALPHABET.len());
            char::from(DEVICE_IDENTIFIER_ALPHABET[index])
        })
        .collect();
    format!("{DEVICE_IDENTIFIER_PREFIX}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_reference_digest() {
        assert_eq!(
            derive_login_credential("secret"),
            "e5e9fa1ba31ecd1ae84f75caaa474f3a663f05f4"
        );
    }

    #[test]
    fn credential_trims_input() {
        assert_eq!(
            derive_login_credential("  secret\n"),
            derive_login_credential("secret")
        );
    }

    #[test]
    fn credential_shape() {
        let digest = derive_login_credential("pässwörd");
        assert_eq!(digest.len(), 40);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn device_identifier_shape() {
        let id = derive_device_identifier();
        assert_eq!(id.len(), DEVICE_IDENTIFIER_LEN);
        assert!(id.starts_with(DEVICE_IDENTIFIER_PREFIX));
        assert!(id[DEVICE_IDENTIFIER_PREFIX.len()..]
            .bytes()
            .all(|b| DEVICE_IDENTIFIER_ALPHABET.contains(&b)));
    }

    #[test]
    fn device_identifiers_differ() {
        assert_ne!(derive_device_identifier(), derive_device_identifier());
    }
}
