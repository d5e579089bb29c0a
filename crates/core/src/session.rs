//! Session tokens and the session record handed out at signin.

use rand::Rng;

use crate::types::Timestamp;

/// Length of every generated session token.
pub const SESSION_TOKEN_LENGTH: usize = 32;

/// Default session lifetime (24h).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A live session: the opaque token and the identity login it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub login: String,
    pub expires_at: Timestamp,
}

/// Generate an unpredictable session token over a fixed letter alphabet.
///
/// Uses the thread-local CSPRNG.
pub fn generate_session_token() -> String {
    let mut rng = rand::rng();
    (0..SESSION_TOKEN_LENGTH)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_fixed_length_and_alphabet() {
        let token = generate_session_token();
        assert_eq!(token.len(), SESSION_TOKEN_LENGTH);
        assert!(token.bytes().all(|b| b.is_ascii_alphabetic()));
    }

    #[test]
    fn tokens_differ() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
    }
}
