//! Live-access token issuance.
//!
//! A live-access token is the sole credential behind the public live
//! session endpoint: an unguessable opaque string stored directly on the
//! appointment row, valid for a fixed two-hour window. There is no token
//! table and no revocation list; an appointment carries at most one token,
//! and issuing a new one overwrites (and thereby revokes) the previous one.

use chrono::{DateTime, Duration, Utc};

/// Fixed validity window for every issued token.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// A freshly issued live-access credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issue a new live-access token valid from `now`.
///
/// # Security
///
/// - 16 bytes (128 bits) of OS randomness, hex encoded to 32 characters
/// - Never derived from ids, timestamps, or any other predictable source
/// - Collision probability is negligible; the unique index on
///   `appointments.access_token` backstops the impossible case
pub fn issue(now: DateTime<Utc>) -> IssuedToken {
    IssuedToken {
        token: generate_token(),
        expires_at: now + Duration::hours(TOKEN_TTL_HOURS),
    }
}

/// Generate cryptographically secure random token material.
fn generate_token() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_32_hex_chars() {
        let issued = issue(Utc::now());
        assert_eq!(issued.token.len(), 32);
        assert!(issued.token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        let now = Utc::now();
        let a = issue(now);
        let b = issue(now);
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn expiry_is_exactly_two_hours_out() {
        let now = Utc::now();
        let issued = issue(now);
        assert_eq!(issued.expires_at, now + Duration::hours(2));
    }
}
