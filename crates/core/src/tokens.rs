//! Password-reset secret generation.
//!
//! Secrets come straight from the thread-local CSPRNG and are rendered as
//! lowercase hex. Nothing predictable (time, counters, ids) feeds into them.

use std::fmt::Write;

use rand::Rng;

/// Generate a random hex secret of exactly `length` characters.
///
/// Enough bytes are drawn to cover `length` hex digits; an odd length
/// drops the final nibble.
pub fn generate_secure_token(length: usize) -> String {
    let mut bytes = vec![0u8; length.div_ceil(2)];
    rand::rng().fill(&mut bytes[..]);

    let mut token = String::with_capacity(bytes.len() * 2);
    for byte in &bytes {
        // Writing to a String cannot fail.
        let _ = write!(token, "{byte:02x}");
    }
    token.truncate(length);
    token
}
