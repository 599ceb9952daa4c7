//! Note identifier generation.
//!
//! Identifiers look like `note_lq3Xk9a_Z7bQ01xy`: a prefix, the creation time
//! in base62 milliseconds, and eight random base62 characters.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::util::now_ms;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Prefix used when the caller does not supply one.
pub const DEFAULT_ID_PREFIX: &str = "note";

/// Number of random characters appended to every identifier.
pub const RANDOM_SEGMENT_LEN: usize = 8;

/// Generate an identifier using the current time and fresh randomness.
#[must_use]
pub fn generate_id(prefix: Option<&str>) -> String {
    generate_id_at(prefix, now_ms())
}

/// Generate an identifier for an explicit timestamp.
#[must_use]
pub fn generate_id_at(prefix: Option<&str>, timestamp_ms: i64) -> String {
    let prefix = prefix.unwrap_or(DEFAULT_ID_PREFIX);
    format!(
        "{prefix}_{}_{}",
        encode_base62(timestamp_ms.unsigned_abs()),
        random_segment(RANDOM_SEGMENT_LEN)
    )
}

/// Encode a number with the base62 alphabet, most significant digit first.
#[must_use]
pub fn encode_base62(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_segment(len: usize) -> String {
    let mut bytes = vec![0u8; len * 4];
    if let Err(error) = OsRng.try_fill_bytes(&mut bytes) {
        tracing::debug!("OS randomness unavailable ({error}), using thread rng");
        rand::thread_rng().fill_bytes(&mut bytes);
    }

    bytes
        .chunks_exact(4)
        .map(|chunk| {
            let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            char::from(ALPHABET[(word % 62) as usize])
        })
        .collect()
}
