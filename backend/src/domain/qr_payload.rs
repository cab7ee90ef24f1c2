//! Extract a coupon code candidate from a decoded QR payload.
//!
//! Printed coupons encode the bare code, but some visitors share links that
//! end in the code, so path prefixes and query strings are stripped.

use super::{CODE_ALPHABET, CODE_LENGTH};

/// Reduce a raw QR payload to an upper-case code candidate.
///
/// # Examples
/// ```
/// use coupon_backend::domain::extract_code_candidate;
///
/// assert_eq!(extract_code_candidate(" zk8x2q1b "), "ZK8X2Q1B");
/// assert_eq!(
///     extract_code_candidate("https://coupons.example/c/zk8x2q1b?src=print"),
///     "ZK8X2Q1B"
/// );
/// ```
pub fn extract_code_candidate(payload: &str) -> String {
    let trimmed = payload.trim().trim_end_matches('/');
    let last_segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let without_query = last_segment
        .split(['?', '#'])
        .next()
        .unwrap_or(last_segment);
    without_query.to_uppercase()
}

/// Whether `candidate` has the shape of a coupon code.
pub fn looks_like_code(candidate: &str) -> bool {
    candidate.len() == CODE_LENGTH && candidate.bytes().all(|byte| CODE_ALPHABET.contains(&byte))
}
