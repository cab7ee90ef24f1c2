//! Coupon code value object.
//!
//! A code is exactly [`CODE_LENGTH`] characters drawn from [`CODE_ALPHABET`].
//! Visitors type codes by hand at the counter, so parsing is forgiving about
//! surrounding whitespace and letter case but strict about everything else.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characters in every coupon code.
pub const CODE_LENGTH: usize = 8;

/// Characters a coupon code may contain.
pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of leading characters kept when a timestamp suffix is applied.
const TIMESTAMP_PREFIX_LEN: usize = 4;

/// Validation errors raised while parsing a coupon code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponCodeError {
    #[error("coupon code must not be empty")]
    Empty,
    #[error("coupon code must be {CODE_LENGTH} characters, got {actual}")]
    InvalidLength { actual: usize },
    #[error("coupon code contains unsupported character {character:?}")]
    InvalidCharacter { character: char },
}

/// Normalise raw user input: trim whitespace and upper-case.
///
/// # Examples
/// ```
/// use coupon_backend::domain::normalize_code_input;
///
/// assert_eq!(normalize_code_input("  zk8x2q1b \n"), "ZK8X2Q1B");
/// ```
pub fn normalize_code_input(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Validated, upper-case coupon code.
///
/// # Examples
/// ```
/// use coupon_backend::domain::CouponCode;
///
/// let code = CouponCode::parse(" zk8x2q1b ").expect("valid code");
/// assert_eq!(code.as_str(), "ZK8X2Q1B");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Parse user input into a code, normalising case and whitespace first.
    pub fn parse(raw: &str) -> Result<Self, CouponCodeError> {
        let normalised = normalize_code_input(raw);
        if normalised.is_empty() {
            return Err(CouponCodeError::Empty);
        }
        if let Some(character) = normalised
            .chars()
            .find(|ch| !ch.is_ascii() || !CODE_ALPHABET.contains(&(*ch as u8)))
        {
            return Err(CouponCodeError::InvalidCharacter { character });
        }
        if normalised.len() != CODE_LENGTH {
            return Err(CouponCodeError::InvalidLength {
                actual: normalised.len(),
            });
        }
        Ok(Self(normalised))
    }

    /// Build a code from alphabet indices, wrapping out-of-range values.
    pub(crate) fn from_alphabet_indices(indices: [usize; CODE_LENGTH]) -> Self {
        let code = indices
            .iter()
            .map(|index| char::from(CODE_ALPHABET[index % CODE_ALPHABET.len()]))
            .collect();
        Self(code)
    }

    /// Collision fallback: keep the first four characters and append the
    /// last four digits of `unix_millis`.
    ///
    /// # Examples
    /// ```
    /// use coupon_backend::domain::CouponCode;
    ///
    /// let code = CouponCode::parse("ZK8X2Q1B").expect("valid code");
    /// let fallback = code.with_timestamp_suffix(1_760_000_004_321);
    /// assert_eq!(fallback.as_str(), "ZK8X4321");
    /// ```
    #[must_use]
    pub fn with_timestamp_suffix(&self, unix_millis: i64) -> Self {
        let prefix: String = self.0.chars().take(TIMESTAMP_PREFIX_LEN).collect();
        Self(format!("{prefix}{:04}", unix_millis.rem_euclid(10_000)))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(value: CouponCode) -> Self {
        value.0
    }
}
