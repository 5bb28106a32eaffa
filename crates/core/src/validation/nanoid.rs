//! Nanoid identifier format rule.
//!
//! A Nanoid is a random identifier drawn from the URL-safe alphabet
//! `[A-Za-z0-9_-]`, 21 characters long unless configured otherwise.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use validator::ValidationError;

use super::rules::RuleOptions;
use crate::error::CoreError;

/// Length of a Nanoid produced with the library defaults.
pub const DEFAULT_NANOID_LENGTH: usize = 21;

/// Default message template for a failed Nanoid check.
pub const NANOID_MESSAGE: &str = "$property must be a valid Nanoid";

static NANOID_ALPHABET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// Check that `value` is a string Nanoid of exactly `length` characters.
///
/// Any non-string value (null, numbers, arrays, objects) fails.
pub fn is_nanoid(value: &Value, length: usize) -> bool {
    match value {
        Value::String(s) => is_nanoid_str(s, length),
        _ => false,
    }
}

/// String-only variant of [`is_nanoid`].
///
/// The alphabet is ASCII, so byte length equals character count once the
/// alphabet check has passed.
pub fn is_nanoid_str(s: &str, length: usize) -> bool {
    s.len() == length && NANOID_ALPHABET_RE.is_match(s)
}

/// Default 21-character Nanoid check reported as a [`ValidationError`], for
/// callers that collect failures into `validator::ValidationErrors`.
pub fn validate_nanoid(value: &str) -> Result<(), ValidationError> {
    if is_nanoid_str(value, DEFAULT_NANOID_LENGTH) {
        Ok(())
    } else {
        Err(ValidationError::new("isNanoid").with_message(Cow::Borrowed("must be a valid Nanoid")))
    }
}

/// Rule parameters for the Nanoid check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NanoidRule {
    length: usize,
    options: RuleOptions,
}

impl Default for NanoidRule {
    fn default() -> Self {
        Self {
            length: DEFAULT_NANOID_LENGTH,
            options: RuleOptions::default(),
        }
    }
}

impl NanoidRule {
    /// A rule expecting identifiers of exactly `length` characters.
    ///
    /// Returns [`CoreError::InvalidRule`] for a zero length.
    pub fn with_length(length: usize) -> Result<Self, CoreError> {
        if length == 0 {
            return Err(CoreError::InvalidRule(
                "Nanoid length must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            length,
            options: RuleOptions::default(),
        })
    }

    /// Attach message / group metadata. The configured length is kept.
    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    pub fn check(&self, value: &Value) -> bool {
        is_nanoid(value, self.length)
    }
}
