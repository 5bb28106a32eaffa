//! Restricted HTML rule: only allow-listed opening tags may appear.
//!
//! Tags are found with a case-insensitive scan for `<word>`. Tags carrying
//! attributes (`<div class="x">`) or a self-closing slash (`<br/>`) do not
//! match that pattern and are not inspected at all. Matching against the
//! allow-list is exact, so `<DIV>` is rejected by the default list.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use validator::ValidationError;

use super::rules::RuleOptions;
use crate::error::CoreError;

/// Opening tags accepted when no allow-list is configured.
pub const DEFAULT_ALLOWED_TAGS: [&str; 18] = [
    "<div>",
    "<strong>",
    "<em>",
    "<p>",
    "<a>",
    "<del>",
    "<br>",
    "<pre>",
    "<blockquote>",
    "<ul>",
    "<ol>",
    "<li>",
    "<h1>",
    "<h2>",
    "<h3>",
    "<h4>",
    "<h5>",
    "<h6>",
];

/// Default message template for a failed allow-list check.
pub const HTML_MESSAGE: &str = "$property can only contains the following HTML tags: $constraint1";

static OPENING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)<[a-z0-9_]+>").expect("valid regex"));

static ALLOW_LIST_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<[a-z0-9_]+>$").expect("valid regex"));

/// Check that `value` is a string whose opening tags are all allow-listed.
pub fn is_valid_html<S: AsRef<str>>(value: &Value, allowed_tags: &[S]) -> bool {
    match value {
        Value::String(s) => contains_only_allowed_tags(s, allowed_tags),
        _ => false,
    }
}

/// String-only variant of [`is_valid_html`]. Text without tags passes.
pub fn contains_only_allowed_tags<S: AsRef<str>>(s: &str, allowed_tags: &[S]) -> bool {
    OPENING_TAG_RE
        .find_iter(s)
        .all(|tag| allowed_tags.iter().any(|allowed| allowed.as_ref() == tag.as_str()))
}

/// Allow-list check against [`DEFAULT_ALLOWED_TAGS`] reported as a
/// [`ValidationError`].
pub fn validate_html(value: &str) -> Result<(), ValidationError> {
    if contains_only_allowed_tags(value, &DEFAULT_ALLOWED_TAGS) {
        Ok(())
    } else {
        Err(ValidationError::new("isValidHtml")
            .with_message(Cow::Borrowed("contains HTML tags that are not allowed")))
    }
}

/// Rule parameters for the allow-list check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlRule {
    allowed_tags: Vec<String>,
    options: RuleOptions,
}

impl Default for HtmlRule {
    fn default() -> Self {
        Self {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            options: RuleOptions::default(),
        }
    }
}

impl HtmlRule {
    /// A rule accepting only the given opening tags, e.g. `["<p>", "<em>"]`.
    ///
    /// Every entry must be a lowercase bracketed tag name; anything else
    /// could never be matched by the tag scan.
    pub fn with_allowed_tags<I, S>(tags: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed_tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        if let Some(bad) = allowed_tags
            .iter()
            .find(|t| !ALLOW_LIST_ENTRY_RE.is_match(t))
        {
            return Err(CoreError::InvalidRule(format!(
                "Allowed HTML tag '{bad}' must look like '<tag>' in lowercase"
            )));
        }
        Ok(Self {
            allowed_tags,
            options: RuleOptions::default(),
        })
    }

    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn allowed_tags(&self) -> &[String] {
        &self.allowed_tags
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    pub fn check(&self, value: &Value) -> bool {
        is_valid_html(value, self.allowed_tags.as_slice())
    }
}
