//! Validation rule, outcome, and report types.

use serde::Serialize;
use serde_json::Value;

use super::html::{HtmlRule, HTML_MESSAGE};
use super::nanoid::{NanoidRule, NANOID_MESSAGE};
use crate::error::CoreError;

/// Metadata attached to a rule at registration time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Replaces the rule's default message template.
    pub message: Option<String>,
    /// Validation groups this rule belongs to.
    pub groups: Vec<String>,
    /// Run regardless of the groups being validated.
    pub always: bool,
}

impl RuleOptions {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn always(mut self) -> Self {
        self.always = true;
        self
    }

    /// Whether a rule with these options runs when validating `groups`.
    ///
    /// Validating with no groups runs every rule. Otherwise only rules in one
    /// of `groups` run, plus rules marked `always`; ungrouped rules are
    /// skipped.
    pub fn applies_to(&self, groups: &[&str]) -> bool {
        self.always
            || groups.is_empty()
            || self.groups.iter().any(|g| groups.contains(&g.as_str()))
    }
}

/// A stateless predicate over one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    Nanoid(NanoidRule),
    Html(HtmlRule),
}

impl ValidationRule {
    /// Nanoid rule with the default length of 21.
    pub fn nanoid() -> Self {
        Self::Nanoid(NanoidRule::default())
    }

    /// HTML allow-list rule with the default 18 tags.
    pub fn html() -> Self {
        Self::Html(HtmlRule::default())
    }

    /// Constraint name reported in field violations.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nanoid(_) => "isNanoid",
            Self::Html(_) => "isValidHtml",
        }
    }

    pub fn options(&self) -> &RuleOptions {
        match self {
            Self::Nanoid(rule) => rule.options(),
            Self::Html(rule) => rule.options(),
        }
    }

    pub fn check(&self, value: &Value) -> bool {
        match self {
            Self::Nanoid(rule) => rule.check(value),
            Self::Html(rule) => rule.check(value),
        }
    }

    /// Evaluate the rule and render its message for `property`.
    pub fn evaluate(&self, property: &str, value: &Value) -> ValidationOutcome {
        let template = self
            .options()
            .message
            .as_deref()
            .unwrap_or_else(|| self.default_message());

        ValidationOutcome {
            passed: self.check(value),
            message: render_message(template, property, value, &self.constraint()),
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            Self::Nanoid(_) => NANOID_MESSAGE,
            Self::Html(_) => HTML_MESSAGE,
        }
    }

    /// First rule parameter, as substituted for `$constraint1`.
    fn constraint(&self) -> String {
        match self {
            Self::Nanoid(rule) => rule.length().to_string(),
            Self::Html(rule) => rule.allowed_tags().join(", "),
        }
    }
}

impl From<NanoidRule> for ValidationRule {
    fn from(rule: NanoidRule) -> Self {
        Self::Nanoid(rule)
    }
}

impl From<HtmlRule> for ValidationRule {
    fn from(rule: HtmlRule) -> Self {
        Self::Html(rule)
    }
}

/// Result of evaluating one rule against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub message: String,
}

/// Substitute `$property`, `$value` and `$constraint1` in a message template.
fn render_message(template: &str, property: &str, value: &Value, constraint: &str) -> String {
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    template
        .replace("$property", property)
        .replace("$value", &value)
        .replace("$constraint1", constraint)
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub constraint: String,
    pub message: String,
}

/// Aggregated result of validating one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn from_violations(errors: Vec<FieldViolation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Names of the failing fields, deduplicated, in report order.
    pub fn failing_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for violation in &self.errors {
            if !fields.contains(&violation.field.as_str()) {
                fields.push(&violation.field);
            }
        }
        fields
    }

    /// One-line description used in error displays and logs.
    pub fn summary(&self) -> String {
        if self.is_valid {
            "no violations".to_string()
        } else {
            format!("invalid fields: {}", self.failing_fields().join(", "))
        }
    }

    /// Convert a failing report into [`CoreError::Validation`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}
