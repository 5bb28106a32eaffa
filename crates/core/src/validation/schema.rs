//! Per-DTO rule registry.
//!
//! A [`Schema`] lists, for each field of a request payload, the rules that
//! apply to it. Validation walks the list in declaration order and collects
//! every failure instead of stopping at the first one.

use serde_json::{Map, Value};

use super::rules::{FieldViolation, ValidationReport, ValidationRule};

/// The rules attached to one payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<ValidationRule>,
    /// Skip the rules when the property is absent or `null`.
    pub optional: bool,
}

/// Ordered field/rule declarations for one request payload type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required `field` with the given rules. Declaring the same
    /// field twice appends to its rule list.
    pub fn field<I>(self, field: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = ValidationRule>,
    {
        self.declare(field.into(), rules, false)
    }

    /// Declare a `field` whose rules only run when a non-null value is present.
    pub fn optional_field<I>(self, field: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = ValidationRule>,
    {
        self.declare(field.into(), rules, true)
    }

    fn declare<I>(mut self, field: String, rules: I, optional: bool) -> Self
    where
        I: IntoIterator<Item = ValidationRule>,
    {
        match self.fields.iter_mut().find(|f| f.field == field) {
            Some(existing) => {
                existing.rules.extend(rules);
                existing.optional |= optional;
            }
            None => self.fields.push(FieldRules {
                field,
                rules: rules.into_iter().collect(),
                optional,
            }),
        }
        self
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    /// Run every rule against `data`.
    ///
    /// A missing required field is evaluated as `null`, which neither rule
    /// accepts.
    pub fn validate(&self, data: &Map<String, Value>) -> ValidationReport {
        self.validate_groups(data, &[])
    }

    /// Run only the rules that apply to `groups` (see
    /// [`RuleOptions::applies_to`](super::rules::RuleOptions::applies_to)).
    pub fn validate_groups(&self, data: &Map<String, Value>, groups: &[&str]) -> ValidationReport {
        let missing = Value::Null;
        let mut errors = Vec::new();

        for field in &self.fields {
            let value = data.get(&field.field).unwrap_or(&missing);
            if field.optional && value.is_null() {
                continue;
            }
            for rule in &field.rules {
                if !rule.options().applies_to(groups) {
                    continue;
                }
                let outcome = rule.evaluate(&field.field, value);
                if !outcome.passed {
                    errors.push(FieldViolation {
                        field: field.field.clone(),
                        constraint: rule.name().to_string(),
                        message: outcome.message,
                    });
                }
            }
        }

        ValidationReport::from_violations(errors)
    }

    /// Drop every property that has no declared rules.
    pub fn whitelist(&self, data: &mut Map<String, Value>) {
        data.retain(|key, _| self.declares(key));
    }
}

/// Implemented by request payload types to name their validation rules.
///
/// Typically backed by a `static LazyLock<Schema>`:
///
/// ```ignore
/// impl RequestSchema for CreateNote {
///     fn schema() -> &'static Schema {
///         static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
///             Schema::new()
///                 .field("id", [ValidationRule::nanoid()])
///                 .field("body", [ValidationRule::html()])
///         });
///         &SCHEMA
///     }
/// }
/// ```
pub trait RequestSchema {
    fn schema() -> &'static Schema;
}
