//! Request validation rules.
//!
//! Provides the two field rules (Nanoid format, HTML tag allow-list), the
//! rule/outcome/report types, and the per-DTO [`schema::Schema`] registry
//! that walks them. All pure logic.

pub mod html;
pub mod nanoid;
pub mod rules;
pub mod schema;

pub use html::{HtmlRule, DEFAULT_ALLOWED_TAGS};
pub use nanoid::{NanoidRule, DEFAULT_NANOID_LENGTH};
pub use rules::{FieldViolation, RuleOptions, ValidationOutcome, ValidationReport, ValidationRule};
pub use schema::{FieldRules, RequestSchema, Schema};
