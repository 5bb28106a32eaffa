use crate::validation::rules::ValidationReport;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A rule was constructed with parameters that can never match.
    #[error("Invalid rule configuration: {0}")]
    InvalidRule(String),

    /// A payload failed one or more field rules.
    #[error("Validation failed: {}", .0.summary())]
    Validation(ValidationReport),
}
