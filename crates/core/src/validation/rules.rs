//! Validation rule and result types.

use serde::Serialize;

use super::formats::FieldFormat;

/// Presence and format requirements for one payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: String,
    pub required: bool,
    pub format: Option<FieldFormat>,
}

/// Ordered set of field rules. Rules are evaluated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and non-empty.
    pub fn required(self, field: &str) -> Self {
        self.push(field, true, None)
    }

    /// Field must be present, non-empty and match `format`.
    pub fn required_with(self, field: &str, format: FieldFormat) -> Self {
        self.push(field, true, Some(format))
    }

    /// Field may be absent; when present it must match `format`.
    pub fn optional_with(self, field: &str, format: FieldFormat) -> Self {
        self.push(field, false, Some(format))
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    fn push(mut self, field: &str, required: bool, format: Option<FieldFormat>) -> Self {
        self.rules.push(FieldRule {
            field: field.to_string(),
            required,
            format,
        });
        self
    }
}

/// Whether evaluation stops at the first violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    #[default]
    FailFast,
    CollectAll,
}

/// A single field-level violation. The `Display` text is the message shown
/// to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("{field} is required")]
    MissingField { field: String },

    #[error("Invalid {field} format. Must be {}.", .expected.description())]
    InvalidFormat { field: String, expected: FieldFormat },
}

impl Violation {
    pub fn field(&self) -> &str {
        match self {
            Violation::MissingField { field } | Violation::InvalidFormat { field, .. } => field,
        }
    }
}

/// Outcome of evaluating a rule set against one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", join_messages(.violations))]
pub struct ValidationResult {
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// `Ok(())` when no rule was violated, otherwise the result itself as
    /// the error.
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
