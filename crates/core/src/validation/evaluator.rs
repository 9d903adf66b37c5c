//! Rule evaluator. Pure logic, no network access.

use serde_json::Value;

use super::rules::{FieldRule, RuleSet, ValidationPolicy, ValidationResult, Violation};
use crate::Payload;

/// Evaluate a rule set against a payload.
///
/// Missing means absent, `null` or an empty string. Format checks only run
/// on present values; see [`super::FieldFormat::accepts`] for which JSON types
/// each format allows.
pub fn validate(payload: &Payload, rules: &RuleSet, policy: ValidationPolicy) -> ValidationResult {
    let mut violations = Vec::new();

    for rule in rules.rules() {
        if let Some(violation) = evaluate_rule(rule, payload.get(&rule.field)) {
            violations.push(violation);
            if policy == ValidationPolicy::FailFast {
                break;
            }
        }
    }

    ValidationResult { violations }
}

fn evaluate_rule(rule: &FieldRule, value: Option<&Value>) -> Option<Violation> {
    let value = match value {
        None | Some(Value::Null) => return missing(rule),
        Some(Value::String(s)) if s.is_empty() => return missing(rule),
        Some(v) => v,
    };

    let format = rule.format?;
    if format.accepts(value) {
        None
    } else {
        Some(Violation::InvalidFormat {
            field: rule.field.clone(),
            expected: format,
        })
    }
}

fn missing(rule: &FieldRule) -> Option<Violation> {
    rule.required.then(|| Violation::MissingField {
        field: rule.field.clone(),
    })
}
