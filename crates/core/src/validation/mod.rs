//! Payload validation engine.
//!
//! Rule sets are declarative (field name, required flag, optional format)
//! and evaluated by a pure function, so every entry point validates the
//! same way.

pub mod evaluator;
pub mod formats;
pub mod rules;

pub use evaluator::validate;
pub use formats::FieldFormat;
pub use rules::{FieldRule, RuleSet, ValidationPolicy, ValidationResult, Violation};
