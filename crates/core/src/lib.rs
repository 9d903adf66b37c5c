//! Shared building blocks for the lead relay services.
//!
//! Everything here is pure logic: payload validation, the response
//! envelope, typed request extraction and configuration helpers. Network
//! access lives in `leadrelay-forward` and the collaborator clients built
//! on top of it.

pub mod config;
pub mod envelope;
pub mod error;
pub mod requests;
pub mod validation;

/// A caller-supplied JSON object, keyed by field name.
pub type Payload = serde_json::Map<String, serde_json::Value>;
