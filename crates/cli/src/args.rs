//! Command-line arguments and their value parsers.

use clap::{Parser, Subcommand};
use leadrelay_core::validation::{FieldFormat, RuleSet};
use leadrelay_core::Payload;
use leadrelay_forward::Method;
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "leadrelay")]
#[command(about = "Validate payloads and forward them to the lead database or analysis engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mark a lead as having booked a Calendly event
    CalendlyStatus {
        /// Lead UUID
        #[arg(long)]
        lead_id: String,

        /// Calendly event id
        #[arg(long)]
        event_id: String,

        /// ISO-8601 time of the booked slot
        #[arg(long)]
        scheduled_at: Option<String>,
    },

    /// Ask the analysis engine to grade a website
    Analyze {
        #[arg(long)]
        url: String,

        #[arg(long)]
        company_name: String,

        #[arg(long)]
        industry: Option<String>,

        /// Project UUID the lead belongs to
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Search leads by company name
    FindLead {
        #[arg(short, long)]
        company: String,

        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Call a database function
    Rpc {
        /// Function name
        function: String,

        /// JSON object passed as the function arguments
        #[arg(long, default_value = "{}", value_parser = parse_json)]
        args: Value,
    },

    /// Validate a JSON body and forward it to an arbitrary endpoint
    Forward {
        /// Absolute http(s) URL
        #[arg(short, long)]
        endpoint: String,

        #[arg(short, long, default_value = "POST", value_parser = parse_method)]
        method: Method,

        /// JSON object sent as the request body
        #[arg(short, long, default_value = "{}", value_parser = parse_payload)]
        body: Payload,

        /// Required field, optionally with a format: `name`, `name:uuid`,
        /// `name:iso8601`, `name:url` or `name:text`. Repeatable.
        #[arg(short, long = "require", value_parser = parse_required_field)]
        require: Vec<RequiredField>,
    },
}

/// A `--require` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredField {
    pub field: String,
    pub format: Option<FieldFormat>,
}

/// Build the rule set for `forward` from its `--require` arguments.
pub fn rule_set(required: &[RequiredField]) -> RuleSet {
    required.iter().fold(RuleSet::new(), |rules, req| match req.format {
        Some(format) => rules.required_with(&req.field, format),
        None => rules.required(&req.field),
    })
}

pub fn parse_required_field(raw: &str) -> Result<RequiredField, String> {
    let (field, format) = match raw.split_once(':') {
        Some((field, format)) => (field, Some(parse_format(format)?)),
        None => (raw, None),
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok(RequiredField {
        field: field.to_string(),
        format,
    })
}

fn parse_format(raw: &str) -> Result<FieldFormat, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "uuid" => Ok(FieldFormat::Uuid),
        "iso8601" | "iso-8601" | "timestamp" => Ok(FieldFormat::Iso8601),
        "url" => Ok(FieldFormat::Url),
        "text" => Ok(FieldFormat::Text),
        other => Err(format!("unknown format '{other}' (expected uuid, iso8601, url or text)")),
    }
}

pub fn parse_method(raw: &str) -> Result<Method, String> {
    Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| format!("invalid HTTP method '{raw}'"))
}

pub fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

pub fn parse_payload(raw: &str) -> Result<Payload, String> {
    match parse_json(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err("body must be a JSON object".to_string()),
    }
}
