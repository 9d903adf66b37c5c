//! Outbound request forwarding.
//!
//! [`Forwarder`] performs exactly one HTTP call per invocation using
//! [`reqwest`] and hands back the raw response. Classification into
//! transport and remote failures lives in [`ForwardError`]; the
//! validate-forward-normalize pipeline is [`relay`].

mod client;
mod error;
mod relay;
mod request;

pub use client::Forwarder;
pub use error::{check_status, ForwardError};
pub use relay::{relay, RelayError};
pub use request::OutboundRequest;
pub use reqwest::Method;
