//! Supabase (PostgREST) client for the leads database.
//!
//! All durable state lives in the hosted database; this crate only shapes
//! requests and decodes rows.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use error::DbError;

/// Check that the REST endpoint answers.
pub async fn health_check(client: &SupabaseClient) -> Result<(), DbError> {
    client.health_check().await
}
