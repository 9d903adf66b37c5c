//! PostgREST query builder.
//!
//! Supports the PostgREST subset in use: `select`, `eq`, `ilike`, `order`,
//! `limit` and `update`.

use std::fmt::Display;

use leadrelay_forward::OutboundRequest;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::SupabaseClient;
use crate::error::DbError;

/// A pending query against one table. Nothing is sent until `execute`,
/// `fetch`, `maybe_single` or `update` is awaited.
#[derive(Debug, Clone)]
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a SupabaseClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Case-insensitive pattern match; `%` is the wildcard.
    pub fn ilike(mut self, column: &str, pattern: &str) -> Self {
        self.filters.push((column.to_string(), format!("ilike.{pattern}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{column}.{direction}"));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run the query and return the raw rows.
    pub async fn execute(self) -> Result<Vec<Value>, DbError> {
        self.fetch().await
    }

    /// Run the query and decode every row.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, DbError> {
        let request = self.apply(OutboundRequest::get(self.path()));
        tracing::debug!(table = %self.table, "Selecting rows");
        let body = self.client.forwarder().request(request).await?;
        decode_rows(body)
    }

    /// Run the query limited to one row.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>, DbError> {
        let rows = self.limit(1).fetch::<T>().await?;
        Ok(rows.into_iter().next())
    }

    /// Patch the filtered rows and return them as updated.
    ///
    /// At least one filter is required.
    pub async fn update(self, values: Value) -> Result<Vec<Value>, DbError> {
        if self.filters.is_empty() {
            return Err(DbError::UnfilteredUpdate(self.table));
        }
        let request = self
            .apply(OutboundRequest::patch(self.path(), values))
            .header("Prefer", "return=representation");
        tracing::debug!(table = %self.table, filters = ?self.filters, "Updating rows");
        let body = self.client.forwarder().request(request).await?;
        decode_rows(body)
    }

    fn path(&self) -> String {
        format!("/{}", self.table)
    }

    fn apply(&self, mut request: OutboundRequest) -> OutboundRequest {
        if let Some(select) = &self.select {
            request = request.query("select", select.as_str());
        }
        for (column, filter) in &self.filters {
            request = request.query(column.as_str(), filter.as_str());
        }
        if let Some(order) = &self.order {
            request = request.query("order", order.as_str());
        }
        if let Some(limit) = self.limit {
            request = request.query("limit", limit.to_string());
        }
        request
    }
}

/// PostgREST answers with a JSON array; an empty body means no rows.
fn decode_rows<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, DbError> {
    match body {
        Value::Null => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}
