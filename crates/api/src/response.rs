//! Success responses.
//!
//! All handlers answer with the shared [`Envelope`] so callers always see
//! `{ success, data?, error?, message? }`. Errors go through
//! [`crate::error::AppError`].

use axum::Json;
use leadrelay_core::envelope::Envelope;
use serde::Serialize;

/// `200 { success: true, data }`.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope::ok(data))
}

/// `200 { success: true, data, message }`.
pub fn ok_with_message<T: Serialize>(data: T, message: &str) -> Json<Envelope<T>> {
    Json(Envelope::ok(data).with_message(message))
}
