pub mod analysis;
pub mod calendly;
pub mod leads;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use leadrelay_core::Payload;

use crate::error::{AppError, AppResult};

/// Unwrap a JSON object body, turning extractor rejections (malformed
/// JSON, wrong content type, non-object body) into a 400 envelope.
pub(crate) fn json_payload(body: Result<Json<Payload>, JsonRejection>) -> AppResult<Payload> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Unwrap query parameters, turning a malformed query string into a 400
/// envelope.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
