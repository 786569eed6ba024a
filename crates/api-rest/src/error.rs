//! Mapping of handler outcomes onto the HTTP contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::schemas::{self, Envelope};

/// Error responses a handler can answer with
///
/// Contract errors render as an [`Envelope`] with their fixed message line.
/// [`ApiError::Validation`] and [`ApiError::Internal`] sit outside the
/// envelope contract and render as plain text, the way the framework itself
/// rejects malformed requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// 422: the request shape is wrong (bad filename suffix)
    Validation(&'static str),
    /// 409: a document with the requested name already exists
    AlreadyExists,
    /// 404: no document with the requested name exists
    NotFound,
    /// 415: the payload does not parse as JSON
    InvalidJson,
    /// 415: the payload does not parse as CSV
    InvalidCsv,
    /// 500: a create could not be written
    SaveFailed,
    /// 500: an update's read-back verification failed
    UpdateFailed,
    /// 500: stored content no longer parses as its format
    ReadFailed,
    /// 500: anything outside the message contract
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(reason) => {
                (StatusCode::UNPROCESSABLE_ENTITY, reason).into_response()
            }
            Self::AlreadyExists => enveloped(StatusCode::CONFLICT, schemas::MSG_FILE_EXISTS),
            Self::NotFound => enveloped(StatusCode::NOT_FOUND, schemas::MSG_FILE_MISSING),
            Self::InvalidJson => {
                enveloped(StatusCode::UNSUPPORTED_MEDIA_TYPE, schemas::MSG_INVALID_JSON)
            }
            Self::InvalidCsv => {
                enveloped(StatusCode::UNSUPPORTED_MEDIA_TYPE, schemas::MSG_INVALID_CSV)
            }
            Self::SaveFailed => {
                enveloped(StatusCode::INTERNAL_SERVER_ERROR, schemas::MSG_SAVE_ERROR)
            }
            Self::UpdateFailed => {
                enveloped(StatusCode::INTERNAL_SERVER_ERROR, schemas::MSG_UPDATE_ERROR)
            }
            Self::ReadFailed => {
                enveloped(StatusCode::INTERNAL_SERVER_ERROR, schemas::MSG_READ_ERROR)
            }
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response(),
        }
    }
}

fn enveloped(status: StatusCode, mensaje: &str) -> Response {
    (status, Json(Envelope::message(mensaje))).into_response()
}
