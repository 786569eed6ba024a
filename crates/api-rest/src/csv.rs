//! Handlers for the CSV document resource.
//!
//! Structurally the twin of [`crate::json`]: same five operations, same
//! envelope contract, with CSV parsing and the CSV invalid-payload wording.

use axum::extract::{Path as AxumPath, State};
use axum::response::Json;

use fichero_core::{DocumentError, DocumentFormat};
use fichero_types::DocumentName;

use crate::error::ApiError;
use crate::schemas::{self, Envelope, StoreDocumentReq, UpdateDocumentReq};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/csv",
    responses(
        (status = 200, description = "Names of the stored CSV documents", body = Envelope)
    )
)]
/// Lists the stored CSV documents
///
/// Returns the bare filename of every document in the store whose extension
/// is exactly `csv`.
///
/// # Arguments
/// * `state` - Application state containing the document service
///
/// # Returns
/// * `Ok(Json<Envelope>)` - "Operación exitosa" with the names in `contenido`
/// * `Err(ApiError)` - Internal error if the listing fails
#[axum::debug_handler]
pub async fn index(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    match state.documents.list(DocumentFormat::Csv) {
        Ok(names) => Ok(Json(Envelope::with_content(
            schemas::MSG_OPERATION_OK,
            names.into(),
        ))),
        Err(e) => {
            tracing::error!("List CSV documents error: {:?}", e);
            Err(ApiError::Internal)
        }
    }
}

#[utoipa::path(
    post,
    path = "/csv",
    request_body = StoreDocumentReq,
    responses(
        (status = 200, description = "Document created", body = Envelope),
        (status = 409, description = "A document with this name already exists", body = Envelope),
        (status = 415, description = "Payload is not well-formed CSV", body = Envelope),
        (status = 422, description = "Filename does not end in .csv"),
        (status = 500, description = "Document could not be written", body = Envelope)
    )
)]
/// Creates a new CSV document
///
/// Validates the payload as CSV and writes it under the requested filename.
/// Creation never overwrites: a taken name answers 409.
///
/// # Arguments
/// * `state` - Application state containing the document service
/// * `req` - Target filename and raw payload
///
/// # Returns
/// * `Ok(Json<Envelope>)` - "Fichero guardado exitosamente"
/// * `Err(ApiError)` - Conflict, invalid payload or write failure
#[axum::debug_handler]
pub async fn store(
    State(state): State<AppState>,
    Json(req): Json<StoreDocumentReq>,
) -> Result<Json<Envelope>, ApiError> {
    match state
        .documents
        .store(DocumentFormat::Csv, &req.filename, &req.content)
    {
        Ok(()) => Ok(Json(Envelope::message(schemas::MSG_FILE_SAVED))),
        Err(DocumentError::WrongExtension { .. }) => {
            Err(ApiError::Validation("filename must end in .csv"))
        }
        Err(DocumentError::AlreadyExists(_)) => Err(ApiError::AlreadyExists),
        Err(DocumentError::InvalidContent(_)) => Err(ApiError::InvalidCsv),
        Err(e) => {
            tracing::error!("Store CSV document error: {:?}", e);
            Err(ApiError::SaveFailed)
        }
    }
}

#[utoipa::path(
    get,
    path = "/csv/{filename}",
    params(
        ("filename" = String, Path, description = "Name of the document to read")
    ),
    responses(
        (status = 200, description = "Parsed document rows", body = Envelope),
        (status = 404, description = "No document with this name", body = Envelope),
        (status = 500, description = "Stored content no longer parses as CSV", body = Envelope)
    )
)]
/// Reads a CSV document
///
/// Parses the stored bytes and returns the rows in `contenido` as an array
/// of arrays of strings.
///
/// # Arguments
/// * `state` - Application state containing the document service
/// * `filename` - Name of the document to read
///
/// # Returns
/// * `Ok(Json<Envelope>)` - "Operación exitosa" with the parsed rows
/// * `Err(ApiError)` - Not found, or read error if the content is corrupted
#[axum::debug_handler]
pub async fn show(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Json<Envelope>, ApiError> {
    // A name the store could never hold reads as absent
    let Ok(name) = DocumentName::new(&filename) else {
        return Err(ApiError::NotFound);
    };
    match state.documents.show(DocumentFormat::Csv, &name) {
        Ok(content) => Ok(Json(Envelope::with_content(
            schemas::MSG_OPERATION_OK,
            content.to_value(),
        ))),
        Err(DocumentError::NotFound(_)) => Err(ApiError::NotFound),
        Err(DocumentError::Corrupted(..)) => Err(ApiError::ReadFailed),
        Err(e) => {
            tracing::error!("Show CSV document error: {:?}", e);
            Err(ApiError::Internal)
        }
    }
}

#[utoipa::path(
    put,
    path = "/csv/{filename}",
    params(
        ("filename" = String, Path, description = "Name of the document to replace")
    ),
    request_body = UpdateDocumentReq,
    responses(
        (status = 200, description = "Document replaced", body = Envelope),
        (status = 404, description = "No document with this name", body = Envelope),
        (status = 415, description = "Payload is not well-formed CSV", body = Envelope),
        (status = 500, description = "Replacement could not be verified", body = Envelope)
    )
)]
/// Replaces the content of a CSV document
///
/// Validates the payload as CSV, writes it and reads it back to verify the
/// stored rows match what was submitted.
///
/// # Arguments
/// * `state` - Application state containing the document service
/// * `filename` - Name of the document to replace
/// * `req` - Raw replacement payload
///
/// # Returns
/// * `Ok(Json<Envelope>)` - "Fichero actualizado exitosamente"
/// * `Err(ApiError)` - Not found, invalid payload or failed verification
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
    Json(req): Json<UpdateDocumentReq>,
) -> Result<Json<Envelope>, ApiError> {
    let Ok(name) = DocumentName::new(&filename) else {
        return Err(ApiError::NotFound);
    };
    match state
        .documents
        .update(DocumentFormat::Csv, &name, &req.content)
    {
        Ok(()) => Ok(Json(Envelope::message(schemas::MSG_FILE_UPDATED))),
        Err(DocumentError::NotFound(_)) => Err(ApiError::NotFound),
        Err(DocumentError::InvalidContent(_)) => Err(ApiError::InvalidCsv),
        Err(DocumentError::VerificationFailed(_)) => Err(ApiError::UpdateFailed),
        Err(e) => {
            tracing::error!("Update CSV document error: {:?}", e);
            Err(ApiError::Internal)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/csv/{filename}",
    params(
        ("filename" = String, Path, description = "Name of the document to delete")
    ),
    responses(
        (status = 200, description = "Document deleted", body = Envelope),
        (status = 404, description = "No document with this name", body = Envelope)
    )
)]
/// Deletes a CSV document
///
/// # Arguments
/// * `state` - Application state containing the document service
/// * `filename` - Name of the document to delete
///
/// # Returns
/// * `Ok(Json<Envelope>)` - "Fichero eliminado exitosamente"
/// * `Err(ApiError)` - Not found if no such document exists
#[axum::debug_handler]
pub async fn destroy(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Json<Envelope>, ApiError> {
    let Ok(name) = DocumentName::new(&filename) else {
        return Err(ApiError::NotFound);
    };
    match state.documents.destroy(&name) {
        Ok(()) => Ok(Json(Envelope::message(schemas::MSG_FILE_DELETED))),
        Err(DocumentError::NotFound(_)) => Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!("Destroy CSV document error: {:?}", e);
            Err(ApiError::Internal)
        }
    }
}
