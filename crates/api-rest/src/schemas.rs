//! Request and response shapes of the REST surface.
//!
//! Every contract endpoint answers with an [`Envelope`]: a Spanish-language
//! `mensaje` line plus, where the operation returns data, a `contenido`
//! field. The message strings are fixed and carried verbatim by clients, so
//! they are defined once here as constants.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use fichero_types::DocumentName;

/// Success line for read operations.
pub const MSG_OPERATION_OK: &str = "Operación exitosa";
/// Conflict line when a create targets a taken name.
pub const MSG_FILE_EXISTS: &str = "El fichero ya existe";
/// Invalid payload line for the JSON resource.
pub const MSG_INVALID_JSON: &str = "Contenido no es un JSON válido";
/// Invalid payload line for the CSV resource.
pub const MSG_INVALID_CSV: &str = "Contenido no es un CSV válido";
/// Success line for creates.
pub const MSG_FILE_SAVED: &str = "Fichero guardado exitosamente";
/// Failure line when a create cannot be written.
pub const MSG_SAVE_ERROR: &str = "Error al guardar el fichero";
/// Not-found line shared by every filename-addressed operation.
pub const MSG_FILE_MISSING: &str = "El fichero no existe";
/// Success line for updates.
pub const MSG_FILE_UPDATED: &str = "Fichero actualizado exitosamente";
/// Failure line when an update's post-write verification fails.
pub const MSG_UPDATE_ERROR: &str = "Error al actualizar el fichero";
/// Success line for deletes.
pub const MSG_FILE_DELETED: &str = "Fichero eliminado exitosamente";
/// Failure line when stored content cannot be read back as its format.
pub const MSG_READ_ERROR: &str = "Error al leer el fichero";
/// Status line of the health endpoint.
pub const MSG_HEALTH: &str = "API de ficheros operativa";

/// Response envelope carried by every contract endpoint
///
/// `contenido` is omitted from the serialised body entirely when an
/// operation has no data to return.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope {
    /// Human-readable outcome line
    #[schema(example = "Operación exitosa")]
    pub mensaje: String,
    /// Operation data: a list of names for index, parsed content for show
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub contenido: Option<Value>,
}

impl Envelope {
    /// Builds an envelope carrying only a message line.
    pub fn message(mensaje: &str) -> Self {
        Self {
            mensaje: mensaje.to_owned(),
            contenido: None,
        }
    }

    /// Builds an envelope carrying a message line and content.
    pub fn with_content(mensaje: &str, contenido: Value) -> Self {
        Self {
            mensaje: mensaje.to_owned(),
            contenido: Some(contenido),
        }
    }
}

/// Request body for creating a document
#[derive(Debug, Deserialize, ToSchema)]
pub struct StoreDocumentReq {
    /// Target filename; must end in the resource's suffix
    #[schema(value_type = String, example = "report.json")]
    pub filename: DocumentName,
    /// Raw document payload
    #[schema(example = "{\"x\": 1}")]
    pub content: String,
}

/// Request body for replacing a document's content
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDocumentReq {
    /// Raw document payload
    #[schema(example = "{\"x\": 2}")]
    pub content: String,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    /// Whether the service is able to answer requests
    pub ok: bool,
    /// Human-readable status line
    pub mensaje: String,
}
