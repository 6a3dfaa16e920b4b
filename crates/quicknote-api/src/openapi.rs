//! OpenAPI description of the HTTP surface.

use utoipa::OpenApi;

use quicknote_core::{
    CreateNoteRequest, DeleteNoteRequest, DeleteNoteResponse, ErrorKind, ErrorResponse, Note,
};

use crate::handlers::{notes, system};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quicknote API",
        description = "Create, list and delete short text notes"
    ),
    paths(
        notes::list_notes,
        notes::create_note,
        notes::delete_note,
        system::health_check,
    ),
    components(schemas(
        Note,
        CreateNoteRequest,
        DeleteNoteRequest,
        DeleteNoteResponse,
        ErrorResponse,
        ErrorKind,
        system::HealthResponse,
    )),
    tags(
        (name = "Notes", description = "Note create, list and delete"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
