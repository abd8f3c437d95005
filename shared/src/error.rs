use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Guard failures. The display strings are part of the client contract
    // and must not be reworded.
    #[error("Pet not found")]
    PetNotFound,
    #[error("Service not found")]
    ServiceNotFound,
    #[error("Vaccines must be up to date for reservation")]
    VaccinationNotCurrent,
    #[error("Service capacity reached for this date")]
    CapacityExceeded,
    #[error("Pet already has a reservation for this service on this date")]
    DuplicateBooking,
    #[error("Selected staff member is not available at this time")]
    StaffUnavailable,
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{message}")]
    MalformedRequest { field: String, message: String },
    #[error("failed to convert stored value: {0}")]
    ConversionEntityError(String),
    #[error("failed to start or commit a transaction")]
    TransactionError(#[source] sqlx::Error),
    #[error("database query failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("external service call failed: {0}")]
    ExternalServiceError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Structural validation is the one case where the client gets a
        // list of field-level issues rather than a single reason string.
        // A body that fails to parse at all reports the same shape, with
        // the one field the decoder choked on.
        if let AppError::ValidationError(report) = &self {
            let issues = report
                .iter()
                .map(|(path, error)| {
                    json!({ "field": path.to_string(), "message": error.to_string() })
                })
                .collect::<Vec<_>>();
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": issues }))).into_response();
        }
        if let AppError::MalformedRequest { field, message } = &self {
            let issues = vec![json!({ "field": field, "message": message })];
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": issues }))).into_response();
        }

        let status_code = match &self {
            AppError::PetNotFound | AppError::ServiceNotFound | AppError::EntityNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::VaccinationNotCurrent
            | AppError::CapacityExceeded
            | AppError::DuplicateBooking
            | AppError::StaffUnavailable => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) | AppError::MalformedRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::ConversionEntityError(_)
            | AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::ExternalServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server-side failures are logged with their cause chain but the
        // client only ever sees a generic message.
        let body = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "unexpected error happened"
            );
            json!({ "error": "Internal Server Error" })
        } else {
            json!({ "error": self.to_string() })
        };

        (status_code, Json(body)).into_response()
    }
}
