//! HTTP error type: maps report failures to status codes and plain-text bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqkit_report::ReportError;
use thiserror::Error;

/// Message for requests that match no report route.
pub const C_MSG_ROUTE_NOT_FOUND: &str =
    "Ruta no reconocida. Use una de las rutas de generación de reportes válidas.";

/// Request failure as seen by the client.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed body, missing keys or unusable columns.
    #[error("{0}")]
    BadRequest(String),
    /// Path matches no report route.
    #[error("{0}")]
    NotFound(String),
    /// Failure while generating the workbook.
    #[error("Ocurrió un error interno en el servidor: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn route_not_found() -> Self {
        Self::NotFound(C_MSG_ROUTE_NOT_FOUND.to_string())
    }
}

impl From<ReportError> for ServiceError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Schema { .. } | ReportError::Validation(_) => {
                Self::BadRequest(err.to_string())
            }
            ReportError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), message = %message, "Server error response");
        } else {
            tracing::warn!(status = status.as_u16(), message = %message, "Client error response");
        }
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_errors_map_to_status() {
        let schema = ServiceError::from(ReportError::Schema {
            column: "Dias".to_string(),
            candidates: vec!["Días".to_string()],
            columns_found: vec!["Tipo".to_string()],
        });
        assert_eq!(schema.status(), StatusCode::BAD_REQUEST);
        assert!(schema.to_string().contains("Tipo"));

        let validation = ServiceError::from(ReportError::Validation("falta".to_string()));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "falta");

        let internal = ServiceError::from(ReportError::Internal("xlsx write error".to_string()));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            internal.to_string(),
            "Ocurrió un error interno en el servidor: xlsx write error"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ServiceError::route_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
