//! Router assembly and the report request handler.

use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use reqkit_io_xlsx::C_MIME_XLSX;
use reqkit_report::SpecReportArtifact;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::route::{parse_payload, resolve_route};

/// Build the service router.
///
/// Every path and method reaches the report handler, which dispatches on the
/// path suffix and answers `404` when no route matches.
pub fn build_router(config: &ServiceConfig) -> Router {
    Router::new()
        .fallback(handle_report_request)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
}

async fn handle_report_request(uri: Uri, body: Bytes) -> Result<Response, ServiceError> {
    let t_start = Instant::now();
    let Some(entry) = resolve_route(uri.path()) else {
        return Err(ServiceError::route_not_found());
    };

    let payload = parse_payload(&body)?;
    let request = entry.extract_request(payload)?;
    info!(
        route = ?entry.route,
        requisitions = request.requisitions.len(),
        summary_rows = request.psychologist_summary.len(),
        "report requested"
    );

    let handler = entry.handler;
    let artifact = tokio::task::spawn_blocking(move || handler(request))
        .await
        .map_err(|err| ServiceError::Internal(format!("report task failed: {err}")))??;

    info!(
        route = ?entry.route,
        file = %artifact.file_name,
        bytes = artifact.bytes.len(),
        elapsed_ms = (t_start.elapsed().as_millis() as u64),
        "report served"
    );
    Ok(derive_download_response(artifact))
}

/// `200` response carrying the workbook as an attachment.
pub fn derive_download_response(artifact: SpecReportArtifact) -> Response {
    let c_disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    let mut response = (StatusCode::OK, artifact.bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(C_MIME_XLSX));
    match HeaderValue::from_str(&c_disposition) {
        Ok(value) => {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
        Err(err) => {
            warn!(file = %artifact.file_name, error = %err, "Content-Disposition omitted");
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(file_name: &str) -> SpecReportArtifact {
        SpecReportArtifact {
            file_name: file_name.to_string(),
            bytes: b"PK\x03\x04".to_vec(),
            sheets: Vec::new(),
        }
    }

    #[test]
    fn test_download_response_sets_attachment_headers() {
        let response = derive_download_response(artifact("Reporte.xlsx"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], C_MIME_XLSX);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Reporte.xlsx\""
        );
    }

    #[test]
    fn test_download_response_omits_invalid_disposition() {
        let response = derive_download_response(artifact("Reporte\n.xlsx"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], C_MIME_XLSX);
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    }
}
