//! Report route table and request payload extraction.

use reqkit_report::{
    Record, ReportError, SpecReportArtifact, build_dynamic_summary, build_formatted_report,
    build_psychologist_report,
};
use serde_json::{Map, Value};

/// Payload key holding requisition records.
pub const C_KEY_REQUISITIONS: &str = "datos_requisiciones";
/// Payload key holding the per-psychologist summary records.
pub const C_KEY_PSYCHOLOGIST_SUMMARY: &str = "datos_resumen_psicologo";

const C_MSG_EMPTY_BODY: &str = "No se recibieron datos JSON válidos.";
const C_MSG_MISSING_REQUISITIONS: &str = "El JSON debe contener la clave 'datos_requisiciones'.";
const C_MSG_MISSING_BOTH: &str =
    "El JSON debe contener las claves 'datos_requisiciones' y 'datos_resumen_psicologo'.";

/// Records pulled out of a validated payload.
#[derive(Debug, Clone, Default)]
pub struct SpecReportRequest {
    pub requisitions: Vec<Record>,
    pub psychologist_summary: Vec<Record>,
}

/// Report generator bound to a route.
pub type FnReportHandler = fn(SpecReportRequest) -> Result<SpecReportArtifact, ReportError>;

/// Known report routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumReportRoute {
    PsychologistReport,
    DynamicSummary,
    FormattedReport,
}

/// One row of the route table.
#[derive(Debug, Clone, Copy)]
pub struct SpecRouteEntry {
    /// Path suffix that selects the route.
    pub suffix: &'static str,
    pub route: EnumReportRoute,
    /// Payload keys that must be present and non-null.
    pub required_keys: &'static [&'static str],
    /// Message returned when a required key is missing.
    pub msg_missing_keys: &'static str,
    pub handler: FnReportHandler,
}

/// Route table, matched by path suffix in order.
pub static TUP_REPORT_ROUTES: [SpecRouteEntry; 3] = [
    SpecRouteEntry {
        suffix: "/generar-reporte-psicologos",
        route: EnumReportRoute::PsychologistReport,
        required_keys: &[C_KEY_REQUISITIONS],
        msg_missing_keys: C_MSG_MISSING_REQUISITIONS,
        handler: generate_psychologist_report,
    },
    SpecRouteEntry {
        suffix: "/generar-resumen-dinamico",
        route: EnumReportRoute::DynamicSummary,
        required_keys: &[C_KEY_REQUISITIONS, C_KEY_PSYCHOLOGIST_SUMMARY],
        msg_missing_keys: C_MSG_MISSING_BOTH,
        handler: generate_dynamic_summary,
    },
    SpecRouteEntry {
        suffix: "/formatear-reporte-general",
        route: EnumReportRoute::FormattedReport,
        required_keys: &[C_KEY_REQUISITIONS, C_KEY_PSYCHOLOGIST_SUMMARY],
        msg_missing_keys: C_MSG_MISSING_BOTH,
        handler: generate_formatted_report,
    },
];

fn generate_psychologist_report(
    request: SpecReportRequest,
) -> Result<SpecReportArtifact, ReportError> {
    build_psychologist_report(request.requisitions)
}

fn generate_dynamic_summary(request: SpecReportRequest) -> Result<SpecReportArtifact, ReportError> {
    build_dynamic_summary(request.requisitions, request.psychologist_summary)
}

fn generate_formatted_report(request: SpecReportRequest) -> Result<SpecReportArtifact, ReportError> {
    build_formatted_report(request.psychologist_summary, request.requisitions)
}

/// Find the route whose suffix ends `path`.
pub fn resolve_route(path: &str) -> Option<&'static SpecRouteEntry> {
    TUP_REPORT_ROUTES
        .iter()
        .find(|entry| path.ends_with(entry.suffix))
}

/// Parse the request body into a JSON object.
///
/// Empty bodies, empty objects and non-object values are rejected as "no data".
pub fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, ReportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ReportError::Validation(C_MSG_EMPTY_BODY.to_string()));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ReportError::Validation(format!("Error al parsear el JSON: {err}")))?;
    match value {
        Value::Object(map) if !map.is_empty() => Ok(map),
        _ => Err(ReportError::Validation(C_MSG_EMPTY_BODY.to_string())),
    }
}

fn take_records(payload: &mut Map<String, Value>, key: &str) -> Result<Vec<Record>, ReportError> {
    let Some(value) = payload.remove(key) else {
        return Ok(Vec::new());
    };
    let Value::Array(l_values) = value else {
        return Err(ReportError::Validation(format!(
            "La clave '{key}' debe ser una lista de objetos."
        )));
    };
    l_values
        .into_iter()
        .enumerate()
        .map(|(n_idx, value)| match value {
            Value::Object(record) => Ok(record),
            _ => Err(ReportError::Validation(format!(
                "La clave '{key}' debe ser una lista de objetos (elemento {n_idx})."
            ))),
        })
        .collect()
}

impl SpecRouteEntry {
    /// Check required keys and pull the record lists out of `payload`.
    pub fn extract_request(
        &self,
        mut payload: Map<String, Value>,
    ) -> Result<SpecReportRequest, ReportError> {
        let if_missing = self
            .required_keys
            .iter()
            .any(|c_key| payload.get(*c_key).is_none_or(Value::is_null));
        if if_missing {
            return Err(ReportError::Validation(self.msg_missing_keys.to_string()));
        }
        Ok(SpecReportRequest {
            requisitions: take_records(&mut payload, C_KEY_REQUISITIONS)?,
            psychologist_summary: take_records(&mut payload, C_KEY_PSYCHOLOGIST_SUMMARY)?,
        })
    }
}
