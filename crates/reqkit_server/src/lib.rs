//! `reqkit_server` v1:
//! HTTP front end for the requisition workbook reports.
//!
//! Modules:
//! - `config`  : bind address, body limit, log filter
//! - `route`   : route table and payload extraction
//! - `error`   : error to status/body mapping
//! - `handler` : router and report handler

pub mod config;
pub mod error;
pub mod handler;
pub mod route;

pub use config::{ConfigError, ServerArgs, ServiceConfig};
pub use error::ServiceError;
pub use handler::build_router;
pub use route::{EnumReportRoute, SpecRouteEntry, TUP_REPORT_ROUTES, resolve_route};
