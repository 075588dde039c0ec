//! `reqkit_report` v1:
//! Requisition data shaping and report recipes on top of `reqkit_io_xlsx`.
//!
//! Modules:
//! - `conf`      : column names, labels, layout anchors, style presets
//! - `spec`      : record table, aggregates, placements, errors
//! - `normalize` : row filter, alias resolution, lenient parse, buckets
//! - `aggregate` : grouped sums
//! - `subtotal`  : grouped-sorted-subtotal tables
//! - `pivot`     : stacked summary tables and chart ranges
//! - `formula`   : COUNTIF/SUM formula blocks
//! - `reflow`    : justification text cleanup
//! - `frame`     : record table to DataFrame
//! - `render`    : sheet layout of the planned pieces
//! - `report`    : the three workbook recipes

pub mod aggregate;
pub mod conf;
pub mod formula;
pub mod frame;
pub mod normalize;
pub mod pivot;
pub mod reflow;
pub mod render;
pub mod report;
pub mod spec;
mod subtotal;

pub use aggregate::aggregate_sum;
pub use formula::{build_formula_block, collect_distinct_categories, plan_formula_summary};
pub use normalize::{categorize_days, normalize_requisitions, parse_int_lenient, resolve_column_alias};
pub use pivot::{derive_summary_table, plan_pivot_layout};
pub use reflow::{reflow_justification, reflow_words, strip_label_prefix};
pub use report::{build_dynamic_summary, build_formatted_report, build_psychologist_report};
pub use spec::{
    EnumCategoryBucket, EnumGroupedRowKind, Record, ReportError, SpecAggregateRow,
    SpecFormulaBlock, SpecGroupedRow, SpecGroupedTable, SpecPivotPlacement, SpecRecordTable,
    SpecReportArtifact, SpecSummaryRow, SpecSummaryTable,
};
pub use subtotal::build_grouped_subtotal_table;
