//! Supply-chain flow aggregation: classification, filtering, KPIs and export.
//!
//! Everything here is a pure function of its arguments. Selection and hover
//! state is passed in by the caller; nothing is cached between calls.

mod category;
mod error;
mod export;
mod filter;
mod format;
mod kpi;
mod types;

pub use category::{Category, MATERIAL_CATEGORIES, classify, color_for};
pub use error::{FlowError, Result};
pub use export::{CSV_HEADER, links_to_csv};
pub use filter::{
	DEFAULT_OEMS, FilterOutcome, FilterSelection, OTHER_NODE, filter_flows,
	filter_flows_with_summary,
};
pub use format::{DEFAULT_TRUNCATE_LENGTH, format_magnitude, percentage_of, truncate};
pub use kpi::{
	DOWNSTREAM_NAME_HINTS, KNOWN_DOWNSTREAM_ENTITIES, KpiSnapshot, NO_CATEGORY, compute_kpis,
	compute_kpis_opt, insight_summary, is_downstream_entity,
};
pub use types::{FlowGraph, FlowLink, FlowNode, NodeKind};
