//! Bundled mock supply-chain snapshot.

use crate::flow::{FlowGraph, Result, is_downstream_entity};

const SUPPLY_CHAIN_JSON: &str = include_str!("../data/supply_chain.json");

/// Parses the bundled snapshot.
pub fn sample_supply_chain() -> Result<FlowGraph> {
	FlowGraph::from_json(SUPPLY_CHAIN_JSON)
}

/// Downstream node names offered as OEM filter choices, in node order.
pub fn oem_options(graph: &FlowGraph) -> Vec<String> {
	graph
		.nodes
		.iter()
		.filter(|n| is_downstream_entity(n))
		.map(|n| n.name.clone())
		.collect()
}
