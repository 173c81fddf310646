use std::collections::HashSet;

use crate::flow::FlowGraph;

use super::layout::{SankeyConfig, SankeyLayout, compute_layout};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(usize),
	Link(usize),
}

/// CSS cursor for the canvas while the pointer is over `target`.
pub fn cursor_for(target: Option<HoverTarget>) -> &'static str {
	if target.is_some() { "pointer" } else { "default" }
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub target: Option<HoverTarget>,
	pub nodes: HashSet<usize>,
	pub links: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_nodes: HashSet<usize>,
	pub prev_links: HashSet<usize>,
	delay_t: f64,
}

pub struct SankeyState {
	pub layout: SankeyLayout,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	graph: FlowGraph,
	config: SankeyConfig,
}

impl SankeyState {
	pub fn new(graph: &FlowGraph, config: SankeyConfig, width: f64, height: f64) -> Self {
		Self {
			layout: compute_layout(graph, &config, width, height),
			hover: HoverState::default(),
			width,
			height,
			graph: graph.clone(),
			config,
		}
	}

	/// Swaps in a new graph. Indices change, so hover is dropped.
	pub fn set_graph(&mut self, graph: &FlowGraph) {
		self.graph = graph.clone();
		self.hover = HoverState::default();
		self.relayout();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.relayout();
	}

	fn relayout(&mut self) {
		self.layout = compute_layout(&self.graph, &self.config, self.width, self.height);
	}

	/// Nodes win over the bands drawn beneath them.
	pub fn hit_test(&self, x: f64, y: f64) -> Option<HoverTarget> {
		self.layout
			.node_at(x, y)
			.map(HoverTarget::Node)
			.or_else(|| self.layout.link_at(x, y).map(HoverTarget::Link))
	}

	pub fn set_hover(&mut self, target: Option<HoverTarget>) {
		if self.hover.target == target {
			return;
		}
		let was_hovering = self.hover.target.is_some();

		// Save previous state for fade-out
		if was_hovering && target.is_none() {
			self.hover.prev_nodes = std::mem::take(&mut self.hover.nodes);
			self.hover.prev_links = std::mem::take(&mut self.hover.links);
		} else {
			self.hover.prev_nodes.clear();
			self.hover.prev_links.clear();
		}

		self.hover.target = target;
		self.hover.nodes.clear();
		self.hover.links.clear();

		match target {
			Some(HoverTarget::Node(idx)) => {
				self.hover.nodes.insert(idx);
				for (i, link) in self.layout.links.iter().enumerate() {
					if link.source == idx || link.target == idx {
						self.hover.links.insert(i);
						self.hover.nodes.insert(link.source);
						self.hover.nodes.insert(link.target);
					}
				}
			}
			Some(HoverTarget::Link(idx)) => {
				if let Some(link) = self.layout.links.get(idx) {
					self.hover.links.insert(idx);
					self.hover.nodes.insert(link.source);
					self.hover.nodes.insert(link.target);
				}
			}
			None => {}
		}
		if target.is_some() && !was_hovering {
			self.hover.delay_t = 0.0;
		}
	}

	pub fn is_node_highlighted(&self, idx: usize) -> bool {
		self.hover.nodes.contains(&idx) || self.hover.prev_nodes.contains(&idx)
	}

	pub fn is_link_highlighted(&self, idx: usize) -> bool {
		self.hover.links.contains(&idx) || self.hover.prev_links.contains(&idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.target.is_some() || !self.hover.prev_nodes.is_empty()
	}

	pub fn tick(&mut self, dt: f64) {
		let (target, delay, speed) = if self.hover.target.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.target.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_nodes.clear();
				self.hover.prev_links.clear();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::flow::{FlowLink, FlowNode};

	fn state() -> SankeyState {
		let graph = FlowGraph {
			nodes: ["Lithium", "Cobalt", "CATL", "Tesla"]
				.into_iter()
				.map(FlowNode::new)
				.collect(),
			links: vec![
				FlowLink::new("Lithium", "CATL", 100.0),
				FlowLink::new("Cobalt", "CATL", 50.0),
				FlowLink::new("CATL", "Tesla", 150.0),
			],
		};
		SankeyState::new(&graph, SankeyConfig::default(), 800.0, 600.0)
	}

	#[test]
	fn test_node_hover_highlights_neighbors() {
		let mut s = state();
		s.set_hover(Some(HoverTarget::Node(0)));
		assert!(s.is_node_highlighted(0));
		assert!(s.is_node_highlighted(2));
		assert!(!s.is_node_highlighted(1));
		assert!(s.is_link_highlighted(0));
		assert!(!s.is_link_highlighted(2));
	}

	#[test]
	fn test_link_hover_highlights_endpoints() {
		let mut s = state();
		s.set_hover(Some(HoverTarget::Link(2)));
		assert!(s.is_node_highlighted(2));
		assert!(s.is_node_highlighted(3));
		assert!(!s.is_node_highlighted(0));
		assert!(s.is_link_highlighted(2));
	}

	#[test]
	fn test_hit_test_prefers_nodes() {
		let s = state();
		let n = &s.layout.nodes[2];
		let hit = s.hit_test((n.x0 + n.x1) / 2.0, (n.y0 + n.y1) / 2.0);
		assert_eq!(hit, Some(HoverTarget::Node(2)));
		assert_eq!(s.hit_test(0.0, 0.0), None);
	}

	#[test]
	fn test_fade_out_keeps_previous_highlight() {
		let mut s = state();
		s.set_hover(Some(HoverTarget::Node(3)));
		for _ in 0..60 {
			s.tick(0.016);
		}
		assert!(s.hover.highlight_t > 0.5);

		s.set_hover(None);
		assert!(s.has_active_highlight());
		assert!(s.is_node_highlighted(3));
		for _ in 0..600 {
			s.tick(0.016);
		}
		assert_eq!(s.hover.highlight_t, 0.0);
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn test_cursor_follows_hit_test() {
		let s = state();
		let n = &s.layout.nodes[0];
		assert_eq!(cursor_for(s.hit_test(n.x0 + 1.0, n.y0 + 1.0)), "pointer");
		assert_eq!(cursor_for(s.hit_test(0.0, 0.0)), "default");
	}

	#[test]
	fn test_set_graph_resets_hover() {
		let mut s = state();
		s.set_hover(Some(HoverTarget::Node(0)));
		s.set_graph(&FlowGraph::default());
		assert!(!s.has_active_highlight());
		assert!(s.layout.nodes.is_empty());
	}

	#[test]
	fn test_resize_relayouts() {
		let mut s = state();
		s.resize(400.0, 300.0);
		assert_eq!(s.layout.width, 400.0);
		assert!(s.layout.nodes.iter().all(|n| n.x1 <= 400.0));
	}
}
