use std::cmp::Ordering;
use std::collections::HashMap;

use crate::flow::{DEFAULT_TRUNCATE_LENGTH, FlowGraph, color_for};

/// Geometry parameters for [`compute_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct SankeyConfig {
	pub node_width: f64,
	pub node_padding: f64,
	pub margin: f64,
	pub min_node_height: f64,
	pub label_length: usize,
}

impl Default for SankeyConfig {
	fn default() -> Self {
		Self {
			node_width: 16.0,
			node_padding: 14.0,
			margin: 24.0,
			min_node_height: 2.0,
			label_length: DEFAULT_TRUNCATE_LENGTH,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub name: String,
	pub column: usize,
	pub value: f64,
	pub x0: f64,
	pub x1: f64,
	pub y0: f64,
	pub y1: f64,
	pub color: &'static str,
}

impl LayoutNode {
	pub fn height(&self) -> f64 {
		self.y1 - self.y0
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
	}
}

/// A band between two laid-out nodes. `y0`/`y1` are band centers at the
/// source and target edge.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLink {
	pub source: usize,
	pub target: usize,
	pub value: f64,
	pub width: f64,
	pub y0: f64,
	pub y1: f64,
}

impl LayoutLink {
	/// Horizontal extent: right edge of the source to left edge of the target.
	pub fn span(&self, nodes: &[LayoutNode]) -> (f64, f64) {
		(nodes[self.source].x1, nodes[self.target].x0)
	}

	/// Approximate hit test against the band's centerline.
	pub fn contains(&self, nodes: &[LayoutNode], x: f64, y: f64) -> bool {
		let (x0, x1) = self.span(nodes);
		if x1 <= x0 || x < x0 || x > x1 {
			return false;
		}
		let t = (x - x0) / (x1 - x0);
		let center = self.y0 + (self.y1 - self.y0) * smoothstep(t);
		(y - center).abs() <= (self.width / 2.0).max(2.0)
	}
}

fn smoothstep(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SankeyLayout {
	pub nodes: Vec<LayoutNode>,
	pub links: Vec<LayoutLink>,
	pub columns: usize,
	pub width: f64,
	pub height: f64,
	pub label_length: usize,
}

impl SankeyLayout {
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes.iter().position(|n| n.contains(x, y))
	}

	/// Topmost band under the point; later links are drawn on top.
	pub fn link_at(&self, x: f64, y: f64) -> Option<usize> {
		self.links.iter().rposition(|l| l.contains(&self.nodes, x, y))
	}
}

/// Places nodes in columns by longest upstream path and sizes nodes and
/// bands proportionally to flow.
pub fn compute_layout(graph: &FlowGraph, config: &SankeyConfig, width: f64, height: f64) -> SankeyLayout {
	let mut names: Vec<&str> = Vec::new();
	let mut index: HashMap<&str, usize> = HashMap::new();
	let endpoints = graph
		.links
		.iter()
		.flat_map(|l| [l.source.as_str(), l.target.as_str()]);
	for name in graph.nodes.iter().map(|n| n.name.as_str()).chain(endpoints) {
		index.entry(name).or_insert_with(|| {
			names.push(name);
			names.len() - 1
		});
	}

	let n = names.len();
	let edges: Vec<(usize, usize, f64)> = graph
		.links
		.iter()
		.map(|l| (index[l.source.as_str()], index[l.target.as_str()], l.value))
		.filter(|(s, t, _)| s != t)
		.collect();

	let (mut inbound, mut outbound) = (vec![0.0; n], vec![0.0; n]);
	let (mut has_in, mut has_out) = (vec![false; n], vec![false; n]);
	for &(s, t, v) in &edges {
		outbound[s] += v;
		inbound[t] += v;
		has_out[s] = true;
		has_in[t] = true;
	}

	// Relax at most n rounds so cycles terminate
	let mut column = vec![0usize; n];
	for _ in 0..n {
		let mut changed = false;
		for &(s, t, _) in &edges {
			if column[t] < column[s] + 1 && column[s] + 1 < n {
				column[t] = column[s] + 1;
				changed = true;
			}
		}
		if !changed {
			break;
		}
	}
	let max_column = column.iter().copied().max().unwrap_or(0);
	for i in 0..n {
		if has_in[i] && !has_out[i] {
			column[i] = max_column;
		}
	}

	let values: Vec<f64> = (0..n).map(|i| f64::max(inbound[i], outbound[i])).collect();

	let inner_height = (height - 2.0 * config.margin).max(0.0);
	let mut scale = f64::INFINITY;
	for c in 0..=max_column {
		let members: Vec<usize> = (0..n).filter(|&i| column[i] == c).collect();
		let total: f64 = members.iter().map(|&i| values[i]).sum();
		if total <= 0.0 {
			continue;
		}
		let gaps = config.node_padding * members.len().saturating_sub(1) as f64;
		scale = scale.min(((inner_height - gaps) / total).max(0.0));
	}
	if !scale.is_finite() {
		scale = 0.0;
	}

	let span = (width - 2.0 * config.margin - config.node_width).max(0.0);
	let mut cursor = vec![config.margin; max_column + 1];
	let nodes: Vec<LayoutNode> = (0..n)
		.map(|i| {
			let c = column[i];
			let x0 = if max_column > 0 {
				config.margin + span * c as f64 / max_column as f64
			} else {
				config.margin
			};
			let h = (values[i] * scale).max(config.min_node_height);
			let y0 = cursor[c];
			cursor[c] += h + config.node_padding;
			LayoutNode {
				name: names[i].to_string(),
				column: c,
				value: values[i],
				x0,
				x1: x0 + config.node_width,
				y0,
				y1: y0 + h,
				color: color_for(names[i]),
			}
		})
		.collect();

	let mut links: Vec<LayoutLink> = edges
		.iter()
		.map(|&(source, target, value)| LayoutLink {
			source,
			target,
			value,
			width: value * scale,
			y0: 0.0,
			y1: 0.0,
		})
		.collect();

	// Stack bands at each source in target order, at each target in source order
	let by_y = |a: f64, b: f64| a.partial_cmp(&b).unwrap_or(Ordering::Equal);
	let mut order: Vec<usize> = (0..links.len()).collect();
	order.sort_by(|&a, &b| by_y(nodes[links[a].target].y0, nodes[links[b].target].y0));
	let mut offset = vec![0.0; n];
	for &i in &order {
		let link = &mut links[i];
		link.y0 = nodes[link.source].y0 + offset[link.source] + link.width / 2.0;
		offset[link.source] += link.width;
	}
	order.sort_by(|&a, &b| by_y(nodes[links[a].source].y0, nodes[links[b].source].y0));
	offset.iter_mut().for_each(|o| *o = 0.0);
	for &i in &order {
		let link = &mut links[i];
		link.y1 = nodes[link.target].y0 + offset[link.target] + link.width / 2.0;
		offset[link.target] += link.width;
	}

	SankeyLayout {
		nodes,
		links,
		columns: max_column + 1,
		width,
		height,
		label_length: config.label_length,
	}
}
