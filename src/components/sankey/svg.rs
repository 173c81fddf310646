use std::fmt::{self, Write};

use super::layout::SankeyLayout;
use super::render::{label_anchor, label_text};

/// Serializes a layout as a standalone SVG document.
pub fn render_svg(layout: &SankeyLayout) -> String {
	let mut svg = String::new();
	// writing into a String cannot fail
	let _ = write_svg(&mut svg, layout);
	svg
}

fn write_svg(svg: &mut String, layout: &SankeyLayout) -> fmt::Result {
	writeln!(
		svg,
		r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif" font-size="11">
  <rect width="100%" height="100%" fill="#1a1a2e"/>"##,
		w = layout.width,
		h = layout.height,
	)?;

	svg.push_str("  <g fill=\"none\" stroke-opacity=\"0.45\">\n");
	for link in &layout.links {
		let (x0, x1) = link.span(&layout.nodes);
		let xm = (x0 + x1) / 2.0;
		let (source, target) = (&layout.nodes[link.source], &layout.nodes[link.target]);
		writeln!(
			svg,
			r#"    <path d="M{:.2},{:.2}C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" stroke="{}" stroke-width="{:.2}"><title>{} → {}: {}</title></path>"#,
			x0,
			link.y0,
			xm,
			link.y0,
			xm,
			link.y1,
			x1,
			link.y1,
			source.color,
			link.width.max(1.0),
			escape_xml(&source.name),
			escape_xml(&target.name),
			link.value,
		)?;
	}
	svg.push_str("  </g>\n");

	svg.push_str("  <g>\n");
	for node in &layout.nodes {
		writeln!(
			svg,
			r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{}</title></rect>"#,
			node.x0,
			node.y0,
			node.x1 - node.x0,
			node.height(),
			node.color,
			escape_xml(&node.name),
		)?;
	}
	svg.push_str("  </g>\n");

	svg.push_str("  <g fill=\"white\" fill-opacity=\"0.9\" dominant-baseline=\"middle\">\n");
	for node in &layout.nodes {
		let (x, anchor) = label_anchor(node, layout.columns);
		writeln!(
			svg,
			r#"    <text x="{:.2}" y="{:.2}" text-anchor="{}">{}</text>"#,
			x,
			(node.y0 + node.y1) / 2.0,
			anchor,
			escape_xml(&label_text(node, layout.label_length)),
		)?;
	}
	svg.push_str("  </g>\n");

	svg.push_str("</svg>\n");
	Ok(())
}

fn escape_xml(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&apos;"),
			_ => out.push(c),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::super::layout::{SankeyConfig, compute_layout};
	use super::*;
	use crate::flow::{FlowGraph, FlowLink, FlowNode};

	fn graph() -> FlowGraph {
		FlowGraph {
			nodes: vec![FlowNode::new("Lithium"), FlowNode::new("R&D <Lab>")],
			links: vec![FlowLink::new("Lithium", "R&D <Lab>", 1500.0)],
		}
	}

	#[test]
	fn test_document_structure() {
		let layout = compute_layout(&graph(), &SankeyConfig::default(), 640.0, 480.0);
		let svg = render_svg(&layout);
		assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"640\" height=\"480\""));
		assert!(svg.trim_end().ends_with("</svg>"));
		assert_eq!(svg.matches("<path ").count(), 1);
		assert_eq!(svg.matches("<rect x=").count(), 2);
		assert_eq!(svg.matches("<text ").count(), 2);
	}

	#[test]
	fn test_labels_are_escaped_and_formatted() {
		let layout = compute_layout(&graph(), &SankeyConfig::default(), 640.0, 480.0);
		let svg = render_svg(&layout);
		assert!(svg.contains("R&amp;D &lt;Lab&gt; (1.5K)"));
		assert!(svg.contains("Lithium (1.5K)"));
		assert!(!svg.contains("<Lab>"));
	}

	#[test]
	fn test_long_labels_are_truncated() {
		let config = SankeyConfig {
			label_length: 8,
			..SankeyConfig::default()
		};
		let layout = compute_layout(&graph(), &config, 640.0, 480.0);
		assert!(render_svg(&layout).contains("Lithium (1.5K)"));
		assert!(render_svg(&layout).contains("R&amp;D &lt;..."));
	}

	#[test]
	fn test_empty_layout_is_still_a_document() {
		let layout = compute_layout(&FlowGraph::default(), &SankeyConfig::default(), 100.0, 100.0);
		let svg = render_svg(&layout);
		assert!(svg.contains("<svg"));
		assert!(!svg.contains("<path "));
	}
}
