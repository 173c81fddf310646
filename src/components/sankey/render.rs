use web_sys::CanvasRenderingContext2d;

use crate::flow::{format_magnitude, truncate};

use super::layout::LayoutNode;
use super::state::SankeyState;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);
	ctx.set_global_alpha(1.0);
}

fn draw_links(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let layout = &state.layout;
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	for (i, link) in layout.links.iter().enumerate() {
		let (x0, x1) = link.span(&layout.nodes);
		let xm = (x0 + x1) / 2.0;

		// t=0: every band at 0.45, t=1: highlighted at 0.8, others at 0.1
		let alpha = if !has_highlight {
			0.45
		} else if state.is_link_highlighted(i) {
			0.45 + 0.35 * t
		} else {
			0.45 - 0.35 * t
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(layout.nodes[link.source].color);
		ctx.set_line_width(link.width.max(1.0));
		ctx.begin_path();
		ctx.move_to(x0, link.y0);
		ctx.bezier_curve_to(xm, link.y0, xm, link.y1, x1, link.y1);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	for (i, node) in state.layout.nodes.iter().enumerate() {
		let highlighted = has_highlight && state.is_node_highlighted(i);
		let alpha = if has_highlight && !highlighted {
			1.0 - 0.6 * t
		} else {
			1.0
		};

		ctx.set_global_alpha(alpha);
		ctx.set_fill_style_str(node.color);
		ctx.fill_rect(node.x0, node.y0, node.x1 - node.x0, node.height());

		if highlighted && t > 0.01 {
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5);
			ctx.stroke_rect(node.x0 - 1.0, node.y0 - 1.0, node.x1 - node.x0 + 2.0, node.height() + 2.0);
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_labels(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let layout = &state.layout;
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);
	ctx.set_font("11px sans-serif");
	ctx.set_text_baseline("middle");

	for (i, node) in layout.nodes.iter().enumerate() {
		let alpha = if has_highlight && !state.is_node_highlighted(i) {
			0.8 - 0.5 * t
		} else {
			0.9
		};
		let (x, align) = label_anchor(node, layout.columns);
		ctx.set_text_align(align);
		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
		let _ = ctx.fill_text(&label_text(node, layout.label_length), x, (node.y0 + node.y1) / 2.0);
	}
}

/// Left half of the diagram labels to the right of the node, right half to the left.
pub(super) fn label_anchor(node: &LayoutNode, columns: usize) -> (f64, &'static str) {
	if node.column * 2 < columns.saturating_sub(1).max(1) {
		(node.x1 + 6.0, "start")
	} else {
		(node.x0 - 6.0, "end")
	}
}

pub(super) fn label_text(node: &LayoutNode, max_length: usize) -> String {
	let name = truncate(Some(node.name.as_str()), max_length).unwrap_or_default();
	format!("{} ({})", name, format_magnitude(node.value, 1))
}
