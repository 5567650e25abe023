//! Canvas painting: background, edges (arrowheads on directional ties),
//! nodes (avatar glyph + name) and the info affordance. Pure drawing;
//! all state advances happen in [`GraphState::frame`].
//!
//! [`GraphState::frame`]: super::state::GraphState::frame

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry;
use super::state::{GraphState, INFO_ICON_CENTER, INFO_ICON_RADIUS};
use super::types::{GraphEdge, GraphNode};

const BACKGROUND: &str = "#f5f6fa";
const NODE_FILL: &str = "#ffffff";
const NODE_FILL_SELF: &str = "rgba(52, 152, 219, 0.1)";
const NODE_STROKE: &str = "#4a90e2";
const NODE_STROKE_SELF: &str = "#34495e";
const NODE_STROKE_SELECTED: &str = "#0984e3";
const NODE_STROKE_DRAGGED: &str = "#ff7675";
const NODE_TEXT: &str = "#333333";
const EDGE_BIDIRECTIONAL: &str = "#27ae60";
const EDGE_DIRECTIONAL: &str = "#e74c3c";
const EDGE_HOVER: &str = "#3498db";

const HELP_EDIT: &[&str] = &[
	"Edit mode:",
	"\u{2022} Left-click two friends: mutual tie",
	"\u{2022} Left-click one, right-click another: one-way tie",
	"\u{2022} Right-click a tie: remove it",
	"\u{2022} Drag a friend to reposition",
	"\u{2022} Double-click a label to rename the tie",
];
const HELP_BROWSE: &[&str] = &[
	"Browse mode:",
	"\u{2022} Drag friends to reposition",
	"\u{2022} Use the top-right button to edit ties",
	"\u{2022} Ties can only change in edit mode",
];

/// Paints one frame.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d, pixel_ratio: f64) {
	let _ = ctx.reset_transform();
	let _ = ctx.scale(pixel_ratio, pixel_ratio);

	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.bounds.width, state.bounds.height);

	for edge in state.scene.edges() {
		draw_edge(state, ctx, edge);
	}
	for node in state.scene.nodes() {
		draw_node(state, ctx, node);
	}
	draw_info(state, ctx);
}

fn draw_edge(state: &GraphState, ctx: &CanvasRenderingContext2d, edge: &GraphEdge) {
	let (Some(source), Some(target)) = (
		state.scene.find_node(edge.source),
		state.scene.find_node(edge.target),
	) else {
		return;
	};
	let radius = state.bounds.node_radius;
	let Some([x1, y1, x2, y2]) =
		geometry::trimmed_segment(source.x, source.y, target.x, target.y, radius)
	else {
		return;
	};

	let hovered = state.hovered_edge == Some(edge.key());
	let color = if hovered {
		EDGE_HOVER
	} else if edge.bidirectional {
		EDGE_BIDIRECTIONAL
	} else {
		EDGE_DIRECTIONAL
	};

	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(if hovered { 3.0 } else { 2.0 });
	ctx.stroke();

	if !edge.bidirectional {
		draw_arrowhead(ctx, x1, y1, x2, y2, radius * 0.5, color);
	}
}

/// Solid arrowhead at the target end of a directional edge.
fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	length: f64,
	color: &str,
) {
	let heading = (y2 - y1).atan2(x2 - x1);
	let spread = 30.0 * PI / 180.0;
	ctx.begin_path();
	ctx.move_to(x2, y2);
	ctx.line_to(
		x2 - length * (heading - spread).cos(),
		y2 - length * (heading - spread).sin(),
	);
	ctx.line_to(
		x2 - length * (heading + spread).cos(),
		y2 - length * (heading + spread).sin(),
	);
	ctx.close_path();
	ctx.set_fill_style_str(color);
	ctx.fill();
}

fn draw_node(state: &GraphState, ctx: &CanvasRenderingContext2d, node: &GraphNode) {
	let radius = state.bounds.node_radius;

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(if node.is_self { NODE_FILL_SELF } else { NODE_FILL });
	ctx.fill();

	let (stroke, width) = if state.selected == Some(node.id) {
		(NODE_STROKE_SELECTED, 3.0)
	} else if state.dragged == Some(node.id) {
		(NODE_STROKE_DRAGGED, 3.0)
	} else if node.is_self {
		(NODE_STROKE_SELF, 2.5)
	} else {
		(NODE_STROKE, 2.0)
	};
	ctx.set_stroke_style_str(stroke);
	ctx.set_line_width(width);
	ctx.stroke();

	let glyph_size = (radius * 0.8).clamp(16.0, 24.0);
	ctx.set_font(&format!("{glyph_size}px Arial"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("#000000");
	let _ = ctx.fill_text(&node.emoji, node.x, node.y - 5.0);

	let name_size = (radius * 0.4).clamp(10.0, 12.0);
	ctx.set_font(&format!("{name_size}px Arial"));
	ctx.set_fill_style_str(if node.is_self { NODE_STROKE_SELF } else { NODE_TEXT });
	let _ = ctx.fill_text(&node.name, node.x, node.y + radius * 0.6);
}

/// Fixed "!" badge that expands into mode-specific instructions on hover.
fn draw_info(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let (x, y) = INFO_ICON_CENTER;

	ctx.begin_path();
	let _ = ctx.arc(x, y, INFO_ICON_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(if state.info_hovered {
		"rgba(52, 152, 219, 0.9)"
	} else {
		"rgba(52, 152, 219, 0.7)"
	});
	ctx.fill();

	ctx.set_font("bold 16px Arial");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("#ffffff");
	let _ = ctx.fill_text("!", x, y);

	if !state.info_hovered {
		return;
	}
	let lines = if state.edit_mode() { HELP_EDIT } else { HELP_BROWSE };

	let line_height = 20.0;
	let padding = 10.0;
	let box_width = 280.0;
	let box_height = lines.len() as f64 * line_height + padding * 2.0;

	// Anchored below the badge so nothing clips past the canvas top.
	let box_x = x + INFO_ICON_RADIUS;
	let box_y = y + INFO_ICON_RADIUS;
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	ctx.set_shadow_color("rgba(0, 0, 0, 0.2)");
	ctx.set_shadow_blur(10.0);
	ctx.set_shadow_offset_x(2.0);
	ctx.set_shadow_offset_y(2.0);
	ctx.fill_rect(box_x, box_y, box_width, box_height);
	ctx.set_shadow_color("transparent");

	ctx.set_text_align("left");
	ctx.set_fill_style_str(NODE_TEXT);
	let text_x = box_x + padding;
	let top = box_y + padding + line_height / 2.0;
	for (i, line) in lines.iter().enumerate() {
		ctx.set_font(if i == 0 { "bold 14px Arial" } else { "13px Arial" });
		let _ = ctx.fill_text(line, text_x, top + i as f64 * line_height);
	}
}
