//! Canvas drawing for the dependency graph. Reads viewer state, never
//! mutates it.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::state::{DependencyGraphState, NODE_RADIUS, NodeInfo};

const EDGE_COLOR: &str = "#4a90e2";
const LABEL_COLOR: &str = "#e8e8f0";

pub fn render(state: &DependencyGraphState, ctx: &CanvasRenderingContext2d) {
	// Background plane stays in screen space, outside the zoom transform.
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let positions = node_positions(state);
	draw_edges(state, ctx, &positions);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn node_positions(state: &DependencyGraphState) -> HashMap<DefaultNodeIdx, (f64, f64)> {
	let mut positions = HashMap::new();
	state.graph.visit_nodes(|node| {
		positions.insert(node.index(), (node.x() as f64, node.y() as f64));
	});
	positions
}

fn draw_edges(
	state: &DependencyGraphState,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (2.0 / k, 8.0 / k);

	for (pos, &(src, tgt)) in state.edges().iter().enumerate() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&src), positions.get(&tgt))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let alpha = state.edge_alpha(pos);
		ctx.set_global_alpha(alpha);

		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(line_width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		// Arrowhead at the target end.
		ctx.set_fill_style_str(EDGE_COLOR);
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &DependencyGraphState, ctx: &CanvasRenderingContext2d) {
	let mut ordered: Vec<(DefaultNodeIdx, f64, f64, NodeInfo)> = Vec::new();
	state.graph.visit_nodes(|node| {
		ordered.push((
			node.index(),
			node.x() as f64,
			node.y() as f64,
			node.data.user_data.clone(),
		));
	});
	// Raised node last so it covers overlapping siblings.
	if let Some(raised) = state.raised {
		if let Some(pos) = ordered.iter().position(|&(idx, ..)| idx == raised) {
			let entry = ordered.remove(pos);
			ordered.push(entry);
		}
	}
	for (idx, x, y, info) in &ordered {
		draw_node(state, ctx, *idx, *x, *y, info);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_node(
	state: &DependencyGraphState,
	ctx: &CanvasRenderingContext2d,
	idx: DefaultNodeIdx,
	x: f64,
	y: f64,
	info: &NodeInfo,
) {
	ctx.set_global_alpha(state.node_alpha(idx));

	ctx.begin_path();
	let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(info.color);
	ctx.fill();

	// Degraded tech entities get a heavy red outline.
	let (stroke, stroke_width) = if state.is_degraded(info.catalog_idx) {
		("#ff4444", 4.0)
	} else {
		("#ffffff", 2.0)
	};
	ctx.set_stroke_style_str(stroke);
	ctx.set_line_width(stroke_width);
	ctx.stroke();

	ctx.set_fill_style_str("white");
	ctx.set_font("16px FontAwesome");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(info.icon, x, y);

	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");
	ctx.set_text_baseline("alphabetic");
	let _ = ctx.fill_text(info.name, x + NODE_RADIUS + 5.0, y + 5.0);
}
