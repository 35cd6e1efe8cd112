use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{FOCUS_FILL, ForceGraphState, NODE_BORDER, NODE_FILL, NODE_RADIUS};

const BACKGROUND: &str = "#fdfaf3";
const LABEL: &str = "#2d3436";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Opacity for an element given whether it belongs to the hover highlight.
/// Everything outside the highlight fades in towards 25%.
fn emphasis(state: &ForceGraphState, highlighted: bool) -> f64 {
	if highlighted || state.hover.node.is_none() {
		return 1.0;
	}
	1.0 - 0.75 * ease_out_cubic(state.hover.fade)
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (3.0 / k.max(1.0), 9.0 / k.max(1.0));

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		ctx.set_global_alpha(emphasis(state, highlighted));
		ctx.set_stroke_style_str(edge.user_data.color);
		ctx.set_fill_style_str(edge.user_data.color);
		ctx.set_line_width(line_width);

		let (ux, uy) = (dx / dist, dy / dist);
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);

		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(back_x, back_y);
		ctx.stroke();

		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let font = format!("{}px sans-serif", 12.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let hovered = state.hover.node == Some(node.index());
		let radius = if hovered || info.focused {
			NODE_RADIUS * 1.3
		} else {
			NODE_RADIUS
		};

		ctx.set_global_alpha(emphasis(state, state.is_highlighted(node.index())));
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if info.focused || hovered {
			FOCUS_FILL
		} else {
			NODE_FILL
		});
		ctx.fill();
		ctx.set_stroke_style_str(NODE_BORDER);
		ctx.set_line_width(if hovered { 3.0 / k } else { 2.0 / k });
		ctx.stroke();

		ctx.set_fill_style_str(LABEL);
		ctx.set_font(&font);
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 4.0);
	});
	ctx.set_global_alpha(1.0);
}
