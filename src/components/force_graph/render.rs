use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;
use super::types::Emphasis;

const BACKGROUND: &str = "#0f172a";
const PATH_COLOR: &str = "#facc15";
const SELECTED_COLOR: &str = "#ffffff";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let arrow_size = 6.0 / k;
	let (dash, gap) = (8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	state.graph.visit_edges(|n1, n2, edge| {
		let Some(link) = state.link(&edge.user_data.id) else {
			return;
		};
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);

		let color = match link.emphasis {
			Emphasis::Path => PATH_COLOR,
			Emphasis::Selected => SELECTED_COLOR,
			_ => link.color.as_str(),
		};
		let width = match link.emphasis {
			Emphasis::Path | Emphasis::Selected => link.width * 2.0,
			_ => link.width,
		} / k;

		ctx.set_global_alpha(link.emphasis.alpha());
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(width);
		// The path flows from start to end.
		if link.emphasis == Emphasis::Path {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
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
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));

	// Dimmed nodes first so focused ones are drawn on top.
	for pass in [true, false] {
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if (info.emphasis == Emphasis::Dimmed) != pass {
				return;
			}
			let (x, y, radius) = (node.x() as f64, node.y() as f64, info.radius);
			let hovered = state.hovered == Some(node.index());

			ctx.set_global_alpha(info.emphasis.alpha());
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&info.color);
			ctx.fill();

			let ring = match info.emphasis {
				Emphasis::Selected => Some(SELECTED_COLOR),
				Emphasis::Path => Some(PATH_COLOR),
				_ if hovered => Some(SELECTED_COLOR),
				_ => None,
			};
			if let Some(ring) = ring {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(ring);
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}

			if hovered || info.emphasis.shows_label() || (k > 1.5 && !pass) {
				ctx.set_fill_style_str("white");
				ctx.set_font(&font);
				let _ = ctx.fill_text(&info.name, x + radius + 3.0, y + 3.0);
			}
		});
	}
	ctx.set_global_alpha(1.0);
}
