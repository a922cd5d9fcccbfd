use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::connection::ConnectionView;
use super::node::{self, NodeView};
use super::state::SequenceCanvasState;
use super::theme::{self, IconResolver};
use super::types::{ConnectionStatus, Validity};

const GRID_STEP: f64 = 24.0;
const CORNER_RADIUS: f64 = 8.0;
const PULSE_PERIOD: f64 = 2.0;

pub fn render(
	state: &SequenceCanvasState,
	ctx: &CanvasRenderingContext2d,
	icons: &dyn IconResolver,
) {
	ctx.set_fill_style_str(theme::CANVAS_BG);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_title(state, ctx);
	for view in state.connection_views() {
		draw_connection(state, ctx, &view);
	}
	if let Some(band) = state.rubber_band() {
		draw_connection(state, ctx, &band);
	}
	if let Some((nodes, lines)) = state.reference_views() {
		let origin = state.quiz.reference_origin;
		draw_panel_label(ctx, "Correct answer:", origin.x, origin.y - 40.0);
		for line in &lines {
			draw_connection(state, ctx, line);
		}
		for view in &nodes {
			draw_node(state, ctx, view, icons);
		}
	}
	for view in state.node_views() {
		draw_node(state, ctx, &view, icons);
	}
	for view in state.connection_views() {
		if let Some(center) = view.delete_button() {
			draw_delete_button(state, ctx, center.x, center.y);
		}
	}

	ctx.restore();
}

fn draw_grid(state: &SequenceCanvasState, ctx: &CanvasRenderingContext2d) {
	let step = GRID_STEP * state.transform.k;
	let (ox, oy) = (state.transform.x.rem_euclid(step), state.transform.y.rem_euclid(step));
	ctx.set_fill_style_str(theme::GRID_DOT);
	let mut y = oy;
	while y < state.height {
		let mut x = ox;
		while x < state.width {
			ctx.fill_rect(x, y, 1.5, 1.5);
			x += step;
		}
		y += step;
	}
}

fn draw_title(state: &SequenceCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(theme::TITLE);
	ctx.set_font("800 36px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	let _ = ctx.fill_text(&state.quiz.title, state.width / 2.0, 32.0);
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");

	if state.submitted {
		draw_panel_label(ctx, "Your answer:", 16.0, 16.0);
	}
}

fn draw_panel_label(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64) {
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.1)");
	rounded_rect(ctx, x, y, 150.0, 32.0, 8.0);
	ctx.fill();
	ctx.set_fill_style_str(theme::PANEL_TEXT);
	ctx.set_font("500 14px sans-serif");
	let _ = ctx.fill_text(text, x + 14.0, y + 21.0);
}

fn draw_connection(
	state: &SequenceCanvasState,
	ctx: &CanvasRenderingContext2d,
	view: &ConnectionView,
) {
	let k = state.transform.k;
	let stroke = view.stroke();
	let color = theme::color(stroke.token);
	let c = &view.curve;

	ctx.save();
	if stroke.glow {
		ctx.set_shadow_color(color);
		ctx.set_shadow_blur(6.0);
	}
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(stroke.width);
	ctx.set_line_cap("round");
	if stroke.dashed {
		let (dash, gap) = (8.0, 4.0);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(-(state.flow_time * 30.0) % (dash + gap));
	}
	ctx.begin_path();
	ctx.move_to(c.p0.x, c.p0.y);
	ctx.bezier_curve_to(c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.restore();

	if matches!(view.validity, Validity::Valid | Validity::Invalid) {
		let t = (state.flow_time / PULSE_PERIOD).fract();
		let p = c.eval(t);
		ctx.set_global_alpha(0.6 + 0.4 * (state.flow_time * PI).sin().abs());
		ctx.set_fill_style_str(color);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, 4.0 / k.max(0.5), 0.0, 2.0 * PI);
		ctx.fill();
		ctx.set_global_alpha(1.0);
	}
}

fn draw_delete_button(state: &SequenceCanvasState, ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
	let r = state.config.delete_button_radius;
	ctx.set_fill_style_str(theme::color("connection-invalid"));
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.fill();

	let arm = r * 0.4;
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(2.0);
	ctx.begin_path();
	ctx.move_to(x - arm, y - arm);
	ctx.line_to(x + arm, y + arm);
	ctx.move_to(x + arm, y - arm);
	ctx.line_to(x - arm, y + arm);
	ctx.stroke();
}

fn draw_node(
	state: &SequenceCanvasState,
	ctx: &CanvasRenderingContext2d,
	view: &NodeView,
	icons: &dyn IconResolver,
) {
	let config = &state.config;
	let n = &view.data;
	let (x, y, w, h) = (n.position.x, n.position.y, config.node_width, config.node_height);

	ctx.save();
	ctx.set_shadow_color("rgba(0, 0, 0, 0.45)");
	ctx.set_shadow_blur(if view.dragging { 24.0 } else { 8.0 });
	ctx.set_shadow_offset_y(if view.dragging { 10.0 } else { 3.0 });
	ctx.set_fill_style_str(theme::color(n.color.token()));
	rounded_rect(ctx, x, y, w, h, CORNER_RADIUS);
	ctx.fill();
	ctx.restore();

	let (border, border_width) = match view.connection_status {
		Some(ConnectionStatus::Unconnected) => (theme::color("status-unconnected"), 3.0),
		_ if view.connecting => (theme::SOCKET_OUTPUT, 2.5),
		_ => (theme::NODE_BORDER, 2.0),
	};
	ctx.set_stroke_style_str(border);
	ctx.set_line_width(border_width);
	rounded_rect(ctx, x, y, w, h, CORNER_RADIUS);
	ctx.stroke();

	ctx.set_fill_style_str(theme::NODE_TEXT);
	ctx.set_font("18px sans-serif");
	let _ = ctx.fill_text(icons.glyph(&n.icon), x + 12.0, y + 38.0);

	if !view.editing {
		let label = if view.show_hidden_name {
			format!("{} ({})", n.display_name, n.hidden_name)
		} else {
			n.display_name.clone()
		};
		ctx.set_font("500 14px sans-serif");
		let _ = ctx.fill_text(&label, x + 40.0, y + 38.0);
	}
	if let Some(description) = &n.description {
		ctx.set_global_alpha(0.7);
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text(description, x + 40.0, y + 60.0);
		ctx.set_global_alpha(1.0);
	}

	for (socket, color) in [
		(node::input_socket(n, config), theme::SOCKET_INPUT),
		(node::output_socket(n, config), theme::SOCKET_OUTPUT),
	] {
		ctx.begin_path();
		let _ = ctx.arc(socket.x, socket.y, 6.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_stroke_style_str(theme::CANVAS_BG);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
