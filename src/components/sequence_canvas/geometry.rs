//! Screen/canvas transforms and the cubic curves used for connections.
//!
//! Content is drawn as `translate(pan) then scale(zoom)`, so a canvas point
//! `c` lands on screen at `c * zoom + pan`.

use super::types::Position;

/// Segments used when flattening a connection curve for hit testing.
const HIT_SEGMENTS: usize = 24;

pub fn to_canvas_space(screen: Position, pan: Position, zoom: f64) -> Position {
	Position::new((screen.x - pan.x) / zoom, (screen.y - pan.y) / zoom)
}

pub fn to_screen_space(canvas: Position, pan: Position, zoom: f64) -> Position {
	Position::new(canvas.x * zoom + pan.x, canvas.y * zoom + pan.y)
}

/// Pan offset and zoom scale applied to all canvas content.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn pan(&self) -> Position {
		Position::new(self.x, self.y)
	}

	pub fn screen_to_canvas(&self, screen: Position) -> Position {
		to_canvas_space(screen, self.pan(), self.k)
	}

	pub fn canvas_to_screen(&self, canvas: Position) -> Position {
		to_screen_space(canvas, self.pan(), self.k)
	}

	/// Applies a wheel delta and clamps the result. Non-finite deltas are ignored.
	pub fn zoom_by(&mut self, delta_y: f64, sensitivity: f64, min: f64, max: f64) {
		if !delta_y.is_finite() {
			return;
		}
		self.k = (self.k - delta_y * sensitivity).clamp(min, max);
	}
}

/// Horizontal-tangent control points for a connection running `from` → `to`.
pub fn bezier_control_points(
	from: Position,
	to: Position,
	max_offset: f64,
) -> (Position, Position) {
	let offset = (from.distance(to) * 0.5).min(max_offset);
	(
		Position::new(from.x + offset, from.y),
		Position::new(to.x - offset, to.y),
	)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
	pub p0: Position,
	pub p1: Position,
	pub p2: Position,
	pub p3: Position,
}

impl CubicBezier {
	pub fn connection(from: Position, to: Position, max_offset: f64) -> Self {
		let (p1, p2) = bezier_control_points(from, to, max_offset);
		Self {
			p0: from,
			p1,
			p2,
			p3: to,
		}
	}

	/// Point on the curve at `t ∈ [0, 1]`.
	pub fn eval(&self, t: f64) -> Position {
		let mt = 1.0 - t;
		let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
		Position::new(
			a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
			a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
		)
	}

	pub fn midpoint(&self) -> Position {
		self.eval(0.5)
	}

	/// Approximate distance from `p` to the curve, measured against a
	/// polyline flattening.
	pub fn distance_to(&self, p: Position) -> f64 {
		let mut prev = self.p0;
		let mut best = f64::INFINITY;
		for i in 1..=HIT_SEGMENTS {
			let next = self.eval(i as f64 / HIT_SEGMENTS as f64);
			best = best.min(segment_distance(p, prev, next));
			prev = next;
		}
		best
	}
}

fn segment_distance(p: Position, a: Position, b: Position) -> f64 {
	let (abx, aby) = (b.x - a.x, b.y - a.y);
	let len_sq = abx * abx + aby * aby;
	if len_sq < 1e-12 {
		return p.distance(a);
	}
	let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
	p.distance(Position::new(a.x + abx * t, a.y + aby * t))
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn close(a: Position, b: Position) -> bool {
		(a.x - b.x).abs() < 1e-6 * (1.0 + a.x.abs()) && (a.y - b.y).abs() < 1e-6 * (1.0 + a.y.abs())
	}

	#[test]
	fn canvas_space_undoes_pan_then_scale() {
		let p = to_canvas_space(Position::new(250.0, 130.0), Position::new(50.0, 30.0), 2.0);
		assert_eq!(p, Position::new(100.0, 50.0));
	}

	#[test]
	fn control_offset_is_capped() {
		let (cp1, cp2) =
			bezier_control_points(Position::new(0.0, 0.0), Position::new(1000.0, 0.0), 100.0);
		assert_eq!(cp1, Position::new(100.0, 0.0));
		assert_eq!(cp2, Position::new(900.0, 0.0));

		let (cp1, cp2) =
			bezier_control_points(Position::new(0.0, 0.0), Position::new(60.0, 80.0), 100.0);
		assert_eq!(cp1, Position::new(50.0, 0.0));
		assert_eq!(cp2, Position::new(10.0, 80.0));
	}

	#[test]
	fn control_points_ignore_absolute_position() {
		let (a1, a2) =
			bezier_control_points(Position::new(0.0, 0.0), Position::new(40.0, 30.0), 100.0);
		let (b1, b2) = bezier_control_points(
			Position::new(500.0, 500.0),
			Position::new(540.0, 530.0),
			100.0,
		);
		assert_eq!((a1.x + 500.0, a1.y + 500.0), (b1.x, b1.y));
		assert_eq!((a2.x + 500.0, a2.y + 500.0), (b2.x, b2.y));
	}

	#[test]
	fn curve_passes_through_endpoints() {
		let curve = CubicBezier::connection(
			Position::new(280.0, 245.0),
			Position::new(100.0, 365.0),
			100.0,
		);
		assert_eq!(curve.eval(0.0), curve.p0);
		assert_eq!(curve.eval(1.0), curve.p3);
		assert!(curve.distance_to(curve.midpoint()) < 1e-6);
		assert!(curve.distance_to(Position::new(-500.0, -500.0)) > 100.0);
	}

	proptest! {
		#[test]
		fn screen_round_trip(
			px in -2000.0f64..2000.0,
			py in -2000.0f64..2000.0,
			zoom in 0.5f64..=2.0,
			cx in -5000.0f64..5000.0,
			cy in -5000.0f64..5000.0,
		) {
			let (pan, c) = (Position::new(px, py), Position::new(cx, cy));
			let screen = to_screen_space(c, pan, zoom);
			let back = to_screen_space(to_canvas_space(screen, pan, zoom), pan, zoom);
			prop_assert!(close(back, screen), "{back:?} != {screen:?}");
		}

		#[test]
		fn wheel_never_escapes_zoom_bounds(deltas in prop::collection::vec(-1e6f64..1e6, 1..40)) {
			let mut view = ViewTransform::default();
			for d in deltas {
				view.zoom_by(d, 0.001, 0.5, 2.0);
				prop_assert!((0.5..=2.0).contains(&view.k));
			}
		}
	}

	#[test]
	fn non_finite_wheel_delta_is_ignored() {
		let mut view = ViewTransform::default();
		view.zoom_by(f64::NAN, 0.001, 0.5, 2.0);
		view.zoom_by(f64::INFINITY, 0.001, 0.5, 2.0);
		assert_eq!(view.k, 1.0);
	}
}
