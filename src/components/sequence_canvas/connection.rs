//! Connection curves: how a connection looks for a given validity and
//! interaction state, and where it accepts pointer input.

use super::config::CanvasConfig;
use super::geometry::CubicBezier;
use super::types::{Position, Validity};

/// Visual parameters of a connection stroke. The color is a theme token key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
	pub token: &'static str,
	pub width: f64,
	pub dashed: bool,
	pub glow: bool,
}

/// Read-only projection of a connection handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionView {
	pub id: Option<String>,
	pub curve: CubicBezier,
	pub validity: Validity,
	pub hovered: bool,
	pub selected: bool,
	pub can_delete: bool,
}

impl ConnectionView {
	pub fn new(
		id: Option<String>,
		from: Position,
		to: Position,
		validity: Validity,
		config: &CanvasConfig,
	) -> Self {
		Self {
			id,
			curve: CubicBezier::connection(from, to, config.max_control_offset),
			validity,
			hovered: false,
			selected: false,
			can_delete: false,
		}
	}

	pub fn stroke(&self) -> StrokeStyle {
		let width = match (self.selected, self.hovered) {
			(true, _) => 3.5,
			(false, true) => 3.0,
			_ => 2.0,
		};
		StrokeStyle {
			token: self.validity.token(),
			width,
			dashed: self.validity == Validity::Missing,
			glow: self.hovered || self.selected,
		}
	}

	/// Hit test against the wide invisible band, independent of stroke width.
	pub fn hit(&self, p: Position, config: &CanvasConfig) -> bool {
		self.curve.distance_to(p) <= config.connection_hit_width / 2.0
	}

	/// The delete affordance is shown only for a selected, deletable connection.
	pub fn delete_button(&self) -> Option<Position> {
		(self.selected && self.can_delete && self.validity == Validity::Pending)
			.then(|| self.curve.midpoint())
	}

	pub fn hit_delete_button(&self, p: Position, config: &CanvasConfig) -> bool {
		self.delete_button()
			.is_some_and(|c| p.distance(c) <= config.delete_button_radius)
	}
}
