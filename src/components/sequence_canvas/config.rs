/// Tunables for the canvas. All lengths are canvas-space units.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Zoom change per unit of wheel `delta_y`. Scrolling down zooms out.
	pub wheel_sensitivity: f64,
	pub history_capacity: usize,
	pub node_width: f64,
	pub node_height: f64,
	pub socket_radius: f64,
	/// Width of the invisible band around a curve that accepts pointer input.
	pub connection_hit_width: f64,
	pub max_control_offset: f64,
	pub delete_button_radius: f64,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.5,
			max_zoom: 2.0,
			wheel_sensitivity: 0.001,
			history_capacity: 50,
			node_width: 180.0,
			node_height: 90.0,
			socket_radius: 8.0,
			connection_hit_width: 12.0,
			max_control_offset: 100.0,
			delete_button_radius: 10.0,
		}
	}
}
