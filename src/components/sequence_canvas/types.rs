//! Plain data carried by the quiz canvas: nodes, connections, snapshots and
//! the seeded quiz content.

use std::fmt;

/// A point in canvas space (or screen space, depending on the caller).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Position) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Node swatch. Mapped to a theme token by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeColor {
	Pink,
	Orange,
	Gray,
	Blue,
}

impl NodeColor {
	pub fn token(self) -> &'static str {
		match self {
			NodeColor::Pink => "node-pink",
			NodeColor::Orange => "node-orange",
			NodeColor::Gray => "node-gray",
			NodeColor::Blue => "node-blue",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeData {
	pub id: String,
	/// Canonical identity used for grading. Shown only in test mode.
	pub hidden_name: char,
	pub display_name: String,
	pub position: Position,
	pub color: NodeColor,
	pub icon: String,
	pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
	pub id: String,
	pub from_node_id: String,
	pub to_node_id: String,
	pub is_valid: bool,
}

impl Connection {
	pub fn new(from_node_id: &str, to_node_id: &str, is_valid: bool) -> Self {
		Self {
			id: connection_id(from_node_id, to_node_id),
			from_node_id: from_node_id.to_string(),
			to_node_id: to_node_id.to_string(),
			is_valid,
		}
	}
}

pub fn connection_id(from: &str, to: &str) -> String {
	format!("{from}-{to}")
}

/// Validity of a connection as displayed. `Missing` is only ever synthesized
/// for the graded view and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
	Pending,
	Valid,
	Invalid,
	Missing,
}

impl Validity {
	pub fn graded(is_valid: bool) -> Self {
		if is_valid {
			Validity::Valid
		} else {
			Validity::Invalid
		}
	}

	pub fn token(self) -> &'static str {
		match self {
			Validity::Pending => "connection-pending",
			Validity::Valid => "connection-valid",
			Validity::Invalid => "connection-invalid",
			Validity::Missing => "connection-missing",
		}
	}
}

/// Post-grading cue telling whether a node has every edge it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
	Connected,
	Unconnected,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryState {
	pub nodes: Vec<NodeData>,
	pub connections: Vec<Connection>,
}

/// Seeded quiz content: the nodes the learner arranges and the order they
/// are expected to form.
#[derive(Clone, Debug, PartialEq)]
pub struct Quiz {
	pub title: String,
	pub nodes: Vec<NodeData>,
	pub sequence: Vec<char>,
	/// Top-left of the first node of the reference chain shown after grading.
	pub reference_origin: Position,
	pub reference_spacing: f64,
}

impl Quiz {
	pub fn shading_stages() -> Self {
		let node = |id: &str, hidden_name, name: &str, y, color, icon: &str, description: &str| {
			NodeData {
				id: id.to_string(),
				hidden_name,
				display_name: name.to_string(),
				position: Position::new(100.0, y),
				color,
				icon: icon.to_string(),
				description: Some(description.to_string()),
			}
		};

		Self {
			title: "SHADING STAGES".to_string(),
			nodes: vec![
				node("1", 'A', "MAPPING", 200.0, NodeColor::Pink, "map", "Coordinates"),
				node("2", 'B', "IMAGE", 320.0, NodeColor::Orange, "image", "Texture"),
				node("3", 'C', "PRINCIPLED BSDF", 440.0, NodeColor::Gray, "sparkles", "Material"),
				node("4", 'D', "OUTPUT LAYER", 560.0, NodeColor::Blue, "layers", "Output"),
			],
			sequence: vec!['A', 'B', 'C', 'D'],
			reference_origin: Position::new(100.0, 750.0),
			reference_spacing: 220.0,
		}
	}

	pub fn node_by_hidden_name(&self, name: char) -> Option<&NodeData> {
		self.nodes.iter().find(|n| n.hidden_name == name)
	}
}

impl Default for Quiz {
	fn default() -> Self {
		Self::shading_stages()
	}
}

/// Notification severity, mapped to a toast style by the notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	Info,
	Success,
	Warning,
	Error,
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Severity::Info => "info",
			Severity::Success => "success",
			Severity::Warning => "warning",
			Severity::Error => "error",
		})
	}
}
