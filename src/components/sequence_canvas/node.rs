//! Draggable node: box geometry, socket hit regions, the drag lifecycle and
//! in-place label editing.

use super::config::CanvasConfig;
use super::geometry::ViewTransform;
use super::types::{ConnectionStatus, NodeData, Position};

/// Part of a node under the pointer. Sockets win over the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeHit {
	InputSocket,
	OutputSocket,
	Body,
}

pub fn input_socket(node: &NodeData, config: &CanvasConfig) -> Position {
	Position::new(node.position.x, node.position.y + config.node_height / 2.0)
}

pub fn output_socket(node: &NodeData, config: &CanvasConfig) -> Position {
	Position::new(
		node.position.x + config.node_width,
		node.position.y + config.node_height / 2.0,
	)
}

pub fn hit_test(node: &NodeData, p: Position, config: &CanvasConfig) -> Option<NodeHit> {
	if p.distance(output_socket(node, config)) <= config.socket_radius {
		return Some(NodeHit::OutputSocket);
	}
	if p.distance(input_socket(node, config)) <= config.socket_radius {
		return Some(NodeHit::InputSocket);
	}
	let inside = p.x >= node.position.x
		&& p.x <= node.position.x + config.node_width
		&& p.y >= node.position.y
		&& p.y <= node.position.y + config.node_height;
	inside.then_some(NodeHit::Body)
}

/// An in-progress node drag. The offset is taken in canvas space so the
/// grabbed point stays under the pointer at any zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
	pub node_id: String,
	pub offset: Position,
	pub moved: bool,
}

impl DragSession {
	pub fn begin(node: &NodeData, pointer: Position) -> Self {
		Self {
			node_id: node.id.clone(),
			offset: Position::new(pointer.x - node.position.x, pointer.y - node.position.y),
			moved: false,
		}
	}

	/// Node position for a pointer at `screen`.
	pub fn position_for(&self, screen: Position, transform: &ViewTransform) -> Position {
		let p = transform.screen_to_canvas(screen);
		Position::new(p.x - self.offset.x, p.y - self.offset.y)
	}
}

/// State of the label text field. A commit is reported at most once per
/// edit, so a blur that follows Enter is a no-op.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelEditor {
	session: Option<LabelEdit>,
}

#[derive(Clone, Debug, PartialEq)]
struct LabelEdit {
	node_id: String,
	previous: String,
	draft: String,
}

impl LabelEditor {
	pub fn begin(&mut self, node: &NodeData) {
		self.session = Some(LabelEdit {
			node_id: node.id.clone(),
			previous: node.display_name.clone(),
			draft: node.display_name.clone(),
		});
	}

	pub fn is_editing(&self) -> bool {
		self.session.is_some()
	}

	pub fn editing_node(&self) -> Option<&str> {
		self.session.as_ref().map(|s| s.node_id.as_str())
	}

	pub fn draft(&self) -> Option<&str> {
		self.session.as_ref().map(|s| s.draft.as_str())
	}

	pub fn set_draft(&mut self, text: &str) {
		if let Some(session) = self.session.as_mut() {
			session.draft = text.to_string();
		}
	}

	/// Ends the edit and yields `(node_id, label)`. Whitespace-only drafts
	/// fall back to the label the edit started from.
	pub fn commit(&mut self) -> Option<(String, String)> {
		let session = self.session.take()?;
		let trimmed = session.draft.trim();
		let label = if trimmed.is_empty() {
			session.previous
		} else {
			trimmed.to_string()
		};
		Some((session.node_id, label))
	}

	pub fn cancel(&mut self) {
		self.session = None;
	}
}

/// Read-only projection of a node handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	pub data: NodeData,
	pub dragging: bool,
	pub connecting: bool,
	pub editing: bool,
	pub disabled: bool,
	pub show_hidden_name: bool,
	pub connection_status: Option<ConnectionStatus>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sequence_canvas::types::Quiz;

	fn first_node() -> NodeData {
		Quiz::shading_stages().nodes[0].clone()
	}

	#[test]
	fn sockets_sit_on_the_vertical_middle() {
		let (node, config) = (first_node(), CanvasConfig::default());
		assert_eq!(input_socket(&node, &config), Position::new(100.0, 245.0));
		assert_eq!(output_socket(&node, &config), Position::new(280.0, 245.0));
	}

	#[test]
	fn sockets_take_priority_over_body() {
		let (node, config) = (first_node(), CanvasConfig::default());
		let hit = |x, y| hit_test(&node, Position::new(x, y), &config);
		assert_eq!(hit(277.0, 245.0), Some(NodeHit::OutputSocket));
		assert_eq!(hit(103.0, 246.0), Some(NodeHit::InputSocket));
		assert_eq!(hit(150.0, 210.0), Some(NodeHit::Body));
		assert_eq!(hit_test(&node, Position::new(50.0, 50.0), &config), None);
	}

	#[test]
	fn drag_keeps_grab_point_under_pointer_when_zoomed() {
		let node = first_node();
		let transform = ViewTransform {
			x: 40.0,
			y: -20.0,
			k: 2.0,
		};
		let grab = transform.screen_to_canvas(Position::new(300.0, 400.0));
		let drag = DragSession::begin(&node, grab);

		assert_eq!(drag.position_for(Position::new(300.0, 400.0), &transform), node.position);
		assert_eq!(
			drag.position_for(Position::new(320.0, 440.0), &transform),
			Position::new(110.0, 220.0)
		);
	}

	#[test]
	fn whitespace_label_falls_back() {
		let mut editor = LabelEditor::default();
		editor.begin(&first_node());
		editor.set_draft("   ");
		assert_eq!(editor.commit(), Some(("1".to_string(), "MAPPING".to_string())));
	}

	#[test]
	fn label_is_trimmed_and_reported_once() {
		let mut editor = LabelEditor::default();
		editor.begin(&first_node());
		assert_eq!(editor.draft(), Some("MAPPING"));
		editor.set_draft("Foo ");
		assert_eq!(editor.commit(), Some(("1".to_string(), "Foo".to_string())));
		assert_eq!(editor.commit(), None);
	}

	#[test]
	fn escape_discards_the_draft() {
		let mut editor = LabelEditor::default();
		editor.begin(&first_node());
		editor.set_draft("Changed");
		editor.cancel();
		assert!(!editor.is_editing());
		assert_eq!(editor.commit(), None);
	}
}
