use log::{debug, info, warn};

use super::config::CanvasConfig;
use super::connection::ConnectionView;
use super::error::{ConnectError, SubmitError};
use super::geometry::ViewTransform;
use super::grading::{self, GradeReport};
use super::history::History;
use super::node::{self, DragSession, LabelEditor, NodeHit, NodeView};
use super::notify::{LogNotifier, Notice, Notifier};
use super::shortcuts::ShortcutAction;
use super::types::{Connection, HistoryState, NodeData, Position, Quiz, Severity, Validity};

const GRADE_NOTICE_MS: u32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	Primary,
	Middle,
	Secondary,
}

impl PointerButton {
	pub fn from_dom(button: i16) -> Self {
		match button {
			1 => PointerButton::Middle,
			2 => PointerButton::Secondary,
			_ => PointerButton::Primary,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanState {
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Toolbar-facing snapshot of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanvasFlags {
	pub test_mode: bool,
	pub can_undo: bool,
	pub can_redo: bool,
	pub submitted: bool,
}

/// A rubber-band connection being drawn from a node's output socket.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingConnection {
	pub from_node_id: String,
	pub from: Position,
}

/// Owns every piece of mutable canvas state. Rendering and DOM glue only
/// read projections of it and report intents through its methods.
pub struct SequenceCanvasState {
	pub config: CanvasConfig,
	pub quiz: Quiz,
	pub nodes: Vec<NodeData>,
	pub connections: Vec<Connection>,
	pub transform: ViewTransform,
	pub drag: Option<DragSession>,
	pub pan: Option<PanState>,
	pub drawing: Option<DrawingConnection>,
	/// Last pointer position in canvas space.
	pub pointer: Position,
	pub hovered_connection: Option<String>,
	pub hovered_node: Option<(String, NodeHit)>,
	pub selected_connection: Option<String>,
	pub editor: LabelEditor,
	pub test_mode: bool,
	pub submitted: bool,
	pub report: Option<GradeReport>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	history: History,
	notifier: Box<dyn Notifier>,
}

impl SequenceCanvasState {
	pub fn new(quiz: Quiz, config: CanvasConfig, width: f64, height: f64) -> Self {
		let nodes = quiz.nodes.clone();
		let history = History::new(
			HistoryState {
				nodes: nodes.clone(),
				connections: Vec::new(),
			},
			config.history_capacity,
		);
		Self {
			config,
			quiz,
			nodes,
			connections: Vec::new(),
			transform: ViewTransform::default(),
			drag: None,
			pan: None,
			drawing: None,
			pointer: Position::default(),
			hovered_connection: None,
			hovered_node: None,
			selected_connection: None,
			editor: LabelEditor::default(),
			test_mode: false,
			submitted: false,
			report: None,
			width,
			height,
			flow_time: 0.0,
			history,
			notifier: Box::new(LogNotifier),
		}
	}

	pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
		self.notifier = Box::new(notifier);
		self
	}

	fn notify(&self, message: impl Into<String>, severity: Severity) {
		self.notifier.notify(Notice::new(message, severity));
	}

	pub fn node(&self, id: &str) -> Option<&NodeData> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn can_undo(&self) -> bool {
		!self.submitted && self.history.can_undo()
	}

	pub fn can_redo(&self) -> bool {
		!self.submitted && self.history.can_redo()
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn gesture_active(&self) -> bool {
		self.drag.is_some() || self.pan.is_some() || self.drawing.is_some()
	}

	fn commit(&mut self) {
		self.history.commit(HistoryState {
			nodes: self.nodes.clone(),
			connections: self.connections.clone(),
		});
		debug!(
			"history commit {}/{}",
			self.history.index() + 1,
			self.history.len()
		);
	}

	fn restore(&mut self, snapshot: HistoryState) {
		self.nodes = snapshot.nodes;
		self.connections = snapshot.connections;
		let selection_gone = self
			.selected_connection
			.as_ref()
			.is_some_and(|id| !self.connections.iter().any(|c| &c.id == id));
		if selection_gone {
			self.selected_connection = None;
		}
	}

	// Hit testing

	/// Topmost node part under a screen point. Nodes later in the list are
	/// drawn on top.
	pub fn node_at_position(&self, screen: Position) -> Option<(String, NodeHit)> {
		let p = self.transform.screen_to_canvas(screen);
		self.nodes
			.iter()
			.rev()
			.find_map(|n| node::hit_test(n, p, &self.config).map(|hit| (n.id.clone(), hit)))
	}

	pub fn connection_at_position(&self, screen: Position) -> Option<String> {
		let p = self.transform.screen_to_canvas(screen);
		self.connection_views()
			.into_iter()
			.rev()
			.find(|v| v.hit(p, &self.config))
			.and_then(|v| v.id)
	}

	fn delete_button_hit(&self, screen: Position) -> Option<String> {
		let p = self.transform.screen_to_canvas(screen);
		self.connection_views()
			.into_iter()
			.find(|v| v.hit_delete_button(p, &self.config))
			.and_then(|v| v.id)
	}

	// Pointer input, in screen coordinates relative to the canvas element

	pub fn pointer_down(&mut self, screen: Position, button: PointerButton, alt: bool) {
		self.pointer = self.transform.screen_to_canvas(screen);

		if button == PointerButton::Middle || (button == PointerButton::Primary && alt) {
			self.begin_pan(screen);
			return;
		}
		if button != PointerButton::Primary {
			return;
		}

		if let Some(id) = self.delete_button_hit(screen) {
			self.delete_connection(&id);
			return;
		}

		match self.node_at_position(screen) {
			Some((id, NodeHit::OutputSocket)) => {
				self.begin_connection(&id);
			}
			Some((_, NodeHit::InputSocket)) => {}
			Some((id, NodeHit::Body)) => {
				self.selected_connection = None;
				self.begin_drag(&id, self.pointer);
			}
			None => match self.connection_at_position(screen) {
				Some(id) => self.select_connection(&id),
				None => self.selected_connection = None,
			},
		}
	}

	pub fn pointer_move(&mut self, screen: Position) {
		self.pointer = self.transform.screen_to_canvas(screen);

		if let Some(pan) = &self.pan {
			self.transform.x = pan.transform_start_x + (screen.x - pan.start_x);
			self.transform.y = pan.transform_start_y + (screen.y - pan.start_y);
			return;
		}
		if self.drag.is_some() {
			self.drag_to(screen);
			return;
		}

		self.hovered_node = self.node_at_position(screen);
		self.hovered_connection = if self.drawing.is_none() && self.hovered_node.is_none() {
			self.connection_at_position(screen)
		} else {
			None
		};
	}

	pub fn pointer_up(&mut self, screen: Position) {
		self.pointer = self.transform.screen_to_canvas(screen);

		if self.pan.take().is_some() {
			debug!("pan ended at ({}, {})", self.transform.x, self.transform.y);
		}
		if self.drag.is_some() {
			self.end_drag();
		}
		if self.drawing.is_some() {
			match self.node_at_position(screen) {
				Some((id, NodeHit::InputSocket)) => {
					let _ = self.complete_connection(&id);
				}
				_ => self.cancel_connection(),
			}
		}
	}

	/// Pointer left the page mid-gesture: finish what can be finished.
	pub fn pointer_lost(&mut self) {
		self.pan = None;
		if self.drag.is_some() {
			self.end_drag();
		}
		self.cancel_connection();
		self.hovered_connection = None;
		self.hovered_node = None;
	}

	pub fn double_click(&mut self, screen: Position) -> bool {
		match self.node_at_position(screen) {
			Some((id, NodeHit::Body)) => self.begin_label_edit(&id),
			_ => false,
		}
	}

	pub fn wheel(&mut self, delta_y: f64) {
		let CanvasConfig {
			wheel_sensitivity,
			min_zoom,
			max_zoom,
			..
		} = self.config;
		self.transform.zoom_by(delta_y, wheel_sensitivity, min_zoom, max_zoom);
	}

	// Pan

	pub fn begin_pan(&mut self, screen: Position) {
		self.pan = Some(PanState {
			start_x: screen.x,
			start_y: screen.y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		});
	}

	// Node drag

	/// Starts dragging `id` with the pointer at canvas position `pointer`.
	pub fn begin_drag(&mut self, id: &str, pointer: Position) -> bool {
		if self.submitted || self.drag.is_some() {
			return false;
		}
		let Some(node) = self.node(id) else {
			return false;
		};
		if self.editor.editing_node() == Some(id) {
			return false;
		}
		self.drag = Some(DragSession::begin(node, pointer));
		// Bring the dragged node to the top of the stack.
		if let Some(i) = self.nodes.iter().position(|n| n.id == id) {
			let node = self.nodes.remove(i);
			self.nodes.push(node);
		}
		true
	}

	pub fn drag_to(&mut self, screen: Position) {
		let Some(drag) = self.drag.as_mut() else {
			return;
		};
		let position = drag.position_for(screen, &self.transform);
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == drag.node_id) {
			drag.moved |= node.position != position;
			node.position = position;
		}
	}

	pub fn end_drag(&mut self) {
		let Some(drag) = self.drag.take() else {
			return;
		};
		if drag.moved {
			debug!("node {} dropped", drag.node_id);
			self.commit();
		}
	}

	// Connections

	pub fn begin_connection(&mut self, from_node_id: &str) -> bool {
		if self.submitted {
			return false;
		}
		let Some(node) = self.node(from_node_id) else {
			return false;
		};
		self.drawing = Some(DrawingConnection {
			from_node_id: from_node_id.to_string(),
			from: node::output_socket(node, &self.config),
		});
		self.selected_connection = None;
		true
	}

	pub fn cancel_connection(&mut self) {
		if let Some(drawing) = self.drawing.take() {
			debug!("connection from {} cancelled", drawing.from_node_id);
		}
	}

	/// Finishes the drawing gesture on `to_node_id`'s input socket.
	pub fn complete_connection(&mut self, to_node_id: &str) -> Result<Connection, ConnectError> {
		let drawing = self.drawing.take().ok_or(ConnectError::NotDrawing)?;
		self.connect(&drawing.from_node_id, to_node_id)
	}

	/// Creates `from → to` if neither end is already saturated.
	pub fn connect(&mut self, from: &str, to: &str) -> Result<Connection, ConnectError> {
		let result = self.try_connect(from, to);
		match &result {
			Ok(c) if c.is_valid => self.notify("Connection in sequence", Severity::Success),
			Ok(_) => self.notify("Connection out of sequence", Severity::Error),
			Err(e @ ConnectError::SelfConnection) => self.notify(e.to_string(), Severity::Warning),
			Err(e) => self.notify(e.to_string(), Severity::Error),
		}
		result
	}

	fn try_connect(&mut self, from: &str, to: &str) -> Result<Connection, ConnectError> {
		if self.submitted {
			return Err(ConnectError::Submitted);
		}
		if from == to {
			return Err(ConnectError::SelfConnection);
		}
		let from_node = self
			.node(from)
			.ok_or_else(|| ConnectError::UnknownNode(from.to_string()))?;
		let to_node = self
			.node(to)
			.ok_or_else(|| ConnectError::UnknownNode(to.to_string()))?;
		if self.connections.iter().any(|c| c.from_node_id == from) {
			return Err(ConnectError::SourceSaturated);
		}
		if self.connections.iter().any(|c| c.to_node_id == to) {
			return Err(ConnectError::TargetSaturated);
		}

		let is_valid =
			grading::is_successor(&self.quiz.sequence, from_node.hidden_name, to_node.hidden_name);
		let connection = Connection::new(from, to, is_valid);
		info!(
			"connected {} -> {} ({})",
			from_node.hidden_name,
			to_node.hidden_name,
			if is_valid { "valid" } else { "invalid" }
		);
		self.connections.push(connection.clone());
		self.commit();
		Ok(connection)
	}

	/// Selects an ungraded connection. Graded connections ignore clicks.
	pub fn select_connection(&mut self, id: &str) {
		if self.submitted || !self.connections.iter().any(|c| c.id == id) {
			return;
		}
		self.selected_connection = Some(id.to_string());
	}

	pub fn delete_connection(&mut self, id: &str) -> bool {
		if self.submitted {
			return false;
		}
		let before = self.connections.len();
		self.connections.retain(|c| c.id != id);
		if self.connections.len() == before {
			return false;
		}
		if self.selected_connection.as_deref() == Some(id) {
			self.selected_connection = None;
		}
		self.commit();
		self.notify("Connection deleted", Severity::Info);
		true
	}

	pub fn delete_selected(&mut self) -> bool {
		match self.selected_connection.clone() {
			Some(id) => self.delete_connection(&id),
			None => false,
		}
	}

	// Labels and modes

	pub fn toggle_test_mode(&mut self) {
		if self.submitted {
			return;
		}
		self.test_mode = !self.test_mode;
		if !self.test_mode {
			self.editor.cancel();
		}
		info!("test mode {}", if self.test_mode { "on" } else { "off" });
	}

	pub fn begin_label_edit(&mut self, id: &str) -> bool {
		if !self.test_mode || self.submitted {
			return false;
		}
		let Some(node) = self.nodes.iter().find(|n| n.id == id) else {
			return false;
		};
		self.editor.begin(node);
		true
	}

	pub fn set_label_draft(&mut self, text: &str) {
		self.editor.set_draft(text);
	}

	pub fn commit_label_edit(&mut self) -> bool {
		match self.editor.commit() {
			Some((id, label)) => self.rename_node(&id, &label),
			None => false,
		}
	}

	pub fn cancel_label_edit(&mut self) {
		self.editor.cancel();
	}

	/// Sets a node's display label. Unchanged labels leave history alone.
	pub fn rename_node(&mut self, id: &str, label: &str) -> bool {
		let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
			return false;
		};
		if node.display_name == label {
			return false;
		}
		node.display_name = label.to_string();
		self.commit();
		true
	}

	// History

	pub fn undo(&mut self) -> bool {
		if self.submitted {
			return false;
		}
		let Some(snapshot) = self.history.undo().cloned() else {
			return false;
		};
		self.restore(snapshot);
		self.notify("Undone", Severity::Info);
		true
	}

	pub fn redo(&mut self) -> bool {
		if self.submitted {
			return false;
		}
		let Some(snapshot) = self.history.redo().cloned() else {
			return false;
		};
		self.restore(snapshot);
		self.notify("Redone", Severity::Info);
		true
	}

	// Grading

	pub fn submit(&mut self) -> Result<GradeReport, SubmitError> {
		if self.submitted {
			return Err(SubmitError::AlreadySubmitted);
		}
		let report = match grading::grade(&self.nodes, &self.connections, &self.quiz.sequence) {
			Ok(report) => report,
			Err(e) => {
				warn!("submission rejected: {e}");
				self.notify(e.to_string(), Severity::Error);
				return Err(e);
			}
		};

		self.submitted = true;
		self.drawing = None;
		self.drag = None;
		self.selected_connection = None;
		self.editor.cancel();

		info!(
			"graded: pass={} walked={:?} expected={:?} pairs={:?}",
			report.pass, report.walked, report.expected, report.pairs
		);
		let notice = if report.pass {
			let chain: Vec<String> = self.quiz.sequence.iter().map(char::to_string).collect();
			let message = format!("Excellent! Correct sequence {}", chain.join(" → "));
			Notice::new(message, Severity::Success)
		} else {
			Notice::new("Incorrect sequence. Review the connections.", Severity::Error)
		};
		self.notifier.notify(notice.lasting(GRADE_NOTICE_MS));
		self.report = Some(report.clone());
		Ok(report)
	}

	// Read-only projections

	pub fn node_views(&self) -> Vec<NodeView> {
		self.nodes
			.iter()
			.map(|n| NodeView {
				data: n.clone(),
				dragging: self.drag.as_ref().is_some_and(|d| d.node_id == n.id),
				connecting: self.drawing.as_ref().is_some_and(|d| d.from_node_id == n.id),
				editing: self.editor.editing_node() == Some(n.id.as_str()),
				disabled: self.submitted,
				show_hidden_name: self.test_mode,
				connection_status: self
					.submitted
					.then(|| grading::connection_status(n, &self.connections, &self.quiz.sequence)),
			})
			.collect()
	}

	fn view_between(
		&self,
		id: Option<String>,
		from: &str,
		to: &str,
		validity: Validity,
	) -> Option<ConnectionView> {
		let (from, to) = (self.node(from)?, self.node(to)?);
		Some(ConnectionView::new(
			id,
			node::output_socket(from, &self.config),
			node::input_socket(to, &self.config),
			validity,
			&self.config,
		))
	}

	/// Learner connections, followed by missing overlays once graded.
	/// Connections whose endpoints are gone are skipped.
	pub fn connection_views(&self) -> Vec<ConnectionView> {
		let mut views: Vec<ConnectionView> = self
			.connections
			.iter()
			.filter_map(|c| {
				let validity = if self.submitted {
					Validity::graded(c.is_valid)
				} else {
					Validity::Pending
				};
				let mut view = self.view_between(
					Some(c.id.clone()),
					&c.from_node_id,
					&c.to_node_id,
					validity,
				)?;
				view.hovered = self.hovered_connection.as_deref() == Some(c.id.as_str());
				view.selected = self.selected_connection.as_deref() == Some(c.id.as_str());
				view.can_delete = !self.submitted;
				Some(view)
			})
			.collect();
		views.extend(self.missing_connections().iter().filter_map(|c| {
			self.view_between(None, &c.from_node_id, &c.to_node_id, Validity::Missing)
		}));
		views
	}

	pub fn missing_connections(&self) -> Vec<Connection> {
		if !self.submitted {
			return Vec::new();
		}
		grading::missing_connections(&self.nodes, &self.connections, &self.quiz.sequence)
	}

	pub fn rubber_band(&self) -> Option<ConnectionView> {
		let drawing = self.drawing.as_ref()?;
		Some(ConnectionView::new(None, drawing.from, self.pointer, Validity::Pending, &self.config))
	}

	/// The correct chain shown beside the learner's work after grading.
	pub fn reference_views(&self) -> Option<(Vec<NodeView>, Vec<ConnectionView>)> {
		if !self.submitted {
			return None;
		}
		let (nodes, connections) = grading::reference_chain(
			&self.quiz.nodes,
			&self.quiz.sequence,
			self.quiz.reference_origin,
			self.quiz.reference_spacing,
		);
		let lines = connections
			.iter()
			.filter_map(|c| {
				let from = nodes.iter().find(|n| n.id == c.from_node_id)?;
				let to = nodes.iter().find(|n| n.id == c.to_node_id)?;
				Some(ConnectionView::new(
					None,
					node::output_socket(from, &self.config),
					node::input_socket(to, &self.config),
					Validity::Valid,
					&self.config,
				))
			})
			.collect();
		let views = nodes
			.into_iter()
			.map(|data| NodeView {
				data,
				dragging: false,
				connecting: false,
				editing: false,
				disabled: true,
				show_hidden_name: self.test_mode,
				connection_status: None,
			})
			.collect();
		Some((views, lines))
	}

	/// Runs a keyboard shortcut. Shortcuts are ignored while a label is
	/// being edited so typing in the field never mutates the canvas.
	pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
		if self.editor.is_editing() {
			return false;
		}
		match action {
			ShortcutAction::Undo => self.undo(),
			ShortcutAction::Redo => self.redo(),
			ShortcutAction::DeleteSelection => self.delete_selected(),
			ShortcutAction::Escape => {
				let had_anything = self.selected_connection.is_some() || self.drawing.is_some();
				self.selected_connection = None;
				self.cancel_connection();
				had_anything
			}
		}
	}

	pub fn flags(&self) -> CanvasFlags {
		CanvasFlags {
			test_mode: self.test_mode,
			can_undo: self.can_undo(),
			can_redo: self.can_redo(),
			submitted: self.submitted,
		}
	}

	/// CSS cursor for the current pointer position and gesture.
	pub fn cursor(&self) -> &'static str {
		if self.drag.is_some() || self.pan.is_some() {
			return "grabbing";
		}
		if self.drawing.is_some() {
			return "crosshair";
		}
		match &self.hovered_node {
			Some((_, NodeHit::InputSocket | NodeHit::OutputSocket)) if !self.submitted => {
				"crosshair"
			}
			Some(_) if !self.submitted => "grab",
			_ if self.hovered_connection.is_some() && !self.submitted => "pointer",
			_ => "default",
		}
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::sequence_canvas::notify::NoticeLog;

	fn state() -> (SequenceCanvasState, NoticeLog) {
		let log = NoticeLog::default();
		let s = SequenceCanvasState::new(
			Quiz::shading_stages(),
			CanvasConfig::default(),
			1200.0,
			900.0,
		)
		.with_notifier(log.clone());
		(s, log)
	}

	#[test]
	fn drawing_from_output_to_input_creates_connection() {
		let (mut s, log) = state();
		// Output socket of node 1 sits at (280, 245); input of node 2 at (100, 365).
		s.pointer_down(Position::new(280.0, 245.0), PointerButton::Primary, false);
		assert!(s.drawing.is_some());
		s.pointer_move(Position::new(200.0, 300.0));
		assert_eq!(s.rubber_band().map(|v| v.curve.p3), Some(Position::new(200.0, 300.0)));
		s.pointer_up(Position::new(101.0, 366.0));

		assert!(s.drawing.is_none());
		assert_eq!(s.connections, vec![Connection::new("1", "2", true)]);
		assert_eq!(log.last().map(|n| n.severity), Some(Severity::Success));
		assert_eq!(s.history().len(), 2);
	}

	#[test]
	fn releasing_elsewhere_cancels_without_history() {
		let (mut s, log) = state();
		s.pointer_down(Position::new(280.0, 245.0), PointerButton::Primary, false);
		s.pointer_up(Position::new(700.0, 700.0));
		assert!(s.drawing.is_none());
		assert!(s.connections.is_empty());
		assert_eq!(s.history().len(), 1);
		assert!(log.notices().is_empty());
	}

	#[test]
	fn self_connection_is_rejected_with_notice() {
		let (mut s, log) = state();
		assert_eq!(s.connect("1", "1"), Err(ConnectError::SelfConnection));
		assert!(s.connections.is_empty());
		assert_eq!(log.last().map(|n| n.severity), Some(Severity::Warning));
	}

	#[test]
	fn pan_follows_pointer_and_wheel_zooms() {
		let (mut s, _) = state();
		s.pointer_down(Position::new(600.0, 100.0), PointerButton::Middle, false);
		s.pointer_move(Position::new(650.0, 80.0));
		s.pointer_up(Position::new(650.0, 80.0));
		assert_eq!(s.transform.pan(), Position::new(50.0, -20.0));
		assert!(s.pan.is_none());

		s.wheel(-500.0);
		assert_eq!(s.transform.k, 1.5);
		s.wheel(-5000.0);
		assert_eq!(s.transform.k, 2.0);
	}

	#[test]
	fn alt_drag_on_node_pans_instead_of_dragging() {
		let (mut s, _) = state();
		s.pointer_down(Position::new(150.0, 220.0), PointerButton::Primary, true);
		assert!(s.pan.is_some());
		assert!(s.drag.is_none());
	}

	#[test]
	fn drag_moves_node_and_commits_on_release() {
		let (mut s, _) = state();
		s.pointer_down(Position::new(150.0, 220.0), PointerButton::Primary, false);
		s.pointer_move(Position::new(450.0, 260.0));
		assert_eq!(s.node("1").map(|n| n.position), Some(Position::new(400.0, 240.0)));
		assert_eq!(s.history().len(), 1);
		s.pointer_up(Position::new(450.0, 260.0));
		assert_eq!(s.history().len(), 2);

		assert!(s.undo());
		assert_eq!(s.node("1").map(|n| n.position), Some(Position::new(100.0, 200.0)));
	}

	#[test]
	fn click_without_movement_leaves_history_alone() {
		let (mut s, _) = state();
		s.pointer_down(Position::new(150.0, 220.0), PointerButton::Primary, false);
		s.pointer_up(Position::new(150.0, 220.0));
		assert_eq!(s.history().len(), 1);
	}

	#[test]
	fn losing_the_pointer_ends_every_gesture() {
		let (mut s, _) = state();
		s.pointer_down(Position::new(150.0, 220.0), PointerButton::Primary, false);
		s.pointer_move(Position::new(450.0, 260.0));
		s.pointer_lost();
		assert!(s.drag.is_none());
		assert_eq!(s.history().len(), 2);

		s.pointer_down(Position::new(280.0, 365.0), PointerButton::Primary, false);
		assert!(s.drawing.is_some());
		s.pointer_lost();
		assert!(s.drawing.is_none());
		assert!(s.connections.is_empty());

		s.pointer_down(Position::new(600.0, 100.0), PointerButton::Middle, false);
		s.pointer_lost();
		assert!(s.pan.is_none());
		assert!(!s.gesture_active());
		assert_eq!(s.history().len(), 2);
	}

	#[test]
	fn selected_connection_is_deleted_through_its_button() {
		let (mut s, log) = state();
		s.connect("1", "2").unwrap();
		let mid = s.connection_views()[0].curve.midpoint();
		s.pointer_down(mid, PointerButton::Primary, false);
		assert_eq!(s.selected_connection.as_deref(), Some("1-2"));
		s.pointer_up(mid);

		s.pointer_down(mid, PointerButton::Primary, false);
		assert!(s.connections.is_empty());
		assert_eq!(s.selected_connection, None);
		assert_eq!(log.last().map(|n| n.message), Some("Connection deleted".to_string()));
	}

	#[test]
	fn submitted_canvas_rejects_edits() {
		let (mut s, _) = state();
		s.connect("1", "2").unwrap();
		s.connect("2", "3").unwrap();
		s.connect("3", "4").unwrap();
		assert!(s.submit().unwrap().pass);

		assert!(!s.begin_drag("1", Position::new(120.0, 220.0)));
		assert!(!s.begin_connection("1"));
		assert!(!s.delete_connection("1-2"));
		s.select_connection("1-2");
		assert_eq!(s.selected_connection, None);
		assert!(!s.undo());
		assert_eq!(s.submit(), Err(SubmitError::AlreadySubmitted));
		assert!(s.node_views().iter().all(|n| n.disabled));
	}

	#[test]
	fn label_edit_needs_test_mode() {
		let (mut s, _) = state();
		assert!(!s.double_click(Position::new(150.0, 220.0)));
		s.toggle_test_mode();
		assert!(s.double_click(Position::new(150.0, 220.0)));
		s.set_label_draft("Foo ");
		assert!(s.commit_label_edit());
		assert_eq!(s.node("1").map(|n| n.display_name.as_str()), Some("Foo"));
		assert_eq!(s.history().len(), 2);
	}

	#[test]
	fn undo_drops_selection_of_vanished_connection() {
		let (mut s, _) = state();
		s.connect("1", "2").unwrap();
		s.select_connection("1-2");
		s.undo();
		assert_eq!(s.selected_connection, None);
		assert!(s.connections.is_empty());
	}

	#[test]
	fn shortcuts_are_ignored_while_editing_a_label() {
		let (mut s, _) = state();
		s.connect("1", "2").unwrap();
		s.toggle_test_mode();
		assert!(s.begin_label_edit("3"));
		assert!(!s.apply_shortcut(ShortcutAction::Undo));
		assert_eq!(s.connections.len(), 1);

		s.cancel_label_edit();
		assert!(s.apply_shortcut(ShortcutAction::Undo));
		assert!(s.connections.is_empty());
	}
}
