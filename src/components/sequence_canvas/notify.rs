use std::cell::RefCell;
use std::rc::Rc;

use super::types::Severity;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub message: String,
	pub severity: Severity,
	pub duration_ms: Option<u32>,
}

impl Notice {
	pub fn new(message: impl Into<String>, severity: Severity) -> Self {
		Self {
			message: message.into(),
			severity,
			duration_ms: None,
		}
	}

	pub fn lasting(mut self, duration_ms: u32) -> Self {
		self.duration_ms = Some(duration_ms);
		self
	}
}

/// Transient-message surface the controller reports to. Fire and forget.
pub trait Notifier {
	fn notify(&self, notice: Notice);
}

/// Notifier that only logs, used when no message surface is attached.
pub struct LogNotifier;

impl Notifier for LogNotifier {
	fn notify(&self, notice: Notice) {
		log::info!("[{}] {}", notice.severity, notice.message);
	}
}

/// Records every notice it receives. Clones share the same log.
#[derive(Clone, Default)]
pub struct NoticeLog(Rc<RefCell<Vec<Notice>>>);

impl NoticeLog {
	pub fn notices(&self) -> Vec<Notice> {
		self.0.borrow().clone()
	}

	pub fn last(&self) -> Option<Notice> {
		self.0.borrow().last().cloned()
	}
}

impl Notifier for NoticeLog {
	fn notify(&self, notice: Notice) {
		self.0.borrow_mut().push(notice);
	}
}
