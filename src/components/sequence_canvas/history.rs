//! Linear undo/redo log of canvas snapshots.
//!
//! Every committed mutation appends a full `{nodes, connections}` snapshot.
//! Undo and redo move a cursor over the log; a new commit truncates whatever
//! lies beyond the cursor. The log keeps at most `capacity` entries and drops
//! the oldest ones first.

use super::types::HistoryState;

pub struct History {
	entries: Vec<HistoryState>,
	index: usize,
	capacity: usize,
}

// Seeded with an initial snapshot, so never empty.
#[allow(clippy::len_without_is_empty)]
impl History {
	pub fn new(initial: HistoryState, capacity: usize) -> Self {
		Self {
			entries: vec![initial],
			index: 0,
			capacity: capacity.max(1),
		}
	}

	pub fn commit(&mut self, state: HistoryState) {
		self.entries.truncate(self.index + 1);
		self.entries.push(state);
		if self.entries.len() > self.capacity {
			let overflow = self.entries.len() - self.capacity;
			self.entries.drain(..overflow);
		}
		self.index = self.entries.len() - 1;
	}

	pub fn undo(&mut self) -> Option<&HistoryState> {
		if !self.can_undo() {
			return None;
		}
		self.index -= 1;
		self.entries.get(self.index)
	}

	pub fn redo(&mut self) -> Option<&HistoryState> {
		if !self.can_redo() {
			return None;
		}
		self.index += 1;
		self.entries.get(self.index)
	}

	pub fn can_undo(&self) -> bool {
		self.index > 0
	}

	pub fn can_redo(&self) -> bool {
		self.index + 1 < self.entries.len()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn index(&self) -> usize {
		self.index
	}

	#[cfg(test)]
	fn current(&self) -> &HistoryState {
		&self.entries[self.index]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sequence_canvas::types::Connection;

	fn snapshot(n: usize) -> HistoryState {
		HistoryState {
			nodes: Vec::new(),
			connections: (0..n).map(|i| Connection::new(&i.to_string(), "x", false)).collect(),
		}
	}

	#[test]
	fn undo_at_start_is_noop() {
		let mut history = History::new(snapshot(0), 50);
		assert!(history.undo().is_none());
		assert_eq!(history.index(), 0);
		assert!(!history.can_redo());
	}

	#[test]
	fn undo_and_redo_walk_the_log() {
		let mut history = History::new(snapshot(0), 50);
		history.commit(snapshot(1));
		history.commit(snapshot(2));

		assert_eq!(history.undo().map(|s| s.connections.len()), Some(1));
		assert_eq!(history.undo().map(|s| s.connections.len()), Some(0));
		assert_eq!(history.redo().map(|s| s.connections.len()), Some(1));
		assert_eq!(history.redo().map(|s| s.connections.len()), Some(2));
		assert!(history.redo().is_none());
	}

	#[test]
	fn commit_discards_redo_tail() {
		let mut history = History::new(snapshot(0), 50);
		for n in 1..=4 {
			history.commit(snapshot(n));
		}
		history.undo();
		history.undo();
		history.commit(snapshot(9));

		assert!(!history.can_redo());
		assert_eq!(history.len(), 4);
		assert_eq!(history.current().connections.len(), 9);
	}

	#[test]
	fn capacity_drops_oldest_entries() {
		let mut history = History::new(snapshot(0), 50);
		for n in 1..=60 {
			history.commit(snapshot(n));
		}
		assert_eq!(history.len(), 50);
		assert_eq!(history.index(), 49);

		for _ in 0..50 {
			history.undo();
		}
		assert_eq!(history.index(), 0);
		assert_eq!(history.current().connections.len(), 11);
	}
}
