//! Keyboard shortcut mapping.
//!
//! `ctrl` and `meta` are treated alike so ⌘Z and Ctrl+Z both undo.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
	Undo,
	Redo,
	DeleteSelection,
	/// Drop the selection and abandon any connection being drawn.
	Escape,
}

pub fn resolve(key: &str, ctrl: bool, shift: bool, meta: bool) -> Option<ShortcutAction> {
	let cmd = ctrl || meta;
	match key {
		"z" | "Z" if cmd && shift => Some(ShortcutAction::Redo),
		"z" | "Z" if cmd => Some(ShortcutAction::Undo),
		"y" | "Y" if cmd => Some(ShortcutAction::Redo),
		"Delete" | "Backspace" if !cmd => Some(ShortcutAction::DeleteSelection),
		"Escape" => Some(ShortcutAction::Escape),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolve_undo_redo() {
		assert_eq!(resolve("z", true, false, false), Some(ShortcutAction::Undo));
		assert_eq!(resolve("z", false, false, true), Some(ShortcutAction::Undo));
		assert_eq!(resolve("Z", true, true, false), Some(ShortcutAction::Redo));
		assert_eq!(resolve("y", true, false, false), Some(ShortcutAction::Redo));
		assert_eq!(resolve("z", false, false, false), None);
	}

	#[test]
	fn resolve_delete_and_escape() {
		assert_eq!(resolve("Delete", false, false, false), Some(ShortcutAction::DeleteSelection));
		assert_eq!(
			resolve("Backspace", false, false, false),
			Some(ShortcutAction::DeleteSelection)
		);
		assert_eq!(resolve("Backspace", true, false, false), None);
		assert_eq!(resolve("Escape", false, false, false), Some(ShortcutAction::Escape));
	}
}
