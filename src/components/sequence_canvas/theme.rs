//! Visual tokens: theme colors keyed by token name, and icon glyphs keyed by
//! symbolic icon name.

pub const CANVAS_BG: &str = "#1a1a2e";
pub const GRID_DOT: &str = "rgba(255, 255, 255, 0.06)";
pub const NODE_TEXT: &str = "#1a1a2e";
pub const NODE_BORDER: &str = "rgba(255, 255, 255, 0.2)";
pub const SOCKET_INPUT: &str = "#64b4ff";
pub const SOCKET_OUTPUT: &str = "#ffb74d";
pub const TITLE: &str = "#ffffff";
pub const PANEL_TEXT: &str = "rgba(255, 255, 255, 0.85)";

/// CSS color for a token key. Unknown keys fall back to white.
pub fn color(token: &str) -> &'static str {
	match token {
		"node-pink" => "#f48fb1",
		"node-orange" => "#ffb74d",
		"node-gray" => "#b0bec5",
		"node-blue" => "#64b5f6",
		"connection-pending" => "#ffffff",
		"connection-valid" => "hsl(142, 76%, 36%)",
		"connection-invalid" => "hsl(0, 84%, 60%)",
		"connection-missing" | "status-unconnected" => "hsl(48, 96%, 53%)",
		_ => "#ffffff",
	}
}

/// Resolves a symbolic icon name to something drawable.
pub trait IconResolver {
	fn resolve(&self, name: &str) -> Option<&'static str>;

	/// Never fails: unknown names get a generic glyph.
	fn glyph(&self, name: &str) -> &'static str {
		self.resolve(name).unwrap_or(FALLBACK_GLYPH)
	}
}

pub const FALLBACK_GLYPH: &str = "◆";

/// Emoji glyphs for the icon names the built-in quizzes use.
pub struct EmojiIcons;

impl IconResolver for EmojiIcons {
	fn resolve(&self, name: &str) -> Option<&'static str> {
		Some(match name {
			"map" => "🗺",
			"image" => "🖼",
			"sparkles" => "✨",
			"layers" => "📚",
			_ => return None,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_icon_uses_fallback() {
		assert_eq!(EmojiIcons.glyph("sparkles"), "✨");
		assert_eq!(EmojiIcons.glyph("no-such-icon"), FALLBACK_GLYPH);
	}

	#[test]
	fn missing_shares_warning_color() {
		assert_eq!(color("connection-missing"), color("status-unconnected"));
		assert_eq!(color("bogus"), "#ffffff");
	}
}
