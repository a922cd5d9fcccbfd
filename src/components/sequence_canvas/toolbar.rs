use leptos::prelude::*;

use super::state::CanvasFlags;

/// Mode toggle, undo/redo and submit. Holds no state of its own.
#[component]
pub fn Toolbar(
	#[prop(into)] flags: Signal<CanvasFlags>,
	on_toggle_test_mode: impl Fn() + 'static,
	on_undo: impl Fn() + 'static,
	on_redo: impl Fn() + 'static,
	on_submit: impl Fn() + 'static,
) -> impl IntoView {
	view! {
		<div class="toolbar">
			<div class="toolbar-group">
				<button
					class=move || {
						if flags.get().test_mode { "btn btn-primary" } else { "btn btn-secondary" }
					}
					disabled=move || flags.get().submitted
					on:click=move |_| on_toggle_test_mode()
				>
					{move || if flags.get().test_mode { "Test mode" } else { "Student mode" }}
				</button>
				<Show when=move || flags.get().test_mode>
					<span class="toolbar-hint">"Double-click a node to edit its title"</span>
				</Show>
			</div>

			<div class="toolbar-divider" />

			<div class="toolbar-group">
				<button
					class="btn btn-secondary"
					title="Undo (Ctrl+Z)"
					disabled=move || !flags.get().can_undo
					on:click=move |_| on_undo()
				>
					"Undo"
				</button>
				<button
					class="btn btn-secondary"
					title="Redo (Ctrl+Shift+Z)"
					disabled=move || !flags.get().can_redo
					on:click=move |_| on_redo()
				>
					"Redo"
				</button>
			</div>

			<div class="toolbar-spacer" />

			<button
				class="btn btn-primary"
				disabled=move || flags.get().submitted
				on:click=move |_| on_submit()
			>
				{move || if flags.get().submitted { "Submitted" } else { "Submit" }}
			</button>
		</div>
	}
}
