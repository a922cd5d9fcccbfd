use std::cell::Cell;
use std::time::Duration;

use leptos::prelude::*;

use super::notify::{Notice, Notifier};
use super::types::Severity;

const DEFAULT_TOAST_MS: u32 = 3000;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub id: u64,
	pub message: String,
	pub severity: Severity,
}

/// Notifier backed by a toast list signal. Each toast removes itself once
/// its duration has elapsed.
pub struct ToastNotifier {
	toasts: RwSignal<Vec<Toast>>,
	next_id: Cell<u64>,
}

impl ToastNotifier {
	pub fn new(toasts: RwSignal<Vec<Toast>>) -> Self {
		Self {
			toasts,
			next_id: Cell::new(0),
		}
	}
}

impl Notifier for ToastNotifier {
	fn notify(&self, notice: Notice) {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		log::debug!("toast {id} [{}]: {}", notice.severity, notice.message);

		let toasts = self.toasts;
		toasts.update(|list| {
			list.push(Toast {
				id,
				message: notice.message,
				severity: notice.severity,
			})
		});
		let ms = notice.duration_ms.unwrap_or(DEFAULT_TOAST_MS);
		set_timeout(
			move || {
				let _ = toasts.try_update(|list| list.retain(|t| t.id != id));
			},
			Duration::from_millis(ms.into()),
		);
	}
}

#[component]
pub fn Toasts(toasts: RwSignal<Vec<Toast>>) -> impl IntoView {
	view! {
		<div class="toasts" role="status" aria-live="polite">
			<For
				each=move || toasts.get()
				key=|toast| toast.id
				children=move |toast: Toast| {
					let id = toast.id;
					view! {
						<div
							class=format!("toast toast-{}", toast.severity)
							on:click=move |_| toasts.update(|list| list.retain(|t| t.id != id))
						>
							{toast.message}
						</div>
					}
				}
			/>
		</div>
	}
}
