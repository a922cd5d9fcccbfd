use leptos::prelude::*;

use crate::components::sequence_canvas::{Quiz, SequenceCanvas};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-quiz">
				<SequenceCanvas quiz=Quiz::shading_stages() fullscreen=true />
			</div>
		</ErrorBoundary>
	}
}
