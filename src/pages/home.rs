use leptos::prelude::*;

use crate::components::dependency_graph::DependencyGraphCanvas;

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

			<div class="fullscreen-graph">
				<DependencyGraphCanvas fullscreen=true />
				<div class="graph-overlay">
					<h1>"Healthcare Ecosystem Dependency Map"</h1>
					<p class="subtitle">
						"Click a component for details. Double-click to isolate its neighborhood. Drag nodes to reposition, scroll to zoom, drag the background to pan."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
