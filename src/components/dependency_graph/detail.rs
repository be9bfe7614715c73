//! The click-to-inspect detail overlay.

use leptos::prelude::*;

use super::types::EntityDetail;

/// Modal overlay for the currently selected entity. Closes on the close
/// control or a click on the dimmed backdrop; clicks inside the content
/// box stay put.
#[component]
pub fn DetailOverlay(detail: RwSignal<Option<EntityDetail>>) -> impl IntoView {
	view! {
		<Show when=move || detail.get().is_some()>
			<div
				class="component-modal"
				style="position: fixed; top: 0; left: 0; width: 100%; height: 100%; background: rgba(0,0,0,0.5); z-index: 1000; display: flex; justify-content: center; align-items: center;"
				on:click=move |_| detail.set(None)
			>
				<div
					class="modal-content"
					style="background: white; color: #222; padding: 25px; border-radius: 10px; max-width: 500px; position: relative;"
					on:click=move |ev| ev.stop_propagation()
				>
					<span
						class="close-modal"
						style="position: absolute; top: 15px; right: 20px; font-size: 24px; cursor: pointer;"
						on:click=move |_| detail.set(None)
					>
						"\u{d7}"
					</span>
					{move || {
						detail
							.get()
							.map(|d| {
								view! {
									<h2>{d.name.clone()}</h2>
									<p>{d.description.clone()}</p>
									{d
										.risk_strategy
										.clone()
										.map(|strategy| {
											view! {
												<h4>"Risk Strategy:"</h4>
												<p>{strategy}</p>
											}
										})}
									<h4>"Dependencies:"</h4>
									<ul style="list-style: none; padding: 0;">
										{d
											.dependencies
											.iter()
											.map(|name| {
												view! {
													<li style="margin: 5px 0; padding: 5px; background: #f5f5f5; border-radius: 4px;">
														{name.clone()}
													</li>
												}
											})
											.collect_view()}
									</ul>
								}
							})
					}}
				</div>
			</div>
		</Show>
	}
}
