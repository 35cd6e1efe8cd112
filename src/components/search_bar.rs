use leptos::prelude::*;

/// Search input with the filter buttons.
#[component]
pub fn SearchBar(
	#[prop(into)] query: Signal<String>,
	#[prop(into)] on_input: Callback<String>,
	#[prop(into)] on_reset: Callback<()>,
	#[prop(into)] on_successors: Callback<()>,
	#[prop(into)] on_predecessors: Callback<()>,
	#[prop(into)] on_relatives: Callback<()>,
) -> impl IntoView {
	view! {
		<div class="search-bar">
			<input
				type="text"
				placeholder="Search Web"
				aria-label="Search Web"
				prop:value=move || query.get()
				on:input=move |ev| on_input.run(event_target_value(&ev))
			/>
			<button type="button" on:click=move |_| on_reset.run(())>
				"Reset"
			</button>
			<button type="button" on:click=move |_| on_successors.run(())>
				"Show Successors"
			</button>
			<button type="button" on:click=move |_| on_predecessors.run(())>
				"Show Predecessors"
			</button>
			<button type="button" on:click=move |_| on_relatives.run(())>
				"Show Relatives"
			</button>
		</div>
	}
}
