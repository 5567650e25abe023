use leptos::prelude::*;

use crate::components::relationship_graph::{FriendRecord, RelationshipGraph};

/// Sample friend list standing in for the host application's records.
fn sample_friends() -> Vec<FriendRecord> {
	vec![
		FriendRecord::new(1, "Alice", "👩"),
		FriendRecord::new(2, "Ben", "👨"),
		FriendRecord::new(3, "Chen", "🧑"),
		FriendRecord::new(4, "Dana", "👩\u{200d}🦰"),
		FriendRecord::new(5, "Egon", "👴"),
	]
}

/// Demo page: opens the relationship graph over a sample friend list and
/// wires the Escape-to-dismiss contract.
#[component]
pub fn Home() -> impl IntoView {
	let friends = Signal::derive(sample_friends);
	let (show_graph, set_show_graph) = signal(true);
	let on_dismiss = Callback::new(move |()| set_show_graph.set(false));

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
			<div class="graph-page">
				<div class="graph-modal" style:display=move || {
					if show_graph.get() { "flex" } else { "none" }
				}>
					<RelationshipGraph friends=friends on_dismiss=Some(on_dismiss) />
				</div>
				<Show when=move || !show_graph.get()>
					<button class="reopen-btn" on:click=move |_| set_show_graph.set(true)>
						"Open relationship graph"
					</button>
				</Show>
			</div>
		</ErrorBoundary>
	}
}
