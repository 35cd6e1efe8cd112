use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::components::search_bar::SearchBar;
use crate::config::AppConfig;
use crate::graph::{Direction, Explorer, GraphStore, LoadReport, SearchOutcome};
use crate::loader::load_graph;

#[derive(Clone, Debug, PartialEq)]
enum LoadStatus {
	Loading,
	Loaded {
		people: usize,
		relations: usize,
		skipped: usize,
	},
	Failed(String),
}

impl LoadStatus {
	fn from_report(report: &LoadReport) -> Self {
		LoadStatus::Loaded {
			people: report.nodes,
			// each relation is stored with its mirror
			relations: report.edges / 2,
			skipped: report.issues.len(),
		}
	}

	fn message(&self) -> String {
		match self {
			LoadStatus::Loading => "Loading family data…".into(),
			LoadStatus::Loaded {
				people,
				relations,
				skipped: 0,
			} => format!("{} people, {} relations", people, relations),
			LoadStatus::Loaded {
				people,
				relations,
				skipped,
			} => format!(
				"{} people, {} relations ({} problems skipped, see console)",
				people, relations, skipped
			),
			LoadStatus::Failed(reason) => format!("Could not load data: {}", reason),
		}
	}
}

fn not_found_notice(query: &str) -> String {
	format!("No one named \"{}\"", query.trim())
}

/// Search bar, status line and the family graph.
#[component]
pub fn Home() -> impl IntoView {
	let config = AppConfig::from_location();
	let store = RwSignal::new(GraphStore::default());
	let explorer = RwSignal::new(Explorer::default());
	let status = RwSignal::new(LoadStatus::Loading);
	let notice = RwSignal::new(None::<String>);
	// Typing only touches `query`; the explorer sees it on the next search.
	let query = RwSignal::new(String::new());

	spawn_local(async move {
		match load_graph(&config).await {
			Ok((graph, report)) => {
				status.set(LoadStatus::from_report(&report));
				store.set(graph);
				store.with_untracked(|s| explorer.update(|e| e.reset(s)));
			}
			Err(e) => {
				error!("failed to load {}: {}", config.data_url, e);
				status.set(LoadStatus::Failed(e.to_string()));
			}
		}
	});

	let search = move |direction: Direction| {
		let text = query.get_untracked();
		let mut outcome = SearchOutcome::NotFound;
		store.with_untracked(|s| {
			explorer.update(|e| {
				e.set_query(text.as_str());
				outcome = e.show(s, direction);
			})
		});
		notice.set(match outcome {
			SearchOutcome::Found { .. } => None,
			SearchOutcome::NotFound => Some(not_found_notice(&text)),
		});
	};
	let reset = move || {
		store.with_untracked(|s| explorer.update(|e| e.reset(s)));
		notice.set(None);
	};

	let graph_data = Memo::new(move |_| {
		explorer.with(|e| GraphData::from_snapshot(e.view().snapshot(), e.state().start()))
	});

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
				<ForceGraphCanvas data=graph_data fullscreen=true />
				<div class="graph-overlay">
					<SearchBar
						query=query
						on_input=move |text: String| query.set(text)
						on_reset=move |_: ()| reset()
						on_successors=move |_: ()| search(Direction::Outgoing)
						on_predecessors=move |_: ()| search(Direction::Incoming)
						on_relatives=move |_: ()| search(Direction::Either)
					/>
					<p class="status">{move || status.with(LoadStatus::message)}</p>
					{move || notice.get().map(|text| view! { <p class="notice">{text}</p> })}
				</div>
			</div>
		</ErrorBoundary>
	}
}
