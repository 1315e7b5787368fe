use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};

use crate::components::force_graph::{CanvasEvent, ForceGraphCanvas, build_scene};
use crate::components::panel::ControlPanel;
use crate::config::ExplorerConfig;
use crate::graph::load::fetch_graph;
use crate::graph::{Explorer, SessionState};

#[derive(Clone)]
enum LoadState {
	Loading,
	Ready(Arc<Explorer>),
	Failed(String),
}

/// Loads the dataset and hosts the explorer once it is ready.
#[component]
pub fn ExplorerPage() -> impl IntoView {
	let config = ExplorerConfig::from_document();
	let load = RwSignal::new(LoadState::Loading);
	let session = RwSignal::new(SessionState::from_config(&config));
	let debounce_ms = config.search_debounce_ms;

	spawn_local(async move {
		let started = js_sys::Date::now();
		match fetch_graph(&config.data_url).await {
			Ok(data) => {
				let explorer = Explorer::new(data, &config);
				debug!("[perf] load: {:.1}ms", js_sys::Date::now() - started);
				load.set(LoadState::Ready(Arc::new(explorer)));
			}
			Err(e) => {
				error!("{}", e);
				load.set(LoadState::Failed(e.to_string()));
			}
		}
	});

	move || match load.get() {
		LoadState::Loading => view! { <p class="status">"Loading graph..."</p> }.into_any(),
		LoadState::Failed(message) => view! {
			<div class="status error">
				<h1>"The graph could not be loaded"</h1>
				<p>{message}</p>
			</div>
		}
		.into_any(),
		LoadState::Ready(explorer) => {
			view! { <Workspace explorer=explorer session=session debounce_ms=debounce_ms /> }
				.into_any()
		}
	}
}

#[component]
fn Workspace(explorer: Arc<Explorer>, session: RwSignal<SessionState>, debounce_ms: u64) -> impl IntoView {
	let view_explorer = explorer.clone();
	let view = Memo::new(move |_| {
		let started = js_sys::Date::now();
		let view = session.with(|state| view_explorer.view(state));
		debug!("[perf] view: {:.1}ms", js_sys::Date::now() - started);
		view
	});

	let scene_explorer = explorer.clone();
	let scene = Memo::new(move |_| view.with(|v| build_scene(v, scene_explorer.data())));

	let on_select = Callback::new(move |event: CanvasEvent| {
		session.update(|state| match event {
			CanvasEvent::Node(id) => state.select_node(Some(id)),
			CanvasEvent::Edge(id) => state.select_edge(Some(id)),
			CanvasEvent::Background => state.clear_selection(),
		})
	});

	view! {
		<div class="explorer">
			<ControlPanel explorer=explorer session=session view=view debounce_ms=debounce_ms />
			<div class="graph-pane">
				<ForceGraphCanvas scene=scene on_select=on_select />
			</div>
		</div>
	}
}
