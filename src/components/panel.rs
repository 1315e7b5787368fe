//! Side panel: search, facets, path finding, metrics and the detail views.

use std::sync::Arc;
use std::time::Duration;

use leptos::prelude::*;
use web_sys::KeyboardEvent;

use crate::graph::metrics::MetricMode;
use crate::graph::types::{EdgeType, NodeLabel};
use crate::graph::{Explorer, ExplorerView, PathStatus, SessionState};

/// Leaderboard length.
const TOP_N: usize = 10;

fn name_of(explorer: &Explorer, id: &str) -> String {
	explorer
		.data()
		.node(id)
		.map(|n| n.display_name().to_string())
		.unwrap_or_else(|| id.to_string())
}

#[component]
pub fn ControlPanel(
	explorer: Arc<Explorer>,
	session: RwSignal<SessionState>,
	#[prop(into)] view: Signal<ExplorerView>,
	debounce_ms: u64,
) -> impl IntoView {
	let input = RwSignal::new(session.with_untracked(|s| s.search_term().to_string()));

	view! {
		<aside class="panel">
			<SearchBox explorer=explorer.clone() session=session view=view input=input debounce_ms=debounce_ms />
			<Facets explorer=explorer.clone() session=session />
			<PathControls explorer=explorer.clone() session=session view=view />
			<Metrics explorer=explorer.clone() session=session />
			<Selection explorer=explorer session=session view=view />
			<div class="panel-actions">
				<button on:click=move |_| {
					input.set(String::new());
					session.update(|s| s.clear_filters());
				}>"Clear filters"</button>
				<button on:click=move |_| {
					input.set(String::new());
					session.update(|s| s.reset());
				}>"Reset"</button>
			</div>
		</aside>
	}
}

#[component]
fn SearchBox(
	explorer: Arc<Explorer>,
	session: RwSignal<SessionState>,
	view: Signal<ExplorerView>,
	input: RwSignal<String>,
	debounce_ms: u64,
) -> impl IntoView {
	let pending = StoredValue::new(None::<TimeoutHandle>);
	let cancel = move || {
		if let Some(handle) = pending.get_value() {
			handle.clear();
		}
		pending.set_value(None);
	};

	let on_input = move |ev| {
		let term = event_target_value(&ev);
		input.set(term.clone());
		cancel();
		let handle = set_timeout_with_handle(
			move || session.update(|s| s.set_search_term(term)),
			Duration::from_millis(debounce_ms),
		);
		pending.set_value(handle.ok());
	};

	// Enter applies the term at once and jumps to the best hit.
	let enter_explorer = explorer.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() != "Enter" {
			return;
		}
		cancel();
		let term = input.get_untracked();
		let first = enter_explorer.search(&term).first().map(|n| n.id.clone());
		session.update(|s| {
			s.set_search_term(term);
			if first.is_some() {
				s.select_node(first);
			}
		});
	};

	view! {
		<section class="search">
			<input
				type="search"
				placeholder="Search characters, mechanics, abilities"
				prop:value=move || input.get()
				on:input=on_input
				on:keydown=on_keydown
			/>
			<ul class="search-results">
				{move || {
					view.with(|v| v.search_results.clone())
						.into_iter()
						.map(|id| {
							let name = name_of(&explorer, &id);
							view! {
								<li>
									<button on:click=move |_| {
										session.update(|s| s.select_node(Some(id.clone())))
									}>{name}</button>
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</section>
	}
}

#[component]
fn Facets(explorer: Arc<Explorer>, session: RwSignal<SessionState>) -> impl IntoView {
	let labels = NodeLabel::ALL
		.into_iter()
		.map(|label| {
			view! {
				<button
					class="chip"
					class:active=move || session.with(|s| s.active_labels().contains(&label))
					on:click=move |_| session.update(|s| s.toggle_label(label))
				>
					{label.as_str()}
				</button>
			}
		})
		.collect_view();

	let archetypes = explorer
		.options()
		.archetypes
		.iter()
		.map(|archetype| {
			let (key, toggle) = (archetype.clone(), archetype.clone());
			view! {
				<button
					class="chip"
					class:active=move || session.with(|s| s.active_archetypes().contains(&key))
					on:click=move |_| session.update(|s| s.toggle_archetype(toggle.clone()))
				>
					{archetype.clone()}
				</button>
			}
		})
		.collect_view();

	let relationships = EdgeType::MATCHUPS
		.into_iter()
		.map(|kind| {
			let (key, toggle) = (kind.clone(), kind.clone());
			view! {
				<button
					class="chip"
					class:active=move || session.with(|s| s.relationship_filters().contains(&key))
					on:click=move |_| session.update(|s| s.toggle_relationship(toggle.clone()))
				>
					{kind.to_string()}
				</button>
			}
		})
		.collect_view();

	let mechanics = explorer
		.options()
		.mechanics
		.iter()
		.map(|name| {
			let key = name.clone();
			view! {
				<option
					value=name.clone()
					selected=move || session.with(|s| s.mechanic_filter() == Some(key.as_str()))
				>
					{name.clone()}
				</option>
			}
		})
		.collect_view();

	view! {
		<section class="facets">
			<h2>"Labels"</h2>
			<div class="chips">{labels}</div>
			<h2>"Archetypes"</h2>
			<div class="chips">{archetypes}</div>
			<h2>"Matchups"</h2>
			<div class="chips">{relationships}</div>
			<h2>"Mechanic"</h2>
			<select on:change=move |ev| {
				let value = event_target_value(&ev);
				session.update(|s| s.set_mechanic_filter(Some(value)));
			}>
				<option value="" selected=move || session.with(|s| s.mechanic_filter().is_none())>
					"All mechanics"
				</option>
				{mechanics}
			</select>
			<label class="neighbor-toggle">
				<input
					type="checkbox"
					prop:checked=move || session.with(|s| s.neighbor_mode())
					disabled=move || session.with(|s| s.selected_node().is_none())
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						session.update(|s| s.set_neighbor_mode(on));
					}
				/>
				"Neighbors only"
			</label>
			<Show when=move || session.with(|s| s.selected_node().is_none())>
				<p class="muted">"Select a node to enable neighbor highlights."</p>
			</Show>
		</section>
	}
}

#[component]
fn PathControls(
	explorer: Arc<Explorer>,
	session: RwSignal<SessionState>,
	view: Signal<ExplorerView>,
) -> impl IntoView {
	let mut choices: Vec<(String, String)> = explorer
		.data()
		.nodes
		.iter()
		.map(|n| (n.id.clone(), n.display_name().to_string()))
		.collect();
	choices.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
	let choices = Arc::new(choices);

	let endpoint = move |start: bool| {
		let choices = choices.clone();
		let current = move || {
			session.with(|s| {
				let id = if start { s.path_start() } else { s.path_end() };
				id.map(str::to_string)
			})
		};
		view! {
			<select on:change=move |ev| {
				let value = event_target_value(&ev);
				let id = (!value.is_empty()).then_some(value);
				session.update(|s| {
					if start {
						s.set_path_start(id)
					} else {
						s.set_path_end(id)
					}
				});
			}>
				<option value="" selected=move || current().is_none()>
					{if start { "Start node" } else { "End node" }}
				</option>
				{choices
					.iter()
					.map(|(id, name)| {
						let key = id.clone();
						view! {
							<option value=id.clone() selected=move || current().as_ref() == Some(&key)>
								{name.clone()}
							</option>
						}
					})
					.collect_view()}
			</select>
		}
	};
	let (start_select, end_select) = (endpoint(true), endpoint(false));

	let summary = move || match view.with(|v| v.path_status) {
		PathStatus::Unset => {
			view! { <p class="muted">"Choose a start and end node to compute a path."</p> }
				.into_any()
		}
		PathStatus::NoPath => {
			view! { <p class="error">"No connection found between the chosen nodes."</p> }
				.into_any()
		}
		PathStatus::Found(len) => {
			let hops = len.saturating_sub(1);
			let steps = view
				.with(|v| v.path_nodes.clone())
				.into_iter()
				.map(|id| view! { <li>{name_of(&explorer, &id)}</li> })
				.collect_view();
			view! {
				<div class="path-summary">
					<p>{format!("{} edge{}", hops, if hops == 1 { "" } else { "s" })}</p>
					<ol class="path-list">{steps}</ol>
				</div>
			}
			.into_any()
		}
	};

	view! {
		<section class="path-controls">
			<h2>"Shortest path"</h2>
			{start_select}
			{end_select}
			<button on:click=move |_| session.update(|s| s.clear_path())>"Clear path"</button>
			{summary}
		</section>
	}
}

#[component]
fn Metrics(explorer: Arc<Explorer>, session: RwSignal<SessionState>) -> impl IntoView {
	let buttons = MetricMode::ALL
		.into_iter()
		.map(|mode| {
			view! {
				<button
					class="chip"
					data-testid=format!("metric-{}", mode.as_str())
					class:active=move || session.with(|s| s.metric_mode() == mode)
					on:click=move |_| session.update(|s| s.set_metric_mode(mode))
				>
					{mode.title()}
				</button>
			}
		})
		.collect_view();

	let leaderboard = move || {
		let mode = session.with(|s| s.metric_mode());
		let rankings = explorer.rankings();
		match mode {
			MetricMode::Default => ().into_any(),
			MetricMode::MechanicUsage => {
				let rows = rankings
					.mechanic_usage
					.iter()
					.take(TOP_N)
					.map(|m| {
						view! {
							<li>
								{m.name.clone()}
								<span class="value">
									{format!("{} users, {} counters", m.usage, m.counter)}
								</span>
							</li>
						}
					})
					.collect_view();
				view! { <ol class="leaderboard">{rows}</ol> }.into_any()
			}
			_ => {
				let rows = rankings
					.entries(mode)
					.iter()
					.take(TOP_N)
					.map(|entry| {
						let id = entry.id.clone();
						view! {
							<li>
								<button on:click=move |_| {
									session.update(|s| s.select_node(Some(id.clone())))
								}>{name_of(&explorer, &entry.id)}</button>
								<span class="value">{entry.value}</span>
							</li>
						}
					})
					.collect_view();
				view! { <ol class="leaderboard">{rows}</ol> }.into_any()
			}
		}
	};

	view! {
		<section class="metrics">
			<h2>"Analytics"</h2>
			<div class="chips">{buttons}</div>
			{leaderboard}
		</section>
	}
}

#[component]
fn Selection(
	explorer: Arc<Explorer>,
	session: RwSignal<SessionState>,
	view: Signal<ExplorerView>,
) -> impl IntoView {
	let node_explorer = explorer.clone();
	let node_card = move || {
		let id = view.with(|v| v.selected_node.clone())?;
		let node = node_explorer.data().node(&id)?.clone();
		let summary = view.with(|v| v.relationships.clone()).unwrap_or_default();
		let column = |title: &'static str, ids: Vec<String>| {
			let items = if ids.is_empty() {
				view! { <li class="muted">"None"</li> }.into_any()
			} else {
				ids.into_iter()
					.map(|id| {
						let name = name_of(&node_explorer, &id);
						view! {
							<li>
								<button on:click=move |_| {
									session.update(|s| s.select_node(Some(id.clone())))
								}>{name}</button>
							</li>
						}
					})
					.collect_view()
					.into_any()
			};
			view! {
				<div class="relationship-column">
					<h3>{title}</h3>
					<ul>{items}</ul>
				</div>
			}
		};
		Some(view! {
			<div class="node-detail">
				<h2>{node.display_name().to_string()}</h2>
				<p class="muted">{node.label.as_str()}</p>
				{node.text("description").map(|d| view! { <p>{d.to_string()}</p> })}
				<div class="relationships">
					{column("Strong against", summary.strong)}
					{column("Weak against", summary.weak)}
					{column("Even against", summary.even)}
				</div>
				<button on:click=move |_| session.update(|s| s.clear_selection())>
					"Clear selection"
				</button>
			</div>
		})
	};

	let edge_card = move || {
		let detail = view.with(|v| v.edge_detail.clone())?;
		Some(view! {
			<div class="edge-detail">
				<h2>
					{format!(
						"{} {} {}",
						name_of(&explorer, &detail.source),
						detail.kind,
						name_of(&explorer, &detail.target),
					)}
				</h2>
				{detail.reason.map(|r| view! { <p>{r}</p> })}
				{detail.evidence.map(|e| view! { <p class="muted">{format!("Evidence: {e}")}</p> })}
				<button on:click=move |_| session.update(|s| s.clear_selection())>"Close"</button>
			</div>
		})
	};

	view! {
		<section class="selection">
			{node_card}
			{edge_card}
		</section>
	}
}
