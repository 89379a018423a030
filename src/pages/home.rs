use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, DEFAULT_API_BASE};
use crate::components::agent_graph::{
	Graph, GraphCanvas, InspectorPanel, Layout, Minimap, Node, Scene, Viewport, content_bounds,
	text::final_answer_text, window_size,
};
use crate::markdown::render_markdown;

const FINAL_PREF_KEY: &str = "ags:finalDrawer";

fn load_final_collapsed() -> bool {
	web_sys::window()
		.and_then(|w| w.local_storage().ok().flatten())
		.and_then(|s| s.get_item(FINAL_PREF_KEY).ok().flatten())
		.map(|v| v == "collapsed")
		.unwrap_or(false)
}

fn save_final_collapsed(collapsed: bool) {
	if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
		let _ = storage.set_item(FINAL_PREF_KEY, if collapsed { "collapsed" } else { "normal" });
	}
}

/// Canvas-local center point for the toolbar zoom buttons. `zoom_at` takes
/// its anchor in canvas pixels, and the canvas is inset by the toolbar and
/// the side panel, so the window center would land below and right of it.
fn canvas_center() -> (f64, f64) {
	let rect = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.query_selector(".graph-canvas").ok().flatten())
		.map(|el| el.get_bounding_client_rect());
	match rect {
		Some(r) => (r.width() / 2.0, r.height() / 2.0),
		None => {
			let (w, h) = window_size();
			(w / 2.0, h / 2.0)
		}
	}
}

fn local_time() -> String {
	js_sys::Date::new_0()
		.to_locale_time_string("en-US")
		.as_string()
		.unwrap_or_default()
}

/// The run page: toolbar, graph canvas with minimap and inspector, side
/// panel (nodes + run history), and the final-answer drawer.
#[component]
pub fn Home() -> impl IntoView {
	let (graph, set_graph) = signal(None::<Graph>);
	let (query, set_query) = signal(String::new());
	let (api_base, set_api_base) = signal(DEFAULT_API_BASE.to_string());
	let (mode, set_mode) = signal("standard".to_string());
	let (status, set_status) = signal("Ready.".to_string());
	let (history, set_history) = signal(Vec::<(String, String)>::new());
	let (final_collapsed, set_final_collapsed) = signal(load_final_collapsed());
	let viewport = RwSignal::new(Viewport::default());
	let selected = RwSignal::new(None::<Node>);

	let scene = Memo::new(move |_| {
		graph
			.get()
			.map(|g| Scene::build(&g, &query.get_untracked()))
	});

	let run = move || {
		let base = api_base.get_untracked();
		let q = query.get_untracked();
		let m = mode.get_untracked();
		set_status.set("Running…".to_string());
		log::info!("agent run started (mode={m})");
		spawn_local(async move {
			match api::run_agent(&base, &q, &m).await {
				Ok(g) => {
					if g.nodes.is_empty() {
						set_status.set("No leaves returned.".to_string());
						return;
					}
					let label = if q.trim().is_empty() {
						"Untitled run".to_string()
					} else {
						q.trim().to_string()
					};
					set_history.update(|h| h.insert(0, (label, local_time())));
					let built = Scene::build(&g, &q);
					viewport.update(|v| {
						v.fit_to_content(content_bounds(&built.layout), window_size())
					});
					set_status.set(
						if built.graph.final_answer.is_some() {
							"Done."
						} else {
							"Ready."
						}
						.to_string(),
					);
					set_graph.set(Some(g));
				}
				Err(e) => {
					log::error!("agent run failed: {e}");
					set_status.set(format!("Error: {e}"));
				}
			}
		});
	};

	let fit = move |_| {
		let bounds = scene
			.get_untracked()
			.map(|s| content_bounds(&s.layout))
			.unwrap_or_else(|| content_bounds(&Layout::default()));
		viewport.update(|v| v.fit_to_content(bounds, window_size()));
	};
	let zoom_in = move |_| {
		let (x, y) = canvas_center();
		viewport.update(|v| v.zoom_at(1.15, x, y));
	};
	let zoom_out = move |_| {
		let (x, y) = canvas_center();
		viewport.update(|v| v.zoom_at(1.0 / 1.15, x, y));
	};

	let final_text = move || {
		scene
			.get()
			.and_then(|s| s.graph.final_answer.clone())
			.map(|v| final_answer_text(&v))
	};

	view! {
		<div class="app">
			<header class="toolbar">
				<input
					class="api-base"
					prop:value=api_base
					on:input=move |ev| set_api_base.set(event_target_value(&ev))
					placeholder=DEFAULT_API_BASE
				/>
				<input
					class="query"
					prop:value=query
					on:input=move |ev| set_query.set(event_target_value(&ev))
					on:keydown=move |ev| {
						if ev.key() == "Enter" && ev.shift_key() {
							ev.prevent_default();
							run();
						}
					}
					placeholder="What should the agent research?"
				/>
				<select on:change=move |ev| set_mode.set(event_target_value(&ev))>
					<option value="standard">"Standard"</option>
					<option value="research">"Research"</option>
				</select>
				<button class="primary" on:click=move |_| run()>"Run"</button>
				<button on:click=zoom_out>"−"</button>
				<button on:click=zoom_in>"+"</button>
				<button on:click=fit>"Fit"</button>
				<span class="status">{status}</span>
			</header>

			<main class="stage">
				<GraphCanvas scene=scene viewport=viewport selected=selected />
				<Minimap scene=scene viewport=viewport />
				<InspectorPanel selected=selected />

				<aside class="side-panel">
					<h3>"Nodes"</h3>
					<div class="node-list">
						{move || {
							scene
								.get()
								.filter(|s| !s.empty)
								.map(|s| {
									let mut ids: Vec<&String> = s.graph.nodes.keys().collect();
									ids.sort_unstable();
									ids.into_iter()
										.map(|id| {
											let n = s.graph.nodes[id].clone();
											let label = if n.name.is_empty() {
												n.id.clone()
											} else {
												n.name.clone()
											};
											let meta = n.status.clone();
											view! {
												<div
													class="list-item"
													on:click=move |_| selected.set(Some(n.clone()))
												>
													<span>{label}</span>
													<span class="meta">{meta}</span>
												</div>
											}
										})
										.collect_view()
								})
						}}
					</div>
					<h3>"History"</h3>
					<div class="run-history">
						{move || {
							history
								.get()
								.into_iter()
								.map(|(label, time)| {
									view! {
										<div class="list-item">
											<span>{label}</span>
											<span class="meta">{time}</span>
										</div>
									}
								})
								.collect_view()
						}}
					</div>
				</aside>
			</main>

			<section class="final-drawer" class:collapsed=final_collapsed>
				<header class="drawer-header">
					<h2>"Final Answer"</h2>
					<button on:click=move |_| {
						let next = !final_collapsed.get_untracked();
						set_final_collapsed.set(next);
						save_final_collapsed(next);
					}>
						{move || if final_collapsed.get() { "Show" } else { "Hide" }}
					</button>
				</header>
				<div class="final-content">
					{move || match final_text() {
						Some(text) => {
							view! { <div class="md" inner_html=render_markdown(&text)></div> }
								.into_any()
						}
						None => view! { <div class="placeholder">"No answer yet."</div> }.into_any(),
					}}
				</div>
			</section>
		</div>
	}
}
