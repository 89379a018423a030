use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, WheelEvent};

use super::layout::{Layout, build_layout, edge_path};
use super::minimap;
use super::normalize::with_root;
use super::text::{TEXT_BUDGET, short_text, tool_result_text};
use super::types::{Graph, Node, NormalizedGraph};
use super::viewport::Viewport;

/// Everything the scene and minimap need for one render pass: the
/// root-normalized graph plus the positions derived from it. Rebuilt from
/// scratch for every backend response.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub graph: NormalizedGraph,
	pub layout: Layout,
	/// The raw response had zero nodes; render the empty state instead.
	pub empty: bool,
}

impl Scene {
	pub fn build(graph: &Graph, root_label: &str) -> Self {
		let empty = graph.nodes.is_empty();
		let graph = with_root(graph, root_label);
		let layout = build_layout(&graph.nodes);
		Self {
			graph,
			layout,
			empty,
		}
	}
}

#[derive(Clone, Copy, Debug, Default)]
struct PanState {
	active: bool,
	last_x: f64,
	last_y: f64,
}

pub(crate) fn window_size() -> (f64, f64) {
	let window = web_sys::window().unwrap();
	(
		window.inner_width().unwrap().as_f64().unwrap(),
		window.inner_height().unwrap().as_f64().unwrap(),
	)
}

fn cursor_position(canvas: NodeRef<leptos::html::Div>, ev: &MouseEvent) -> (f64, f64) {
	match canvas.get() {
		Some(el) => {
			let rect = el.get_bounding_client_rect();
			(
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			)
		}
		None => (ev.client_x() as f64, ev.client_y() as f64),
	}
}

/// The node-link scene: absolutely positioned node cards over a dashed SVG
/// connector layer, wrapped in the pan/zoom transform. Dragging the
/// background pans, ctrl+wheel zooms anchored at the cursor.
#[component]
pub fn GraphCanvas(
	#[prop(into)] scene: Signal<Option<Scene>>,
	viewport: RwSignal<Viewport>,
	selected: RwSignal<Option<Node>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Div>::new();
	let pan = RwSignal::new(PanState::default());
	let hovered = RwSignal::new(None::<String>);

	let on_mousedown = move |ev: MouseEvent| {
		let on_node = ev
			.target()
			.and_then(|t| t.dyn_into::<web_sys::Element>().ok())
			.and_then(|el| el.closest(".node").ok().flatten())
			.is_some();
		if on_node {
			return;
		}
		let (x, y) = cursor_position(canvas_ref, &ev);
		pan.set(PanState {
			active: true,
			last_x: x,
			last_y: y,
		});
	};

	let on_mousemove = move |ev: MouseEvent| {
		let p = pan.get_untracked();
		if !p.active {
			return;
		}
		let (x, y) = cursor_position(canvas_ref, &ev);
		viewport.update(|v| v.pan(x - p.last_x, y - p.last_y));
		pan.set(PanState {
			active: true,
			last_x: x,
			last_y: y,
		});
	};

	let on_mouseup = move |_: MouseEvent| pan.set(PanState::default());
	let on_mouseleave = move |_: MouseEvent| {
		pan.set(PanState::default());
		hovered.set(None);
	};

	let on_wheel = move |ev: WheelEvent| {
		if !ev.ctrl_key() {
			return;
		}
		ev.prevent_default();
		let (x, y) = cursor_position(canvas_ref, &ev);
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		viewport.update(|v| v.zoom_at(factor, x, y));
	};

	view! {
		<div
			class="graph-canvas"
			node_ref=canvas_ref
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
		>
			{move || match scene.get() {
				Some(s) if !s.empty => render_scene(s, viewport, selected, hovered),
				_ => view! { <div class="empty-state">"No nodes to display."</div> }.into_any(),
			}}
		</div>
	}
}

fn render_scene(
	scene: Scene,
	viewport: RwSignal<Viewport>,
	selected: RwSignal<Option<Node>>,
	hovered: RwSignal<Option<String>>,
) -> AnyView {
	let width = scene.layout.width;
	let height = scene.layout.height;
	let root_id = scene.graph.root_id.clone();

	let mut ids: Vec<&String> = scene.graph.nodes.keys().collect();
	ids.sort_unstable();

	// Connectors run dependency -> dependent; dangling refs are skipped.
	let edge_views = ids
		.iter()
		.flat_map(|id| {
			let node = &scene.graph.nodes[*id];
			node.depends_on
				.iter()
				.filter_map(|dep| {
					let from = *scene.layout.positions.get(dep)?;
					let to = *scene.layout.positions.get(*id)?;
					Some(((*id).clone(), edge_path(from, to)))
				})
				.collect::<Vec<_>>()
		})
		.map(|(child, d)| {
			view! {
				<path
					d=d
					marker-end="url(#arrow)"
					fill="none"
					stroke="#3d527c"
					stroke-width="1.6"
					stroke-dasharray="5 5"
					opacity="0.9"
					class:active=move || hovered.get().as_deref() == Some(child.as_str())
				/>
			}
		})
		.collect_view();

	let node_views = ids
		.iter()
		.map(|id| {
			let n = scene.graph.nodes[*id].clone();
			let pos = scene.layout.positions.get(*id).copied().unwrap_or_default();
			let is_root = **id == root_id;

			let class = format!("node {}{}", n.status, if is_root { " root" } else { "" });
			let title = if n.name.is_empty() {
				"Untitled".to_string()
			} else {
				n.name.clone()
			};
			let badge = format!("{}·{}", n.children.len(), n.tool_calls.len());
			let desc = if n.description.is_empty() {
				"(no result)".to_string()
			} else {
				short_text(&n.description, TEXT_BUDGET)
			};
			let tools = (!n.tool_calls.is_empty()).then(|| {
				let blocks = n
					.tool_calls
					.iter()
					.map(|t| {
						view! {
							<div class="tool">
								<div class="tool-name">{format!("🧩 {}", t.tool_name)}</div>
								<div class="tool-result">{tool_result_text(t.result.as_ref())}</div>
							</div>
						}
					})
					.collect_view();
				view! { <div class="tools">{blocks}</div> }
			});

			let hover_id = (*id).clone();
			let node_for_click = n.clone();
			view! {
				<div
					class=class
					style:left=format!("{}px", pos.x)
					style:top=format!("{}px", pos.y)
					on:mouseenter=move |_| hovered.set(Some(hover_id.clone()))
					on:mouseleave=move |_| hovered.set(None)
					on:click=move |_| {
						if !is_root {
							selected.set(Some(node_for_click.clone()));
						}
					}
				>
					<div class="row">
						<span class="dot"></span>
						<div class="title" title=title.clone()>{title.clone()}</div>
						<span class="badge" title="children·tools">{badge}</span>
					</div>
					<div class="desc">{desc}</div>
					{tools}
				</div>
			}
		})
		.collect_view();

	view! {
		<div
			class="viewport-layer"
			style:transform=move || viewport.get().css_transform()
			style:width=format!("{width}px")
			style:height=format!("{height}px")
		>
			<svg class="edges" width=width height=height attr:viewBox=format!("0 0 {width} {height}")>
				<defs>
					<marker
						id="arrow"
						orient="auto"
						attr:markerWidth="10"
						attr:markerHeight="10"
						attr:refX="8"
						attr:refY="3"
					>
						<path d="M0,0 L8,3 L0,6 z" fill="#5a79b3"/>
					</marker>
				</defs>
				{edge_views}
			</svg>
			<div class="nodes">{node_views}</div>
		</div>
	}
	.into_any()
}


/// Scaled-down overview with one marker per node and a frame showing the
/// visible world-space region. The frame is a single reactive rect, so a
/// transform change replaces it in place rather than stacking copies.
#[component]
pub fn Minimap(
	#[prop(into)] scene: Signal<Option<Scene>>,
	viewport: RwSignal<Viewport>,
) -> impl IntoView {
	view! {
		<svg class="minimap" attr:viewBox="0 0 100 60">
			<rect x="0" y="0" width="100" height="60" fill="#0b1328"></rect>
			{move || {
				scene
					.get()
					.filter(|s| !s.empty)
					.map(|s| {
						let canvas = (s.layout.width, s.layout.height);
						let mut ids: Vec<&String> = s.layout.positions.keys().collect();
						ids.sort_unstable();
						let markers = ids
							.into_iter()
							.map(|id| {
								let m = minimap::node_marker(s.layout.positions[id], canvas);
								view! {
									<rect
										x=m.x
										y=m.y
										width=m.width
										height=m.height
										rx="1"
										fill="#5b82c8"
										opacity="0.9"
									></rect>
								}
							})
							.collect_view();
						let frame = move || {
							let f = minimap::viewport_frame(&viewport.get(), canvas, window_size());
							view! {
								<rect
									class="viewframe"
									x=f.x
									y=f.y
									width=f.width
									height=f.height
									fill="none"
									stroke="#93c5fd"
									stroke-width="1"
									opacity="0.9"
								></rect>
							}
						};
						view! {
							{markers}
							{frame}
						}
					})
			}}
		</svg>
	}
}
