use leptos::prelude::*;

use super::text::tool_result_text;
use super::types::Node;
use crate::markdown::render_markdown;

/// Full-detail panel for the selected node: status and dependency metadata,
/// markdown description, tool-call results, and the raw record.
#[component]
pub fn InspectorPanel(selected: RwSignal<Option<Node>>) -> impl IntoView {
	view! {
		{move || {
			selected
				.get()
				.map(|node| {
					let title = if node.name.is_empty() {
						"Node details".to_string()
					} else {
						node.name.clone()
					};
					let deps = node
						.depends_on
						.iter()
						.map(|d| view! { <code>{d.clone()}</code> })
						.collect_view();
					let has_deps = !node.depends_on.is_empty();
					let children = (!node.children.is_empty())
						.then(|| format!("children: {}", node.children.len()));
					let desc_html = render_markdown(&node.description);
					let has_desc = !desc_html.is_empty();
					let tools = (!node.tool_calls.is_empty()).then(|| {
						let blocks = node
							.tool_calls
							.iter()
							.map(|t| {
								let head = format!("🧩 {}", t.tool_name);
								let body = render_markdown(&tool_result_text(t.result.as_ref()));
								view! {
									<div class="tool-block">
										<div class="tool-head">{head}</div>
										<div class="tool-body md" inner_html=body></div>
									</div>
								}
							})
							.collect_view();
						view! {
							<section class="section">
								<h3 class="section-title">"Tools"</h3>
								<div class="section-body tools-grid">{blocks}</div>
							</section>
						}
					});
					let raw = serde_json::to_string_pretty(&node)
						.unwrap_or_else(|_| format!("{node:?}"));

					view! {
						<aside class="node-panel">
							<header class="panel-header">
								<h2>{title}</h2>
								<button class="close" on:click=move |_| selected.set(None)>
									"×"
								</button>
							</header>
							<div class="panel-content">
								<div class="meta-row">
									<span class=format!("pill {}", node.status)>{node.status.clone()}</span>
									{has_deps.then(|| view! { <span class="meta">"deps: "{deps}</span> })}
									{children.map(|c| view! { <span class="meta">{c}</span> })}
								</div>
								{has_desc
									.then(|| {
										view! {
											<section class="section">
												<h3 class="section-title">"Description"</h3>
												<div class="section-body md" inner_html=desc_html></div>
											</section>
										}
									})}
								{tools}
								<section class="section">
									<h3 class="section-title">"Raw"</h3>
									<pre class="raw">
										<code>{raw}</code>
									</pre>
								</section>
							</div>
						</aside>
					}
				})
		}}
	}
}
