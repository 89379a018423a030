//! Backend agent-run endpoint: one POST per run, no retry, no cancellation.
//! A second click while a request is in flight simply issues a second
//! independent request.

use std::collections::HashMap;

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::agent_graph::text::{pretty, truncate_label};
use crate::components::agent_graph::{Graph, Node, ToolCall};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// A leaf whose `description` equals this sentinel carries the final answer.
const FINAL_SENTINEL: &str = "Final answer";

#[derive(Debug, Serialize)]
pub struct RunRequest {
	pub query: String,
	pub mode: String,
}

/// One leaf of the backend's reasoning tree. Everything except the map key
/// is optional in practice.
#[derive(Debug, Default, Deserialize)]
pub struct LeafRecord {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub result: Option<Value>,
	#[serde(default)]
	pub summary: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub parent_leaf: Option<String>,
	#[serde(default)]
	pub child_leaves: Option<Vec<String>>,
	#[serde(default)]
	pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunResponse {
	#[serde(default, alias = "leaves")]
	pub reasoning_tree: HashMap<String, LeafRecord>,
	#[serde(default, rename = "final")]
	pub final_answer: Option<Value>,
}

fn value_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => pretty(other),
	}
}

/// Map the wire shape onto the renderer's node model. Pure, so the mapping
/// is testable without a browser.
pub fn graph_from_response(resp: RunResponse) -> Graph {
	let mut nodes = HashMap::with_capacity(resp.reasoning_tree.len());
	for (leaf_id, leaf) in &resp.reasoning_tree {
		let name = leaf
			.title
			.as_deref()
			.or(leaf.description.as_deref())
			.unwrap_or("Untitled");
		let description = leaf
			.result
			.as_ref()
			.map(value_text)
			.or_else(|| leaf.summary.clone())
			.unwrap_or_else(|| "(no result)".to_string());

		nodes.insert(
			leaf_id.clone(),
			Node {
				id: leaf.id.clone().unwrap_or_else(|| leaf_id.clone()),
				name: truncate_label(name),
				description,
				depends_on: leaf.parent_leaf.iter().cloned().collect(),
				status: leaf.status.clone().unwrap_or_else(|| "done".to_string()),
				tool_calls: leaf.tool_calls.clone().unwrap_or_default(),
				parent: leaf.parent_leaf.clone(),
				children: leaf.child_leaves.clone().unwrap_or_default(),
			},
		);
	}

	// Sorted scan keeps sentinel selection deterministic if several match.
	let mut ids: Vec<&String> = resp.reasoning_tree.keys().collect();
	ids.sort_unstable();
	let sentinel = ids.iter().find_map(|id| {
		let leaf = &resp.reasoning_tree[*id];
		if leaf.description.as_deref() == Some(FINAL_SENTINEL) {
			leaf.result.clone()
		} else {
			None
		}
	});

	Graph {
		nodes,
		final_answer: sentinel.or(resp.final_answer),
	}
}

/// POST `{api_base}/api/agent/run` and map the response into a fresh graph.
pub async fn run_agent(api_base: &str, query: &str, mode: &str) -> Result<Graph, String> {
	let base = api_base.trim().trim_end_matches('/');
	let base = if base.is_empty() { DEFAULT_API_BASE } else { base };
	let url = format!("{base}/api/agent/run");

	let body = RunRequest {
		query: query.trim().to_string(),
		mode: mode.to_string(),
	};

	let response = Request::post(&url)
		.json(&body)
		.map_err(|e| format!("Failed to serialize request: {e}"))?
		.send()
		.await
		.map_err(|e| format!("Request failed: {e}"))?;

	if !response.ok() {
		return Err(format!(
			"HTTP error: {} {}",
			response.status(),
			response.status_text()
		));
	}

	let data: RunResponse = response
		.json()
		.await
		.map_err(|e| format!("Failed to parse JSON: {e}"))?;

	Ok(graph_from_response(data))
}
