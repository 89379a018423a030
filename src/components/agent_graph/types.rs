use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sub-invocation made while producing a node. `result` is whatever the
/// backend returned: a string, structured JSON, or nothing.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ToolCall {
	pub tool_name: String,
	#[serde(default)]
	pub result: Option<Value>,
}

/// One reasoning step in an agent run.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Node {
	pub id: String,
	pub name: String,
	pub description: String,
	pub depends_on: Vec<String>,
	pub status: String,
	pub tool_calls: Vec<ToolCall>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parent: Option<String>,
	/// Display badge count only, never used for layout.
	pub children: Vec<String>,
}

/// A full run as received from the backend: the raw node set plus the
/// optional final answer (string or `{answer: …}` object).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	pub nodes: HashMap<String, Node>,
	pub final_answer: Option<Value>,
}

/// A graph with the synthetic root attached and every node's `depends_on`
/// rewritten so each real node has a dependency path to `root_id`.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedGraph {
	pub nodes: HashMap<String, Node>,
	pub final_answer: Option<Value>,
	pub root_id: String,
}

/// Top-left pixel position of a node box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// Axis-aligned pixel rectangle (content bounds, minimap frame, …).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}
