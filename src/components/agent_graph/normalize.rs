//! Root normalization: every real node ends up with a dependency path to a
//! synthetic root, so the layered layout always has a single source column.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::types::{Graph, Node, NormalizedGraph};

/// Reserved id of the synthesized root node.
pub const ROOT_ID: &str = "__root__";

fn root_node(label: &str) -> Node {
	Node {
		id: ROOT_ID.to_string(),
		name: if label.trim().is_empty() {
			"User Request".to_string()
		} else {
			label.trim().to_string()
		},
		status: "done".to_string(),
		..Node::default()
	}
}

/// Attach the synthetic root and rewrite each node's `depends_on`:
/// duplicates are removed, an existing `parent` back-reference is merged in
/// as one more dependency (multi-parent stays multi-parent), and true
/// orphans (no dependencies, not depended upon by anyone) point at the root.
/// Dangling dependency ids are left in place; layout and rendering skip them.
pub fn with_root(graph: &Graph, label: &str) -> NormalizedGraph {
	if graph.nodes.is_empty() {
		let mut nodes = HashMap::new();
		nodes.insert(ROOT_ID.to_string(), root_node(label));
		return NormalizedGraph {
			nodes,
			final_answer: None,
			root_id: ROOT_ID.to_string(),
		};
	}

	let mut depended_upon: HashSet<&str> = HashSet::new();
	for node in graph.nodes.values() {
		for dep in &node.depends_on {
			depended_upon.insert(dep.as_str());
		}
	}

	let mut nodes: HashMap<String, Node> = HashMap::with_capacity(graph.nodes.len() + 1);
	for (id, node) in &graph.nodes {
		let mut deps: BTreeSet<String> = node.depends_on.iter().cloned().collect();
		if let Some(parent) = &node.parent {
			if graph.nodes.contains_key(parent) {
				deps.insert(parent.clone());
			}
		}
		if deps.is_empty() && !depended_upon.contains(id.as_str()) {
			deps.insert(ROOT_ID.to_string());
		}
		let mut out = node.clone();
		out.depends_on = deps.into_iter().collect();
		nodes.insert(id.clone(), out);
	}
	nodes.insert(ROOT_ID.to_string(), root_node(label));

	NormalizedGraph {
		nodes,
		final_answer: graph.final_answer.clone(),
		root_id: ROOT_ID.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, deps: &[&str], parent: Option<&str>) -> Node {
		Node {
			id: id.to_string(),
			depends_on: deps.iter().map(|d| d.to_string()).collect(),
			parent: parent.map(str::to_string),
			..Node::default()
		}
	}

	fn graph(nodes: &[Node]) -> Graph {
		Graph {
			nodes: nodes.iter().map(|n| (n.id.clone(), n.clone())).collect(),
			final_answer: None,
		}
	}

	#[test]
	fn empty_graph_yields_root_only() {
		let out = with_root(&Graph::default(), "q");
		assert_eq!(out.nodes.len(), 1);
		assert_eq!(out.root_id, ROOT_ID);
		assert!(out.final_answer.is_none());
		assert!(out.nodes[ROOT_ID].depends_on.is_empty());
	}

	#[test]
	fn root_label_defaults_when_blank() {
		let out = with_root(&Graph::default(), "  ");
		assert_eq!(out.nodes[ROOT_ID].name, "User Request");
	}

	#[test]
	fn orphans_attach_to_root() {
		let out = with_root(&graph(&[node("a", &[], None)]), "q");
		assert_eq!(out.nodes["a"].depends_on, vec![ROOT_ID.to_string()]);
	}

	#[test]
	fn parent_reference_merges_into_deps() {
		let out = with_root(
			&graph(&[node("a", &[], None), node("b", &["x"], Some("a"))]),
			"q",
		);
		let mut deps = out.nodes["b"].depends_on.clone();
		deps.sort();
		assert_eq!(deps, vec!["a".to_string(), "x".to_string()]);
	}

	#[test]
	fn missing_parent_is_ignored() {
		let out = with_root(&graph(&[node("a", &[], Some("ghost"))]), "q");
		assert_eq!(out.nodes["a"].depends_on, vec![ROOT_ID.to_string()]);
	}

	#[test]
	fn duplicate_deps_are_removed() {
		let out = with_root(&graph(&[node("a", &[], None), node("b", &["a", "a"], None)]), "q");
		assert_eq!(out.nodes["b"].depends_on, vec!["a".to_string()]);
	}

	#[test]
	fn depended_upon_node_is_not_rerooted() {
		// "a" has no deps but "b" depends on it, so "a" keeps an empty set
		// only if it is someone's dependency target... it is, so no root edge
		// is forced and rank 0 still holds.
		let out = with_root(&graph(&[node("a", &[], None), node("b", &["a"], None)]), "q");
		assert!(out.nodes["a"].depends_on.is_empty());
	}

	#[test]
	fn every_non_root_node_reaches_structure() {
		let out = with_root(
			&graph(&[
				node("a", &[], None),
				node("b", &[], None),
				node("c", &["b"], None),
			]),
			"q",
		);
		for (id, n) in &out.nodes {
			if id != ROOT_ID && !out.nodes.values().any(|m| m.depends_on.contains(id)) {
				assert!(!n.depends_on.is_empty(), "{id} left unconnected");
			}
		}
	}
}
