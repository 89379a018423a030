//! Longest-path layer assignment over the dependency relation.

use std::collections::{HashMap, HashSet};

use super::types::Node;

/// Compute `rank(n) = 1 + max(rank(d))` over the dependencies of `n` that
/// exist in `nodes`, with `rank = 0` for nodes without dependencies.
///
/// Dangling dependency ids contribute no constraint. A dependency that is
/// re-entered while still being resolved (a cycle in malformed input) counts
/// as rank 0 for that occurrence, so resolution always terminates. Uses an
/// explicit stack rather than recursion so deep chains cannot blow the wasm
/// call stack. Start order is lexicographic, which keeps the (memoized)
/// result deterministic even for cyclic input.
pub fn compute_ranks(nodes: &HashMap<String, Node>) -> HashMap<String, usize> {
	let mut ranks: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
	let mut visiting: HashSet<&str> = HashSet::new();

	let mut ids: Vec<&str> = nodes.keys().map(String::as_str).collect();
	ids.sort_unstable();

	for start in ids {
		if ranks.contains_key(start) {
			continue;
		}
		// Frame: (node id, next dependency index, best rank so far).
		let mut stack: Vec<(&str, usize, usize)> = vec![(start, 0, 0)];
		visiting.insert(start);

		while let Some((id, dep_idx, best)) = stack.pop() {
			let deps: &[String] = nodes
				.get(id)
				.map(|n| n.depends_on.as_slice())
				.unwrap_or(&[]);

			if dep_idx == deps.len() {
				ranks.insert(id.to_string(), best);
				visiting.remove(id);
				continue;
			}

			let dep = deps[dep_idx].as_str();
			if let Some(&r) = ranks.get(dep) {
				stack.push((id, dep_idx + 1, best.max(r + 1)));
			} else if !nodes.contains_key(dep) {
				// Dangling reference: as if absent.
				stack.push((id, dep_idx + 1, best));
			} else if visiting.contains(dep) {
				// Cycle guard: the in-progress node counts as rank 0.
				stack.push((id, dep_idx + 1, best.max(1)));
			} else {
				stack.push((id, dep_idx, best));
				visiting.insert(dep);
				stack.push((dep, 0, 0));
			}
		}
	}

	ranks
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, deps: &[&str]) -> Node {
		Node {
			id: id.to_string(),
			depends_on: deps.iter().map(|d| d.to_string()).collect(),
			..Node::default()
		}
	}

	fn graph(nodes: &[Node]) -> HashMap<String, Node> {
		nodes.iter().map(|n| (n.id.clone(), n.clone())).collect()
	}

	#[test]
	fn no_dependencies_rank_zero() {
		let nodes = graph(&[node("a", &[])]);
		assert_eq!(compute_ranks(&nodes)["a"], 0);
	}

	#[test]
	fn longest_path_wins_in_diamond() {
		// a -> b -> d, a -> c -> d plus a direct a -> d edge: d still ranks 2.
		let nodes = graph(&[
			node("a", &[]),
			node("b", &["a"]),
			node("c", &["a"]),
			node("d", &["b", "c", "a"]),
		]);
		let ranks = compute_ranks(&nodes);
		assert_eq!(ranks["a"], 0);
		assert_eq!(ranks["b"], 1);
		assert_eq!(ranks["c"], 1);
		assert_eq!(ranks["d"], 2);
	}

	#[test]
	fn ranks_are_monotone_along_edges() {
		let nodes = graph(&[
			node("root", &[]),
			node("x", &["root"]),
			node("y", &["root", "x"]),
			node("z", &["y"]),
		]);
		let ranks = compute_ranks(&nodes);
		for n in nodes.values() {
			for d in &n.depends_on {
				if nodes.contains_key(d) {
					assert!(ranks[d] < ranks[&n.id], "{d} !< {}", n.id);
				}
			}
		}
	}

	#[test]
	fn dangling_dependency_contributes_nothing() {
		let nodes = graph(&[node("a", &["nonexistent"])]);
		assert_eq!(compute_ranks(&nodes)["a"], 0);
	}

	#[test]
	fn cycle_terminates_with_complete_mapping() {
		let nodes = graph(&[node("a", &["b"]), node("b", &["a"])]);
		let ranks = compute_ranks(&nodes);
		assert_eq!(ranks.len(), 2);
		assert!(ranks.contains_key("a") && ranks.contains_key("b"));
	}

	#[test]
	fn self_reference_terminates() {
		let nodes = graph(&[node("a", &["a"])]);
		let ranks = compute_ranks(&nodes);
		assert_eq!(ranks.len(), 1);
	}

	#[test]
	fn deep_chain_does_not_recurse() {
		let mut nodes = HashMap::new();
		nodes.insert("n0".to_string(), node("n0", &[]));
		for i in 1..5000usize {
			let id = format!("n{i}");
			let dep = format!("n{}", i - 1);
			nodes.insert(id.clone(), node(&id, &[dep.as_str()]));
		}
		let ranks = compute_ranks(&nodes);
		assert_eq!(ranks["n4999"], 4999);
	}
}
