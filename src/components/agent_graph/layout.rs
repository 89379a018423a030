//! Rank-only layered layout: columns are ranks, rows are the lexicographic
//! position within a rank. Deterministic by construction, O(V + E), and
//! deliberately free of crossing-minimization or packing passes.

use std::collections::HashMap;

use super::rank::compute_ranks;
use super::types::{Bounds, Node, Point};

pub const NODE_W: f64 = 220.0;
pub const NODE_H: f64 = 64.0;
pub const COL_GAP: f64 = 120.0;
pub const ROW_GAP: f64 = 22.0;
/// Padding so the last column/row is never clipped against the canvas edge.
pub const CANVAS_MARGIN: f64 = 400.0;

/// Assumed canvas size when there is nothing to lay out.
pub const DEFAULT_CANVAS: (f64, f64) = (1000.0, 600.0);

/// Pixel positions for every node plus the overall canvas bounding size.
/// Recomputed on every render, never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	pub positions: HashMap<String, Point>,
	pub width: f64,
	pub height: f64,
}

/// Place every node on the rank grid. Ids within a layer are sorted so the
/// same input always produces the same positions.
pub fn build_layout(nodes: &HashMap<String, Node>) -> Layout {
	if nodes.is_empty() {
		return Layout::default();
	}
	let ranks = compute_ranks(nodes);

	let mut layers: HashMap<usize, Vec<&str>> = HashMap::new();
	for id in nodes.keys() {
		let r = ranks.get(id).copied().unwrap_or(0);
		layers.entry(r).or_default().push(id.as_str());
	}

	let mut cols: Vec<(usize, Vec<&str>)> = layers.into_iter().collect();
	cols.sort_unstable_by_key(|(r, _)| *r);

	let mut positions = HashMap::with_capacity(nodes.len());
	let mut max_rows = 0usize;
	for (r, ids) in &mut cols {
		ids.sort_unstable();
		max_rows = max_rows.max(ids.len());
		for (row, id) in ids.iter().enumerate() {
			positions.insert(
				(*id).to_string(),
				Point {
					x: *r as f64 * (NODE_W + COL_GAP),
					y: row as f64 * (NODE_H + ROW_GAP),
				},
			);
		}
	}

	Layout {
		positions,
		width: cols.len() as f64 * (NODE_W + COL_GAP) + CANVAS_MARGIN,
		height: max_rows as f64 * (NODE_H + ROW_GAP) + CANVAS_MARGIN,
	}
}

/// Tight bounding box around the placed node boxes, used by fit-to-content.
/// Falls back to the default canvas for an empty layout.
pub fn content_bounds(layout: &Layout) -> Bounds {
	let mut iter = layout.positions.values();
	let Some(first) = iter.next() else {
		return Bounds {
			x: 0.0,
			y: 0.0,
			width: DEFAULT_CANVAS.0,
			height: DEFAULT_CANVAS.1,
		};
	};
	let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
	for p in iter {
		min_x = min_x.min(p.x);
		min_y = min_y.min(p.y);
		max_x = max_x.max(p.x);
		max_y = max_y.max(p.y);
	}
	Bounds {
		x: min_x,
		y: min_y,
		width: max_x - min_x + NODE_W,
		height: max_y - min_y + NODE_H,
	}
}

/// Cubic Bézier connector from the right-center of `from` to the left-center
/// of `to`, with horizontal control handles.
pub fn edge_path(from: Point, to: Point) -> String {
	let x1 = from.x + NODE_W;
	let y1 = from.y + NODE_H / 2.0;
	let x2 = to.x;
	let y2 = to.y + NODE_H / 2.0;
	let dx = ((x2 - x1) * 0.45).max(44.0);
	format!("M {x1} {y1} C {} {y1}, {} {y2}, {x2} {y2}", x1 + dx, x2 - dx)
}
