//! Minimap geometry: node markers and the viewport frame projected into a
//! fixed overview box. Pure math; the SVG itself lives in `component.rs`.

use super::types::{Bounds, Point};
use super::viewport::Viewport;

pub const MINIMAP_W: f64 = 100.0;
pub const MINIMAP_H: f64 = 60.0;
pub const MARKER_W: f64 = 4.0;
pub const MARKER_H: f64 = 2.2;

/// Per-axis scale factors mapping canvas pixels to minimap-local units.
pub fn minimap_scale(canvas: (f64, f64)) -> (f64, f64) {
	(
		MINIMAP_W / canvas.0.max(1.0),
		MINIMAP_H / canvas.1.max(1.0),
	)
}

/// Fixed-size marker at a node's scaled position.
pub fn node_marker(pos: Point, canvas: (f64, f64)) -> Bounds {
	let (sx, sy) = minimap_scale(canvas);
	Bounds {
		x: pos.x * sx,
		y: pos.y * sy,
		width: MARKER_W,
		height: MARKER_H,
	}
}

/// The visible world-space region, scaled into minimap coordinates. One
/// rectangle per call; the caller replaces the previous frame rather than
/// accumulating.
pub fn viewport_frame(viewport: &Viewport, canvas: (f64, f64), window: (f64, f64)) -> Bounds {
	let world = viewport.visible_world_rect(window);
	let (sx, sy) = minimap_scale(canvas);
	Bounds {
		x: world.x * sx,
		y: world.y * sy,
		width: world.width * sx,
		height: world.height * sy,
	}
}
