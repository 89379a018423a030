//! Owned pan/zoom state. The renderer and minimap receive this by handle
//! (a signal) and never mutate transform fields directly.

use super::types::{Bounds, Point};

pub const MIN_SCALE: f64 = 0.4;
pub const MAX_SCALE: f64 = 2.75;
/// Fit-to-content uses a tighter, comfortable range than free zooming.
pub const FIT_MIN_SCALE: f64 = 0.45;
pub const FIT_MAX_SCALE: f64 = 2.0;
/// Padding kept around the content box when fitting.
pub const FIT_PAD: f64 = 80.0;
/// Screen space reserved for the side panel and the top/bottom bars.
pub const CHROME_X: f64 = 320.0;
pub const CHROME_Y: f64 = 160.0;

/// Affine view transform: `screen = origin + world * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub scale: f64,
	pub origin: Point,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: 1.0,
			origin: Point { x: 40.0, y: 60.0 },
		}
	}
}

impl Viewport {
	/// Translate by a raw pointer delta. No scale coupling.
	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.origin.x += dx;
		self.origin.y += dy;
	}

	/// Set the scale, clamped, keeping the world point under the anchor
	/// (viewport-local pixels) visually fixed.
	pub fn set_scale_at(&mut self, next: f64, anchor_x: f64, anchor_y: f64) {
		let prev = self.scale;
		self.scale = next.clamp(MIN_SCALE, MAX_SCALE);
		let ratio = self.scale / prev;
		self.origin.x = anchor_x - (anchor_x - self.origin.x) * ratio;
		self.origin.y = anchor_y - (anchor_y - self.origin.y) * ratio;
	}

	/// Multiply the scale by `factor`, anchored. Zoom is never origin-naive.
	pub fn zoom_at(&mut self, factor: f64, anchor_x: f64, anchor_y: f64) {
		self.set_scale_at(self.scale * factor, anchor_x, anchor_y);
	}

	/// Fit `bounds` into the window area left over after the reserved chrome,
	/// placing the content's top-left at the fit padding offset. Calling this
	/// twice with unchanged input yields the same transform.
	pub fn fit_to_content(&mut self, bounds: Bounds, window: (f64, f64)) {
		let avail_w = window.0 - 2.0 * FIT_PAD - CHROME_X;
		let avail_h = window.1 - 2.0 * FIT_PAD - CHROME_Y;
		let sx = avail_w / (bounds.width + 2.0 * FIT_PAD);
		let sy = avail_h / (bounds.height + 2.0 * FIT_PAD);
		let s = sx.min(sy).clamp(FIT_MIN_SCALE, FIT_MAX_SCALE);
		self.scale = s;
		self.origin = Point {
			x: FIT_PAD - bounds.x * s,
			y: FIT_PAD - bounds.y * s,
		};
	}

	/// World-space rectangle currently visible in the canvas area
	/// (inverse transform of the window minus vertical chrome).
	pub fn visible_world_rect(&self, window: (f64, f64)) -> Bounds {
		let inv = 1.0 / self.scale;
		Bounds {
			x: -self.origin.x * inv,
			y: -self.origin.y * inv,
			width: window.0 * inv,
			height: (window.1 - CHROME_Y) * inv,
		}
	}

	pub fn css_transform(&self) -> String {
		format!(
			"translate({}px,{}px) scale({})",
			self.origin.x, self.origin.y, self.scale
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pan_translates_origin() {
		let mut vp = Viewport::default();
		vp.pan(10.0, -5.0);
		assert_eq!(vp.origin, Point { x: 50.0, y: 55.0 });
		assert_eq!(vp.scale, 1.0);
	}

	#[test]
	fn zoom_keeps_anchor_point_fixed() {
		let mut vp = Viewport {
			scale: 1.0,
			origin: Point { x: 0.0, y: 0.0 },
		};
		vp.zoom_at(2.0, 100.0, 100.0);
		assert_eq!(vp.scale, 2.0);
		assert_eq!(vp.origin, Point { x: -100.0, y: -100.0 });
	}

	#[test]
	fn anchored_world_point_is_invariant() {
		let mut vp = Viewport {
			scale: 1.3,
			origin: Point { x: 25.0, y: -40.0 },
		};
		let before = (100.0 - vp.origin.x) / vp.scale;
		vp.zoom_at(1.5, 100.0, 100.0);
		let after = (100.0 - vp.origin.x) / vp.scale;
		assert!((before - after).abs() < 1e-9);
	}

	#[test]
	fn scale_is_clamped() {
		let mut vp = Viewport::default();
		vp.zoom_at(100.0, 0.0, 0.0);
		assert_eq!(vp.scale, MAX_SCALE);
		vp.zoom_at(0.0001, 0.0, 0.0);
		assert_eq!(vp.scale, MIN_SCALE);
	}

	#[test]
	fn fit_is_idempotent() {
		let bounds = Bounds {
			x: 0.0,
			y: 0.0,
			width: 1200.0,
			height: 500.0,
		};
		let mut vp = Viewport::default();
		vp.fit_to_content(bounds, (1920.0, 1080.0));
		let first = vp;
		vp.fit_to_content(bounds, (1920.0, 1080.0));
		assert_eq!(vp, first);
	}

	#[test]
	fn fit_places_content_top_left_at_pad_offset() {
		let bounds = Bounds {
			x: 100.0,
			y: 50.0,
			width: 400.0,
			height: 300.0,
		};
		let mut vp = Viewport::default();
		vp.fit_to_content(bounds, (1920.0, 1080.0));
		// screen position of the bounds origin
		let sx = vp.origin.x + bounds.x * vp.scale;
		let sy = vp.origin.y + bounds.y * vp.scale;
		assert!((sx - FIT_PAD).abs() < 1e-9);
		assert!((sy - FIT_PAD).abs() < 1e-9);
	}

	#[test]
	fn fit_scale_stays_in_comfortable_range() {
		let mut vp = Viewport::default();
		vp.fit_to_content(
			Bounds {
				x: 0.0,
				y: 0.0,
				width: 100_000.0,
				height: 100_000.0,
			},
			(1280.0, 800.0),
		);
		assert_eq!(vp.scale, FIT_MIN_SCALE);
		vp.fit_to_content(
			Bounds {
				x: 0.0,
				y: 0.0,
				width: 10.0,
				height: 10.0,
			},
			(1920.0, 1080.0),
		);
		assert_eq!(vp.scale, FIT_MAX_SCALE);
	}

	#[test]
	fn visible_rect_inverts_the_transform() {
		let vp = Viewport {
			scale: 2.0,
			origin: Point { x: -100.0, y: -50.0 },
		};
		let rect = vp.visible_world_rect((800.0, 760.0));
		assert_eq!(rect.x, 50.0);
		assert_eq!(rect.y, 25.0);
		assert_eq!(rect.width, 400.0);
		assert_eq!(rect.height, 300.0);
	}
}
