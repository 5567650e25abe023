//! Pure 2D helpers shared by hit-testing, layout and rendering.

/// Distance from point `(px, py)` to the segment `(ax, ay)`-`(bx, by)`.
pub fn point_segment_distance(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
	let (dx, dy) = (bx - ax, by - ay);
	let len2 = dx * dx + dy * dy;
	if len2 == 0.0 {
		return (px - ax).hypot(py - ay);
	}
	let t = (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0);
	let (proj_x, proj_y) = (ax + t * dx, ay + t * dy);
	(px - proj_x).hypot(py - proj_y)
}

/// Unclamped projection parameter of a point onto the segment's line;
/// values in `[0, 1]` fall between the endpoints.
pub fn segment_projection(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
	let (dx, dy) = (bx - ax, by - ay);
	let len2 = dx * dx + dy * dy;
	if len2 == 0.0 {
		return 0.0;
	}
	((px - ax) * dx + (py - ay) * dy) / len2
}

/// Shortens the center-to-center segment by `radius` at both ends, giving
/// the visible edge between two node boundaries. `None` when the centers
/// coincide (no direction to trim along).
pub fn trimmed_segment(ax: f64, ay: f64, bx: f64, by: f64, radius: f64) -> Option<[f64; 4]> {
	let (dx, dy) = (bx - ax, by - ay);
	let dist = dx.hypot(dy);
	if dist < f64::EPSILON {
		return None;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	Some([
		ax + ux * radius,
		ay + uy * radius,
		bx - ux * radius,
		by - uy * radius,
	])
}

/// True when the point lies on or inside the circle.
pub fn inside_circle(px: f64, py: f64, cx: f64, cy: f64, radius: f64) -> bool {
	(px - cx).hypot(py - cy) <= radius
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distance_to_degenerate_segment_is_point_distance() {
		assert_eq!(point_segment_distance(3.0, 4.0, 0.0, 0.0, 0.0, 0.0), 5.0);
	}

	#[test]
	fn distance_clamps_to_endpoints() {
		// Point beyond the B end projects onto B itself.
		let d = point_segment_distance(15.0, 0.0, 0.0, 0.0, 10.0, 0.0);
		assert!((d - 5.0).abs() < 1e-9);
		// Point alongside the middle measures perpendicular distance.
		let d = point_segment_distance(5.0, 3.0, 0.0, 0.0, 10.0, 0.0);
		assert!((d - 3.0).abs() < 1e-9);
	}

	#[test]
	fn projection_parameter_spans_segment() {
		assert!(segment_projection(-1.0, 0.0, 0.0, 0.0, 10.0, 0.0) < 0.0);
		let t = segment_projection(5.0, 7.0, 0.0, 0.0, 10.0, 0.0);
		assert!((t - 0.5).abs() < 1e-9);
		assert!(segment_projection(11.0, 0.0, 0.0, 0.0, 10.0, 0.0) > 1.0);
	}

	#[test]
	fn trimming_shortens_by_radius_each_end() {
		let [x1, y1, x2, y2] = trimmed_segment(0.0, 0.0, 100.0, 0.0, 30.0).unwrap();
		assert_eq!((x1, y1), (30.0, 0.0));
		assert_eq!((x2, y2), (70.0, 0.0));
	}

	#[test]
	fn trimming_coincident_centers_yields_none() {
		assert!(trimmed_segment(5.0, 5.0, 5.0, 5.0, 30.0).is_none());
	}

	#[test]
	fn circle_test_is_inclusive_at_the_boundary() {
		assert!(inside_circle(10.0, 0.0, 0.0, 0.0, 10.0));
		assert!(!inside_circle(10.0 + 1e-6, 0.0, 0.0, 0.0, 10.0));
		assert!(inside_circle(0.0, 0.0, 0.0, 0.0, 10.0));
	}
}
