//! Node positioning strategies: an iterative force simulation and a
//! deterministic circular fallback, behind one tick/resize contract so
//! the rest of the graph is strategy-agnostic.

use std::f64::consts::PI;

use log::{info, warn};

use super::types::{Bounds, GraphEdge, GraphError, GraphNode};

/// Uniform contract both strategies implement.
pub trait LayoutStrategy {
	/// Initial placement for a freshly loaded node set.
	fn reset(&mut self, nodes: &mut [GraphNode], edges: &[GraphEdge], bounds: &Bounds);
	/// One integration step. Returns false once the layout has settled.
	fn tick(&mut self, nodes: &mut [GraphNode], edges: &[GraphEdge], bounds: &Bounds) -> bool;
	/// Container geometry changed; adjust and resume without a restart.
	fn resize(&mut self, nodes: &mut [GraphNode], bounds: &Bounds);
	/// Inject energy so the simulation resumes after a perturbation.
	fn wake(&mut self, energy: f64);
	fn stabilized(&self) -> bool;
}

/// Probes for the force simulation and falls back to the static circular
/// arrangement if it cannot be brought up.
pub fn select_strategy(prefer_force: bool) -> Box<dyn LayoutStrategy> {
	if prefer_force {
		match ForceLayout::try_new() {
			Ok(layout) => {
				info!("using force-directed layout");
				return Box::new(layout);
			}
			Err(e) => warn!("{e}, falling back to circular layout"),
		}
	} else {
		info!("using circular layout");
	}
	Box::new(CircularLayout::default())
}

/// Self node at canvas center; friends evenly spaced on a circle of
/// radius `0.35 * min(w, h)`. Friends the user has dragged keep their
/// position; their slot stays reserved so the others do not shift.
fn arrange_in_circle(nodes: &mut [GraphNode], bounds: &Bounds) {
	let (cx, cy) = bounds.center();
	let ring = bounds.width.min(bounds.height) * 0.35;
	let friend_count = nodes.iter().filter(|n| !n.is_self).count().max(1);

	let mut slot = 0usize;
	for node in nodes.iter_mut() {
		if node.is_self {
			node.x = cx;
			node.y = cy;
			continue;
		}
		if node.custom_pos {
			slot += 1;
			continue;
		}
		let angle = 2.0 * PI * slot as f64 / friend_count as f64;
		node.x = cx + ring * angle.cos();
		node.y = cy + ring * angle.sin();
		slot += 1;
	}
}

/// Deterministic static layout, always available.
#[derive(Default)]
pub struct CircularLayout {
	stabilized: bool,
}

impl LayoutStrategy for CircularLayout {
	fn reset(&mut self, nodes: &mut [GraphNode], _edges: &[GraphEdge], bounds: &Bounds) {
		arrange_in_circle(nodes, bounds);
		self.stabilized = true;
	}

	fn tick(&mut self, _nodes: &mut [GraphNode], _edges: &[GraphEdge], _bounds: &Bounds) -> bool {
		self.stabilized = true;
		false
	}

	fn resize(&mut self, nodes: &mut [GraphNode], bounds: &Bounds) {
		arrange_in_circle(nodes, bounds);
	}

	fn wake(&mut self, _energy: f64) {}

	fn stabilized(&self) -> bool {
		self.stabilized
	}
}

const ALPHA_MIN: f64 = 0.001;
const ALPHA_DECAY: f64 = 0.02;
const ALPHA_INITIAL: f64 = 0.8;
const ALPHA_POST_WARMUP: f64 = 0.3;
const WARMUP_TICKS: usize = 100;
const VELOCITY_DECAY: f64 = 0.4;
const REPULSION_STRENGTH: f64 = 150.0;
const REPULSION_MAX_DISTANCE: f64 = 300.0;
const SPRING_STRENGTH: f64 = 0.2;
const SPRING_LENGTH_RADII: f64 = 4.0;
const AXIS_PULL_STRENGTH: f64 = 0.01;
const SELF_CENTER_PULL: f64 = 0.1;
const COLLISION_SCALE: f64 = 1.2;

/// Iterative force simulation: pairwise repulsion, spring edges, mean
/// centering, axis drift, collision separation and boundary clamping,
/// with a geometric cooling schedule.
pub struct ForceLayout {
	alpha: f64,
	stabilized: bool,
}

impl ForceLayout {
	/// Capability probe; degrades to [`CircularLayout`] at the call site
	/// on failure.
	pub fn try_new() -> Result<Self, GraphError> {
		Ok(Self {
			alpha: 0.0,
			stabilized: false,
		})
	}

	fn step(&self, nodes: &mut [GraphNode], edges: &[GraphEdge], bounds: &Bounds) {
		let alpha = self.alpha;
		let n = nodes.len();
		let (cx, cy) = bounds.center();
		let radius = bounds.node_radius;

		// Pairwise repulsion with a capped interaction distance.
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = nodes[j].x - nodes[i].x;
				let dy = nodes[j].y - nodes[i].y;
				let d2 = dx * dx + dy * dy;
				if d2 > REPULSION_MAX_DISTANCE * REPULSION_MAX_DISTANCE {
					continue;
				}
				let w = REPULSION_STRENGTH * alpha / d2.max(1.0);
				nodes[i].vx -= dx * w;
				nodes[i].vy -= dy * w;
				nodes[j].vx += dx * w;
				nodes[j].vy += dy * w;
			}
		}

		// Spring attraction along edges toward an ideal length.
		let ideal = radius * SPRING_LENGTH_RADII;
		for edge in edges {
			let (Some(si), Some(ti)) = (
				nodes.iter().position(|n| n.id == edge.source),
				nodes.iter().position(|n| n.id == edge.target),
			) else {
				continue;
			};
			let dx = nodes[ti].x - nodes[si].x;
			let dy = nodes[ti].y - nodes[si].y;
			let dist = dx.hypot(dy).max(1e-6);
			let f = (dist - ideal) / dist * SPRING_STRENGTH * alpha * 0.5;
			nodes[si].vx += dx * f;
			nodes[si].vy += dy * f;
			nodes[ti].vx -= dx * f;
			nodes[ti].vy -= dy * f;
		}

		// Mild axis-aligned drift toward the canvas center.
		for node in nodes.iter_mut() {
			node.vx += (cx - node.x) * AXIS_PULL_STRENGTH * alpha;
			node.vy += (cy - node.y) * AXIS_PULL_STRENGTH * alpha;
		}

		// Integrate. Pinned nodes are position-locked and carry no
		// simulated velocity.
		for node in nodes.iter_mut() {
			if let Some((px, py)) = node.pinned {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx *= 1.0 - VELOCITY_DECAY;
			node.vy *= 1.0 - VELOCITY_DECAY;
			node.x += node.vx;
			node.y += node.vy;
		}

		// Shift unpinned nodes so their centroid sits on the center.
		let mut mx = 0.0;
		let mut my = 0.0;
		let mut free = 0usize;
		for node in nodes.iter() {
			if node.pinned.is_none() {
				mx += node.x;
				my += node.y;
				free += 1;
			}
		}
		if free > 0 {
			let ox = mx / free as f64 - cx;
			let oy = my / free as f64 - cy;
			for node in nodes.iter_mut() {
				if node.pinned.is_none() {
					node.x -= ox;
					node.y -= oy;
				}
			}
		}

		// The self node anchors the graph: extra pull toward center.
		for node in nodes.iter_mut() {
			if node.is_self && node.pinned.is_none() {
				let dx = cx - node.x;
				let dy = cy - node.y;
				if dx.hypot(dy) > 1.0 {
					node.x += dx * SELF_CENTER_PULL;
					node.y += dy * SELF_CENTER_PULL;
				}
			}
		}

		// Separate overlapping pairs.
		let min_sep = 2.0 * radius * COLLISION_SCALE;
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = nodes[j].x - nodes[i].x;
				let dy = nodes[j].y - nodes[i].y;
				let dist = dx.hypot(dy).max(1e-6);
				if dist >= min_sep {
					continue;
				}
				let push = (min_sep - dist) / dist;
				let (ux, uy) = (dx * push, dy * push);
				match (nodes[i].pinned.is_some(), nodes[j].pinned.is_some()) {
					(false, false) => {
						nodes[i].x -= ux * 0.5;
						nodes[i].y -= uy * 0.5;
						nodes[j].x += ux * 0.5;
						nodes[j].y += uy * 0.5;
					}
					(true, false) => {
						nodes[j].x += ux;
						nodes[j].y += uy;
					}
					(false, true) => {
						nodes[i].x -= ux;
						nodes[i].y -= uy;
					}
					(true, true) => {}
				}
			}
		}

		// Keep everything on the canvas.
		for node in nodes.iter_mut() {
			node.x = node.x.clamp(radius, (bounds.width - radius).max(radius));
			node.y = node.y.clamp(radius, (bounds.height - radius).max(radius));
		}
	}
}

impl LayoutStrategy for ForceLayout {
	fn reset(&mut self, nodes: &mut [GraphNode], edges: &[GraphEdge], bounds: &Bounds) {
		arrange_in_circle(nodes, bounds);
		if let Some(self_node) = nodes.iter_mut().find(|n| n.is_self) {
			self_node.pinned = Some(bounds.center());
		}
		self.stabilized = false;
		self.alpha = ALPHA_INITIAL;
		for _ in 0..WARMUP_TICKS {
			self.step(nodes, edges, bounds);
		}
		self.alpha = ALPHA_POST_WARMUP;
	}

	fn tick(&mut self, nodes: &mut [GraphNode], edges: &[GraphEdge], bounds: &Bounds) -> bool {
		if self.alpha < ALPHA_MIN {
			if !self.stabilized {
				self.stabilized = true;
				info!("layout stabilized");
			}
			return false;
		}
		self.step(nodes, edges, bounds);
		self.alpha *= 1.0 - ALPHA_DECAY;
		true
	}

	fn resize(&mut self, _nodes: &mut [GraphNode], _bounds: &Bounds) {
		// Radius and center both derive from the bounds each step; a
		// small energy injection is enough to re-settle.
		self.wake(ALPHA_POST_WARMUP);
	}

	fn wake(&mut self, energy: f64) {
		self.alpha = self.alpha.max(energy);
		self.stabilized = false;
	}

	fn stabilized(&self) -> bool {
		self.stabilized
	}
}
