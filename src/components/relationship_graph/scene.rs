//! The scene model: owns nodes and edges, enforces their invariants, and
//! persists every structural change through the configured [`EdgeStore`].

use std::rc::Rc;

use log::info;

use super::geometry;
use super::storage::EdgeStore;
use super::types::{
	Bounds, DEFAULT_EDGE_LABEL, EdgeKey, FriendRecord, GraphEdge, GraphNode, NodeId, SELF_NODE_ID,
	SavedEdge,
};

/// How close the pointer must be to a trimmed edge segment to hit it.
pub const EDGE_HIT_THRESHOLD: f64 = 10.0;

/// Result of [`Scene::add_or_upgrade_edge`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
	/// A new edge was created with the default label.
	Created(EdgeKey),
	/// An existing directional edge became bidirectional.
	Upgraded(EdgeKey),
	/// An equivalent edge already existed; nothing changed.
	Unchanged(EdgeKey),
}

pub struct Scene {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	store: Rc<dyn EdgeStore>,
}

impl Scene {
	pub fn new(store: Rc<dyn EdgeStore>) -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			store,
		}
	}

	/// Rebuilds the node set from the host's friend list (self node first,
	/// friends jittered near center so they never start coincident), then
	/// restores persisted edges whose endpoints still exist.
	pub fn load(&mut self, friends: &[FriendRecord], bounds: &Bounds) {
		self.clear();
		let (cx, cy) = bounds.center();

		self.nodes.push(GraphNode {
			id: SELF_NODE_ID,
			name: "Me".into(),
			emoji: "👤".into(),
			is_self: true,
			x: cx,
			y: cy,
			vx: 0.0,
			vy: 0.0,
			pinned: None,
			custom_pos: false,
		});

		for (i, friend) in friends.iter().enumerate() {
			self.nodes.push(GraphNode {
				id: friend.id,
				name: friend.name.clone(),
				emoji: friend.emoji.clone(),
				is_self: false,
				x: cx + jitter(i * 2),
				y: cy + jitter(i * 2 + 1),
				vx: 0.0,
				vy: 0.0,
				pinned: None,
				custom_pos: false,
			});
		}

		let ids: std::collections::HashSet<NodeId> = self.nodes.iter().map(|n| n.id).collect();
		let saved = self.store.load();
		let total = saved.len();
		let edges: Vec<GraphEdge> = saved
			.into_iter()
			.filter(|s| ids.contains(&s.source_id) && ids.contains(&s.target_id))
			.map(|s| GraphEdge {
				source: s.source_id,
				target: s.target_id,
				bidirectional: s.bidirectional,
				label: if s.label.trim().is_empty() {
					DEFAULT_EDGE_LABEL.into()
				} else {
					s.label
				},
			})
			.collect();
		let dropped = total - edges.len();
		self.edges = edges;
		info!(
			"scene loaded: {} nodes, {} edges restored, {} dropped",
			self.nodes.len(),
			self.edges.len(),
			dropped
		);
	}

	/// Drops all nodes and edges without touching the store.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Mutable nodes together with shared edges, for the layout tick.
	pub fn split_mut(&mut self) -> (&mut [GraphNode], &[GraphEdge]) {
		(&mut self.nodes, &self.edges)
	}

	pub fn find_node(&self, id: NodeId) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn find_node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	pub fn edge(&self, key: EdgeKey) -> Option<&GraphEdge> {
		self.edges
			.iter()
			.find(|e| e.source == key.source && e.target == key.target)
	}

	pub fn edges_touching(&self, id: NodeId) -> impl Iterator<Item = &GraphEdge> {
		self.edges.iter().filter(move |e| e.touches(id))
	}

	/// Creates an edge between the pair, or upgrades an existing
	/// directional one to bidirectional when asked for a bidirectional
	/// tie. At most one logical edge per unordered pair is ever kept; a
	/// bidirectional edge is never downgraded. `None` when either
	/// endpoint is missing or the endpoints coincide.
	pub fn add_or_upgrade_edge(
		&mut self,
		source: NodeId,
		target: NodeId,
		bidirectional: bool,
	) -> Option<EdgeOutcome> {
		if source == target
			|| self.find_node(source).is_none()
			|| self.find_node(target).is_none()
		{
			return None;
		}

		if let Some(pos) = self.edges.iter().position(|e| e.joins(source, target)) {
			let upgrade = bidirectional && !self.edges[pos].bidirectional;
			let key = self.edges[pos].key();
			if upgrade {
				self.edges[pos].bidirectional = true;
				self.persist();
				return Some(EdgeOutcome::Upgraded(key));
			}
			return Some(EdgeOutcome::Unchanged(key));
		}

		let edge = GraphEdge {
			source,
			target,
			bidirectional,
			label: DEFAULT_EDGE_LABEL.into(),
		};
		let key = edge.key();
		self.edges.push(edge);
		self.persist();
		Some(EdgeOutcome::Created(key))
	}

	/// Removes the edge; returns whether anything was deleted.
	pub fn remove_edge(&mut self, key: EdgeKey) -> bool {
		let before = self.edges.len();
		self.edges
			.retain(|e| !(e.source == key.source && e.target == key.target));
		if self.edges.len() == before {
			return false;
		}
		self.persist();
		true
	}

	/// Trims and applies the label; empty text reverts to the default
	/// sentinel. Returns the committed text.
	pub fn set_edge_label(&mut self, key: EdgeKey, text: &str) -> Option<String> {
		let trimmed = text.trim();
		let label = if trimmed.is_empty() {
			DEFAULT_EDGE_LABEL.to_owned()
		} else {
			trimmed.to_owned()
		};
		let edge = self
			.edges
			.iter_mut()
			.find(|e| e.source == key.source && e.target == key.target)?;
		edge.label = label.clone();
		self.persist();
		Some(label)
	}

	fn persist(&self) {
		let saved: Vec<SavedEdge> = self
			.edges
			.iter()
			.map(|e| SavedEdge {
				source_id: e.source,
				target_id: e.target,
				bidirectional: e.bidirectional,
				label: e.label.clone(),
			})
			.collect();
		self.store.save(&saved);
	}

	/// Topmost node whose body contains the point, matching draw order
	/// (later nodes paint over earlier ones).
	pub fn node_at(&self, x: f64, y: f64, radius: f64) -> Option<NodeId> {
		self.nodes
			.iter()
			.rev()
			.find(|n| geometry::inside_circle(x, y, n.x, n.y, radius))
			.map(|n| n.id)
	}

	pub fn inside_any_node(&self, x: f64, y: f64, radius: f64) -> bool {
		self.nodes
			.iter()
			.any(|n| geometry::inside_circle(x, y, n.x, n.y, radius))
	}

	/// Closest edge within [`EDGE_HIT_THRESHOLD`] of the point. Node
	/// bodies take priority: a point inside any node never hits an edge,
	/// and a segment occluded by a third node's body is not selectable
	/// along the blocked stretch.
	pub fn edge_at(&self, x: f64, y: f64, radius: f64) -> Option<EdgeKey> {
		if self.inside_any_node(x, y, radius) {
			return None;
		}

		let mut best: Option<(EdgeKey, f64)> = None;
		for edge in &self.edges {
			let (Some(source), Some(target)) =
				(self.find_node(edge.source), self.find_node(edge.target))
			else {
				continue;
			};
			let Some([x1, y1, x2, y2]) =
				geometry::trimmed_segment(source.x, source.y, target.x, target.y, radius)
			else {
				continue;
			};
			let dist = geometry::point_segment_distance(x, y, x1, y1, x2, y2);
			if dist > EDGE_HIT_THRESHOLD {
				continue;
			}
			if let Some((_, best_dist)) = best {
				if dist >= best_dist {
					continue;
				}
			}
			let blocked = self.nodes.iter().any(|n| {
				!edge.touches(n.id)
					&& geometry::point_segment_distance(n.x, n.y, x1, y1, x2, y2) <= radius
					&& (0.0..=1.0).contains(&geometry::segment_projection(n.x, n.y, x1, y1, x2, y2))
			});
			if !blocked {
				best = Some((edge.key(), dist));
			}
		}
		best.map(|(key, _)| key)
	}
}

/// Deterministic small offset in `[-10, 10)` so freshly loaded friends
/// never stack exactly on the center point.
fn jitter(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64 / 233280.0 - 0.5) * 20.0
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::super::storage::MemoryStore;
	use super::*;

	fn bounds() -> Bounds {
		Bounds {
			width: 800.0,
			height: 600.0,
			node_radius: 30.0,
		}
	}

	fn friends(n: usize) -> Vec<FriendRecord> {
		(1..=n as NodeId)
			.map(|i| FriendRecord::new(i, &format!("friend {i}"), "🙂"))
			.collect()
	}

	fn scene_with(store: Rc<MemoryStore>, n: usize) -> Scene {
		let mut scene = Scene::new(store);
		scene.load(&friends(n), &bounds());
		scene
	}

	#[test]
	fn load_builds_one_node_per_friend_plus_self() {
		let scene = scene_with(Rc::new(MemoryStore::default()), 3);
		assert_eq!(scene.nodes().len(), 4);
		let selves: Vec<_> = scene.nodes().iter().filter(|n| n.is_self).collect();
		assert_eq!(selves.len(), 1);
		assert_eq!(selves[0].id, SELF_NODE_ID);
	}

	#[test]
	fn self_node_exists_even_with_no_friends() {
		let scene = scene_with(Rc::new(MemoryStore::default()), 0);
		assert_eq!(scene.nodes().len(), 1);
		assert!(scene.find_node(SELF_NODE_ID).unwrap().is_self);
	}

	#[test]
	fn load_drops_edges_with_missing_endpoints() {
		let store = Rc::new(MemoryStore::with(vec![
			SavedEdge {
				source_id: 1,
				target_id: 2,
				bidirectional: true,
				label: "friends".into(),
			},
			SavedEdge {
				source_id: 1,
				target_id: 99,
				bidirectional: false,
				label: String::new(),
			},
		]));
		let scene = scene_with(store, 2);
		assert_eq!(scene.edges().len(), 1);
		assert!(scene.edges()[0].joins(1, 2));
	}

	#[test]
	fn restore_is_idempotent_across_reloads() {
		let store = Rc::new(MemoryStore::default());
		let mut scene = scene_with(store.clone(), 3);
		scene.add_or_upgrade_edge(1, 2, true).unwrap();
		scene.add_or_upgrade_edge(2, 3, false).unwrap();
		scene.set_edge_label(EdgeKey { source: 2, target: 3 }, "mentor");
		let saved = store.saved();

		let mut scene = Scene::new(store.clone());
		scene.load(&friends(3), &bounds());
		assert_eq!(store.saved(), saved);
		assert_eq!(scene.edges().len(), 2);
		let e = scene.edge(EdgeKey { source: 2, target: 3 }).unwrap();
		assert!(!e.bidirectional);
		assert_eq!(e.label, "mentor");
	}

	#[test]
	fn duplicate_add_upgrades_instead_of_duplicating() {
		let store = Rc::new(MemoryStore::default());
		let mut scene = scene_with(store.clone(), 2);
		let out = scene.add_or_upgrade_edge(1, 2, false).unwrap();
		assert!(matches!(out, EdgeOutcome::Created(_)));
		let out = scene.add_or_upgrade_edge(1, 2, true).unwrap();
		assert!(matches!(out, EdgeOutcome::Upgraded(_)));
		assert_eq!(scene.edges().len(), 1);
		assert!(scene.edges()[0].bidirectional);
		assert_eq!(store.saved().len(), 1);
	}

	#[test]
	fn reverse_direction_add_matches_the_unordered_pair() {
		let mut scene = scene_with(Rc::new(MemoryStore::default()), 2);
		scene.add_or_upgrade_edge(1, 2, false).unwrap();
		// Asking for the reverse directional tie neither duplicates nor
		// upgrades; bidirectional is only reached by asking for it.
		let out = scene.add_or_upgrade_edge(2, 1, false).unwrap();
		assert!(matches!(out, EdgeOutcome::Unchanged(_)));
		assert_eq!(scene.edges().len(), 1);
		assert!(!scene.edges()[0].bidirectional);
	}

	#[test]
	fn bidirectional_edges_never_downgrade() {
		let mut scene = scene_with(Rc::new(MemoryStore::default()), 2);
		scene.add_or_upgrade_edge(1, 2, true).unwrap();
		let out = scene.add_or_upgrade_edge(2, 1, false).unwrap();
		assert!(matches!(out, EdgeOutcome::Unchanged(_)));
		assert!(scene.edges()[0].bidirectional);
	}

	#[test]
	fn edges_to_unknown_or_identical_endpoints_are_rejected() {
		let mut scene = scene_with(Rc::new(MemoryStore::default()), 2);
		assert!(scene.add_or_upgrade_edge(1, 1, true).is_none());
		assert!(scene.add_or_upgrade_edge(1, 42, true).is_none());
		assert!(scene.edges().is_empty());
	}

	#[test]
	fn empty_label_reverts_to_the_default_sentinel() {
		let mut scene = scene_with(Rc::new(MemoryStore::default()), 2);
		scene.add_or_upgrade_edge(1, 2, true).unwrap();
		let key = EdgeKey { source: 1, target: 2 };
		assert_eq!(
			scene.set_edge_label(key, "  close friends  ").unwrap(),
			"close friends"
		);
		assert_eq!(scene.set_edge_label(key, "   ").unwrap(), DEFAULT_EDGE_LABEL);
		assert_eq!(scene.edge(key).unwrap().label, DEFAULT_EDGE_LABEL);
	}

	#[test]
	fn remove_edge_reports_whether_anything_went() {
		let store = Rc::new(MemoryStore::default());
		let mut scene = scene_with(store.clone(), 2);
		scene.add_or_upgrade_edge(1, 2, true).unwrap();
		let key = EdgeKey { source: 1, target: 2 };
		assert!(scene.remove_edge(key));
		assert!(!scene.remove_edge(key));
		assert!(scene.edges().is_empty());
		assert!(store.saved().is_empty());
	}

	#[test]
	fn edges_touching_filters_by_endpoint() {
		let mut scene = scene_with(Rc::new(MemoryStore::default()), 3);
		scene.add_or_upgrade_edge(1, 2, true).unwrap();
		scene.add_or_upgrade_edge(2, 3, false).unwrap();
		assert_eq!(scene.edges_touching(2).count(), 2);
		assert_eq!(scene.edges_touching(1).count(), 1);
		assert_eq!(scene.edges_touching(SELF_NODE_ID).count(), 0);
	}

	#[test]
	fn node_hit_testing_is_inclusive_at_the_radius() {
		let mut scene = scene_with(Rc::new(MemoryStore::default()), 1);
		let node = scene.find_node_mut(1).unwrap();
		node.x = 100.0;
		node.y = 100.0;
		assert_eq!(scene.node_at(100.0, 100.0, 30.0), Some(1));
		assert_eq!(scene.node_at(130.0, 100.0, 30.0), Some(1));
		assert_eq!(scene.node_at(130.1, 100.0, 30.0), None);
	}

	#[test]
	fn edge_hit_testing_prefers_nodes_and_respects_occlusion() {
		let mut scene = scene_with(Rc::new(MemoryStore::default()), 3);
		// Three colinear nodes: 1 -- 2 -- 3, with 2 sitting on segment 1-3.
		for (id, x) in [(1, 100.0), (2, 300.0), (3, 500.0)] {
			let node = scene.find_node_mut(id).unwrap();
			node.x = x;
			node.y = 300.0;
		}
		// Self node out of the way.
		let node = scene.find_node_mut(SELF_NODE_ID).unwrap();
		node.x = 400.0;
		node.y = 100.0;
		let radius = 30.0;
		scene.add_or_upgrade_edge(1, 3, true).unwrap();

		// A point on the segment near node 2 is inside node 2's body.
		assert_eq!(scene.edge_at(300.0, 300.0, radius), None);
		// Node 2 occludes segment 1-3, so it is not selectable anywhere,
		// even on the stretch clear of node bodies.
		assert_eq!(scene.edge_at(200.0, 300.0, radius), None);

		// An unoccluded edge is selectable near its segment but not
		// beyond the pixel threshold.
		scene.add_or_upgrade_edge(1, 2, false).unwrap();
		let key = EdgeKey { source: 1, target: 2 };
		assert_eq!(scene.edge_at(200.0, 305.0, radius), Some(key));
		assert_eq!(scene.edge_at(200.0, 320.0, radius), None);
	}
}
