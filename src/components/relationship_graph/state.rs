//! Pointer-driven interaction state machine. All handlers take plain
//! canvas coordinates and timestamps so the whole machine runs (and is
//! tested) without a browser.

use super::geometry;
use super::layout::LayoutStrategy;
use super::scene::{EdgeOutcome, Scene};
use super::types::{Bounds, EdgeKey, FriendRecord, Mode, NodeId, SELF_NODE_ID};

/// Energy injected when the user perturbs the graph.
const WAKE_DRAG: f64 = 0.3;
const WAKE_RELEASE: f64 = 0.1;

/// Release speeds below this (per-frame units) do not start inertia.
const INERTIA_START_THRESHOLD: f64 = 0.1;
const INERTIA_FRICTION: f64 = 0.95;
const INERTIA_MIN_SPEED: f64 = 0.1;
/// Energy kept after bouncing off a canvas boundary.
const BOUNCE_RETENTION: f64 = 0.5;
/// Fraction of the remaining distance the self node glides home per frame.
const SELF_HOMING: f64 = 0.05;

/// Fixed info affordance in the top-left corner.
pub const INFO_ICON_CENTER: (f64, f64) = (22.0, 22.0);
pub const INFO_ICON_RADIUS: f64 = 12.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
	Primary,
	Secondary,
}

/// What the DOM layer must do after a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
	None,
	/// Unlock and focus the label input for this edge.
	BeginLabelEdit(EdgeKey),
	/// Force every label input back to read-only.
	ClearLabelEdits,
}

/// Owns the scene, the layout strategy and all transient interaction
/// state for one mounted graph.
pub struct GraphState {
	pub scene: Scene,
	pub layout: Box<dyn LayoutStrategy>,
	pub bounds: Bounds,
	pub mode: Mode,
	pub selected: Option<NodeId>,
	pub dragged: Option<NodeId>,
	pub hovered_edge: Option<EdgeKey>,
	pub editing_edge: Option<EdgeKey>,
	pub info_hovered: bool,
	drag_velocity: (f64, f64),
	last_drag_pos: (f64, f64),
	last_drag_time: f64,
	inertial: Vec<NodeId>,
}

impl GraphState {
	pub fn new(scene: Scene, layout: Box<dyn LayoutStrategy>, bounds: Bounds) -> Self {
		Self {
			scene,
			layout,
			bounds,
			mode: Mode::Browse,
			selected: None,
			dragged: None,
			hovered_edge: None,
			editing_edge: None,
			info_hovered: false,
			drag_velocity: (0.0, 0.0),
			last_drag_pos: (0.0, 0.0),
			last_drag_time: 0.0,
			inertial: Vec::new(),
		}
	}

	/// Rebuilds the scene for a new friend list. Clears every piece of
	/// transient state first so a reload never keeps stale references.
	pub fn load(&mut self, friends: &[FriendRecord]) {
		self.selected = None;
		self.dragged = None;
		self.hovered_edge = None;
		self.editing_edge = None;
		self.inertial.clear();
		self.bounds.node_radius =
			Bounds::node_radius_for(self.bounds.width, self.bounds.height, friends.len() + 1);
		self.scene.load(friends, &self.bounds);
		let bounds = self.bounds;
		let (nodes, edges) = self.scene.split_mut();
		self.layout.reset(nodes, edges, &bounds);
	}

	/// Flips Browse ⇄ Edit. Either direction drops the selection and any
	/// in-progress label edit.
	pub fn toggle_mode(&mut self) -> Mode {
		self.mode = match self.mode {
			Mode::Browse => Mode::Edit,
			Mode::Edit => Mode::Browse,
		};
		self.selected = None;
		self.editing_edge = None;
		self.mode
	}

	pub fn edit_mode(&self) -> bool {
		self.mode == Mode::Edit
	}

	fn over_info_icon(x: f64, y: f64) -> bool {
		geometry::inside_circle(
			x,
			y,
			INFO_ICON_CENTER.0,
			INFO_ICON_CENTER.1,
			INFO_ICON_RADIUS,
		)
	}

	pub fn pointer_down(
		&mut self,
		x: f64,
		y: f64,
		button: PointerButton,
		now_ms: f64,
	) -> PointerOutcome {
		if Self::over_info_icon(x, y) {
			return PointerOutcome::None;
		}
		match button {
			PointerButton::Primary => self.primary_down(x, y, now_ms),
			PointerButton::Secondary => self.secondary_down(x, y),
		}
	}

	fn primary_down(&mut self, x: f64, y: f64, now_ms: f64) -> PointerOutcome {
		let radius = self.bounds.node_radius;
		if let Some(id) = self.scene.node_at(x, y, radius) {
			let mut outcome = PointerOutcome::None;
			if self.mode == Mode::Edit {
				match self.selected {
					Some(selected) if selected != id => {
						// Second pick completes a mutual tie. Only a brand
						// new edge opens its label for naming.
						match self.scene.add_or_upgrade_edge(selected, id, true) {
							Some(EdgeOutcome::Created(key)) => {
								self.editing_edge = Some(key);
								outcome = PointerOutcome::BeginLabelEdit(key);
								self.layout.wake(WAKE_DRAG);
							}
							Some(EdgeOutcome::Upgraded(_)) => self.layout.wake(WAKE_DRAG),
							_ => {}
						}
						self.selected = None;
					}
					_ => self.selected = Some(id),
				}
			}
			// Dragging works in both modes.
			self.dragged = Some(id);
			self.drag_velocity = (0.0, 0.0);
			self.last_drag_pos = (x, y);
			self.last_drag_time = now_ms;
			self.inertial.retain(|&n| n != id);
			return outcome;
		}

		if self.scene.edge_at(x, y, radius).is_none() {
			// Empty canvas: deselect and end any label edit.
			self.selected = None;
			self.editing_edge = None;
			return PointerOutcome::ClearLabelEdits;
		}
		PointerOutcome::None
	}

	fn secondary_down(&mut self, x: f64, y: f64) -> PointerOutcome {
		if self.mode != Mode::Edit {
			return PointerOutcome::None;
		}
		let radius = self.bounds.node_radius;
		if let Some(id) = self.scene.node_at(x, y, radius) {
			if let Some(selected) = self.selected {
				if selected != id {
					// One-way tie from the earlier pick to this node. A new
					// edge opens its label for naming, same as a mutual one.
					let out = self.scene.add_or_upgrade_edge(selected, id, false);
					self.selected = None;
					if let Some(EdgeOutcome::Created(key)) = out {
						self.editing_edge = Some(key);
						self.layout.wake(WAKE_DRAG);
						return PointerOutcome::BeginLabelEdit(key);
					}
				}
			}
			return PointerOutcome::None;
		}
		if let Some(key) = self.scene.edge_at(x, y, radius) {
			if self.scene.remove_edge(key) {
				if self.editing_edge == Some(key) {
					self.editing_edge = None;
				}
				if self.hovered_edge == Some(key) {
					self.hovered_edge = None;
				}
				self.layout.wake(WAKE_DRAG);
			}
		}
		PointerOutcome::None
	}

	pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) {
		self.info_hovered = Self::over_info_icon(x, y);

		if let Some(id) = self.dragged {
			let dt = now_ms - self.last_drag_time;
			if dt > 0.0 {
				// Instantaneous velocity, scaled to a 16 ms frame.
				self.drag_velocity = (
					(x - self.last_drag_pos.0) / dt * 16.0,
					(y - self.last_drag_pos.1) / dt * 16.0,
				);
				self.last_drag_pos = (x, y);
				self.last_drag_time = now_ms;
			}
			if let Some(node) = self.scene.find_node_mut(id) {
				node.x = x;
				node.y = y;
				node.pinned = Some((x, y));
				node.custom_pos = true;
			}
			self.layout.wake(WAKE_DRAG);
		}

		self.hovered_edge = self.scene.edge_at(x, y, self.bounds.node_radius);
	}

	pub fn pointer_up(&mut self) {
		let Some(id) = self.dragged.take() else {
			return;
		};
		let (vx, vy) = self.drag_velocity;
		if let Some(node) = self.scene.find_node_mut(id) {
			node.pinned = None;
			if !node.is_self && (vx.abs() > INERTIA_START_THRESHOLD || vy.abs() > INERTIA_START_THRESHOLD)
			{
				// The self node gets no inertia; the centering pull
				// carries it home instead.
				node.vx = vx;
				node.vy = vy;
				self.inertial.push(id);
			}
		}
		self.layout.wake(WAKE_RELEASE);
	}

	/// Drag abandoned (pointer left the canvas): release without inertia.
	pub fn pointer_leave(&mut self) {
		if let Some(id) = self.dragged.take() {
			if let Some(node) = self.scene.find_node_mut(id) {
				node.pinned = None;
			}
			self.layout.wake(WAKE_RELEASE);
		}
		self.hovered_edge = None;
		self.info_hovered = false;
	}

	/// Double-click activates label editing for the edge under the
	/// pointer, in edit mode only and never through a node body.
	pub fn double_click(&mut self, x: f64, y: f64) -> Option<EdgeKey> {
		if self.mode != Mode::Edit {
			return None;
		}
		let radius = self.bounds.node_radius;
		if self.scene.inside_any_node(x, y, radius) {
			return None;
		}
		let key = self.scene.edge_at(x, y, radius)?;
		self.editing_edge = Some(key);
		Some(key)
	}

	/// Commits label text typed into the overlay input; returns the text
	/// as stored (trimmed, defaulted when empty).
	pub fn commit_label(&mut self, key: EdgeKey, text: &str) -> Option<String> {
		if self.editing_edge == Some(key) {
			self.editing_edge = None;
		}
		self.scene.set_edge_label(key, text)
	}

	/// Container geometry changed: recompute the node radius and let the
	/// layout re-settle.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds.width = width;
		self.bounds.height = height;
		self.bounds.node_radius =
			Bounds::node_radius_for(width, height, self.scene.nodes().len());
		let bounds = self.bounds;
		let (nodes, _) = self.scene.split_mut();
		self.layout.resize(nodes, &bounds);
	}

	/// Per-frame advance: one layout tick while live, then the inertia
	/// system.
	pub fn frame(&mut self) {
		if !self.layout.stabilized() {
			let bounds = self.bounds;
			let (nodes, edges) = self.scene.split_mut();
			self.layout.tick(nodes, edges, &bounds);
		}
		self.advance_inertia();
	}

	pub fn is_inertial(&self, id: NodeId) -> bool {
		self.inertial.contains(&id)
	}

	fn advance_inertia(&mut self) {
		let b = self.bounds;
		let r = b.node_radius;
		let mut keep = Vec::with_capacity(self.inertial.len());
		for &id in &self.inertial {
			let Some(node) = self.scene.find_node_mut(id) else {
				continue;
			};
			if node.is_self {
				continue;
			}
			node.x += node.vx;
			node.y += node.vy;
			node.vx *= INERTIA_FRICTION;
			node.vy *= INERTIA_FRICTION;

			// Bounce off the boundary, shedding energy.
			if node.x < r {
				node.x = r;
				node.vx = -node.vx * BOUNCE_RETENTION;
			} else if node.x > b.width - r {
				node.x = b.width - r;
				node.vx = -node.vx * BOUNCE_RETENTION;
			}
			if node.y < r {
				node.y = r;
				node.vy = -node.vy * BOUNCE_RETENTION;
			} else if node.y > b.height - r {
				node.y = b.height - r;
				node.vy = -node.vy * BOUNCE_RETENTION;
			}

			if node.vx.abs() < INERTIA_MIN_SPEED && node.vy.abs() < INERTIA_MIN_SPEED {
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				keep.push(id);
			}
		}
		self.inertial = keep;

		// The self node eases home whenever it is free.
		if self.dragged != Some(SELF_NODE_ID) {
			let (cx, cy) = b.center();
			if let Some(node) = self.scene.find_node_mut(SELF_NODE_ID) {
				if node.pinned.is_none() {
					let dx = cx - node.x;
					let dy = cy - node.y;
					if dx.hypot(dy) > 1.0 {
						node.x += dx * SELF_HOMING;
						node.y += dy * SELF_HOMING;
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::super::layout::CircularLayout;
	use super::super::storage::MemoryStore;
	use super::super::types::DEFAULT_EDGE_LABEL;
	use super::*;

	fn friends(n: usize) -> Vec<FriendRecord> {
		(1..=n as NodeId)
			.map(|i| FriendRecord::new(i, &format!("friend {i}"), "🙂"))
			.collect()
	}

	fn state_with(store: Rc<MemoryStore>, n: usize) -> GraphState {
		let bounds = Bounds {
			width: 800.0,
			height: 600.0,
			node_radius: 30.0,
		};
		let mut state = GraphState::new(
			Scene::new(store),
			Box::new(CircularLayout::default()),
			bounds,
		);
		state.load(&friends(n));
		state
	}

	fn node_pos(state: &GraphState, id: NodeId) -> (f64, f64) {
		let n = state.scene.find_node(id).unwrap();
		(n.x, n.y)
	}

	fn click(state: &mut GraphState, id: NodeId, button: PointerButton) -> PointerOutcome {
		let (x, y) = node_pos(state, id);
		let out = state.pointer_down(x, y, button, 0.0);
		state.pointer_up();
		out
	}

	fn move_node(state: &mut GraphState, id: NodeId, x: f64, y: f64) {
		let node = state.scene.find_node_mut(id).unwrap();
		node.x = x;
		node.y = y;
	}

	#[test]
	fn browse_mode_never_mutates_edges() {
		let store = Rc::new(MemoryStore::default());
		let mut state = state_with(store.clone(), 2);
		assert_eq!(state.mode, Mode::Browse);

		click(&mut state, 1, PointerButton::Primary);
		click(&mut state, 2, PointerButton::Primary);
		assert!(state.scene.edges().is_empty());
		assert_eq!(state.selected, None);

		click(&mut state, 1, PointerButton::Secondary);
		click(&mut state, 2, PointerButton::Secondary);
		assert!(state.scene.edges().is_empty());
		assert!(store.saved().is_empty());
	}

	#[test]
	fn end_to_end_edit_scenario() {
		let store = Rc::new(MemoryStore::default());
		let mut state = state_with(store.clone(), 2);
		assert!(state.scene.edges().is_empty());

		assert_eq!(state.toggle_mode(), Mode::Edit);

		// Left-click friend 1 then friend 2: one mutual edge, default label.
		click(&mut state, 1, PointerButton::Primary);
		assert_eq!(state.selected, Some(1));
		let out = click(&mut state, 2, PointerButton::Primary);
		let key = EdgeKey { source: 1, target: 2 };
		assert_eq!(out, PointerOutcome::BeginLabelEdit(key));
		assert_eq!(state.selected, None);
		assert_eq!(state.scene.edges().len(), 1);
		let edge = state.scene.edge(key).unwrap();
		assert!(edge.bidirectional);
		assert_eq!(edge.label, DEFAULT_EDGE_LABEL);
		assert_eq!(store.saved().len(), 1);

		// Right-click friend 2 then friend 1: pair already mutual, no-op.
		click(&mut state, 2, PointerButton::Secondary);
		click(&mut state, 1, PointerButton::Secondary);
		assert_eq!(state.scene.edges().len(), 1);
		assert!(state.scene.edge(key).unwrap().bidirectional);

		// Move the pair clear of the self node (which would otherwise
		// occlude the segment), then right-click the edge midway: it is
		// removed and unsaved.
		move_node(&mut state, 1, 200.0, 150.0);
		move_node(&mut state, 2, 600.0, 150.0);
		state.pointer_down(400.0, 150.0, PointerButton::Secondary, 0.0);
		assert!(state.scene.edges().is_empty());
		assert!(store.saved().is_empty());
	}

	#[test]
	fn directed_edge_flow_selects_then_links_one_way() {
		let store = Rc::new(MemoryStore::default());
		let mut state = state_with(store, 2);
		state.toggle_mode();
		click(&mut state, 1, PointerButton::Primary);
		// Right-click creation opens the fresh edge's label for naming,
		// same as left-click creation.
		let key = EdgeKey { source: 1, target: 2 };
		let out = click(&mut state, 2, PointerButton::Secondary);
		assert_eq!(out, PointerOutcome::BeginLabelEdit(key));
		assert_eq!(state.editing_edge, Some(key));
		assert_eq!(state.scene.edges().len(), 1);
		let edge = &state.scene.edges()[0];
		assert_eq!((edge.source, edge.target), (1, 2));
		assert!(!edge.bidirectional);
		// A later mutual request upgrades that same edge in place but does
		// not reopen the label.
		state.editing_edge = None;
		click(&mut state, 2, PointerButton::Primary);
		let out = click(&mut state, 1, PointerButton::Primary);
		assert_eq!(out, PointerOutcome::None);
		assert_eq!(state.editing_edge, None);
		assert_eq!(state.scene.edges().len(), 1);
		assert!(state.scene.edges()[0].bidirectional);
	}

	#[test]
	fn repeated_secondary_link_requests_leave_label_editing_alone() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.toggle_mode();
		click(&mut state, 1, PointerButton::Primary);
		click(&mut state, 2, PointerButton::Secondary);
		state.editing_edge = None;
		// The pair already has an edge, so nothing new to name.
		click(&mut state, 1, PointerButton::Primary);
		let out = click(&mut state, 2, PointerButton::Secondary);
		assert_eq!(out, PointerOutcome::None);
		assert_eq!(state.editing_edge, None);
		assert_eq!(state.scene.edges().len(), 1);
	}

	#[test]
	fn clicking_the_same_node_twice_keeps_it_selected() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.toggle_mode();
		click(&mut state, 1, PointerButton::Primary);
		click(&mut state, 1, PointerButton::Primary);
		assert_eq!(state.selected, Some(1));
		assert!(state.scene.edges().is_empty());
	}

	#[test]
	fn empty_canvas_click_clears_selection_and_label_edits() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.toggle_mode();
		click(&mut state, 1, PointerButton::Primary);
		assert_eq!(state.selected, Some(1));
		// Far corner, away from nodes and edges.
		let out = state.pointer_down(790.0, 590.0, PointerButton::Primary, 0.0);
		assert_eq!(out, PointerOutcome::ClearLabelEdits);
		assert_eq!(state.selected, None);
		assert_eq!(state.editing_edge, None);
	}

	#[test]
	fn toggling_mode_clears_selection() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.toggle_mode();
		click(&mut state, 1, PointerButton::Primary);
		assert_eq!(state.toggle_mode(), Mode::Browse);
		assert_eq!(state.selected, None);
	}

	#[test]
	fn dragging_moves_the_node_and_marks_it_custom() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		let (x, y) = node_pos(&state, 1);
		state.pointer_down(x, y, PointerButton::Primary, 0.0);
		state.pointer_move(200.0, 200.0, 16.0);
		let node = state.scene.find_node(1).unwrap();
		assert_eq!((node.x, node.y), (200.0, 200.0));
		assert_eq!(node.pinned, Some((200.0, 200.0)));
		assert!(node.custom_pos);
		state.pointer_up();
		assert_eq!(state.scene.find_node(1).unwrap().pinned, None);
	}

	#[test]
	fn fast_release_starts_inertia_and_friction_stops_it() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		let (x, y) = node_pos(&state, 1);
		state.pointer_down(x, y, PointerButton::Primary, 0.0);
		// 160 px in 16 ms: well above the inertia threshold.
		state.pointer_move(400.0, 300.0, 8.0);
		state.pointer_move(400.0, 140.0, 24.0);
		state.pointer_up();
		assert!(state.is_inertial(1));

		let before = node_pos(&state, 1);
		state.frame();
		let after = node_pos(&state, 1);
		assert_ne!(before, after);

		for _ in 0..500 {
			state.frame();
		}
		assert!(!state.is_inertial(1));
		let node = state.scene.find_node(1).unwrap();
		assert_eq!((node.vx, node.vy), (0.0, 0.0));
	}

	#[test]
	fn slow_release_gets_no_inertia() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		let (x, y) = node_pos(&state, 1);
		state.pointer_down(x, y, PointerButton::Primary, 0.0);
		state.pointer_move(x + 0.5, y, 1000.0);
		state.pointer_up();
		assert!(!state.is_inertial(1));
	}

	#[test]
	fn self_node_release_eases_back_to_center() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		let (x, y) = node_pos(&state, SELF_NODE_ID);
		state.pointer_down(x, y, PointerButton::Primary, 0.0);
		state.pointer_move(100.0, 100.0, 8.0);
		state.pointer_up();
		assert!(!state.is_inertial(SELF_NODE_ID));

		let (cx, cy) = state.bounds.center();
		let before = (100.0f64 - cx).hypot(100.0 - cy);
		for _ in 0..100 {
			state.frame();
		}
		let (nx, ny) = node_pos(&state, SELF_NODE_ID);
		assert!((nx - cx).hypot(ny - cy) < before / 10.0);
	}

	#[test]
	fn inertial_nodes_bounce_inside_the_canvas() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		let (x, y) = node_pos(&state, 1);
		state.pointer_down(x, y, PointerButton::Primary, 0.0);
		// Slam toward the right edge.
		state.pointer_move(780.0, 300.0, 8.0);
		state.pointer_move(799.0, 300.0, 16.0);
		state.pointer_up();
		for _ in 0..200 {
			state.frame();
			let n = state.scene.find_node(1).unwrap();
			let r = state.bounds.node_radius;
			assert!(n.x >= r && n.x <= state.bounds.width - r);
			assert!(n.y >= r && n.y <= state.bounds.height - r);
		}
	}

	#[test]
	fn double_click_edits_labels_only_in_edit_mode() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.toggle_mode();
		click(&mut state, 1, PointerButton::Primary);
		click(&mut state, 2, PointerButton::Primary);
		move_node(&mut state, 1, 200.0, 150.0);
		move_node(&mut state, 2, 600.0, 150.0);
		let (mx, my) = (400.0, 150.0);

		let key = EdgeKey { source: 1, target: 2 };
		state.editing_edge = None;
		assert_eq!(state.double_click(mx, my), Some(key));
		assert_eq!(state.editing_edge, Some(key));

		state.toggle_mode();
		assert_eq!(state.double_click(mx, my), None);
	}

	#[test]
	fn commit_label_trims_and_defaults() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.toggle_mode();
		click(&mut state, 1, PointerButton::Primary);
		click(&mut state, 2, PointerButton::Primary);
		let key = EdgeKey { source: 1, target: 2 };
		assert_eq!(state.commit_label(key, " college "), Some("college".into()));
		assert_eq!(state.editing_edge, None);
		assert_eq!(
			state.commit_label(key, ""),
			Some(DEFAULT_EDGE_LABEL.to_owned())
		);
	}

	#[test]
	fn resize_recomputes_radius_and_keeps_layout_usable() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.resize(300.0, 300.0);
		assert_eq!(state.bounds.width, 300.0);
		// 3 nodes on a 300px container: 300 / (3 * 1.5) caps at the clamp.
		assert_eq!(state.bounds.node_radius, 40.0);
		// Circular fallback re-arranges on resize.
		let (cx, cy) = state.bounds.center();
		let (sx, sy) = node_pos(&state, SELF_NODE_ID);
		assert_eq!((sx, sy), (cx, cy));
	}

	#[test]
	fn presses_on_the_info_icon_do_nothing() {
		let mut state = state_with(Rc::new(MemoryStore::default()), 2);
		state.toggle_mode();
		let out = state.pointer_down(
			INFO_ICON_CENTER.0,
			INFO_ICON_CENTER.1,
			PointerButton::Primary,
			0.0,
		);
		assert_eq!(out, PointerOutcome::None);
		assert_eq!(state.dragged, None);
		assert_eq!(state.selected, None);
	}
}
