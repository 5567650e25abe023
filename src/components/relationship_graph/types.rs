use serde::{Deserialize, Serialize};

/// Node identifier. Edges reference nodes by id only, never by index or
/// embedded reference, so rebuilding the node set cannot leave dangling
/// pointers.
pub type NodeId = u32;

/// Reserved id for the node representing the graph's owner.
pub const SELF_NODE_ID: NodeId = 0;

/// Sentinel label applied to an edge when no text has been supplied.
pub const DEFAULT_EDGE_LABEL: &str = "acquainted";

/// Friend record supplied by the host application. Only `id`, `name` and
/// `emoji` are used by the graph core; the remaining fields are accepted
/// for compatibility with the host's data model.
#[derive(Clone, Debug)]
pub struct FriendRecord {
	pub id: NodeId,
	pub name: String,
	pub emoji: String,
	pub birthdate: Option<String>,
	pub relationship: Option<String>,
	pub location: Option<String>,
}

impl FriendRecord {
	/// Convenience constructor for the fields the graph actually reads.
	pub fn new(id: NodeId, name: &str, emoji: &str) -> Self {
		Self {
			id,
			name: name.to_owned(),
			emoji: emoji.to_owned(),
			birthdate: None,
			relationship: None,
			location: None,
		}
	}
}

/// A positioned node in the scene.
#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: NodeId,
	pub name: String,
	pub emoji: String,
	pub is_self: bool,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Externally fixed position: set while the node is dragged, and for
	/// the self node until it is first released. A pinned node is exempt
	/// from free simulation movement.
	pub pinned: Option<(f64, f64)>,
	/// True once the user has dragged this node; the circular layout
	/// leaves such nodes where they were put.
	pub custom_pos: bool,
}

/// Identifies an edge by its stored endpoint order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
	pub source: NodeId,
	pub target: NodeId,
}

/// A labeled relationship between two nodes. Directional edges render an
/// arrowhead at the target end; bidirectional edges have no arrow.
#[derive(Clone, Debug)]
pub struct GraphEdge {
	pub source: NodeId,
	pub target: NodeId,
	pub bidirectional: bool,
	pub label: String,
}

impl GraphEdge {
	pub fn key(&self) -> EdgeKey {
		EdgeKey {
			source: self.source,
			target: self.target,
		}
	}

	pub fn touches(&self, id: NodeId) -> bool {
		self.source == id || self.target == id
	}

	/// True if this edge joins the same pair of nodes, in either order.
	pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
		(self.source == a && self.target == b) || (self.source == b && self.target == a)
	}
}

/// Wire format for one persisted edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEdge {
	#[serde(rename = "sourceId")]
	pub source_id: NodeId,
	#[serde(rename = "targetId")]
	pub target_id: NodeId,
	pub bidirectional: bool,
	#[serde(default)]
	pub label: String,
}

/// Top-level interaction mode. Structural edge mutation is only allowed
/// in `Edit`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	Browse,
	Edit,
}

/// Canvas extent plus the current node radius, recomputed on resize.
#[derive(Copy, Clone, Debug)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
	pub node_radius: f64,
}

impl Bounds {
	pub fn new(width: f64, height: f64, node_count: usize) -> Self {
		Self {
			width,
			height,
			node_radius: Self::node_radius_for(width, height, node_count),
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Radius scales with container size and shrinks as the graph grows,
	/// bounded to stay legible.
	pub fn node_radius_for(width: f64, height: f64, node_count: usize) -> f64 {
		// Zero-only fallback so an empty graph still gets a finite radius.
		let count = if node_count == 0 { 10.0 } else { node_count as f64 };
		let min_dimension = width.min(height);
		(min_dimension / (count * 1.5)).clamp(20.0, 40.0)
	}
}

/// Errors the graph core can report to its host.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	#[error("container element not available")]
	MissingContainer,
	#[error("canvas 2d context not available")]
	MissingContext,
	#[error("force simulation unavailable: {0}")]
	LayoutUnavailable(&'static str),
}
