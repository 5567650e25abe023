//! Force-directed friend relationship graph: canvas renderer, physics
//! layout with a circular fallback, and inline relationship editing.

mod component;
mod geometry;
mod labels;
mod layout;
mod raf;
mod render;
mod scene;
mod state;
mod storage;
mod types;

pub use component::RelationshipGraph;
pub use types::FriendRecord;
