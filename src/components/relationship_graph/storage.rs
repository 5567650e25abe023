//! Edge persistence. The edge set is stored under its own key,
//! independent of the host's friend records; a missing or corrupt entry
//! just means "no saved relationships".

use log::warn;

use super::types::SavedEdge;

/// Fixed storage key for the serialized edge set.
pub const STORAGE_KEY: &str = "relationships_friendsGraph";

/// Where the scene saves and restores its edge set.
pub trait EdgeStore {
	fn load(&self) -> Vec<SavedEdge>;
	fn save(&self, edges: &[SavedEdge]);
}

/// Browser `localStorage`-backed store.
pub struct LocalStorageStore;

impl LocalStorageStore {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window().and_then(|w| w.local_storage().ok().flatten())
	}
}

impl EdgeStore for LocalStorageStore {
	fn load(&self) -> Vec<SavedEdge> {
		let Some(storage) = Self::storage() else {
			return Vec::new();
		};
		let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) else {
			return Vec::new();
		};
		match serde_json::from_str(&raw) {
			Ok(edges) => edges,
			Err(e) => {
				warn!("discarding corrupt saved relationships: {e}");
				Vec::new()
			}
		}
	}

	fn save(&self, edges: &[SavedEdge]) {
		let Some(storage) = Self::storage() else {
			warn!("localStorage unavailable, relationships not saved");
			return;
		};
		match serde_json::to_string(edges) {
			Ok(json) => {
				if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
					warn!("failed to save relationships: {e:?}");
				}
			}
			Err(e) => warn!("failed to serialize relationships: {e}"),
		}
	}
}

/// In-memory store used by the test suite.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore(std::cell::RefCell<Vec<SavedEdge>>);

#[cfg(test)]
impl MemoryStore {
	pub fn with(edges: Vec<SavedEdge>) -> Self {
		Self(std::cell::RefCell::new(edges))
	}

	pub fn saved(&self) -> Vec<SavedEdge> {
		self.0.borrow().clone()
	}
}

#[cfg(test)]
impl EdgeStore for MemoryStore {
	fn load(&self) -> Vec<SavedEdge> {
		self.0.borrow().clone()
	}

	fn save(&self, edges: &[SavedEdge]) {
		*self.0.borrow_mut() = edges.to_vec();
	}
}
