//! DOM `<input>` overlays carrying the relationship text. The canvas
//! draws everything else; labels are real elements so they can take
//! focus for inline editing. One input per edge, reconciled every frame
//! against the scene's edge set and repositioned onto the trimmed
//! segment midpoint.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlInputElement};

use super::geometry;
use super::state::GraphState;
use super::types::EdgeKey;

/// Shared ownership handle the component and the label closures use to
/// reach the interaction state.
pub type SharedState = Rc<RefCell<Option<GraphState>>>;

struct LabelEntry {
	input: HtmlInputElement,
	// Closures must outlive the element's listeners.
	_on_blur: Closure<dyn FnMut(web_sys::FocusEvent)>,
	_on_keydown: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

/// Owns every label element inside the graph container.
pub struct LabelLayer {
	container: HtmlElement,
	entries: HashMap<EdgeKey, LabelEntry>,
}

struct LabelPlacement {
	key: EdgeKey,
	label: String,
	x: f64,
	y: f64,
	font_size: f64,
}

impl LabelLayer {
	pub fn new(container: HtmlElement) -> Self {
		Self {
			container,
			entries: HashMap::new(),
		}
	}

	/// Removes every label element. Guarded so a torn-down DOM never
	/// panics the caller.
	pub fn clear(&mut self) {
		for (_, entry) in self.entries.drain() {
			entry.input.remove();
		}
	}

	/// Reconciles inputs with the current edge set: creates missing
	/// labels, drops stale ones and repositions the rest.
	pub fn sync(&mut self, state: &SharedState) {
		let placements = Self::placements(state);

		let live: Vec<EdgeKey> = placements.iter().map(|p| p.key).collect();
		self.entries.retain(|key, entry| {
			if live.contains(key) {
				true
			} else {
				entry.input.remove();
				false
			}
		});

		for placement in placements {
			if !self.entries.contains_key(&placement.key) {
				if let Some(entry) = Self::create(&self.container, &placement, state) {
					self.entries.insert(placement.key, entry);
				}
			}
			let Some(entry) = self.entries.get(&placement.key) else {
				continue;
			};
			// Never clobber text the user is typing.
			if entry.input.read_only() && entry.input.value() != placement.label {
				entry.input.set_value(&placement.label);
			}
			Self::position(&entry.input, &placement);
		}
	}

	fn placements(state: &SharedState) -> Vec<LabelPlacement> {
		let borrow = state.borrow();
		let Some(state) = borrow.as_ref() else {
			return Vec::new();
		};
		let radius = state.bounds.node_radius;
		let font_size = (radius * 0.3).clamp(8.0, 10.0);
		state
			.scene
			.edges()
			.iter()
			.filter_map(|edge| {
				let source = state.scene.find_node(edge.source)?;
				let target = state.scene.find_node(edge.target)?;
				let [x1, y1, x2, y2] =
					geometry::trimmed_segment(source.x, source.y, target.x, target.y, radius)?;
				Some(LabelPlacement {
					key: edge.key(),
					label: edge.label.clone(),
					x: (x1 + x2) / 2.0,
					y: (y1 + y2) / 2.0,
					font_size,
				})
			})
			.collect()
	}

	fn position(input: &HtmlInputElement, placement: &LabelPlacement) {
		let text_len = input.value().chars().count() as f64;
		let width = (text_len * placement.font_size * 0.7).clamp(30.0, 80.0);
		let style = input.style();
		let _ = style.set_property("font-size", &format!("{}px", placement.font_size));
		let _ = style.set_property("width", &format!("{width}px"));
		let _ = style.set_property("left", &format!("{}px", placement.x - width / 2.0));
		let _ = style.set_property("top", &format!("{}px", placement.y - placement.font_size / 2.0));
	}

	fn create(
		container: &HtmlElement,
		placement: &LabelPlacement,
		state: &SharedState,
	) -> Option<LabelEntry> {
		let document = container.owner_document()?;
		let input: HtmlInputElement = document
			.create_element("input")
			.ok()?
			.dyn_into()
			.ok()?;
		input.set_type("text");
		input.set_class_name("relation-label");
		input.set_value(&placement.label);
		set_read_only(&input);

		let style = input.style();
		let _ = style.set_property("position", "absolute");
		let _ = style.set_property("border-radius", "3px");
		let _ = style.set_property("padding", "1px 2px");
		let _ = style.set_property("text-align", "center");
		let _ = style.set_property("min-width", "30px");
		let _ = style.set_property("z-index", "5");

		let key = placement.key;
		let on_blur = {
			let input = input.clone();
			let state = state.clone();
			Closure::new(move |_: web_sys::FocusEvent| {
				if !input.read_only() {
					commit(&input, &state, key);
				}
			})
		};
		let on_keydown = {
			let input = input.clone();
			let state = state.clone();
			Closure::new(move |ev: web_sys::KeyboardEvent| {
				if ev.key() == "Enter" {
					ev.prevent_default();
					commit(&input, &state, key);
				}
			})
		};
		input
			.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())
			.ok()?;
		input
			.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
			.ok()?;

		container.append_child(&input).ok()?;
		Some(LabelEntry {
			input,
			_on_blur: on_blur,
			_on_keydown: on_keydown,
		})
	}

	/// Unlocks the label for the given edge and gives it focus.
	pub fn activate(&self, key: EdgeKey) {
		let Some(entry) = self.entries.get(&key) else {
			return;
		};
		let input = &entry.input;
		input.set_read_only(false);
		let style = input.style();
		let _ = style.set_property("pointer-events", "auto");
		let _ = style.set_property("background-color", "rgba(255, 255, 255, 0.9)");
		let _ = style.set_property("border", "1px solid #4a90e2");
		let _ = input.focus();
		input.select();
	}

	/// Returns every label to its read-only presentation.
	pub fn set_all_read_only(&self) {
		for entry in self.entries.values() {
			set_read_only(&entry.input);
		}
	}
}

fn set_read_only(input: &HtmlInputElement) {
	input.set_read_only(true);
	let style = input.style();
	let _ = style.set_property("pointer-events", "none");
	let _ = style.set_property("background-color", "rgba(255, 255, 255, 0.6)");
	let _ = style.set_property("border", "1px solid #ccc");
}

fn commit(input: &HtmlInputElement, state: &SharedState, key: EdgeKey) {
	let committed = state
		.borrow_mut()
		.as_mut()
		.and_then(|s| s.commit_label(key, &input.value()));
	if let Some(text) = committed {
		input.set_value(&text);
	}
	set_read_only(input);
}
