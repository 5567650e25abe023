use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::labels::{LabelLayer, SharedState};
use super::layout;
use super::raf::{self, RafHandle};
use super::render;
use super::scene::Scene;
use super::state::{GraphState, PointerButton, PointerOutcome};
use super::storage::LocalStorageStore;
use super::types::{Bounds, FriendRecord, GraphError, Mode};

type SharedLabels = Rc<RefCell<Option<LabelLayer>>>;
type SharedClosure<T> = Rc<RefCell<Option<Closure<T>>>>;

fn event_coords(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn container_size(container: &HtmlElement) -> (f64, f64) {
	let rect = container.get_bounding_client_rect();
	if rect.width() > 0.0 && rect.height() > 0.0 {
		(rect.width(), rect.height())
	} else {
		// Container not laid out yet (hidden host); a usable default
		// until the next resize.
		(800.0, 600.0)
	}
}

/// Sizes the backing store for the device pixel ratio while keeping CSS
/// pixels as the coordinate space.
fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	let ratio = pixel_ratio();
	canvas.set_width((width * ratio) as u32);
	canvas.set_height((height * ratio) as u32);
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{width}px"));
	let _ = style.set_property("height", &format!("{height}px"));
}

fn pixel_ratio() -> f64 {
	web_sys::window()
		.map(|w| w.device_pixel_ratio())
		.unwrap_or(1.0)
}

fn apply_outcome(labels: &SharedLabels, state: &SharedState, outcome: PointerOutcome) {
	if outcome == PointerOutcome::None {
		return;
	}
	let mut borrow = labels.borrow_mut();
	let Some(layer) = borrow.as_mut() else {
		return;
	};
	match outcome {
		PointerOutcome::BeginLabelEdit(key) => {
			// The edge may have been created this event; make sure its
			// input exists before focusing it.
			layer.sync(state);
			layer.activate(key);
		}
		PointerOutcome::ClearLabelEdits => layer.set_all_read_only(),
		PointerOutcome::None => {}
	}
}

/// Interactive friend-relationship graph: canvas, mode-toggle button and
/// inline edge-label editing, mounted inside its own container element.
#[component]
pub fn RelationshipGraph(
	#[prop(into)] friends: Signal<Vec<FriendRecord>>,
	#[prop(default = true)] use_force: bool,
	#[prop(default = None)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (edit_mode, set_edit_mode) = signal(false);

	let state: SharedState = Rc::new(RefCell::new(None));
	let labels: SharedLabels = Rc::new(RefCell::new(None));
	let raf_handle: Rc<RefCell<Option<RafHandle>>> = Rc::new(RefCell::new(None));
	let resize_cb: SharedClosure<dyn FnMut()> = Rc::new(RefCell::new(None));
	let key_cb: SharedClosure<dyn FnMut(web_sys::KeyboardEvent)> = Rc::new(RefCell::new(None));

	let (state_init, labels_init, raf_init, resize_init, key_init) = (
		state.clone(),
		labels.clone(),
		raf_handle.clone(),
		resize_cb.clone(),
		key_cb.clone(),
	);

	Effect::new(move |_| {
		let friend_list = friends.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(container) = container_ref.get() else {
			error!("{}", GraphError::MissingContainer);
			return;
		};
		let container: HtmlElement = container.into();
		let window: Window = web_sys::window().unwrap();

		// Idempotent re-init: stop the previous loop and drop stale
		// overlays before rebuilding the scene.
		if let Some(handle) = raf_init.borrow_mut().take() {
			handle.cancel();
		}
		if let Some(layer) = labels_init.borrow_mut().as_mut() {
			layer.clear();
		}

		let (width, height) = container_size(&container);
		size_canvas(&canvas, width, height);
		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("{}", GraphError::MissingContext);
				return;
			}
		};

		let bounds = Bounds::new(width, height, friend_list.len() + 1);
		let mut graph = GraphState::new(
			Scene::new(Rc::new(LocalStorageStore)),
			layout::select_strategy(use_force),
			bounds,
		);
		graph.load(&friend_list);
		*state_init.borrow_mut() = Some(graph);
		*labels_init.borrow_mut() = Some(LabelLayer::new(container.clone()));
		set_edit_mode.set(false);

		if resize_init.borrow().is_none() {
			let (state_resize, canvas_resize, container_resize) =
				(state_init.clone(), canvas.clone(), container.clone());
			*resize_init.borrow_mut() = Some(Closure::new(move || {
				let (w, h) = container_size(&container_resize);
				size_canvas(&canvas_resize, w, h);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(w, h);
				}
			}));
			if let Some(ref cb) = *resize_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		if on_dismiss.is_some() && key_init.borrow().is_none() {
			*key_init.borrow_mut() = Some(Closure::new(move |ev: web_sys::KeyboardEvent| {
				if ev.key() == "Escape" {
					if let Some(cb) = on_dismiss.as_ref() {
						cb.run(());
					}
				}
			}));
			if let Some(ref cb) = *key_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, labels_anim) = (state_init.clone(), labels_init.clone());
		*raf_init.borrow_mut() = Some(raf::start(move || {
			{
				let mut borrow = state_anim.borrow_mut();
				if let Some(ref mut s) = *borrow {
					s.frame();
					render::render(s, &ctx, pixel_ratio());
				}
			}
			if let Some(ref mut layer) = *labels_anim.borrow_mut() {
				layer.sync(&state_anim);
			}
		}));
	});

	let (state_md, labels_md) = (state.clone(), labels.clone());
	let on_mousedown = move |ev: MouseEvent| {
		ev.prevent_default();
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = event_coords(&canvas.into(), &ev);
		let outcome = match *state_md.borrow_mut() {
			Some(ref mut s) => s.pointer_down(x, y, PointerButton::Primary, js_sys::Date::now()),
			None => return,
		};
		apply_outcome(&labels_md, &state_md, outcome);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = event_coords(&canvas.into(), &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y, js_sys::Date::now());
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let (state_dc, labels_dc) = (state.clone(), labels.clone());
	let on_dblclick = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = event_coords(&canvas.into(), &ev);
		let key = match *state_dc.borrow_mut() {
			Some(ref mut s) => s.double_click(x, y),
			None => return,
		};
		if let Some(key) = key {
			apply_outcome(&labels_dc, &state_dc, PointerOutcome::BeginLabelEdit(key));
		}
	};

	let (state_cm, labels_cm) = (state.clone(), labels.clone());
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = event_coords(&canvas.into(), &ev);
		let outcome = match *state_cm.borrow_mut() {
			Some(ref mut s) => s.pointer_down(x, y, PointerButton::Secondary, js_sys::Date::now()),
			None => return,
		};
		apply_outcome(&labels_cm, &state_cm, outcome);
	};

	let (state_tg, labels_tg) = (state.clone(), labels.clone());
	let on_toggle = move |_| {
		let mode = match *state_tg.borrow_mut() {
			Some(ref mut s) => s.toggle_mode(),
			None => return,
		};
		set_edit_mode.set(mode == Mode::Edit);
		if let Some(layer) = labels_tg.borrow().as_ref() {
			layer.set_all_read_only();
		}
	};

	let (state_cl, labels_cl, raf_cl, resize_cl, key_cl) =
		(state, labels, raf_handle, resize_cb, key_cb);
	let cleanup = send_wrapper::SendWrapper::new(move || {
		if let Some(handle) = raf_cl.borrow_mut().take() {
			handle.cancel();
		}
		if let Some(layer) = labels_cl.borrow_mut().as_mut() {
			layer.clear();
		}
		if let Some(window) = web_sys::window() {
			if let Some(cb) = resize_cl.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			if let Some(cb) = key_cl.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
			}
		}
		*state_cl.borrow_mut() = None;
	});
	on_cleanup(move || cleanup.take()());

	view! {
		<div node_ref=container_ref class="relationship-graph">
			<button class="mode-toggle-btn" on:click=on_toggle>
				{move || if edit_mode.get() { "Exit edit mode" } else { "Enter edit mode" }}
			</button>
			<canvas
				node_ref=canvas_ref
				class="relationship-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:dblclick=on_dblclick
				on:contextmenu=on_contextmenu
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
