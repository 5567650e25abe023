//! Repeating animation-frame task with an explicit cancel handle, so a
//! re-initialized graph can deterministically stop the previous loop
//! instead of leaving a stale callback mutating a replaced scene.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Handle for a running [`start`] loop.
pub struct RafHandle {
	cancelled: Rc<Cell<bool>>,
	raf_id: Rc<Cell<i32>>,
	closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RafHandle {
	/// Stops the loop and releases its callback. Safe to call more than
	/// once.
	pub fn cancel(&self) {
		self.cancelled.set(true);
		if let Some(window) = web_sys::window() {
			window.cancel_animation_frame(self.raf_id.get()).ok();
		}
		self.closure.borrow_mut().take();
	}
}

fn schedule(cb: &Closure<dyn FnMut()>, raf_id: &Rc<Cell<i32>>) {
	if let Some(window) = web_sys::window() {
		if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			raf_id.set(id);
		}
	}
}

/// Runs `frame` once per animation frame until the handle is cancelled.
pub fn start(mut frame: impl FnMut() + 'static) -> RafHandle {
	let cancelled = Rc::new(Cell::new(false));
	let raf_id = Rc::new(Cell::new(0));
	let closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let flag = cancelled.clone();
	let id_inner = raf_id.clone();
	let closure_inner = closure.clone();
	*closure.borrow_mut() = Some(Closure::new(move || {
		if flag.get() {
			return;
		}
		frame();
		if let Some(cb) = closure_inner.borrow().as_ref() {
			schedule(cb, &id_inner);
		}
	}));

	if let Some(cb) = closure.borrow().as_ref() {
		schedule(cb, &raf_id);
	}

	RafHandle {
		cancelled,
		raf_id,
		closure,
	}
}
