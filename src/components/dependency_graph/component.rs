use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::data;
use super::detail::DetailOverlay;
use super::events::{ViewerAction, ViewerEvent};
use super::render;
use super::state::{DependencyGraphState, OPERATIONAL_BIAS, STATUS_PERIOD_MS};
use super::types::{Category, EntityDetail};

fn canvas_coords(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

#[component]
pub fn DependencyGraphCanvas(
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<DependencyGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let status_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let selected: RwSignal<Option<EntityDetail>> = RwSignal::new(None);
	let (state_init, animate_init, status_init, resize_cb_init) = (
		state.clone(),
		animate.clone(),
		status_cb.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		if let Err(unresolved) = data::validate() {
			warn!("catalog contains unresolvable references: {unresolved:?}");
		}
		*state_init.borrow_mut() = Some(DependencyGraphState::new(w, h));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// Periodic operational re-roll for technology entities. Randomness
		// stays out here so dispatch is deterministic.
		let state_status = state_init.clone();
		let tech_count = data::ENTITIES
			.iter()
			.filter(|e| e.category == Category::Technology)
			.count();
		*status_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_status.borrow_mut() {
				let rolls = (0..tech_count)
					.map(|_| js_sys::Math::random() < OPERATIONAL_BIAS)
					.collect();
				let _ = s.dispatch(ViewerEvent::StatusTick { rolls });
			}
		}));
		if let Some(ref cb) = *status_init.borrow() {
			let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				STATUS_PERIOD_MS,
			);
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					let _ = s.dispatch(ViewerEvent::Frame { dt: 0.016 });
				}
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = canvas_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			let _ = s.dispatch(ViewerEvent::PointerDown { x, y });
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = canvas_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let _ = s.dispatch(ViewerEvent::PointerMove { x, y });
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			let _ = s.dispatch(ViewerEvent::PointerUp);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			let _ = s.dispatch(ViewerEvent::PointerLeave);
		}
	};

	let state_ck = state.clone();
	let on_click = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = canvas_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_ck.borrow_mut() {
			if let ViewerAction::OpenDetail(detail) = s.dispatch(ViewerEvent::Click { x, y }) {
				selected.set(Some(detail));
			}
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = canvas_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_dc.borrow_mut() {
			let _ = s.dispatch(ViewerEvent::DoubleClick { x, y });
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		// WheelEvent derefs to MouseEvent for the coordinate accessors.
		let (x, y) = canvas_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let _ = s.dispatch(ViewerEvent::Zoom { x, y, factor });
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="dependency-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<DetailOverlay detail=selected />
	}
}
