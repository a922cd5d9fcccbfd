use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Event, FocusEvent, HtmlCanvasElement, HtmlInputElement,
	KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::config::CanvasConfig;
use super::render;
use super::shortcuts;
use super::state::{CanvasFlags, PointerButton, SequenceCanvasState};
use super::theme::EmojiIcons;
use super::toast::{Toast, ToastNotifier, Toasts};
use super::toolbar::Toolbar;
use super::types::{Position, Quiz};

type SharedState = Rc<RefCell<Option<SequenceCanvasState>>>;

/// Window listeners owned by a gesture or by the component itself.
/// `release` removes every listener registered so far.
#[derive(Clone, Default)]
struct Listeners(Rc<RefCell<Vec<WindowListenerHandle>>>);

impl Listeners {
	fn push(&self, handle: WindowListenerHandle) {
		self.0.borrow_mut().push(handle);
	}

	fn is_empty(&self) -> bool {
		self.0.borrow().is_empty()
	}

	fn release(&self) {
		let handles: Vec<_> = self.0.borrow_mut().drain(..).collect();
		for handle in handles {
			handle.remove();
		}
	}
}

/// DOM handles every event handler needs to map events and push state out.
#[derive(Clone, Copy)]
struct ViewRefs {
	canvas: NodeRef<leptos::html::Canvas>,
	input: NodeRef<leptos::html::Input>,
	flags: RwSignal<CanvasFlags>,
}

impl ViewRefs {
	/// Pointer position relative to the canvas element.
	fn local_point(&self, ev: &MouseEvent) -> Option<Position> {
		let canvas: HtmlCanvasElement = self.canvas.get_untracked()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some(Position::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	}

	/// Pushes the controller's projections to the DOM outside the canvas.
	fn sync(&self, s: &SequenceCanvasState) {
		let flags = s.flags();
		if self.flags.get_untracked() != flags {
			self.flags.set(flags);
		}
		if let Some(canvas) = self.canvas.get_untracked() {
			let canvas: HtmlCanvasElement = canvas.into();
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", s.cursor());
		}
		if let Some(input) = self.input.get_untracked() {
			place_label_input(&input.into(), s);
		}
	}
}

/// Lays the label text field over the node being edited, or hides it.
fn place_label_input(input: &HtmlInputElement, s: &SequenceCanvasState) {
	let style = web_sys::HtmlElement::style(input);
	let Some(node) = s.editor.editing_node().and_then(|id| s.node(id)) else {
		let _ = style.set_property("display", "none");
		return;
	};
	let k = s.transform.k;
	let corner = s
		.transform
		.canvas_to_screen(Position::new(node.position.x + 36.0, node.position.y + 22.0));
	let _ = style.set_property("display", "block");
	let _ = style.set_property("left", &format!("{}px", corner.x));
	let _ = style.set_property("top", &format!("{}px", corner.y));
	let _ = style.set_property("width", &format!("{}px", (s.config.node_width - 48.0) * k));
	let _ = style.set_property("height", &format!("{}px", 24.0 * k));
	let _ = style.set_property("font-size", &format!("{}px", 14.0 * k));
}

/// Installs window-level move/up/blur listeners for the lifetime of one
/// gesture. Mouseup or window blur tears all of them down.
fn install_gesture_listeners(state: SharedState, gesture: Listeners, refs: ViewRefs) {
	let state_mm = state.clone();
	gesture.push(window_event_listener(ev::mousemove, move |ev: MouseEvent| {
		let Some(p) = refs.local_point(&ev) else {
			return;
		};
		if let Some(s) = state_mm.borrow_mut().as_mut() {
			s.pointer_move(p);
			refs.sync(s);
		}
	}));

	let (state_up, gesture_up) = (state.clone(), gesture.clone());
	gesture.push(window_event_listener(ev::mouseup, move |ev: MouseEvent| {
		if let Some(p) = refs.local_point(&ev) {
			if let Some(s) = state_up.borrow_mut().as_mut() {
				s.pointer_up(p);
				refs.sync(s);
			}
		}
		gesture_up.release();
	}));

	// Alt-tab mid-gesture never delivers a mouseup.
	let gesture_blur = gesture.clone();
	gesture.push(window_event_listener(ev::blur, move |_: FocusEvent| {
		if let Some(s) = state.borrow_mut().as_mut() {
			s.pointer_lost();
			refs.sync(s);
		}
		gesture_blur.release();
	}));
}

fn viewport_size(
	canvas: &HtmlCanvasElement,
	width: Option<f64>,
	height: Option<f64>,
	window: &Window,
) -> (f64, f64) {
	let parent = canvas.parent_element();
	let fallback = |v: Result<JsValue, JsValue>, default: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(default)
	};
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or_else(|| fallback(window.inner_width(), 800.0))
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or_else(|| fallback(window.inner_height(), 600.0))
		}),
	)
}

/// The quiz widget: toolbar, interactive canvas, label editor and toasts.
#[component]
pub fn SequenceCanvas(
	#[prop(optional)] quiz: Option<Quiz>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let refs = ViewRefs {
		canvas: NodeRef::new(),
		input: NodeRef::new(),
		flags: RwSignal::new(CanvasFlags::default()),
	};
	let toasts = RwSignal::new(Vec::<Toast>::new());
	let quiz = quiz.unwrap_or_default();

	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Rc::new(Cell::new(true));
	let (gesture, session) = (Listeners::default(), Listeners::default());

	let teardown = StoredValue::new_local((alive.clone(), gesture.clone(), session.clone()));
	on_cleanup(move || {
		let _ = teardown.try_with_value(|(alive, gesture, session)| {
			alive.set(false);
			gesture.release();
			session.release();
			log::debug!("sequence canvas torn down");
		});
	});

	let (state_init, animate_init, alive_init, session_init) =
		(state.clone(), animate.clone(), alive.clone(), session.clone());
	Effect::new(move |_| {
		let Some(canvas) = refs.canvas.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = viewport_size(&canvas, width, height, &window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("2d canvas context unavailable");
			return;
		};
		let s = SequenceCanvasState::new(quiz.clone(), CanvasConfig::default(), w, h)
			.with_notifier(ToastNotifier::new(toasts));
		refs.sync(&s);
		*state_init.borrow_mut() = Some(s);
		log::info!("sequence canvas ready ({w}x{h})");

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			session_init.push(window_event_listener(ev::resize, move |_| {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&canvas_resize, width, height, &win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
		}

		let state_keys = state_init.clone();
		session_init.push(window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
			let Some(action) =
				shortcuts::resolve(&ev.key(), ev.ctrl_key(), ev.shift_key(), ev.meta_key())
			else {
				return;
			};
			if let Some(s) = state_keys.borrow_mut().as_mut() {
				if s.apply_shortcut(action) {
					ev.prevent_default();
				}
				refs.sync(s);
			}
		}));

		let icons = EmojiIcons;
		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.get() {
				animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx, &icons);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (state_md, gesture_md) = (state.clone(), gesture.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = refs.local_point(&ev) else {
			return;
		};
		if ev.button() == 1 {
			ev.prevent_default();
		}
		let started = {
			let mut guard = state_md.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			s.pointer_down(p, PointerButton::from_dom(ev.button()), ev.alt_key());
			refs.sync(s);
			s.gesture_active()
		};
		if started && gesture_md.is_empty() {
			install_gesture_listeners(state_md.clone(), gesture_md.clone(), refs);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = refs.local_point(&ev) else {
			return;
		};
		if let Some(s) = state_mm.borrow_mut().as_mut() {
			// Gesture moves arrive through the window listeners.
			if !s.gesture_active() {
				s.pointer_move(p);
				refs.sync(s);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			if !s.gesture_active() {
				s.hovered_connection = None;
				s.hovered_node = None;
				refs.sync(s);
			}
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some(p) = refs.local_point(&ev) else {
			return;
		};
		let draft = {
			let mut guard = state_dc.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let began = s.double_click(p);
			refs.sync(s);
			began.then(|| s.editor.draft().unwrap_or_default().to_string())
		};
		if let (Some(draft), Some(input)) = (draft, refs.input.get_untracked()) {
			let input: HtmlInputElement = input.into();
			input.set_value(&draft);
			let _ = input.focus();
			input.select();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(s) = state_wh.borrow_mut().as_mut() {
			s.wheel(ev.delta_y());
			refs.sync(s);
		}
	};

	let state_in = state.clone();
	let on_label_input = move |ev: Event| {
		if let Some(s) = state_in.borrow_mut().as_mut() {
			s.set_label_draft(&event_target_value(&ev));
		}
	};

	let state_bl = state.clone();
	let on_label_blur = move |_: FocusEvent| {
		// Focus can move while another handler still holds the state.
		let Ok(mut guard) = state_bl.try_borrow_mut() else {
			return;
		};
		if let Some(s) = guard.as_mut() {
			s.commit_label_edit();
			refs.sync(s);
		}
	};

	let state_kd = state.clone();
	let on_label_keydown = move |ev: KeyboardEvent| {
		ev.stop_propagation();
		match ev.key().as_str() {
			"Enter" => {}
			"Escape" => {
				if let Some(s) = state_kd.borrow_mut().as_mut() {
					s.cancel_label_edit();
				}
			}
			_ => return,
		}
		ev.prevent_default();
		// Blur commits; after a cancel there is nothing left to commit.
		if let Some(input) = refs.input.get_untracked() {
			let input: HtmlInputElement = input.into();
			let _ = input.blur();
		}
		if let Some(s) = state_kd.borrow_mut().as_mut() {
			refs.sync(s);
		}
	};

	let with_state = {
		let state = state.clone();
		move |f: fn(&mut SequenceCanvasState)| {
			if let Some(s) = state.borrow_mut().as_mut() {
				f(s);
				refs.sync(s);
			}
		}
	};
	let (toggle, undo, redo, submit) = (
		with_state.clone(),
		with_state.clone(),
		with_state.clone(),
		with_state,
	);

	view! {
		<div class="sequence-quiz" style="display: flex; flex-direction: column; height: 100%;">
			<Toolbar
				flags=refs.flags
				on_toggle_test_mode=move || toggle(|s| s.toggle_test_mode())
				on_undo=move || undo(|s| {
					s.undo();
				})
				on_redo=move || redo(|s| {
					s.redo();
				})
				on_submit=move || submit(|s| {
					let _ = s.submit();
				})
			/>
			<div class="canvas-wrap" style="position: relative; flex: 1; overflow: hidden;">
				<canvas
					node_ref=refs.canvas
					class="sequence-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseleave=on_mouseleave
					on:dblclick=on_dblclick
					on:wheel=on_wheel
					on:contextmenu=|ev: MouseEvent| ev.prevent_default()
					style="display: block;"
				/>
				<input
					node_ref=refs.input
					type="text"
					class="label-editor"
					aria-label="Node title"
					style="position: absolute; display: none;"
					on:input=on_label_input
					on:blur=on_label_blur
					on:keydown=on_label_keydown
				/>
			</div>
			<Toasts toasts=toasts />
		</div>
	}
}
