#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the carousel.
//!
//! This module wraps [`loopslide_core::Carousel`] with DOM wiring. Only
//! compiled on `wasm32` targets.
//!
//! Every DOM and timer callback holds a `Weak` handle to the shared slider
//! state, borrows it for one dispatch, then renders the resulting frame and
//! runs the host commands.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Object, Reflect};
use loopslide_core::trigger::ListenTarget;
use loopslide_core::{
    Carousel, CarouselConfig, CarouselError, Dispatch, HostCommand, PointerSource, RenderFrame,
    TRIGGER_TABLE, TimerId, Trigger, TriggerBinding, TriggerKind,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, MouseEvent, TouchEvent, Window};

use crate::dom::{Dom, Scope};

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn js_error(err: &CarouselError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn parse_options(options: &JsValue) -> Result<CarouselConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CarouselConfig::default());
    }
    let json: String = js_sys::JSON::stringify(options)?.into();
    CarouselConfig::from_json(&json).map_err(|err| js_error(&err))
}

/// Horizontal coordinate of a mouse event, or of the first touch point.
fn client_x(event: &Event) -> Option<f64> {
    // Desktop browsers may lack a `TouchEvent` global, so match on the type
    // name instead of `instanceof`.
    if event.type_().starts_with("touch") {
        let touch: &TouchEvent = event.unchecked_ref();
        return touch.touches().get(0).map(|t| f64::from(t.client_x()));
    }
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| f64::from(mouse.client_x()))
}

type Callback = Closure<dyn FnMut(Event)>;

/// A registered DOM listener, removed on `destroy()` or when the slider drops.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Callback,
}

impl Listener {
    fn attach(target: EventTarget, event: &'static str, callback: Callback) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Move listener attached to one slide for the duration of a drag.
struct MoveListener {
    slide: usize,
    source: PointerSource,
    listener: Listener,
}

/// A live host timer.
struct HostTimer {
    id: TimerId,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

struct SliderState {
    carousel: Carousel,
    dom: Dom,
    window: Window,
    last_frame: Option<RenderFrame>,
    listeners: Vec<Listener>,
    move_listeners: Vec<MoveListener>,
    auto_play: Option<HostTimer>,
    resize: Option<HostTimer>,
}

type Shared = Rc<RefCell<SliderState>>;

/// Dispatch one trigger and apply its effects under a single borrow, so a
/// committed state change never loses its frame or host commands.
fn handle(shared: &Shared, trigger: Trigger) {
    let weak = Rc::downgrade(shared);
    let Ok(mut guard) = shared.try_borrow_mut() else {
        warn!(target: "loopslide.web", trigger = trigger.kind().name(), "re-entrant trigger dropped");
        return;
    };
    let state = &mut *guard;
    let dispatch = state.carousel.dispatch(trigger, &state.dom);
    state.apply(dispatch, &weak);
}

impl SliderState {
    fn apply(&mut self, dispatch: Dispatch, weak: &Weak<RefCell<Self>>) {
        if let Err(err) = self.dom.render(&dispatch.frame, self.last_frame.as_ref()) {
            warn!(target: "loopslide.web", ?err, "render failed");
        }
        self.last_frame = Some(dispatch.frame);
        for command in dispatch.commands {
            if let Err(err) = self.run_command(command, weak) {
                warn!(target: "loopslide.web", ?command, ?err, "host command failed");
            }
        }
    }

    fn run_command(&mut self, command: HostCommand, weak: &Weak<RefCell<Self>>) -> Result<(), JsValue> {
        match command {
            HostCommand::ListenMove { slide, source } => {
                let Some(element) = self.dom.items.get(slide) else {
                    return Ok(());
                };
                let callback = trigger_callback(weak.clone(), |event| {
                    client_x(event).map(|x| Trigger::Move { x })
                });
                let listener = Listener::attach(element.clone().into(), source.move_event(), callback)?;
                self.move_listeners.push(MoveListener {
                    slide,
                    source,
                    listener,
                });
            }
            HostCommand::StopListeningMove { slide, source } => {
                self.move_listeners.retain(|entry| {
                    let matches = entry.slide == slide && entry.source == source;
                    if matches {
                        entry.listener.detach();
                    }
                    !matches
                });
            }
            HostCommand::StartAutoPlay { timer, period } => {
                let weak = weak.clone();
                let callback = Closure::<dyn FnMut()>::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        handle(&shared, Trigger::AutoPlayTick { timer });
                    }
                });
                let handle = self
                    .window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        callback.as_ref().unchecked_ref(),
                        millis(period),
                    )?;
                if let Some(old) = self.auto_play.replace(HostTimer {
                    id: timer,
                    handle,
                    _callback: callback,
                }) {
                    self.window.clear_interval_with_handle(old.handle);
                }
            }
            HostCommand::CancelAutoPlay { timer } => {
                if let Some(active) = self.auto_play.take_if(|t| t.id == timer) {
                    self.window.clear_interval_with_handle(active.handle);
                }
            }
            HostCommand::ScheduleResize { timer, delay } => {
                let weak = weak.clone();
                let callback = Closure::<dyn FnMut()>::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        handle(&shared, Trigger::ResizeSettled { timer });
                    }
                });
                let handle = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    millis(delay),
                )?;
                if let Some(old) = self.resize.replace(HostTimer {
                    id: timer,
                    handle,
                    _callback: callback,
                }) {
                    self.window.clear_timeout_with_handle(old.handle);
                }
            }
            HostCommand::CancelResize { timer } => {
                if let Some(pending) = self.resize.take_if(|t| t.id == timer) {
                    self.window.clear_timeout_with_handle(pending.handle);
                }
            }
        }
        Ok(())
    }

    fn detach_all(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        for entry in self.move_listeners.drain(..) {
            entry.listener.detach();
        }
    }

    fn clear_timers(&mut self) {
        if let Some(timer) = self.auto_play.take() {
            self.window.clear_interval_with_handle(timer.handle);
        }
        if let Some(timer) = self.resize.take() {
            self.window.clear_timeout_with_handle(timer.handle);
        }
    }
}

// Closures die with the state; the page must not keep calling them.
impl Drop for SliderState {
    fn drop(&mut self) {
        self.clear_timers();
        self.detach_all();
    }
}

fn millis(duration: core::time::Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

fn trigger_callback<F>(weak: Weak<RefCell<SliderState>>, mut make: F) -> Callback
where
    F: FnMut(&Event) -> Option<Trigger> + 'static,
{
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(trigger) = make(&event) else {
            return;
        };
        if let Some(shared) = weak.upgrade() {
            handle(&shared, trigger);
        }
    })
}

/// Build the event → trigger mapping for one table row and element index.
fn binding_callback(binding: &TriggerBinding, index: usize, weak: Weak<RefCell<SliderState>>) -> Callback {
    let kind = binding.kind;
    trigger_callback(weak, move |event| match kind {
        TriggerKind::NextClicked => Some(Trigger::NextClicked),
        TriggerKind::PreviousClicked => Some(Trigger::PreviousClicked),
        TriggerKind::ControlClicked => Some(Trigger::ControlClicked { control: index }),
        TriggerKind::MousePress => client_x(event).map(|x| Trigger::Press {
            slide: index,
            source: PointerSource::Mouse,
            x,
        }),
        TriggerKind::TouchPress => client_x(event).map(|x| Trigger::Press {
            slide: index,
            source: PointerSource::Touch,
            x,
        }),
        TriggerKind::MouseRelease => Some(Trigger::Release {
            source: PointerSource::Mouse,
        }),
        TriggerKind::TouchRelease => Some(Trigger::Release {
            source: PointerSource::Touch,
        }),
        TriggerKind::TransitionEnd => Some(Trigger::TransitionEnd),
        TriggerKind::PointerEnter => Some(Trigger::PointerEnter),
        TriggerKind::PointerLeave => Some(Trigger::PointerLeave),
        TriggerKind::Resize => Some(Trigger::Resize),
        TriggerKind::Move | TriggerKind::ResizeSettled | TriggerKind::AutoPlayTick => None,
    })
}

fn register_listeners(shared: &Shared) -> Result<(), JsValue> {
    let weak = Rc::downgrade(shared);
    let mut guard = shared.borrow_mut();
    let state = &mut *guard;
    // Attached listeners go straight into the state so a failure part-way
    // through still detaches them when the state drops.
    for binding in TRIGGER_TABLE {
        let targets: Vec<(usize, EventTarget)> = match binding.target {
            ListenTarget::Role(role) => state
                .dom
                .elements_for(role)
                .into_iter()
                .map(|(idx, el)| (idx, el.into()))
                .collect(),
            ListenTarget::Window => vec![(0, state.window.clone().into())],
        };
        for (index, target) in targets {
            let callback = binding_callback(binding, index, weak.clone());
            state
                .listeners
                .push(Listener::attach(target, binding.event, callback)?);
        }
    }
    // Native image/link dragging would steal mouse drags from the strip.
    for item in &state.dom.items {
        let callback = Closure::<dyn FnMut(Event)>::new(|event: Event| event.prevent_default());
        state
            .listeners
            .push(Listener::attach(item.clone().into(), "dragstart", callback)?);
    }
    debug!(target: "loopslide.web", count = state.listeners.len(), "listeners registered");
    Ok(())
}

/// Live carousel bound to host-page elements.
///
/// Host-driven: the browser's event loop delivers input and timer callbacks;
/// all state lives in the core controller.
#[wasm_bindgen]
pub struct Slider {
    shared: Shared,
}

impl Slider {
    fn mount(scope: Scope, options: &JsValue) -> Result<Self, JsValue> {
        install_panic_hook();
        let config = parse_options(options)?;
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let mut dom = Dom::locate(document, &scope)?;
        let carousel = Carousel::new(config, dom.original_count()).map_err(|err| js_error(&err))?;
        dom.build_controls(carousel.sequence().original_count())?;
        dom.build_clones(&carousel.sequence().clone_plan())?;

        let shared: Shared = Rc::new(RefCell::new(SliderState {
            carousel,
            dom,
            window,
            last_frame: None,
            listeners: Vec::new(),
            move_listeners: Vec::new(),
            auto_play: None,
            resize: None,
        }));
        register_listeners(&shared)?;

        {
            let weak = Rc::downgrade(&shared);
            let mut guard = shared.borrow_mut();
            let state = &mut *guard;
            let dispatch = state.carousel.initialize(&state.dom);
            state.apply(dispatch, &weak);
        }
        Ok(Self { shared })
    }
}

/// Initialize the carousel found in the document.
///
/// `options` accepts `startAtIndex`, `autoPlay` and `timeInterval`; missing
/// fields use their defaults. Fails if a required element is absent.
#[wasm_bindgen(js_name = initSlider)]
pub fn init_slider(options: JsValue) -> Result<Slider, JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    Slider::mount(Scope::Document(document), &options)
}

#[wasm_bindgen]
impl Slider {
    /// Initialize a carousel whose elements live under `root`.
    #[wasm_bindgen(constructor)]
    pub fn new(root: Element, options: JsValue) -> Result<Slider, JsValue> {
        Self::mount(Scope::Element(root), &options)
    }

    /// Move one slide forward.
    pub fn next(&self) {
        handle(&self.shared, Trigger::NextClicked);
    }

    /// Move one slide back.
    pub fn previous(&self) {
        handle(&self.shared, Trigger::PreviousClicked);
    }

    /// Show original slide `index`.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: u32) -> Result<(), JsValue> {
        let count = self.shared.borrow().carousel.sequence().original_count();
        let control = index as usize;
        if control >= count {
            return Err(JsValue::from_str(&format!(
                "slide {index} is out of range for {count} slides"
            )));
        }
        handle(&self.shared, Trigger::ControlClicked { control });
        Ok(())
    }

    /// Extended index of the centered slide.
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> u32 {
        self.shared.borrow().carousel.state().current_slide_index as u32
    }

    /// Active pagination control, if any.
    #[wasm_bindgen(js_name = activeControl)]
    pub fn active_control(&self) -> Option<u32> {
        self.shared
            .borrow()
            .carousel
            .state()
            .active_control
            .map(|idx| idx as u32)
    }

    /// Navigation state as a plain object.
    pub fn snapshot(&self) -> JsValue {
        let state = self.shared.borrow();
        let nav = state.carousel.state();
        let obj = Object::new();
        set_js(
            &obj,
            "currentSlideIndex",
            JsValue::from_f64(nav.current_slide_index as f64),
        );
        set_js(&obj, "savedPosition", JsValue::from_f64(nav.saved_position));
        set_js(&obj, "startingPoint", JsValue::from_f64(nav.starting_point));
        set_js(&obj, "currentPoint", JsValue::from_f64(nav.current_point));
        set_js(&obj, "movement", JsValue::from_f64(nav.movement));
        set_js(&obj, "animate", JsValue::from_bool(nav.animate));
        match nav.active_control {
            Some(idx) => set_js(&obj, "activeControl", JsValue::from_f64(idx as f64)),
            None => set_js(&obj, "activeControl", JsValue::NULL),
        }
        let config = state.carousel.config();
        set_js(&obj, "autoPlay", JsValue::from_bool(config.auto_play));
        set_js(
            &obj,
            "timeInterval",
            JsValue::from_f64(f64::from(config.time_interval)),
        );
        set_js(&obj, "initialized", JsValue::from_bool(state.carousel.is_initialized()));
        set_js(&obj, "dragging", JsValue::from_bool(state.carousel.is_dragging()));
        let drag_slide = state
            .carousel
            .drag_session()
            .map_or(JsValue::NULL, |session| JsValue::from_f64(session.slide as f64));
        set_js(&obj, "dragSlide", drag_slide);
        let auto_play_timer = state
            .carousel
            .auto_play_timer()
            .map_or(JsValue::NULL, |timer| JsValue::from_f64(timer.get() as f64));
        set_js(&obj, "autoPlayTimer", auto_play_timer);
        obj.into()
    }

    /// Remove every listener and clear outstanding timers. Clones and
    /// pagination buttons stay in the page.
    pub fn destroy(&self) {
        let weak = Rc::downgrade(&self.shared);
        let mut guard = self.shared.borrow_mut();
        let state = &mut *guard;
        for command in state.carousel.teardown() {
            if let Err(err) = state.run_command(command, &weak) {
                warn!(target: "loopslide.web", ?err, "teardown command failed");
            }
        }
        state.clear_timers();
        state.detach_all();
    }
}
