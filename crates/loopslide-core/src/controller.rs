#![forbid(unsafe_code)]

//! Carousel controller: navigation state and every transition on it.
//!
//! # State machine
//!
//! ```text
//!            press                      release (classified)
//!   Idle ───────────────▶ Dragging ─────────────────────────▶ Idle
//!    │  ▲                  │   ▲ move (1:1 tracking)            │
//!    │  └──────────────────┘   └──────┘                         │
//!    │ next / previous / control / tick / resize-settled        │
//!    └──────────────▶ set_visible(animate) ──▶ transition-end ──┘
//!                                             └▶ wraparound: set_visible(no animate)
//! ```
//!
//! # Invariants
//!
//! 1. Every committed position change goes through [`Carousel::set_visible`].
//! 2. After `set_visible` returns, the current index is never a guard slide.
//! 3. At most one pagination control is active; once initialized, exactly one.
//! 4. At most one auto-play timer and one resize timer are outstanding; a
//!    superseded timer is always cancelled in the same dispatch that replaces it.
//! 5. Auto-play pacing is only touched by pointer enter/leave, never by manual
//!    navigation.

use core::time::Duration;

use tracing::{debug, trace, warn};

use crate::CarouselError;
use crate::config::{CarouselConfig, RESIZE_DEBOUNCE};
use crate::drag::{DragSession, PointerSource, ReleaseDecision};
use crate::geometry::{SlideMetrics, center_offset};
use crate::render::RenderFrame;
use crate::sequence::ExtendedSequence;
use crate::timer::{TimerId, TimerIds, TimerSlot};
use crate::trigger::Trigger;

/// The shared navigation record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    /// Extended index of the centered slide.
    pub current_slide_index: usize,
    /// Last applied strip offset in CSS pixels.
    pub saved_position: f64,
    /// Press coordinate of the active drag.
    pub starting_point: f64,
    /// Press coordinate relative to the strip offset at press time.
    pub current_point: f64,
    /// Net horizontal movement of the active drag.
    pub movement: f64,
    /// Whether the strip transition is enabled.
    pub animate: bool,
    /// Active pagination control (original-slide space).
    pub active_control: Option<usize>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_slide_index: 0,
            saved_position: 0.0,
            starting_point: 0.0,
            current_point: 0.0,
            movement: 0.0,
            animate: true,
            active_control: None,
        }
    }
}

/// Side effects the host must perform besides rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Start delivering [`Trigger::Move`] from `slide` for `source` moves.
    ListenMove { slide: usize, source: PointerSource },
    /// Stop delivering moves from `slide`.
    StopListeningMove { slide: usize, source: PointerSource },
    /// Start a repeating timer delivering [`Trigger::AutoPlayTick`].
    StartAutoPlay { timer: TimerId, period: Duration },
    /// Clear a repeating auto-play timer.
    CancelAutoPlay { timer: TimerId },
    /// Start a one-shot timer delivering [`Trigger::ResizeSettled`].
    ScheduleResize { timer: TimerId, delay: Duration },
    /// Clear a pending resize timer.
    CancelResize { timer: TimerId },
}

/// Result of one dispatch: the frame to render and commands to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub frame: RenderFrame,
    pub commands: Vec<HostCommand>,
}

/// Host-independent carousel controller.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    sequence: ExtendedSequence,
    state: NavigationState,
    drag: Option<DragSession>,
    auto_play: TimerSlot,
    resize: TimerSlot,
    timer_ids: TimerIds,
    /// An animated transform change is running and will report its end.
    transition_in_flight: bool,
    initialized: bool,
    torn_down: bool,
    pending: Vec<HostCommand>,
}

impl Carousel {
    /// Create a controller for `slide_count` original slides.
    pub fn new(config: CarouselConfig, slide_count: usize) -> Result<Self, CarouselError> {
        config.validate(slide_count)?;
        Ok(Self {
            config,
            sequence: ExtendedSequence::new(slide_count),
            state: NavigationState::default(),
            drag: None,
            auto_play: TimerSlot::default(),
            resize: TimerSlot::default(),
            timer_ids: TimerIds::default(),
            transition_in_flight: false,
            initialized: false,
            torn_down: false,
            pending: Vec::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    #[must_use]
    pub const fn sequence(&self) -> &ExtendedSequence {
        &self.sequence
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub const fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    /// Outstanding auto-play timer.
    #[must_use]
    pub const fn auto_play_timer(&self) -> Option<TimerId> {
        self.auto_play.armed()
    }

    /// Outstanding resize debounce timer.
    #[must_use]
    pub const fn resize_timer(&self) -> Option<TimerId> {
        self.resize.armed()
    }

    /// Show the start slide and start auto-play. Call exactly once.
    pub fn initialize<M: SlideMetrics + ?Sized>(&mut self, metrics: &M) -> Dispatch {
        if self.initialized {
            warn!(target: "loopslide.init", "initialize called twice; ignoring");
            return self.finish();
        }
        self.initialized = true;
        let start = self.sequence.to_extended(self.config.start_at_index);
        debug!(
            target: "loopslide.init",
            slides = self.sequence.original_count(),
            start,
            auto_play = self.config.auto_play,
            time_interval = self.config.time_interval,
            "carousel initialized"
        );
        self.set_visible(start, true, metrics);
        self.start_auto_play();
        self.finish()
    }

    /// Apply one trigger.
    pub fn dispatch<M: SlideMetrics + ?Sized>(&mut self, trigger: Trigger, metrics: &M) -> Dispatch {
        if !self.initialized || self.torn_down {
            trace!(
                target: "loopslide.nav",
                trigger = trigger.kind().name(),
                "trigger ignored: carousel not live"
            );
            return self.finish();
        }
        match trigger {
            Trigger::NextClicked => {
                self.advance(metrics);
            }
            Trigger::PreviousClicked => {
                self.retreat(metrics);
            }
            Trigger::ControlClicked { control } => self.control_clicked(control, metrics),
            Trigger::Press { slide, source, x } => self.press(slide, source, x),
            Trigger::Move { x } => self.pointer_move(x),
            Trigger::Release { source } => self.release(source, metrics),
            Trigger::TransitionEnd => self.transition_end(metrics),
            Trigger::PointerEnter => self.stop_auto_play(),
            Trigger::PointerLeave => self.start_auto_play(),
            Trigger::Resize => self.resize_requested(),
            Trigger::ResizeSettled { timer } => self.resize_settled(timer, metrics),
            Trigger::AutoPlayTick { timer } => self.auto_play_tick(timer, metrics),
        }
        self.finish()
    }

    /// Center slide `index` (extended space). The single mutation choke point.
    ///
    /// Requests landing on a guard slide (or past the end) keep the current
    /// index instead. A clone committed while no transition is running is
    /// corrected at once, since no `transitionend` will arrive for it.
    /// Returns the index actually committed.
    pub fn set_visible<M: SlideMetrics + ?Sized>(
        &mut self,
        index: usize,
        animate: bool,
        metrics: &M,
    ) -> usize {
        let current = self.state.current_slide_index;
        let previous_offset = self.state.saved_position;
        let requested = if self.sequence.is_guard(index) {
            current
        } else {
            index
        };
        // A press can make a guard provisionally current; never settle there.
        let resolved = requested.clamp(1, self.sequence.len() - 2);
        let offset = center_offset(
            resolved,
            metrics.slide_width(resolved),
            metrics.viewport_width(),
        );

        self.state.current_slide_index = resolved;
        self.state.animate = animate;
        if let Some(control) = self.sequence.control_for(resolved) {
            self.state.active_control = Some(control);
        }
        self.state.saved_position = offset;
        if !animate {
            self.transition_in_flight = false;
        } else if offset != previous_offset {
            self.transition_in_flight = true;
        }

        debug!(
            target: "loopslide.nav",
            requested = index,
            resolved,
            animate,
            offset,
            "slide set visible"
        );

        if !self.transition_in_flight && self.drag.is_none() {
            if let Some(target) = self.sequence.wraparound_target(resolved) {
                debug!(
                    target: "loopslide.nav",
                    from = resolved,
                    to = target,
                    "wraparound correction without transition"
                );
                return self.set_visible(target, false, metrics);
            }
        }
        resolved
    }

    /// Move one slide forward.
    pub fn advance<M: SlideMetrics + ?Sized>(&mut self, metrics: &M) -> usize {
        let next = self.state.current_slide_index.saturating_add(1);
        self.set_visible(next, true, metrics)
    }

    /// Move one slide back.
    pub fn retreat<M: SlideMetrics + ?Sized>(&mut self, metrics: &M) -> usize {
        let previous = self.state.current_slide_index.saturating_sub(1);
        self.set_visible(previous, true, metrics)
    }

    /// Show original slide `original`, animated.
    pub fn go_to<M: SlideMetrics + ?Sized>(&mut self, original: usize, metrics: &M) -> usize {
        let ext = self.sequence.to_extended(original);
        self.set_visible(ext, true, metrics)
    }

    /// Cancel every outstanding timer and move listener; later triggers are
    /// ignored.
    pub fn teardown(&mut self) -> Vec<HostCommand> {
        self.stop_auto_play();
        if let Some(timer) = self.resize.disarm() {
            self.pending.push(HostCommand::CancelResize { timer });
        }
        if let Some(session) = self.drag.take() {
            self.pending.push(HostCommand::StopListeningMove {
                slide: session.slide,
                source: session.source,
            });
        }
        self.torn_down = true;
        debug!(target: "loopslide.init", "carousel torn down");
        core::mem::take(&mut self.pending)
    }

    fn finish(&mut self) -> Dispatch {
        Dispatch {
            frame: RenderFrame::from_state(&self.state),
            commands: core::mem::take(&mut self.pending),
        }
    }

    fn control_clicked<M: SlideMetrics + ?Sized>(&mut self, control: usize, metrics: &M) {
        let count = self.sequence.original_count();
        debug_assert!(
            control < count,
            "control {control} out of range for {count} slides"
        );
        if control >= count {
            warn!(target: "loopslide.nav", control, count, "unknown pagination control");
            return;
        }
        self.go_to(control, metrics);
    }

    fn press(&mut self, slide: usize, source: PointerSource, x: f64) {
        if let Some(previous) = self.drag.take() {
            self.pending.push(HostCommand::StopListeningMove {
                slide: previous.slide,
                source: previous.source,
            });
        }
        self.state.starting_point = x;
        self.state.current_point = x - self.state.saved_position;
        self.state.current_slide_index = slide;
        // `transition: none` cancels any running transition without an end event.
        self.state.animate = false;
        self.transition_in_flight = false;
        self.drag = Some(DragSession { slide, source });
        self.pending.push(HostCommand::ListenMove { slide, source });
        debug!(target: "loopslide.drag", slide, ?source, x, "drag pressed");
    }

    fn pointer_move(&mut self, x: f64) {
        if self.drag.is_none() {
            trace!(target: "loopslide.drag", x, "move ignored: no press in progress");
            return;
        }
        self.state.movement = x - self.state.starting_point;
        self.state.saved_position = x - self.state.current_point;
        self.state.animate = false;
        self.transition_in_flight = false;
        trace!(
            target: "loopslide.drag",
            movement = self.state.movement,
            offset = self.state.saved_position,
            "drag moved"
        );
    }

    fn release<M: SlideMetrics + ?Sized>(&mut self, source: PointerSource, metrics: &M) {
        let Some(session) = self.drag.take() else {
            trace!(target: "loopslide.drag", ?source, "release ignored: no press in progress");
            return;
        };
        let decision = ReleaseDecision::classify(self.state.movement, source);
        debug!(
            target: "loopslide.drag",
            movement = self.state.movement,
            ?source,
            ?decision,
            "drag released"
        );
        match decision {
            ReleaseDecision::Advance => {
                self.advance(metrics);
            }
            ReleaseDecision::Retreat => {
                self.retreat(metrics);
            }
            ReleaseDecision::SnapBack => {
                self.set_visible(self.state.current_slide_index, true, metrics);
            }
        }
        self.state.movement = 0.0;
        self.pending.push(HostCommand::StopListeningMove {
            slide: session.slide,
            source: session.source,
        });
    }

    fn transition_end<M: SlideMetrics + ?Sized>(&mut self, metrics: &M) {
        self.transition_in_flight = false;
        let current = self.state.current_slide_index;
        let Some(target) = self.sequence.wraparound_target(current) else {
            return;
        };
        debug!(target: "loopslide.nav", from = current, to = target, "wraparound correction");
        self.set_visible(target, false, metrics);
    }

    fn start_auto_play(&mut self) {
        if !self.config.auto_play {
            return;
        }
        if let Some(timer) = self.auto_play.disarm() {
            self.pending.push(HostCommand::CancelAutoPlay { timer });
        }
        let timer = self.timer_ids.allocate();
        self.auto_play.arm(timer);
        let period = self.config.interval();
        self.pending
            .push(HostCommand::StartAutoPlay { timer, period });
        debug!(target: "loopslide.timer", %timer, period_ms = self.config.time_interval, "auto-play started");
    }

    fn stop_auto_play(&mut self) {
        if let Some(timer) = self.auto_play.disarm() {
            self.pending.push(HostCommand::CancelAutoPlay { timer });
            debug!(target: "loopslide.timer", %timer, "auto-play cancelled");
        }
    }

    fn auto_play_tick<M: SlideMetrics + ?Sized>(&mut self, timer: TimerId, metrics: &M) {
        if !self.auto_play.is_current(timer) {
            trace!(target: "loopslide.timer", %timer, "stale auto-play tick ignored");
            return;
        }
        self.advance(metrics);
    }

    fn resize_requested(&mut self) {
        let timer = self.timer_ids.allocate();
        if let Some(previous) = self.resize.arm(timer) {
            self.pending
                .push(HostCommand::CancelResize { timer: previous });
        }
        self.pending.push(HostCommand::ScheduleResize {
            timer,
            delay: RESIZE_DEBOUNCE,
        });
        trace!(target: "loopslide.timer", %timer, "resize debounce rescheduled");
    }

    fn resize_settled<M: SlideMetrics + ?Sized>(&mut self, timer: TimerId, metrics: &M) {
        if !self.resize.fire_once(timer) {
            trace!(target: "loopslide.timer", %timer, "stale resize timer ignored");
            return;
        }
        debug!(target: "loopslide.timer", %timer, "resize settled; re-centering");
        self.set_visible(self.state.current_slide_index, true, metrics);
    }
}
