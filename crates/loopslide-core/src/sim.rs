#![forbid(unsafe_code)]

//! Deterministic host simulation.
//!
//! [`SimulatedHost`] plays the part of the browser: it applies each
//! [`Dispatch`], keeps host timers on a [`DeterministicClock`], delivers moves
//! only to slides that are listening, and fires `transitionend` only after an
//! animated transform change that nothing cancelled. Tests drive the carousel
//! through it without a DOM or a real event loop.

use core::time::Duration;
use std::collections::BTreeMap;

use crate::CarouselError;
use crate::config::CarouselConfig;
use crate::controller::{Carousel, Dispatch, HostCommand, NavigationState};
use crate::drag::PointerSource;
use crate::geometry::FixedMetrics;
use crate::render::RenderFrame;
use crate::timer::{DeterministicClock, TimerId};
use crate::trigger::Trigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimTimerKind {
    AutoPlay { period: Duration },
    Resize,
}

#[derive(Debug, Clone, Copy)]
struct SimTimer {
    due: Duration,
    kind: SimTimerKind,
}

/// Host-side record of one applied frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedFrame {
    pub at: Duration,
    pub transform: String,
    pub transition: &'static str,
    pub active_control: Option<usize>,
}

/// Browser stand-in for a single carousel.
#[derive(Debug)]
pub struct SimulatedHost {
    carousel: Carousel,
    metrics: FixedMetrics,
    clock: DeterministicClock,
    timers: BTreeMap<TimerId, SimTimer>,
    move_listeners: Vec<(usize, PointerSource)>,
    last_frame: Option<RenderFrame>,
    transition_running: bool,
    history: Vec<AppliedFrame>,
}

impl SimulatedHost {
    /// Build and initialize a carousel of `slides` originals.
    pub fn new(
        config: CarouselConfig,
        slides: usize,
        metrics: FixedMetrics,
    ) -> Result<Self, CarouselError> {
        let carousel = Carousel::new(config, slides)?;
        let mut host = Self {
            carousel,
            metrics,
            clock: DeterministicClock::new(),
            timers: BTreeMap::new(),
            move_listeners: Vec::new(),
            last_frame: None,
            transition_running: false,
            history: Vec::new(),
        };
        let dispatch = host.carousel.initialize(&host.metrics);
        host.apply(dispatch);
        Ok(host)
    }

    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        self.carousel.state()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.carousel.state().current_slide_index
    }

    /// Last frame applied to the simulated DOM.
    #[must_use]
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// Every frame that changed a style or class, oldest first.
    #[must_use]
    pub fn history(&self) -> &[AppliedFrame] {
        &self.history
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Whether an animated transform change has not reported `transitionend` yet.
    #[must_use]
    pub const fn transition_running(&self) -> bool {
        self.transition_running
    }

    /// Outstanding auto-play intervals.
    #[must_use]
    pub fn auto_play_timers(&self) -> usize {
        self.timers
            .values()
            .filter(|t| matches!(t.kind, SimTimerKind::AutoPlay { .. }))
            .count()
    }

    /// Outstanding resize timeouts.
    #[must_use]
    pub fn resize_timers(&self) -> usize {
        self.timers
            .values()
            .filter(|t| t.kind == SimTimerKind::Resize)
            .count()
    }

    /// Slides currently listening for moves.
    #[must_use]
    pub fn move_listeners(&self) -> &[(usize, PointerSource)] {
        &self.move_listeners
    }

    /// Change the measured layout (takes effect on the next centering).
    pub fn set_metrics(&mut self, metrics: FixedMetrics) {
        self.metrics = metrics;
    }

    /// Deliver one trigger.
    pub fn trigger(&mut self, trigger: Trigger) {
        let dispatch = self.carousel.dispatch(trigger, &self.metrics);
        self.apply(dispatch);
    }

    pub fn click_next(&mut self) {
        self.trigger(Trigger::NextClicked);
    }

    pub fn click_previous(&mut self) {
        self.trigger(Trigger::PreviousClicked);
    }

    pub fn click_control(&mut self, control: usize) {
        self.trigger(Trigger::ControlClicked { control });
    }

    pub fn press(&mut self, slide: usize, source: PointerSource, x: f64) {
        self.trigger(Trigger::Press { slide, source, x });
    }

    /// Move over `slide`; dropped unless that slide is listening.
    pub fn move_over(&mut self, slide: usize, x: f64) {
        if self.move_listeners.iter().any(|&(s, _)| s == slide) {
            self.trigger(Trigger::Move { x });
        }
    }

    pub fn release(&mut self, source: PointerSource) {
        self.trigger(Trigger::Release { source });
    }

    /// Press on `slide` at `from`, move to `to`, release.
    pub fn drag(&mut self, slide: usize, source: PointerSource, from: f64, to: f64) {
        self.press(slide, source, from);
        self.move_over(slide, to);
        self.release(source);
    }

    /// Report `transitionend` if an animation is in flight.
    pub fn finish_transition(&mut self) {
        if self.transition_running {
            self.transition_running = false;
            self.trigger(Trigger::TransitionEnd);
        }
    }

    /// Run the clock forward, firing due timers in order.
    pub fn advance_time(&mut self, dt: Duration) {
        let target = self.clock.now().saturating_add(dt);
        while let Some((timer, due)) = self.next_due(target) {
            self.clock.set(due);
            let trigger = match self.timers.get(&timer).map(|t| t.kind) {
                Some(SimTimerKind::AutoPlay { period }) => {
                    if let Some(entry) = self.timers.get_mut(&timer) {
                        entry.due = due.saturating_add(period);
                    }
                    Trigger::AutoPlayTick { timer }
                }
                Some(SimTimerKind::Resize) => {
                    self.timers.remove(&timer);
                    Trigger::ResizeSettled { timer }
                }
                None => continue,
            };
            self.trigger(trigger);
        }
        self.clock.set(target);
    }

    /// Tear the carousel down as `destroy()` would.
    pub fn teardown(&mut self) {
        let commands = self.carousel.teardown();
        self.run_commands(&commands);
    }

    fn next_due(&self, limit: Duration) -> Option<(TimerId, Duration)> {
        self.timers
            .iter()
            .filter(|(_, t)| t.due <= limit)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, t.due))
    }

    fn apply(&mut self, dispatch: Dispatch) {
        self.render(dispatch.frame);
        self.run_commands(&dispatch.commands);
    }

    fn render(&mut self, frame: RenderFrame) {
        if self.last_frame == Some(frame) {
            return;
        }
        let moved = self
            .last_frame
            .is_none_or(|last| last.offset != frame.offset);
        if !frame.animate {
            // `transition: none` cancels a running transition; no end event follows.
            self.transition_running = false;
        } else if moved {
            self.transition_running = true;
        }
        self.history.push(AppliedFrame {
            at: self.clock.now(),
            transform: frame.transform_css(),
            transition: frame.transition_css(),
            active_control: frame.active_control,
        });
        self.last_frame = Some(frame);
    }

    fn run_commands(&mut self, commands: &[HostCommand]) {
        let now = self.clock.now();
        for command in commands {
            match *command {
                HostCommand::ListenMove { slide, source } => {
                    self.move_listeners.push((slide, source));
                }
                HostCommand::StopListeningMove { slide, source } => {
                    self.move_listeners
                        .retain(|&entry| entry != (slide, source));
                }
                HostCommand::StartAutoPlay { timer, period } => {
                    self.timers.insert(
                        timer,
                        SimTimer {
                            due: now.saturating_add(period),
                            kind: SimTimerKind::AutoPlay { period },
                        },
                    );
                }
                HostCommand::ScheduleResize { timer, delay } => {
                    self.timers.insert(
                        timer,
                        SimTimer {
                            due: now.saturating_add(delay),
                            kind: SimTimerKind::Resize,
                        },
                    );
                }
                HostCommand::CancelAutoPlay { timer } | HostCommand::CancelResize { timer } => {
                    self.timers.remove(&timer);
                }
            }
        }
    }
}
