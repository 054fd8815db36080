#![forbid(unsafe_code)]

//! Named triggers and the table binding them to host events.
//!
//! Every input the carousel reacts to is a [`Trigger`]. [`TRIGGER_TABLE`] is the
//! enumerable wiring: which DOM event on which element produces which trigger
//! kind. The web host registers listeners by walking the table; tests replay
//! trigger sequences without a DOM.

use crate::drag::PointerSource;
use crate::markup::SlideRole;
use crate::timer::TimerId;

/// One input delivered to [`Carousel::dispatch`](crate::Carousel::dispatch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Next-navigation button clicked.
    NextClicked,
    /// Previous-navigation button clicked.
    PreviousClicked,
    /// Pagination control `control` (original-slide space) clicked.
    ControlClicked { control: usize },
    /// Mouse-down / touch-start on the slide at extended index `slide`.
    Press {
        slide: usize,
        source: PointerSource,
        x: f64,
    },
    /// Mouse/touch move while a press is in progress.
    Move { x: f64 },
    /// Mouse-up / touch-end.
    Release { source: PointerSource },
    /// The strip's CSS transition finished.
    TransitionEnd,
    /// Pointer entered the wrapper.
    PointerEnter,
    /// Pointer left the wrapper.
    PointerLeave,
    /// Window resized.
    Resize,
    /// Resize debounce timer fired.
    ResizeSettled { timer: TimerId },
    /// Auto-play interval fired.
    AutoPlayTick { timer: TimerId },
}

impl Trigger {
    #[must_use]
    pub const fn kind(&self) -> TriggerKind {
        match self {
            Self::NextClicked => TriggerKind::NextClicked,
            Self::PreviousClicked => TriggerKind::PreviousClicked,
            Self::ControlClicked { .. } => TriggerKind::ControlClicked,
            Self::Press {
                source: PointerSource::Mouse,
                ..
            } => TriggerKind::MousePress,
            Self::Press {
                source: PointerSource::Touch,
                ..
            } => TriggerKind::TouchPress,
            Self::Move { .. } => TriggerKind::Move,
            Self::Release {
                source: PointerSource::Mouse,
            } => TriggerKind::MouseRelease,
            Self::Release {
                source: PointerSource::Touch,
            } => TriggerKind::TouchRelease,
            Self::TransitionEnd => TriggerKind::TransitionEnd,
            Self::PointerEnter => TriggerKind::PointerEnter,
            Self::PointerLeave => TriggerKind::PointerLeave,
            Self::Resize => TriggerKind::Resize,
            Self::ResizeSettled { .. } => TriggerKind::ResizeSettled,
            Self::AutoPlayTick { .. } => TriggerKind::AutoPlayTick,
        }
    }
}

/// Payload-free trigger discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    NextClicked,
    PreviousClicked,
    ControlClicked,
    MousePress,
    TouchPress,
    Move,
    MouseRelease,
    TouchRelease,
    TransitionEnd,
    PointerEnter,
    PointerLeave,
    Resize,
    ResizeSettled,
    AutoPlayTick,
}

impl TriggerKind {
    /// Stable name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NextClicked => "next_clicked",
            Self::PreviousClicked => "previous_clicked",
            Self::ControlClicked => "control_clicked",
            Self::MousePress => "mouse_press",
            Self::TouchPress => "touch_press",
            Self::Move => "move",
            Self::MouseRelease => "mouse_release",
            Self::TouchRelease => "touch_release",
            Self::TransitionEnd => "transition_end",
            Self::PointerEnter => "pointer_enter",
            Self::PointerLeave => "pointer_leave",
            Self::Resize => "resize",
            Self::ResizeSettled => "resize_settled",
            Self::AutoPlayTick => "auto_play_tick",
        }
    }
}

/// Where a binding's listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenTarget {
    /// Every element carrying the role (one listener per element).
    Role(SlideRole),
    /// The global window.
    Window,
}

/// One row of the wiring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerBinding {
    pub kind: TriggerKind,
    pub target: ListenTarget,
    /// DOM event type.
    pub event: &'static str,
}

const fn bind(kind: TriggerKind, target: ListenTarget, event: &'static str) -> TriggerBinding {
    TriggerBinding {
        kind,
        target,
        event,
    }
}

/// Listeners registered once at initialization.
///
/// Move listeners are not listed: they are attached to the pressed slide for
/// the duration of a drag via [`HostCommand::ListenMove`](crate::HostCommand).
/// Timer triggers come from host timers, not DOM events.
pub const TRIGGER_TABLE: &[TriggerBinding] = &[
    bind(
        TriggerKind::ControlClicked,
        ListenTarget::Role(SlideRole::ControlButton),
        "click",
    ),
    bind(
        TriggerKind::MousePress,
        ListenTarget::Role(SlideRole::Item),
        "mousedown",
    ),
    bind(
        TriggerKind::MouseRelease,
        ListenTarget::Role(SlideRole::Item),
        "mouseup",
    ),
    bind(
        TriggerKind::TouchPress,
        ListenTarget::Role(SlideRole::Item),
        "touchstart",
    ),
    bind(
        TriggerKind::TouchRelease,
        ListenTarget::Role(SlideRole::Item),
        "touchend",
    ),
    bind(
        TriggerKind::NextClicked,
        ListenTarget::Role(SlideRole::NavNextButton),
        "click",
    ),
    bind(
        TriggerKind::PreviousClicked,
        ListenTarget::Role(SlideRole::NavPreviousButton),
        "click",
    ),
    bind(
        TriggerKind::TransitionEnd,
        ListenTarget::Role(SlideRole::List),
        "transitionend",
    ),
    bind(
        TriggerKind::PointerEnter,
        ListenTarget::Role(SlideRole::Wrapper),
        "mouseenter",
    ),
    bind(
        TriggerKind::PointerLeave,
        ListenTarget::Role(SlideRole::Wrapper),
        "mouseleave",
    ),
    bind(TriggerKind::Resize, ListenTarget::Window, "resize"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn each_kind_is_bound_at_most_once() {
        let mut seen = HashSet::new();
        for binding in TRIGGER_TABLE {
            assert!(seen.insert(binding.kind), "{:?} bound twice", binding.kind);
        }
    }

    #[test]
    fn slide_items_receive_press_and_release() {
        let events: Vec<&str> = TRIGGER_TABLE
            .iter()
            .filter(|b| b.target == ListenTarget::Role(SlideRole::Item))
            .map(|b| b.event)
            .collect();
        assert_eq!(events, vec!["mousedown", "mouseup", "touchstart", "touchend"]);
    }

    #[test]
    fn timer_and_move_triggers_are_not_table_driven() {
        for kind in [
            TriggerKind::Move,
            TriggerKind::ResizeSettled,
            TriggerKind::AutoPlayTick,
        ] {
            assert!(TRIGGER_TABLE.iter().all(|b| b.kind != kind));
        }
    }

    #[test]
    fn kind_tracks_pointer_source() {
        let press = Trigger::Press {
            slide: 2,
            source: PointerSource::Touch,
            x: 0.0,
        };
        assert_eq!(press.kind(), TriggerKind::TouchPress);
        assert_eq!(
            Trigger::Release {
                source: PointerSource::Mouse
            }
            .kind()
            .name(),
            "mouse_release"
        );
    }
}
