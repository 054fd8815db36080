#![forbid(unsafe_code)]

//! End-to-end carousel scenarios driven through the simulated host.
//!
//! | Scenario | Checks |
//! |----------|--------|
//! | Initialization | start slide, control, committed offset |
//! | Pagination | control click lands on `control + 2` |
//! | Wraparound | forward/backward loops settle without animation |
//! | Drag | mouse/touch thresholds, snap-back, listener detach |
//! | Timers | hover discipline, debounced resize |

use core::time::Duration;

use loopslide_core::sim::SimulatedHost;
use loopslide_core::{CarouselConfig, FixedMetrics, PointerSource, center_offset};
use pretty_assertions::assert_eq;

const VIEWPORT: f64 = 1200.0;
const SLIDE: f64 = 800.0;

fn metrics() -> FixedMetrics {
    FixedMetrics::new(VIEWPORT, SLIDE)
}

fn manual_host(slides: usize) -> SimulatedHost {
    SimulatedHost::new(
        CarouselConfig {
            auto_play: false,
            ..CarouselConfig::default()
        },
        slides,
        metrics(),
    )
    .expect("valid carousel")
}

fn assert_settled_control(host: &SimulatedHost) {
    let seq = host.carousel().sequence();
    let n = seq.original_count() as i64;
    let expected = (host.current_index() as i64 - 2).rem_euclid(n) as usize;
    assert_eq!(host.state().active_control, Some(expected));
}

// ============================================================================
// Initialization and pagination
// ============================================================================

#[test]
fn five_slides_start_at_first_real_slide() {
    let host = manual_host(5);
    assert_eq!(host.current_index(), 2);
    assert_eq!(host.state().active_control, Some(0));
    assert_eq!(host.state().saved_position, center_offset(2, SLIDE, VIEWPORT));
    assert_eq!(host.carousel().sequence().len(), 9);
}

#[test]
fn start_at_index_offsets_into_extended_space() {
    let host = SimulatedHost::new(
        CarouselConfig {
            start_at_index: 4,
            auto_play: false,
            ..CarouselConfig::default()
        },
        5,
        metrics(),
    )
    .unwrap();
    assert_eq!(host.current_index(), 6);
    assert_eq!(host.state().active_control, Some(4));
}

#[test]
fn clicking_control_three_settles_on_extended_five() {
    let mut host = manual_host(5);
    host.click_control(3);
    host.finish_transition();
    assert_eq!(host.current_index(), 5);
    assert_eq!(host.state().active_control, Some(3));
    assert_eq!(host.state().saved_position, center_offset(5, SLIDE, VIEWPORT));
}

// ============================================================================
// Wraparound
// ============================================================================

#[test]
fn advancing_past_last_real_slide_wraps_without_animation() {
    let mut host = manual_host(5);
    host.click_control(4);
    host.finish_transition();
    assert_eq!(host.current_index(), 6);

    host.click_next();
    assert_eq!(host.current_index(), 7);
    assert!(host.transition_running());
    host.finish_transition();

    assert_eq!(host.current_index(), 2);
    assert_settled_control(&host);
    let last = host.history().last().unwrap();
    assert_eq!(last.transition, "none");
    assert_eq!(
        last.transform,
        format!("translateX({}px)", center_offset(2, SLIDE, VIEWPORT))
    );
    assert!(!host.transition_running(), "correction must not animate");
}

#[test]
fn retreating_from_first_real_slide_wraps_to_last() {
    let mut host = manual_host(5);
    host.click_previous();
    host.finish_transition();
    assert_eq!(host.current_index(), 6);
    assert_settled_control(&host);
    assert_eq!(host.history().last().unwrap().transition, "none");
}

#[test]
fn full_loop_forward_returns_to_start() {
    let mut host = manual_host(4);
    for _ in 0..4 {
        host.click_next();
        host.finish_transition();
        assert_settled_control(&host);
    }
    assert_eq!(host.current_index(), 2);
}

#[test]
fn fast_clicks_never_rest_on_guard() {
    let mut host = manual_host(3);
    // No transitionend between clicks: the strip reaches the trailing clone,
    // then further clicks are clamped instead of landing on the guard.
    for _ in 0..6 {
        host.click_next();
        let seq = host.carousel().sequence();
        assert!(!seq.is_guard(host.current_index()));
    }
    assert_eq!(host.current_index(), 5);
    host.finish_transition();
    assert_eq!(host.current_index(), 2);
}

#[test]
fn tapping_strip_mid_wrap_transition_still_wraps() {
    let mut host = SimulatedHost::new(CarouselConfig::default(), 5, metrics()).unwrap();
    host.click_control(4);
    host.finish_transition();
    host.click_next();
    assert_eq!(host.current_index(), 7);

    host.press(7, PointerSource::Mouse, 640.0);
    assert!(!host.transition_running(), "press cancels the transition");
    host.release(PointerSource::Mouse);
    assert_eq!(host.current_index(), 2);
    assert_settled_control(&host);
    assert_eq!(host.history().last().unwrap().transition, "none");

    host.advance_time(Duration::from_millis(3000));
    assert_eq!(host.current_index(), 3);
    host.click_next();
    assert_eq!(host.current_index(), 4);
}

// ============================================================================
// Drag
// ============================================================================

#[test]
fn mouse_drag_beyond_threshold_advances() {
    let mut host = manual_host(5);
    host.drag(2, PointerSource::Mouse, 600.0, 449.0);
    assert_eq!(host.current_index(), 3);
}

#[test]
fn mouse_drag_short_of_threshold_snaps_back() {
    let mut host = manual_host(5);
    host.drag(2, PointerSource::Mouse, 600.0, 451.0);
    assert_eq!(host.current_index(), 2);
    assert_eq!(host.state().saved_position, center_offset(2, SLIDE, VIEWPORT));
    assert_eq!(host.history().last().unwrap().transition, "transform .5s");
}

#[test]
fn mouse_drag_right_retreats() {
    let mut host = manual_host(5);
    host.drag(2, PointerSource::Mouse, 100.0, 260.0);
    assert_eq!(host.current_index(), 1);
    host.finish_transition();
    assert_eq!(host.current_index(), 6);
}

#[test]
fn touch_swipe_uses_fifty_pixel_threshold() {
    let mut host = manual_host(5);
    host.drag(2, PointerSource::Touch, 300.0, 240.0);
    assert_eq!(host.current_index(), 3);

    let mut host = manual_host(5);
    host.drag(2, PointerSource::Mouse, 300.0, 240.0);
    assert_eq!(host.current_index(), 2);
}

#[test]
fn drag_moves_strip_without_transition_and_detaches() {
    let mut host = manual_host(5);
    let settled = host.state().saved_position;
    host.press(2, PointerSource::Mouse, 500.0);
    assert_eq!(host.history().last().unwrap().transition, "none");
    host.move_over(2, 520.0);
    assert_eq!(host.state().saved_position, settled + 20.0);
    host.move_over(2, 480.0);
    assert_eq!(host.state().saved_position, settled - 20.0);
    host.release(PointerSource::Mouse);
    assert!(host.move_listeners().is_empty());
    host.move_over(2, 0.0);
    assert_eq!(host.state().saved_position, settled);
}

#[test]
fn drag_from_displaced_strip_is_relative_to_current_offset() {
    let mut host = manual_host(5);
    host.click_next();
    let offset = host.state().saved_position;
    host.press(3, PointerSource::Touch, 200.0);
    assert_eq!(host.state().current_point, 200.0 - offset);
    host.move_over(3, 230.0);
    assert_eq!(host.state().saved_position, offset + 30.0);
}

// ============================================================================
// Timers
// ============================================================================

#[test]
fn auto_play_advances_every_interval() {
    let mut host = SimulatedHost::new(
        CarouselConfig {
            time_interval: 500,
            ..CarouselConfig::default()
        },
        5,
        metrics(),
    )
    .unwrap();
    host.advance_time(Duration::from_millis(500));
    assert_eq!(host.current_index(), 3);
    host.finish_transition();
    host.advance_time(Duration::from_millis(500));
    assert_eq!(host.current_index(), 4);
}

#[test]
fn hover_pauses_and_leave_restarts_single_timer() {
    let mut host = SimulatedHost::new(CarouselConfig::default(), 5, metrics()).unwrap();
    host.advance_time(Duration::from_millis(2000));
    host.trigger(loopslide_core::Trigger::PointerEnter);
    assert_eq!(host.auto_play_timers(), 0);
    host.advance_time(Duration::from_secs(30));
    assert_eq!(host.current_index(), 2);

    for _ in 0..5 {
        host.trigger(loopslide_core::Trigger::PointerLeave);
        assert_eq!(host.auto_play_timers(), 1);
        host.trigger(loopslide_core::Trigger::PointerEnter);
        assert_eq!(host.auto_play_timers(), 0);
    }
    host.trigger(loopslide_core::Trigger::PointerLeave);
    host.trigger(loopslide_core::Trigger::PointerLeave);
    assert_eq!(host.auto_play_timers(), 1);

    // Restart is a fresh timer: full period from the leave.
    host.advance_time(Duration::from_millis(2999));
    assert_eq!(host.current_index(), 2);
    host.advance_time(Duration::from_millis(1));
    assert_eq!(host.current_index(), 3);
}

#[test]
fn manual_navigation_does_not_reset_auto_play_phase() {
    let mut host = SimulatedHost::new(CarouselConfig::default(), 5, metrics()).unwrap();
    host.advance_time(Duration::from_millis(2500));
    host.click_next();
    host.finish_transition();
    assert_eq!(host.current_index(), 3);
    host.advance_time(Duration::from_millis(500));
    assert_eq!(host.current_index(), 4);
}

#[test]
fn resize_burst_recenters_once_after_quiet_period() {
    let mut host = manual_host(5);
    host.finish_transition();
    let before = host.history().len();

    host.set_metrics(FixedMetrics::new(600.0, 400.0));
    for _ in 0..4 {
        host.trigger(loopslide_core::Trigger::Resize);
        host.advance_time(Duration::from_millis(300));
    }
    assert_eq!(host.resize_timers(), 1);
    assert_eq!(host.history().len(), before);

    host.advance_time(Duration::from_millis(700));
    assert_eq!(host.resize_timers(), 0);
    assert_eq!(host.history().len(), before + 1);
    assert_eq!(host.state().saved_position, center_offset(2, 400.0, 600.0));
    assert_eq!(host.history().last().unwrap().transition, "transform .5s");
}

#[test]
fn resize_settling_mid_drag_snaps_strip() {
    let mut host = manual_host(5);
    host.trigger(loopslide_core::Trigger::Resize);
    host.press(2, PointerSource::Mouse, 500.0);
    host.move_over(2, 450.0);
    host.advance_time(Duration::from_millis(1000));
    assert_eq!(host.state().saved_position, center_offset(2, SLIDE, VIEWPORT));
    host.release(PointerSource::Mouse);
    assert_eq!(host.current_index(), 2);
    assert!(host.move_listeners().is_empty());
}

#[test]
fn teardown_clears_host_timers_and_listeners() {
    let mut host = SimulatedHost::new(CarouselConfig::default(), 5, metrics()).unwrap();
    host.trigger(loopslide_core::Trigger::Resize);
    host.press(3, PointerSource::Touch, 10.0);
    host.teardown();
    assert_eq!(host.auto_play_timers(), 0);
    assert_eq!(host.resize_timers(), 0);
    assert!(host.move_listeners().is_empty());
    host.advance_time(Duration::from_secs(10));
    assert_eq!(host.current_index(), 3);
}
