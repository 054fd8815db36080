//! Structured logging of navigation decisions.

use std::sync::{Arc, Mutex};

use loopslide_core::sim::SimulatedHost;
use loopslide_core::{CarouselConfig, FixedMetrics, PointerSource};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    target: String,
    message: String,
    fields: Vec<(String, String)>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(name, _)| name == "message")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            target: event.metadata().target().to_string(),
            message,
            fields: visitor.0,
        });
    }
}

fn with_captured_tracing<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn manual() -> CarouselConfig {
    CarouselConfig {
        auto_play: false,
        ..CarouselConfig::default()
    }
}

#[test]
fn wraparound_correction_is_logged() {
    let events = with_captured_tracing(|| {
        let mut host =
            SimulatedHost::new(manual(), 3, FixedMetrics::new(900.0, 300.0)).expect("valid");
        host.click_previous();
        host.finish_transition();
    });
    let wrap = events
        .iter()
        .find(|e| e.message == "wraparound correction")
        .expect("wraparound event");
    assert_eq!(wrap.target, "loopslide.nav");
    assert!(wrap.fields.contains(&("from".to_string(), "1".to_string())));
    assert!(wrap.fields.contains(&("to".to_string(), "4".to_string())));
}

#[test]
fn drag_release_logs_decision() {
    let events = with_captured_tracing(|| {
        let mut host =
            SimulatedHost::new(manual(), 4, FixedMetrics::new(900.0, 300.0)).expect("valid");
        host.drag(2, PointerSource::Touch, 300.0, 200.0);
    });
    let release = events
        .iter()
        .find(|e| e.message == "drag released")
        .expect("release event");
    assert_eq!(release.target, "loopslide.drag");
    assert!(
        release
            .fields
            .contains(&("decision".to_string(), "Advance".to_string()))
    );
}
