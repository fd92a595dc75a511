use std::io::Write;
use std::sync::{Arc, Mutex};

use scene_core::element::{BindingEnd, ElementId, VersionStamp};
use scene_core::models::{Repair, Side};
use scene_observability::events;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(level: &str, f: impl FnOnce()) -> Vec<serde_json::Value> {
    let sink = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_writer(sink.clone())
        .json()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    sink.lines()
}

#[test]
fn divergent_tie_is_a_structured_warning() {
    let lines = capture("warn", || {
        events::divergent_tie(&ElementId::from("a"), VersionStamp::new(2, 7), Side::Local);
    });
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "WARN");
    assert_eq!(lines[0]["fields"]["event"], "divergent_tie");
    assert_eq!(lines[0]["fields"]["element_id"], "a");
    assert_eq!(lines[0]["fields"]["stamp"], "v2#7");
}

#[test]
fn debug_events_are_filtered_at_info() {
    let lines = capture("info", || {
        events::record_resolved(&ElementId::from("a"), Side::Remote, VersionStamp::new(3, 1));
        events::repair_applied(&Repair::ClearBinding {
            element: "a1".into(),
            end: BindingEnd::Start,
        });
        events::reconcile_completed(10, 2, 1, 0);
    });
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["fields"]["event"], "repair_applied");
    assert_eq!(lines[1]["fields"]["event"], "reconcile_completed");
    assert_eq!(lines[1]["fields"]["elements"], 10);
}

#[test]
fn rejected_record_carries_reason() {
    let lines = capture("debug", || {
        events::record_rejected("r9", Side::Remote, "version must be at least 1");
        events::heal_exhausted(4, 2);
    });
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["fields"]["reason"], "version must be at least 1");
    assert_eq!(lines[1]["fields"]["remaining"], 2);
}

#[test]
fn events_without_subscriber_are_noops() {
    events::reconcile_completed(0, 0, 0, 0);
    events::heal_exhausted(1, 1);
}

#[test]
fn span_names_are_namespaced() {
    use scene_observability::tracing_setup::spans::names;
    assert!(names::RECONCILE.starts_with("scene."));
    assert!(names::HEAL.starts_with("scene."));
    let span = scene_observability::reconcile_span!(3, 4);
    let _guard = span.enter();
}
