//! Edition actions flowing through the dispatch stack

use std::time::Duration;

use edition_section::*;
use form_dispatch::testing::{RecordingMiddleware, TestHarness};
use form_dispatch::{
    advance_time, assert_emitted, assert_not_emitted, count_emitted, ComposedMiddleware,
    DebounceConfig, DebounceMiddleware, DispatchRuntime, StoreWithMiddleware,
};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn debounce(window_ms: u64) -> DebounceMiddleware<EditionAction> {
    DebounceMiddleware::new(
        DebounceConfig::empty().with_window("keystroke", Duration::from_millis(window_ms)),
    )
}

#[test]
fn test_only_typed_fields_are_held() {
    let mut store = StoreWithMiddleware::new(EditionSectionState::default(), reducer, debounce(250));

    assert!(store.dispatch(update_status(Some(2))));
    assert!(!store.dispatch(debounced_update_pages(Some(3.0))));
    assert!(!store.dispatch(debounced_update_pages(Some(32.0))));
    assert!(store.dispatch(show_physical()));

    assert_eq!(store.state().status, Some(2));
    assert_eq!(store.state().pages, None);
    assert!(store.middleware().is_pending(UPDATE_PAGES));

    let later = Instant::now() + Duration::from_secs(1);
    assert!(store.flush_due(later));
    assert_eq!(store.state().pages, Some(32.0));
    assert_eq!(store.middleware().pending_len(), 0);
}

#[test]
fn test_each_field_keeps_its_own_slot() {
    let recorder = RecordingMiddleware::new();
    let middleware = ComposedMiddleware::new().with(debounce(250)).with(recorder.clone());
    let mut store = StoreWithMiddleware::new(EditionSectionState::default(), reducer, middleware);

    store.dispatch(debounced_update_width(Some(1.0)));
    store.dispatch(debounced_update_height(Some(2.0)));
    store.dispatch(debounced_update_width(Some(12.0)));
    assert!(recorder.applied().is_empty());

    assert!(store.flush_all());
    assert_eq!(store.state().width, Some(12.0));
    assert_eq!(store.state().height, Some(2.0));

    let mut names = recorder.applied_names();
    names.sort_unstable();
    assert_eq!(names, vec![UPDATE_HEIGHT, UPDATE_WIDTH]);
}

#[test]
fn test_harness_separates_debounced_actions() {
    let mut harness = TestHarness::<EditionSectionState, EditionAction>::default();

    harness.emit(debounced_update_weight(Some(2.0)));
    harness.emit(update_format(Some(1)));
    harness.emit(debounced_update_weight(Some(250.0)));

    let typed = harness.drain_debounced("keystroke");
    assert_eq!(count_emitted!(typed, EditionAction::UpdateWeight(_)), 2);
    assert_not_emitted!(typed, EditionAction::UpdateFormat(_));

    let rest = harness.drain_emitted();
    assert_emitted!(rest, EditionAction::UpdateFormat(Some(1)));
    assert_eq!(rest.len(), 1);
}

#[test]
fn test_decoded_stream_drives_reducer() {
    let input = r#"
{"type":"SHOW_PHYSICAL"}
{"type":"UPDATE_WEIGHT","payload":250.5,"meta":{"debounce":"keystroke"}}
{"type":"UPDATE_LANGUAGES","payload":[{"name":"English","id":1}]}
{"type":"UPDATE_PUBLISHER","payload":{"value":"Acme","id":42}}
"#;
    let mut harness = TestHarness::<EditionSectionState, EditionAction>::default();
    for action in decode_lines(input.as_bytes()) {
        harness.emit(action.unwrap());
    }

    assert!(harness.apply_emitted(reducer));
    let state = &harness.state;
    assert!(state.physical_visible);
    assert_eq!(state.weight, Some(250.5));
    assert_eq!(state.languages, vec![LanguageOption::new("English", 1)]);
    assert_eq!(state.publisher, Some(EntityOption::new("Acme", 42)));
}

#[tokio::test(start_paused = true)]
async fn test_runtime_coalesces_keystrokes() {
    let runtime = DispatchRuntime::new(EditionSectionState::default(), reducer, debounce(40));
    let tx = runtime.action_tx();
    let cancel = CancellationToken::new();

    let mut changes = 0usize;
    let handle = tokio::spawn(async move {
        let store = runtime.run(cancel, |_| changes += 1).await;
        (store, changes)
    });

    for pages in [3.0, 32.0, 320.0] {
        tx.send(debounced_update_pages(Some(pages))).unwrap();
    }
    tx.send(update_status(Some(1))).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    drop(tx);

    let (store, changes) = handle.await.expect("runtime panicked");
    assert_eq!(store.state().pages, Some(320.0));
    assert_eq!(store.state().status, Some(1));
    // One change for the status, one for the released page count
    assert_eq!(changes, 2);
}

#[tokio::test(start_paused = true)]
async fn test_weight_released_after_keystroke_window() {
    let runtime = DispatchRuntime::new(EditionSectionState::default(), reducer, debounce(250));
    let tx = runtime.action_tx();
    let cancel = CancellationToken::new();
    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(runtime.run(cancel.clone(), move |state: &EditionSectionState| {
        let _ = seen_tx.send(state.weight);
    }));

    tx.send(debounced_update_weight(Some(250.0))).unwrap();
    tokio::task::yield_now().await;

    advance_time(Duration::from_millis(249)).await;
    assert!(seen_rx.try_recv().is_err());

    advance_time(Duration::from_millis(1)).await;
    let weight = seen_rx.recv().await.expect("runtime stopped");
    assert_eq!(weight, Some(250.0));

    cancel.cancel();
    handle.await.expect("runtime panicked");
}
