use leap_core::Leap;
use leap_core::LeapConfig;
use leap_core::SearchOptions;
use leap_core::SearchSession;
use leap_core::SessionEvent;
use leap_core::SessionState;
use leap_core::Transition;
use leap_core::host::DocumentId;
use leap_core::host::EditorHost;
use leap_core::host::Position;
use leap_core::host::Selection;
use leap_core::host::Workbench;
use leap_core::memory::MemoryHost;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn query(text: &str) -> SessionEvent {
    SessionEvent::QueryChanged(text.to_string())
}

/// Replays `text` one keystroke at a time, the way an input box reports it.
async fn type_query(leap: &mut Leap<MemoryHost>, text: &str) -> Option<SessionState> {
    let mut state = None;
    for end in text.char_indices().map(|(idx, ch)| idx + ch.len_utf8()) {
        state = leap.handle(query(&text[..end]));
    }
    leap.settle().await;
    state
}

fn index_labels(session: &SearchSession<MemoryHost>) -> Vec<(usize, String)> {
    session
        .index()
        .candidates()
        .map(|candidate| {
            let label = candidate
                .label
                .map(|label| label.as_str().to_string())
                .unwrap_or_default();
            (candidate.key.start, label)
        })
        .collect()
}

#[test]
fn anchor_occurrences_get_labels_in_reading_order() {
    let host = Arc::new(MemoryHost::new());
    host.add_view(DocumentId::new("a.txt"), "foo bar foo baz");
    let mut session = SearchSession::new(Arc::clone(&host), SearchOptions::bidirectional());

    session.query_changed("fo");

    assert_eq!(
        vec![(0, "aa".to_string()), (8, "ba".to_string())],
        index_labels(&session)
    );
    let drawn: Vec<String> = host.overlays().into_iter().map(|overlay| overlay.label).collect();
    assert_eq!(vec!["a", "b"], drawn);
}

#[tokio::test]
async fn unique_discriminator_jumps_without_accept() {
    let host = Arc::new(MemoryHost::new());
    let view = host.add_view(DocumentId::new("a.txt"), "foo bar foo baz");
    let mut leap = Leap::new(Arc::clone(&host), LeapConfig::default());
    leap.start_with(SearchOptions::bidirectional()).unwrap();

    let state = type_query(&mut leap, "fob").await;

    assert_eq!(Some(SessionState::Jumped), state);
    assert_eq!(
        Some(Selection::caret(Position::new(0, 8))),
        host.selection(view)
    );
    assert!(host.overlays().is_empty());
    assert!(leap.session().is_none());
}

#[test]
fn changing_the_anchor_starts_a_new_generation() {
    let host = Arc::new(MemoryHost::new());
    host.add_view(DocumentId::new("a.txt"), "foo bar foo baz");
    let mut session = SearchSession::new(Arc::clone(&host), SearchOptions::bidirectional());

    session.query_changed("fo");
    session.query_changed("ba");

    assert_eq!(
        vec![(4, "aa".to_string()), (12, "ba".to_string())],
        index_labels(&session)
    );
    let starts: Vec<usize> = host
        .overlays()
        .into_iter()
        .map(|overlay| overlay.range.start.column)
        .collect();
    assert_eq!(vec![4, 12], starts);
}

#[tokio::test]
async fn accept_takes_the_first_candidate_across_views() {
    let host = Arc::new(MemoryHost::new());
    let top = host.add_view(DocumentId::new("a.txt"), "zz\nxx fo");
    let bottom = host.add_view(DocumentId::new("b.txt"), "fo");
    host.focus_view(bottom);
    let mut leap = Leap::new(Arc::clone(&host), LeapConfig::default());
    leap.start_with(SearchOptions::bidirectional().with_all_editors(true))
        .unwrap();

    assert_eq!(Some(SessionState::Narrowing), type_query(&mut leap, "fo").await);
    let state = leap.handle(SessionEvent::Accept);
    leap.settle().await;

    assert_eq!(Some(SessionState::Jumped), state);
    assert_eq!(Some(top), host.active_view());
    assert_eq!(Some(Selection::caret(Position::new(1, 3))), host.selection(top));
}

#[test]
fn no_focused_view_yields_nothing() {
    let host = Arc::new(MemoryHost::new());
    let mut session = SearchSession::new(Arc::clone(&host), SearchOptions::forward());

    let transition = session.query_changed("fo");

    assert!(matches!(transition, Transition::Narrowing { matches: 0 }));
    assert!(session.index().is_empty());
    assert!(host.overlays().is_empty());
}

#[tokio::test]
async fn unreachable_comparison_view_is_a_silent_no_op() {
    let host = Arc::new(MemoryHost::new());
    host.add_view(DocumentId::new("notes.txt"), "nothing here");
    let (original, _) = host.add_comparison(
        (DocumentId::new("old.rs"), "let target = 1;"),
        (DocumentId::new("new.rs"), "let other = 2;"),
    );
    host.pin_groups(true);
    let mut leap = Leap::new(Arc::clone(&host), LeapConfig::default());
    leap.start_with(SearchOptions::bidirectional().with_all_editors(true))
        .unwrap();

    let state = type_query(&mut leap, "ta").await;

    assert_eq!(Some(SessionState::Jumped), state);
    assert_eq!(2, host.group_cycles());
    assert_eq!(None, leap.last_jump());
    assert_eq!(Some(Selection::default()), host.selection(original));
    assert!(host.overlays().is_empty());
    assert!(leap.session().is_none());
}

#[tokio::test]
async fn comparison_side_is_found_and_caret_placed() {
    let host = Arc::new(MemoryHost::new());
    host.add_view(DocumentId::new("notes.txt"), "nothing here");
    let (original, _) = host.add_comparison(
        (DocumentId::new("old.rs"), "let target = 1;"),
        (DocumentId::new("new.rs"), "let other = 2;"),
    );
    let mut leap = Leap::new(Arc::clone(&host), LeapConfig::default());
    leap.start_with(SearchOptions::bidirectional().with_all_editors(true))
        .unwrap();

    let state = type_query(&mut leap, "ta").await;

    assert_eq!(Some(SessionState::Jumped), state);
    assert_eq!(Some(DocumentId::new("old.rs")), host.active_document());
    assert_eq!(
        Some(Selection::caret(Position::new(0, 4))),
        host.selection(original)
    );
}
