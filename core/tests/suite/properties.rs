use leap_core::CandidateKey;
use leap_core::Label;
use leap_core::SearchOptions;
use leap_core::SearchSession;
use leap_core::Transition;
use leap_core::host::DocumentId;
use leap_core::host::EditorHost;
use leap_core::host::Position;
use leap_core::host::Selection;
use leap_core::memory::MemoryHost;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

const SOURCE: &str = "\
fn main() {
    let items = vec![1, 2, 3];
    for item in items.iter() {
        println!(\"{item}\");
    }
    let total: i32 = items.iter().sum();
    println!(\"{total}\");
}";

fn open(options: SearchOptions) -> (Arc<MemoryHost>, SearchSession<MemoryHost>) {
    let host = Arc::new(MemoryHost::new());
    host.add_view(DocumentId::new("main.rs"), SOURCE);
    host.add_view(DocumentId::new("copy.rs"), SOURCE);
    let session = SearchSession::new(Arc::clone(&host), options);
    (host, session)
}

fn open_repeated(options: SearchOptions) -> (Arc<MemoryHost>, SearchSession<MemoryHost>) {
    let host = Arc::new(MemoryHost::new());
    host.add_view(DocumentId::new("ab.txt"), &"ab ".repeat(40));
    let session = SearchSession::new(Arc::clone(&host), options);
    (host, session)
}

fn labels(session: &SearchSession<MemoryHost>) -> HashMap<CandidateKey, Label> {
    session
        .index()
        .candidates()
        .filter_map(|candidate| candidate.label.map(|label| (candidate.key, label)))
        .collect()
}

fn drawn(host: &MemoryHost) -> HashSet<(usize, usize)> {
    host.overlays()
        .into_iter()
        .map(|overlay| (overlay.range.start.line, overlay.range.start.column))
        .collect()
}

#[test]
fn every_occurrence_in_every_view_gets_a_distinct_label() {
    let (_host, mut session) = open(SearchOptions::bidirectional().with_all_editors(true));

    session.query_changed("it");

    let labels = labels(&session);
    // Per view: "items" three times, "item" and "iter" twice each.
    assert_eq!(14, labels.len());
    let distinct: HashSet<&Label> = labels.values().collect();
    assert_eq!(labels.len(), distinct.len());
}

#[test]
fn refiltering_the_same_query_changes_nothing() {
    let (host, mut session) = open(SearchOptions::bidirectional());

    session.query_changed("it");
    let first_labels = labels(&session);
    let first_drawn = drawn(&host);
    session.query_changed("it");

    assert_eq!(first_labels, labels(&session));
    assert_eq!(first_drawn, drawn(&host));
}

#[test]
fn discriminator_edits_keep_labels_stable() {
    let (_host, mut session) = open_repeated(SearchOptions::bidirectional());

    session.query_changed("ab");
    let before = labels(&session);
    assert!(matches!(
        session.query_changed("abb"),
        Transition::Narrowing { matches: 2 }
    ));
    assert_eq!(before, labels(&session));
    session.query_changed("ab");

    assert_eq!(before, labels(&session));
}

#[test]
fn longer_queries_only_narrow() {
    let (host, mut session) = open_repeated(SearchOptions::bidirectional());

    session.query_changed("ab");
    let broad = drawn(&host);
    session.query_changed("abb");
    let narrow = drawn(&host);

    assert_eq!(40, broad.len());
    assert_eq!(2, narrow.len());
    assert!(narrow.is_subset(&broad));
    let visible = session
        .index()
        .candidates()
        .filter(|candidate| candidate.visible)
        .count();
    assert_eq!(2, visible);
    assert_eq!(40, session.index().len());
}

#[test]
fn forward_only_never_offers_candidates_behind_the_caret() {
    let (host, mut session) = open(SearchOptions::forward());
    let view = host.active_view().unwrap();
    let caret = Position::new(3, 0);
    host.set_selection(view, Selection::caret(caret));

    session.query_changed("it");

    let starts: Vec<Position> = host
        .overlays()
        .into_iter()
        .filter(|overlay| overlay.view == view)
        .map(|overlay| overlay.range.start)
        .collect();
    assert!(!starts.is_empty());
    assert!(starts.iter().all(|start| *start >= caret));
}

#[test]
fn backward_only_keeps_candidates_before_the_selection() {
    let (host, mut session) = open(SearchOptions::backward());
    let view = host.active_view().unwrap();
    host.set_selection(
        view,
        Selection::new(Position::new(3, 0), Position::new(5, 0)),
    );

    session.query_changed("it");

    let starts: Vec<Position> = host
        .overlays()
        .into_iter()
        .map(|overlay| overlay.range.start)
        .collect();
    assert_eq!(
        vec![
            Position::new(1, 8),
            Position::new(2, 8),
            Position::new(2, 16),
            Position::new(2, 22),
            Position::new(3, 19),
        ],
        starts
    );
}
