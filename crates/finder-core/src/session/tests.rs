use std::time::Duration;

use finder_config::FinderConfig;
use finder_dom::{parse_html, Document, EventKind};

use super::*;
use crate::options::{Direction, SearchOptions};
use crate::scheduler::ManualClock;

fn session() -> (FindSession, ManualClock) {
    let clock = ManualClock::new();
    let session = FindSession::with_clock(&FinderConfig::default(), Box::new(clock.clone()));
    (session, clock)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn any() -> SearchOptions {
    SearchOptions::default()
}

fn by_id(doc: &Document, id: &str) -> finder_dom::NodeId {
    doc.element_by_id(id).unwrap()
}

const DETAILS_PAGE: &str = concat!(
    r#"<p>intro key</p>"#,
    r#"<details id="d1"><summary id="s1">More</summary><p>first key</p></details>"#,
    r#"<details id="d2"><summary id="s2">Even more</summary><p>second key</p></details>"#,
);

// =============================================================================
// Searching and clearing
// =============================================================================

#[test]
fn repeated_search_and_clear_keeps_the_arena_flat() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>alpha beta alpha</p>").unwrap();
    let html = doc.inner_html(doc.body());
    let live = doc.node_count();

    s.search(&mut doc, "alpha", any());
    s.clear(&mut doc);
    let slots = doc.slot_count();

    for _ in 0..200 {
        assert_eq!(s.search(&mut doc, "alpha", any()).match_count, 2);
        s.clear(&mut doc);
        assert_eq!(doc.node_count(), live);
    }
    assert_eq!(doc.slot_count(), slots);
    assert_eq!(doc.inner_html(doc.body()), html);
}

#[test]
fn badges_do_not_accumulate_across_searches() {
    let (mut s, _) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    let live = doc.node_count();

    // The first re-search may still need one fresh slot.
    s.search(&mut doc, "key", any());
    s.search(&mut doc, "key", any());
    let slots = doc.slot_count();
    for _ in 0..50 {
        assert_eq!(s.search(&mut doc, "key", any()).expandable_count, 2);
    }
    assert_eq!(doc.slot_count(), slots);
    s.clear(&mut doc);
    assert_eq!(doc.node_count(), live);
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn hello_world_counts_and_cursor() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>Hello world, hello again</p>").unwrap();

    let summary = s.search(&mut doc, "hello", any());
    assert_eq!(
        summary,
        SearchSummary {
            match_count: 2,
            current_match: 1,
            visible_count: 2,
            hidden_count: 0,
            expandable_count: 0,
        }
    );
    assert_eq!(s.phase(), Phase::Highlighted);

    assert_eq!(s.navigate(&mut doc, Direction::Next).current_match, 2);
    assert_eq!(s.navigate(&mut doc, Direction::Next).current_match, 1);
}

#[test]
fn navigate_wraps_both_ways() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>x</p><p>x</p><p>x</p>").unwrap();
    s.search(&mut doc, "x", any());

    assert_eq!(s.navigate(&mut doc, Direction::Previous).current_match, 3);
    assert_eq!(s.navigate(&mut doc, Direction::Previous).current_match, 2);
    assert_eq!(s.navigate(&mut doc, Direction::Next).current_match, 3);
    assert_eq!(s.navigate(&mut doc, Direction::Next).current_match, 1);

    let current = s.state().highlights.current_marker().unwrap();
    assert!(doc.has_class(current, "tf-current-highlight"));
}

#[test]
fn case_insensitive_search_and_clear_restores_text() {
    let (mut s, _) = session();
    let html = "<h1>Rust</h1><p>rust RUST rUsT and trust</p>";
    let mut doc = parse_html(html).unwrap();
    let before = doc.to_html();

    assert_eq!(s.search(&mut doc, "rust", any()).match_count, 5);
    assert_ne!(doc.to_html(), before);

    assert_eq!(s.clear(&mut doc), 5);
    assert_eq!(doc.to_html(), before);
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.summary(), SearchSummary::default());
}

#[test]
fn match_case_narrows_results() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>Rust rust RUST</p>").unwrap();
    let options = SearchOptions {
        match_case: true,
        whole_word: false,
    };
    assert_eq!(s.search(&mut doc, "rust", options).match_count, 1);
}

#[test]
fn clear_twice_is_a_no_op() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>abc</p>").unwrap();
    s.search(&mut doc, "abc", any());
    s.clear(&mut doc);
    let once = doc.to_html();
    assert_eq!(s.clear(&mut doc), 0);
    assert_eq!(doc.to_html(), once);
}

#[test]
fn overlapping_matches_are_all_counted() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>aaa</p>").unwrap();
    assert_eq!(s.search(&mut doc, "aa", any()).match_count, 2);
    s.clear(&mut doc);
    assert_eq!(doc.inner_html(doc.body()), "<p>aaa</p>");
}

#[test]
fn whole_word_skips_partial_words() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>cat category</p>").unwrap();
    let options = SearchOptions {
        match_case: false,
        whole_word: true,
    };
    assert_eq!(s.search(&mut doc, "cat", options).match_count, 1);
}

#[test]
fn repeated_pattern_highlights_and_restores() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>abcabc</p>").unwrap();
    assert_eq!(s.search(&mut doc, "abc", any()).match_count, 2);
    assert_eq!(s.state().highlights.len(), 2);
    s.clear(&mut doc);
    assert_eq!(doc.inner_html(doc.body()), "<p>abcabc</p>");
}

#[test]
fn visible_and_hidden_partition_all_matches() {
    let (mut s, _) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    let summary = s.search(&mut doc, "key", any());
    assert_eq!(summary.visible_count, 1);
    assert_eq!(summary.hidden_count, 2);
    assert_eq!(summary.visible_count + summary.hidden_count, 3);

    let marked: Vec<_> = s
        .state()
        .highlights
        .markers()
        .iter()
        .filter_map(|m| doc.parent(*m))
        .collect();
    assert!(s
        .state()
        .hidden_spans
        .iter()
        .all(|h| !marked.contains(&doc.parent(h.node).unwrap())));
}

#[test]
fn empty_query_clears_and_idles() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>abc</p>").unwrap();
    s.search(&mut doc, "abc", any());
    let summary = s.search(&mut doc, "", any());
    assert_eq!(summary, SearchSummary::default());
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(doc.inner_html(doc.body()), "<p>abc</p>");
}

#[test]
fn no_match_is_idle() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>abc</p>").unwrap();
    assert_eq!(s.search(&mut doc, "xyz", any()), SearchSummary::default());
    assert_eq!(s.phase(), Phase::Idle);
}

#[test]
fn new_search_replaces_previous_markup() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>alpha beta</p>").unwrap();
    s.search(&mut doc, "alpha", any());
    assert_eq!(s.search(&mut doc, "beta", any()).match_count, 1);
    assert_eq!(
        doc.inner_html(doc.body()),
        r#"<p>alpha <span class="tf-highlight tf-current-highlight" data-tf-index="0">beta</span></p>"#
    );
}

#[test]
fn navigate_outside_highlighted_does_nothing() {
    let (mut s, _) = session();
    let mut doc = parse_html("<p>abc</p>").unwrap();
    assert_eq!(
        s.navigate(&mut doc, Direction::Next),
        SearchSummary::default()
    );
    assert_eq!(doc.last_scroll(), None);
}

#[test]
fn hidden_only_results_are_highlighted_without_cursor() {
    let (mut s, _) = session();
    let mut doc = parse_html(
        r#"<details><summary>More</summary><p>secret</p></details>"#,
    )
    .unwrap();
    let summary = s.search(&mut doc, "secret", any());
    assert_eq!(summary.match_count, 0);
    assert_eq!(summary.current_match, 0);
    assert_eq!(summary.hidden_count, 1);
    assert_eq!(s.phase(), Phase::Highlighted);
    assert_eq!(s.navigate(&mut doc, Direction::Next).current_match, 0);
}

// =============================================================================
// Triggers and reveal
// =============================================================================

#[test]
fn closed_details_match_has_one_trigger_with_badge() {
    let (mut s, _) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    let summary = s.search(&mut doc, "key", any());
    assert_eq!(summary.expandable_count, 2);

    let s1 = by_id(&doc, "s1");
    assert_eq!(s.state().triggers[0].element, s1);
    assert_eq!(s.state().triggers[0].hidden_count, 1);
    let badge = s.indicators().badge_for(s1).unwrap();
    assert_eq!(doc.text_content(badge), "1");
    assert_eq!(doc.listeners_on(s1, EventKind::Click).len(), 1);
}

#[test]
fn trigger_click_reveals_and_re_searches() {
    let (mut s, clock) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    s.search(&mut doc, "key", any());

    let s1 = by_id(&doc, "s1");
    s.handle_click(&mut doc, s1).unwrap();
    assert!(doc.has_attribute(by_id(&doc, "d1"), "open"));
    assert!(s.state().re_searching);
    assert_eq!(s.pending_tasks(), 1);

    clock.advance(ms(299));
    assert_eq!(s.poll(&mut doc), None);

    clock.advance(ms(1));
    let summary = s.poll(&mut doc).unwrap();
    assert_eq!(summary.visible_count, 2);
    assert_eq!(summary.hidden_count, 1);
    assert_eq!(summary.expandable_count, 1);

    // The newly visible occurrence is marked as revealed.
    let d1 = by_id(&doc, "d1");
    let revealed: Vec<_> = s
        .state()
        .highlights
        .markers()
        .iter()
        .filter(|m| doc.has_class(**m, "tf-revealed-highlight"))
        .copied()
        .collect();
    assert_eq!(revealed.len(), 1);
    assert!(doc.contains(d1, revealed[0]));
    assert!(s.indicators().badge_for(s1).is_none());
}

#[test]
fn clicks_during_a_re_search_are_ignored_until_release() {
    let (mut s, clock) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    s.search(&mut doc, "key", any());
    let s1 = by_id(&doc, "s1");
    let s2 = by_id(&doc, "s2");

    s.handle_click(&mut doc, s1).unwrap();
    // Still opens the page's details, but schedules nothing new.
    s.handle_click(&mut doc, s2).unwrap();
    assert_eq!(s.pending_tasks(), 1);

    clock.advance(ms(300));
    assert!(s.poll(&mut doc).is_some());
    assert!(s.state().re_searching);
    assert_eq!(s.pending_tasks(), 1);

    clock.advance(ms(500));
    assert_eq!(s.poll(&mut doc), None);
    assert!(!s.state().re_searching);
    assert_eq!(s.pending_tasks(), 0);
}

#[test]
fn clicks_elsewhere_schedule_nothing() {
    let (mut s, _) = session();
    let mut doc = parse_html(r#"<p id="p">key</p>"#).unwrap();
    s.search(&mut doc, "key", any());
    let target = by_id(&doc, "p");
    let outcome = s.handle_click(&mut doc, target).unwrap();
    assert!(outcome.fired.is_empty());
    assert_eq!(s.pending_tasks(), 0);
}

#[test]
fn user_search_cancels_pending_re_search() {
    let (mut s, clock) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    s.search(&mut doc, "key", any());
    let target = by_id(&doc, "s1");
    s.handle_click(&mut doc, target).unwrap();
    assert_eq!(s.pending_tasks(), 1);

    s.search(&mut doc, "intro", any());
    assert_eq!(s.pending_tasks(), 0);
    assert!(!s.state().re_searching);

    clock.advance(ms(1000));
    assert_eq!(s.poll(&mut doc), None);
    assert_eq!(s.state().query, "intro");
}

#[test]
fn reveal_all_clicks_every_trigger_then_searches() {
    let (mut s, clock) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    s.search(&mut doc, "key", any());

    let result = s.reveal_all(&mut doc, "key");
    assert_eq!(
        result,
        RevealResult {
            success: true,
            clicked: 2
        }
    );
    assert!(doc.has_attribute(by_id(&doc, "d1"), "open"));
    assert!(doc.has_attribute(by_id(&doc, "d2"), "open"));
    assert!(!s.state().re_searching);

    clock.advance(ms(499));
    assert_eq!(s.poll(&mut doc), None);
    clock.advance(ms(1));
    let summary = s.poll(&mut doc).unwrap();
    assert_eq!(summary.visible_count, 3);
    assert_eq!(summary.hidden_count, 0);
    assert_eq!(summary.expandable_count, 0);
}

#[test]
fn reveal_all_needs_a_query_and_triggers() {
    let (mut s, _) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    assert!(!s.reveal_all(&mut doc, "key").success);

    s.search(&mut doc, "key", any());
    assert!(!s.reveal_all(&mut doc, "").success);
    assert_eq!(s.pending_tasks(), 0);
}

// =============================================================================
// Debounce and teardown
// =============================================================================

#[test]
fn input_is_debounced() {
    let (mut s, clock) = session();
    let mut doc = parse_html("<p>hello help</p>").unwrap();

    s.input("hel", any());
    clock.advance(ms(200));
    s.input("hello", any());
    assert_eq!(s.pending_tasks(), 1);

    clock.advance(ms(200));
    assert_eq!(s.poll(&mut doc), None);
    clock.advance(ms(100));
    let summary = s.poll(&mut doc).unwrap();
    assert_eq!(summary.match_count, 1);
    assert_eq!(s.state().query, "hello");
}

#[test]
fn cancelled_input_never_runs() {
    let (mut s, clock) = session();
    let mut doc = parse_html("<p>hello</p>").unwrap();
    let task = s.input("hello", any());
    assert!(s.cancel(task));
    clock.advance(ms(1000));
    assert_eq!(s.poll(&mut doc), None);
    assert_eq!(s.phase(), Phase::Idle);
}

#[test]
fn teardown_removes_everything() {
    let (mut s, _) = session();
    let mut doc = parse_html(DETAILS_PAGE).unwrap();
    let before = doc.to_html();
    s.search(&mut doc, "key", any());
    let target = by_id(&doc, "s2");
    s.handle_click(&mut doc, target).unwrap();

    s.teardown(&mut doc);
    assert_eq!(s.pending_tasks(), 0);
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(doc.listener_count(), 0);
    // Only the page's own toggle remains.
    let d2 = by_id(&doc, "d2");
    doc.remove_attribute(d2, "open").unwrap();
    assert_eq!(doc.to_html(), before);
}

#[test]
fn summary_serializes_in_camel_case() {
    let json = serde_json::to_value(SearchSummary {
        match_count: 2,
        current_match: 1,
        visible_count: 2,
        hidden_count: 3,
        expandable_count: 1,
    })
    .unwrap();
    assert_eq!(json["matchCount"], 2);
    assert_eq!(json["currentMatch"], 1);
    assert_eq!(json["expandableCount"], 1);
}
