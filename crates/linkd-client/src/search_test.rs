use super::*;

fn profiles(prefix: &str, n: usize) -> Vec<Profile> {
    (0..n)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "_id": format!("{prefix}-{i}"),
                "name": format!("Alum {i}")
            }))
            .expect("fixture profile should decode")
        })
        .collect()
}

#[test]
fn new_pager_starts_at_zero_with_more() {
    let pager = SearchPager::new("Alumni in tech");
    assert_eq!(pager.query(), "Alumni in tech");
    assert_eq!(pager.offset(), 0);
    assert!(pager.results().is_empty());
    assert!(pager.has_more());
    assert!(pager.error().is_none());
}

#[test]
fn offset_is_sum_of_page_sizes() {
    let mut pager = SearchPager::new("q");
    assert_eq!(pager.apply_page(profiles("a", 20), false), PageOutcome::Loaded(20));
    assert_eq!(pager.apply_page(profiles("b", 7), true), PageOutcome::Loaded(7));
    assert_eq!(pager.apply_page(profiles("c", 3), true), PageOutcome::Loaded(3));
    assert_eq!(pager.offset(), 30);
    assert_eq!(pager.results().len(), 30);
    assert_eq!(pager.results()[20].id, "b-0");
}

#[test]
fn empty_page_exhausts_without_touching_results() {
    let mut pager = SearchPager::new("q");
    pager.apply_page(profiles("a", 20), false);
    assert_eq!(pager.apply_page(Vec::new(), true), PageOutcome::Exhausted);
    assert!(!pager.has_more());
    assert!(pager.is_exhausted());
    assert_eq!(pager.offset(), 20);
    assert_eq!(pager.results().len(), 20);
}

#[test]
fn non_append_page_replaces_results() {
    let mut pager = SearchPager::new("q");
    pager.apply_page(profiles("a", 5), false);
    pager.clear();
    pager.apply_page(profiles("b", 2), false);
    assert_eq!(pager.results().len(), 2);
    assert_eq!(pager.offset(), 2);
    assert_eq!(pager.results()[0].id, "b-0");
}

#[test]
fn reset_clears_exhaustion_offset_and_error() {
    let mut pager = SearchPager::new("old");
    pager.apply_page(profiles("a", 4), false);
    pager.apply_page(Vec::new(), true);
    pager.error = Some("boom".to_string());

    pager.reset("new");

    assert_eq!(pager.query(), "new");
    assert_eq!(pager.offset(), 0);
    assert!(pager.results().is_empty());
    assert!(!pager.is_exhausted());
    assert!(pager.error().is_none());
    assert!(pager.has_more());
}

#[test]
fn error_hides_load_more() {
    let mut pager = SearchPager::new("q");
    pager.error = Some("Search failed".to_string());
    assert!(!pager.has_more());
}

#[test]
fn annotation_targets_are_the_trailing_window() {
    let mut pager = SearchPager::new("q");
    pager.apply_page(profiles("a", 10), false);
    pager.apply_page(profiles("b", 4), true);

    assert_eq!(pager.live_window_start(6), 8);
    let ids: Vec<&str> = pager
        .annotation_targets(6)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["a-8", "a-9", "b-0", "b-1", "b-2", "b-3"]);
}

#[test]
fn annotation_window_larger_than_results_covers_everything() {
    let mut pager = SearchPager::new("q");
    pager.apply_page(profiles("a", 3), false);
    assert_eq!(pager.live_window_start(6), 0);
    assert_eq!(pager.annotation_targets(6).len(), 3);
    assert!(pager.annotation_targets(0).is_empty());
}
