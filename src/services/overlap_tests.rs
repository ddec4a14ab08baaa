use chrono::{NaiveDate, NaiveTime};

use super::{OverlapEngine, PairwiseOverlapEngine};
use crate::models::{PreferenceId, TimePreference, TimeWindow, UserId};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn pref(id: i64, user: &str, day: u32, start: (u32, u32), end: (u32, u32)) -> TimePreference {
    TimePreference {
        id: PreferenceId::new(id),
        user_id: UserId::new(user),
        label_id: None,
        date: d(day),
        window: TimeWindow::new(t(start.0, start.1), t(end.0, end.1)),
        description: None,
    }
}

#[test]
fn test_two_user_overlap() {
    let prefs = vec![
        pref(1, "alice", 1, (9, 0), (10, 0)),
        pref(2, "bob", 1, (9, 30), (10, 30)),
    ];
    let overlaps = PairwiseOverlapEngine.find_overlaps(&prefs);
    assert_eq!(overlaps.len(), 1);
    let overlap = &overlaps[0];
    assert_eq!(overlap.date, d(1));
    assert_eq!(overlap.window, TimeWindow::new(t(9, 30), t(10, 0)));
    assert_eq!(overlap.participant_count(), 2);
    assert!(overlap.user_ids.contains(&UserId::new("alice")));
    assert!(overlap.user_ids.contains(&UserId::new("bob")));
}

#[test]
fn test_boundary_touch_is_not_overlap() {
    let prefs = vec![
        pref(1, "alice", 1, (10, 0), (11, 0)),
        pref(2, "bob", 1, (11, 0), (12, 0)),
    ];
    assert!(PairwiseOverlapEngine.find_overlaps(&prefs).is_empty());
}

#[test]
fn test_same_user_never_pairs_with_self() {
    let prefs = vec![
        pref(1, "alice", 1, (9, 0), (11, 0)),
        pref(2, "alice", 1, (10, 0), (12, 0)),
    ];
    assert!(PairwiseOverlapEngine.find_overlaps(&prefs).is_empty());
}

#[test]
fn test_different_dates_never_overlap() {
    let prefs = vec![
        pref(1, "alice", 1, (9, 0), (10, 0)),
        pref(2, "bob", 2, (9, 0), (10, 0)),
    ];
    assert!(PairwiseOverlapEngine.find_overlaps(&prefs).is_empty());
}

#[test]
fn test_identical_windows_merge_participants() {
    let prefs = vec![
        pref(1, "alice", 1, (9, 0), (10, 0)),
        pref(2, "bob", 1, (9, 0), (10, 0)),
        pref(3, "carol", 1, (9, 0), (10, 0)),
    ];
    let overlaps = PairwiseOverlapEngine.find_overlaps(&prefs);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].participant_count(), 3);
}

#[test]
fn test_differing_pairwise_spans_stay_separate() {
    // A∩B = [9:00, 9:30), B∩C = [9:15, 9:45), A∩C = empty. The exact-key
    // merge reports two separate two-participant records.
    let prefs = vec![
        pref(1, "alice", 1, (9, 0), (9, 30)),
        pref(2, "bob", 1, (9, 0), (9, 45)),
        pref(3, "carol", 1, (9, 15), (9, 45)),
    ];
    let overlaps = PairwiseOverlapEngine.find_overlaps(&prefs);
    assert_eq!(overlaps.len(), 2);
    assert!(overlaps.iter().all(|o| o.participant_count() == 2));

    let windows: Vec<TimeWindow> = overlaps.iter().map(|o| o.window).collect();
    assert!(windows.contains(&TimeWindow::new(t(9, 0), t(9, 30))));
    assert!(windows.contains(&TimeWindow::new(t(9, 15), t(9, 45))));
}

#[test]
fn test_every_record_has_at_least_two_distinct_users() {
    let prefs = vec![
        pref(1, "alice", 1, (8, 0), (9, 0)),
        pref(2, "alice", 1, (8, 30), (9, 30)),
        pref(3, "bob", 1, (9, 0), (10, 0)),
        pref(4, "bob", 2, (9, 0), (10, 0)),
        pref(5, "carol", 2, (9, 30), (10, 30)),
    ];
    let overlaps = PairwiseOverlapEngine.find_overlaps(&prefs);
    assert!(!overlaps.is_empty());
    for overlap in &overlaps {
        assert!(overlap.participant_count() >= 2);
    }
}

#[test]
fn test_results_sorted_by_date_then_start() {
    let prefs = vec![
        pref(1, "alice", 2, (9, 0), (10, 0)),
        pref(2, "bob", 2, (9, 0), (10, 0)),
        pref(3, "alice", 1, (14, 0), (15, 0)),
        pref(4, "bob", 1, (14, 30), (15, 30)),
        pref(5, "carol", 1, (8, 0), (9, 0)),
        pref(6, "dave", 1, (8, 0), (9, 0)),
    ];
    let overlaps = PairwiseOverlapEngine.find_overlaps(&prefs);
    assert_eq!(overlaps.len(), 3);
    let keys: Vec<(NaiveDate, NaiveTime)> =
        overlaps.iter().map(|o| (o.date, o.window.start)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_empty_input_yields_no_overlaps() {
    assert!(PairwiseOverlapEngine.find_overlaps(&[]).is_empty());
}

#[test]
fn test_contained_window_overlap() {
    let prefs = vec![
        pref(1, "alice", 1, (8, 0), (12, 0)),
        pref(2, "bob", 1, (9, 0), (10, 0)),
    ];
    let overlaps = PairwiseOverlapEngine.find_overlaps(&prefs);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].window, TimeWindow::new(t(9, 0), t(10, 0)));
}
