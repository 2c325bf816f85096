//! Purge requests evict frames whose span is fully inside the purged span

use super::test_utils::*;
use frameslide::Granularity;

#[test]
fn purge_removes_fully_covered_frames_only() {
    let (mut manager, log) = day_manager(5);
    manager.change_date(day(2)).unwrap();
    assert_eq!(manager.keys(), vec![key(1), key(2), key(3)]);

    // [1, 3) covers days 1 and 2 and stops where day 3 starts
    let purged = manager.purge_frames(&span(1, 3));
    assert_eq!(purged, vec![key(1), key(2)]);
    assert_eq!(manager.keys(), vec![key(3)]);
    assert_eq!(calls_for(&log, key(1)), vec![Call::Create, Call::Destroy]);
    assert_eq!(calls_for(&log, key(3)), vec![Call::Create]);
}

#[test]
fn purge_keeps_partially_overlapping_frames() {
    let (mut manager, log) = manager_with(Granularity::week(), 5);
    // Weeks of 2024-01-01, 2024-01-08 and 2024-01-15
    manager.change_date(day(10)).unwrap();

    // Fully covers the first two weeks, half of the third
    let purged = manager.purge_frames(&span(1, 18));
    assert_eq!(purged, vec![key(1), key(8)]);
    assert_eq!(manager.keys(), vec![key(15)]);
    assert_eq!(count(&log, Call::Destroy), 2);
}

#[test]
fn purge_of_current_frame_clears_current() {
    let (mut manager, _) = day_manager(5);
    manager.change_date(day(10)).unwrap();

    manager.purge_frames(&span(10, 11));
    assert_eq!(manager.current_key(), None);
    assert!(manager.current().is_none());
    assert_eq!(manager.keys(), vec![key(9), key(11)]);

    manager.change_date(day(11)).unwrap();
    assert_eq!(manager.current_key(), Some(key(11)));
    assert_eq!(manager.keys(), vec![key(9), key(10), key(11), key(12)]);
}

#[test]
fn purge_removes_every_match_in_one_pass() {
    let (mut manager, log) = day_manager(9);
    for d in 1..=8 {
        manager.add_frame(day(d)).unwrap();
    }

    // Adjacent matches must not be skipped as indices shift
    let purged = manager.purge_frames(&span(2, 7));
    assert_eq!(purged, vec![key(2), key(3), key(4), key(5), key(6)]);
    assert_eq!(manager.keys(), vec![key(1), key(7), key(8)]);
    assert_eq!(count(&log, Call::Destroy), 5);
}

#[test]
fn purge_with_no_matches_is_a_no_op() {
    let (mut manager, log) = day_manager(5);
    assert!(manager.purge_frames(&span(1, 31)).is_empty());

    manager.change_date(day(10)).unwrap();
    assert!(manager.purge_frames(&span(20, 25)).is_empty());
    assert_eq!(manager.len(), 3);
    assert_eq!(count(&log, Call::Destroy), 0);
}

#[test]
fn purged_frame_is_recreated_on_demand() {
    let (mut manager, log) = day_manager(5);
    manager.change_date(day(10)).unwrap();
    manager.purge_frames(&span(9, 10));

    manager.change_date(day(10)).unwrap();
    assert_eq!(manager.keys(), vec![key(9), key(10), key(11)]);
    assert_eq!(
        calls_for(&log, key(9)),
        vec![Call::Create, Call::Destroy, Call::Create]
    );
}
