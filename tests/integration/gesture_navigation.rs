//! Gestures flowing through a view into the navigation authority and back

use super::test_utils::*;
use chrono::NaiveDate;
use frameslide::gesture::DeltaMode;
use frameslide::{
    FrameView, GestureAdapter, Navigator, Swipe, SwipeDirection, TimeController, TimeSpan,
    WheelEvent,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Navigator that only records requested moves
#[derive(Default)]
struct RecordingNavigator {
    moves: RefCell<Vec<NaiveDate>>,
    position: Option<NaiveDate>,
}

impl Navigator for RecordingNavigator {
    fn move_to(&self, time: NaiveDate) {
        self.moves.borrow_mut().push(time);
    }

    fn position(&self) -> Option<NaiveDate> {
        self.position
    }

    fn timespan(&self) -> Option<TimeSpan> {
        None
    }
}

fn swipe(dx: f64, dy: f64, direction: SwipeDirection) -> Swipe {
    Swipe { dx, dy, direction }
}

fn page_wheel(delta_x: f64) -> WheelEvent {
    WheelEvent {
        delta_mode: DeltaMode::Page,
        delta_x,
        delta_y: 0.0,
    }
}

#[test]
fn near_vertical_swipe_issues_no_navigation() {
    let (manager, _) = day_manager(5);
    let mut view = FrameView::new(manager, GestureAdapter::new(8.0).unwrap(), RecordingNavigator::default());
    view.change_date(day(10)).unwrap();

    assert!(!view.handle_swipe(&swipe(5.0, 20.0, SwipeDirection::Left)));
    // Only the direct date change was reported
    assert_eq!(*view.navigator().moves.borrow(), vec![day(10)]);
}

#[test]
fn swipes_and_wheel_request_adjacent_times() {
    let (manager, _) = day_manager(5);
    let mut view = FrameView::new(manager, GestureAdapter::new(8.0).unwrap(), RecordingNavigator::default());
    view.change_date(day(10)).unwrap();

    assert!(view.handle_swipe(&swipe(-150.0, 10.0, SwipeDirection::Left)));
    assert!(view.handle_swipe(&swipe(150.0, 10.0, SwipeDirection::Right)));
    assert!(view.handle_wheel(&page_wheel(3.0)));
    assert!(!view.handle_wheel(&page_wheel(0.0)));

    // The navigator is not wired back, so the anchor never moves
    assert_eq!(
        *view.navigator().moves.borrow(),
        vec![day(10), day(11), day(9), day(11)]
    );
    assert_eq!(view.manager().anchor(), Some(day(10)));
}

#[test]
fn gestures_before_first_date_use_navigator_position() {
    let (manager, _) = day_manager(5);
    let navigator = RecordingNavigator {
        position: Some(day(20)),
        ..Default::default()
    };
    let mut view = FrameView::new(manager, GestureAdapter::default(), navigator);
    assert!(view.handle_wheel(&page_wheel(-1.0)));
    assert_eq!(*view.navigator().moves.borrow(), vec![day(19)]);

    let (manager, _) = day_manager(5);
    let mut unanchored =
        FrameView::new(manager, GestureAdapter::default(), RecordingNavigator::default());
    assert!(!unanchored.handle_wheel(&page_wheel(-1.0)));
}

#[test]
fn inactive_view_rejects_gestures_and_purges() {
    let (manager, log) = day_manager(5);
    let mut view = FrameView::new(manager, GestureAdapter::default(), RecordingNavigator::default());
    view.change_date(day(10)).unwrap();
    view.set_active(false);

    assert!(!view.handle_swipe(&swipe(-150.0, 0.0, SwipeDirection::Left)));
    assert!(view.purge_frames(&span(1, 31)).is_empty());
    assert_eq!(count(&log, Call::Destroy), 0);

    view.set_active(true);
    assert_eq!(view.purge_frames(&span(1, 31)).len(), 3);
}

#[test]
fn controller_round_trip_moves_window() {
    let controller = Rc::new(TimeController::starting_at(day(10)));
    let (manager, log) = day_manager(5);
    let view = Rc::new(RefCell::new(FrameView::new(
        manager,
        GestureAdapter::new(8.0).unwrap(),
        Rc::clone(&controller),
    )));
    FrameView::subscribe(&view, &controller);
    view.borrow_mut().change_date(day(10)).unwrap();

    // Swipe forward three times, pumping the controller after each
    for _ in 0..3 {
        assert!(view
            .borrow_mut()
            .handle_swipe(&swipe(-200.0, 4.0, SwipeDirection::Left)));
        assert_eq!(controller.dispatch(), 1);
    }

    let view_ref = view.borrow();
    let manager = view_ref.manager();
    assert_eq!(manager.anchor(), Some(day(13)));
    assert_eq!(controller.position(), Some(day(13)));
    assert_eq!(manager.keys(), vec![key(12), key(13), key(14)]);
    assert_eq!(count(&log, Call::Destroy), 3);
}

#[test]
fn controller_purge_notification_reaches_manager() {
    let controller = Rc::new(TimeController::starting_at(day(10)));
    let (manager, _) = day_manager(5);
    let view = Rc::new(RefCell::new(FrameView::new(
        manager,
        GestureAdapter::default(),
        Rc::clone(&controller),
    )));
    FrameView::subscribe(&view, &controller);
    view.borrow_mut().change_date(day(10)).unwrap();

    controller.request_purge(span(1, 11));
    assert_eq!(controller.dispatch(), 1);
    assert_eq!(view.borrow().manager().keys(), vec![key(11)]);
    assert_eq!(view.borrow().manager().current_key(), None);

    controller.move_to(day(11));
    controller.dispatch();
    assert_eq!(view.borrow().manager().current_key(), Some(key(11)));
}

#[test]
fn dropped_view_disables_handlers() {
    let controller = Rc::new(TimeController::starting_at(day(10)));
    let (manager, _) = day_manager(5);
    let view = Rc::new(RefCell::new(FrameView::new(
        manager,
        GestureAdapter::default(),
        Rc::clone(&controller),
    )));
    FrameView::subscribe(&view, &controller);
    assert_eq!(controller.handler_count(), 2);
    drop(view);

    controller.move_to(day(12));
    assert_eq!(controller.dispatch(), 1);
    assert_eq!(controller.handler_count(), 1);

    controller.request_purge(span(1, 5));
    assert_eq!(controller.dispatch(), 1);
    assert_eq!(controller.handler_count(), 0);
}

#[test]
fn direct_date_change_keeps_controller_in_step() {
    let controller = Rc::new(TimeController::starting_at(day(10)));
    let (manager, _) = day_manager(5);
    let view = Rc::new(RefCell::new(FrameView::new(
        manager,
        GestureAdapter::new(8.0).unwrap(),
        Rc::clone(&controller),
    )));
    FrameView::subscribe(&view, &controller);

    view.borrow_mut().change_date(day(9)).unwrap();
    assert_eq!(controller.position(), Some(day(9)));

    // Forward from 9 lands on 10, the controller's starting position
    assert!(view
        .borrow_mut()
        .handle_swipe(&swipe(-200.0, 0.0, SwipeDirection::Left)));
    assert_eq!(controller.position(), Some(day(10)));
    assert_eq!(controller.dispatch(), 2);
    assert_eq!(view.borrow().manager().anchor(), Some(day(10)));
    assert_eq!(view.borrow().manager().current_key(), Some(key(10)));
}

#[test]
fn gestures_before_dispatch_step_from_controller_position() {
    let controller = Rc::new(TimeController::starting_at(day(10)));
    let (manager, _) = day_manager(5);
    let view = Rc::new(RefCell::new(FrameView::new(
        manager,
        GestureAdapter::default(),
        Rc::clone(&controller),
    )));
    FrameView::subscribe(&view, &controller);
    view.borrow_mut().change_date(day(10)).unwrap();

    for _ in 0..2 {
        assert!(view
            .borrow_mut()
            .handle_swipe(&swipe(-200.0, 0.0, SwipeDirection::Left)));
    }
    assert_eq!(controller.dispatch(), 2);
    assert_eq!(view.borrow().manager().anchor(), Some(day(12)));
}
