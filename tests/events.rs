use std::cell::RefCell;
use std::rc::Rc;

use violet_store::events::{AppEvent, EventBus};

fn cart_updated(total_items: u32) -> AppEvent {
    AppEvent::CartUpdated {
        total_items,
        total: i64::from(total_items) * 1000,
    }
}

fn items(event: &AppEvent) -> u32 {
    match event {
        AppEvent::CartUpdated { total_items, .. } => *total_items,
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn every_observer_sees_every_event_in_subscription_order() {
    let bus = EventBus::new();
    let seen: Rc<RefCell<Vec<(u8, u32)>>> = Rc::new(RefCell::new(Vec::new()));

    for tag in [1u8, 2] {
        let sink = Rc::clone(&seen);
        bus.subscribe(move |event| sink.borrow_mut().push((tag, items(event))));
    }
    bus.publish(&cart_updated(7));

    assert_eq!(*seen.borrow(), vec![(1, 7), (2, 7)]);
}

#[test]
fn subscribing_during_dispatch_takes_effect_from_the_next_event() {
    let bus = Rc::new(EventBus::new());
    let late: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));

    let registrar = Rc::clone(&bus);
    let sink = Rc::clone(&late);
    let registered = RefCell::new(false);
    bus.subscribe(move |_| {
        if !registered.replace(true) {
            let sink = Rc::clone(&sink);
            registrar.subscribe(move |event| sink.borrow_mut().push(items(event)));
        }
    });

    // The first publish registers the late observer; only the second
    // reaches it.
    bus.publish(&cart_updated(1));
    bus.publish(&cart_updated(2));

    assert_eq!(*late.borrow(), vec![2]);
}

#[test]
fn publishing_during_dispatch_reaches_every_observer() {
    let bus = Rc::new(EventBus::new());
    let seen: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));

    let chained = Rc::clone(&bus);
    bus.subscribe(move |event| {
        if items(event) == 1 {
            chained.publish(&cart_updated(2));
        }
    });
    let sink = Rc::clone(&seen);
    bus.subscribe(move |event| sink.borrow_mut().push(items(event)));

    bus.publish(&cart_updated(1));

    // The chained event finishes dispatching before the outer one
    // resumes.
    assert_eq!(*seen.borrow(), vec![2, 1]);
}
