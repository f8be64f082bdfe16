use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::navigation::View;

/// The change notifications the core broadcasts. Dispatch is
/// synchronous, in-process and fire-and-forget; persistence always
/// completes before the event fires, so observers read a consistent
/// state.
#[derive(Debug, Clone)]
pub enum AppEvent {
    CartUpdated {
        total_items: u32,
        total: i64,
    },
    ViewChanged {
        view: View,
        data: Option<serde_json::Value>,
        timestamp: DateTime<Utc>,
    },
    OrderCreated {
        order_id: i64,
        total: i64,
    },
    UserLoggedIn {
        email: String,
    },
    UserLoggedOut,
}

type Observer = Rc<dyn Fn(&AppEvent)>;

/// Explicit observer registry owned by the composition root and shared
/// by `Rc`, replacing a global dispatcher. Dispatch walks a snapshot of
/// the registry, so observers may subscribe or publish re-entrantly; a
/// subscription made during dispatch first sees the next event.
#[derive(Default)]
pub struct EventBus {
    observers: RefCell<Vec<Observer>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: impl Fn(&AppEvent) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn publish(&self, event: &AppEvent) {
        let snapshot = self.observers.borrow().clone();
        for observer in &snapshot {
            observer(event);
        }
    }
}
