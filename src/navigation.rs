use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::{AppEvent, EventBus};

/// The closed set of views. Identifiers outside this set never reach
/// the navigator; they are rejected where user input is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Cart,
    Login,
    Profile,
    Blog,
    Advisor,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Cart => "cart",
            View::Login => "login",
            View::Profile => "profile",
            View::Blog => "blog",
            View::Advisor => "advisor",
        }
    }

    /// UI regions this view occupies. Home is a bundle of three
    /// regions; every other view is a single region.
    pub fn regions(self) -> ViewRegion {
        match self {
            View::Home => ViewRegion::Composite(vec![
                "heroSection".into(),
                "searchSection".into(),
                "productsGrid".into(),
            ]),
            View::Cart => ViewRegion::Single("cartView".into()),
            View::Login => ViewRegion::Single("authView".into()),
            View::Profile => ViewRegion::Single("profileView".into()),
            View::Blog => ViewRegion::Single("blogView".into()),
            View::Advisor => ViewRegion::Single("advisorView".into()),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(View::Home),
            "cart" => Ok(View::Cart),
            "login" => Ok(View::Login),
            "profile" => Ok(View::Profile),
            "blog" => Ok(View::Blog),
            "advisor" => Ok(View::Advisor),
            _ => Err(UnknownView(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view: {}", self.0)
    }
}

impl std::error::Error for UnknownView {}

/// Tagged shape of a view's UI footprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRegion {
    Single(String),
    Composite(Vec<String>),
}

impl ViewRegion {
    pub fn ids(&self) -> Vec<&str> {
        match self {
            ViewRegion::Single(id) => vec![id.as_str()],
            ViewRegion::Composite(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}

/// Display collaborator: toggles regions and handles the chrome
/// concerns around a transition.
pub trait ViewSurface {
    fn hide(&self, region: &ViewRegion);
    fn show(&self, region: &ViewRegion);
    fn reset_scroll(&self) {}
    fn collapse_menu(&self) {}
}

/// Surface for headless fronts; transitions leave only a debug trace.
#[derive(Debug, Default)]
pub struct LogSurface;

impl ViewSurface for LogSurface {
    fn hide(&self, region: &ViewRegion) {
        tracing::debug!(regions = ?region.ids(), "hide");
    }

    fn show(&self, region: &ViewRegion) {
        tracing::debug!(regions = ?region.ids(), "show");
    }
}

pub const HISTORY_CAPACITY: usize = 10;

/// Navigation state machine: current view plus a bounded transition
/// history. After any successful transition the history ends with the
/// current view.
pub struct Navigator {
    current: View,
    history: VecDeque<View>,
    surface: Box<dyn ViewSurface>,
    events: Rc<EventBus>,
}

impl Navigator {
    pub fn new(surface: Box<dyn ViewSurface>, events: Rc<EventBus>) -> Self {
        let mut history = VecDeque::with_capacity(HISTORY_CAPACITY + 1);
        history.push_back(View::Home);
        Self {
            current: View::Home,
            history,
            surface,
            events,
        }
    }

    pub fn navigate_to(&mut self, view: View) {
        self.navigate_with(view, None);
    }

    pub fn navigate_with(&mut self, view: View, data: Option<serde_json::Value>) {
        self.surface.hide(&self.current.regions());
        self.current = view;
        self.surface.show(&view.regions());
        self.push_history(view);
        self.surface.reset_scroll();
        self.surface.collapse_menu();
        self.events.publish(&AppEvent::ViewChanged {
            view,
            data,
            timestamp: Utc::now(),
        });
    }

    /// Returns to the previous history entry; from a single-entry
    /// history it navigates home instead of failing.
    pub fn go_back(&mut self) {
        if self.history.len() > 1 {
            self.history.pop_back();
            match self.history.back().copied() {
                Some(previous) => self.navigate_to(previous),
                None => self.navigate_to(View::Home),
            }
        } else {
            self.navigate_to(View::Home);
        }
    }

    fn push_history(&mut self, view: View) {
        // Suppress consecutive duplicates, then truncate from the front.
        if self.history.back() != Some(&view) {
            self.history.push_back(view);
        }
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    pub fn current_view(&self) -> View {
        self.current
    }

    pub fn is_current(&self, view: View) -> bool {
        self.current == view
    }

    pub fn history(&self) -> Vec<View> {
        self.history.iter().copied().collect()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history.push_back(self.current);
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
