//! Typed routes and the stack navigator.
//!
//! The root stack holds `Login`, `Signup` and `Tabs`. While `Tabs` is on top,
//! each [`Tab`] owns its own stack and pushes land on the active tab. Every
//! route is checked when it is pushed, so a screen can trust its parameters.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use nasugview_shared::fixtures::find_business;
use nasugview_shared::UserProfile;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tab {
    Home,
    Marketplace,
    Notifications,
    More,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Marketplace, Tab::Notifications, Tab::More];

    pub fn root(&self) -> Route {
        match self {
            Tab::Home => Route::Home,
            Tab::Marketplace => Route::Marketplace,
            Tab::Notifications => Route::Notifications,
            Tab::More => Route::More,
        }
    }
}

/// Names a directory business. Checked against the fixtures on navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessParams {
    pub business_name: String,
}

impl BusinessParams {
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabsParams {
    pub profile: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileParams {
    pub profile: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    Login,
    Signup,
    Tabs(TabsParams),
    Home,
    Marketplace,
    Notifications,
    More,
    BusinessDetails(BusinessParams),
    Review(BusinessParams),
    SubmitReview(BusinessParams),
    MyReviews { username: String },
    Profile(ProfileParams),
    EventCalendar { date: Option<NaiveDate> },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Signup => "Signup",
            Route::Tabs(_) => "Tabs",
            Route::Home => "Home",
            Route::Marketplace => "Marketplace",
            Route::Notifications => "Notifications",
            Route::More => "More",
            Route::BusinessDetails(_) => "BusinessDetails",
            Route::Review(_) => "Review",
            Route::SubmitReview(_) => "SubmitReview",
            Route::MyReviews { .. } => "MyReviews",
            Route::Profile(_) => "Profile",
            Route::EventCalendar { .. } => "EventCalendar",
        }
    }

    /// Check the payload against what the target screen needs.
    pub fn validate(&self) -> Result<(), ClientError> {
        match self {
            Route::BusinessDetails(p) | Route::Review(p) | Route::SubmitReview(p) => {
                if find_business(&p.business_name).is_none() {
                    return Err(ClientError::Navigation(format!(
                        "{}: unknown business {:?}",
                        self.name(),
                        p.business_name
                    )));
                }
            }
            Route::Tabs(TabsParams { profile }) | Route::Profile(ProfileParams { profile }) => {
                require_username(self, &profile.username)?;
            }
            Route::MyReviews { username } => require_username(self, username)?,
            _ => {}
        }
        Ok(())
    }

    fn is_root_level(&self) -> bool {
        matches!(self, Route::Login | Route::Signup | Route::Tabs(_))
    }

    fn tab_root(&self) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.root() == *self)
    }

    /// Whether this screen may be pushed onto `tab`'s stack.
    fn belongs_to(&self, tab: Tab) -> bool {
        match self {
            Route::BusinessDetails(_) | Route::Review(_) | Route::SubmitReview(_) => {
                matches!(tab, Tab::Home | Tab::Marketplace)
            }
            Route::Profile(_) | Route::MyReviews { .. } => tab == Tab::More,
            Route::EventCalendar { .. } => matches!(tab, Tab::Notifications | Tab::More),
            _ => false,
        }
    }
}

fn require_username(route: &Route, username: &str) -> Result<(), ClientError> {
    if username.trim().is_empty() {
        return Err(ClientError::Navigation(format!(
            "{}: username is required",
            route.name()
        )));
    }
    Ok(())
}

/// The root stack is never empty; this only backs the type signature.
static LOGIN: Route = Route::Login;

#[derive(Debug, Clone)]
pub struct Navigator {
    root: Vec<Route>,
    tabs: HashMap<Tab, Vec<Route>>,
    active_tab: Tab,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let mut nav = Self {
            root: Vec::new(),
            tabs: HashMap::new(),
            active_tab: Tab::Home,
        };
        nav.reset(initial);
        nav
    }

    /// Drop all history and start over at `route`.
    pub fn reset(&mut self, route: Route) {
        self.root.clear();
        self.reset_tabs();
        self.root.push(route);
    }

    fn reset_tabs(&mut self) {
        self.tabs = Tab::ALL.into_iter().map(|t| (t, vec![t.root()])).collect();
        self.active_tab = Tab::Home;
    }

    fn in_tabs(&self) -> bool {
        matches!(self.root.last(), Some(Route::Tabs(_)))
    }

    pub fn navigate(&mut self, route: Route) -> Result<(), ClientError> {
        self.place(route, false)
    }

    /// Swap the top of the current stack for `route`.
    pub fn replace(&mut self, route: Route) -> Result<(), ClientError> {
        self.place(route, true)
    }

    fn place(&mut self, route: Route, replace: bool) -> Result<(), ClientError> {
        route.validate()?;
        debug!(route = route.name(), replace, "navigate");

        if route.is_root_level() {
            if matches!(route, Route::Tabs(_)) {
                self.reset_tabs();
            }
            if replace {
                self.root.pop();
            }
            self.root.push(route);
            return Ok(());
        }

        if !self.in_tabs() {
            return Err(ClientError::Navigation(format!(
                "{} is only reachable after signing in",
                route.name()
            )));
        }

        if let Some(tab) = route.tab_root() {
            self.active_tab = tab;
            return Ok(());
        }

        if !route.belongs_to(self.active_tab) {
            return Err(ClientError::Navigation(format!(
                "{} is not part of the {:?} tab",
                route.name(),
                self.active_tab
            )));
        }

        let stack = self.tabs.entry(self.active_tab).or_default();
        if replace && stack.len() > 1 {
            stack.pop();
        }
        stack.push(route);
        Ok(())
    }

    pub fn select_tab(&mut self, tab: Tab) -> Result<(), ClientError> {
        self.navigate(tab.root())
    }

    /// Pop one level. Returns `false` when already at a root.
    pub fn go_back(&mut self) -> bool {
        if self.in_tabs() {
            if let Some(stack) = self.tabs.get_mut(&self.active_tab) {
                if stack.len() > 1 {
                    stack.pop();
                    return true;
                }
            }
        }
        if self.root.len() > 1 {
            self.root.pop();
            return true;
        }
        false
    }

    pub fn current(&self) -> &Route {
        if self.in_tabs() {
            if let Some(top) = self.tabs.get(&self.active_tab).and_then(|s| s.last()) {
                return top;
            }
        }
        self.root.last().unwrap_or(&LOGIN)
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.in_tabs().then_some(self.active_tab)
    }

    pub fn stack(&self, tab: Tab) -> &[Route] {
        self.tabs.get(&tab).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.root.len()
    }
}
