//! Router integration for click-to-navigate wrappers.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::element::Event;
use crate::props::{supplied, PropSnapshot, PropValue};

/// Prop that turns a click into a navigation.
pub const ROUTER_LINK: &str = "routerLink";

/// Props with this prefix are forwarded to the navigation manager.
pub const ROUTER_PROP_PREFIX: &str = "router";

/// Everything a navigation manager receives for one click.
#[derive(Debug, Clone)]
pub struct NavigationPayload {
    pub event: Event,
    /// Supplied `router*` props, e.g. `routerLink`, `routerDirection`.
    pub props: BTreeMap<String, PropValue>,
}

/// A router capable of performing navigations.
pub trait NavManager {
    fn navigate(&self, payload: NavigationPayload);
}

/// Optional capabilities available to wrappers, passed in at the
/// composition root.
#[derive(Clone, Default)]
pub struct WrapperContext {
    nav_manager: Option<Rc<dyn NavManager>>,
}

impl WrapperContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nav_manager(mut self, nav_manager: Rc<dyn NavManager>) -> Self {
        self.nav_manager = Some(nav_manager);
        self
    }

    pub fn nav_manager(&self) -> Option<&Rc<dyn NavManager>> {
        self.nav_manager.as_ref()
    }
}

impl fmt::Debug for WrapperContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperContext")
            .field("nav_manager", &self.nav_manager.is_some())
            .finish()
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// No `routerLink` was supplied.
    NotRequested,
    /// The user's click handler called `prevent_default`.
    Prevented,
    Navigated,
    /// A navigation was requested but no navigation manager is registered.
    NoRouter,
}

/// Collect the payload for a navigation.
pub fn navigation_payload(event: &Event, props: &PropSnapshot) -> NavigationPayload {
    let props = props
        .iter()
        .filter(|(key, value)| key.starts_with(ROUTER_PROP_PREFIX) && !value.is_empty())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    NavigationPayload {
        event: event.clone(),
        props,
    }
}

/// Navigate if `routerLink` was supplied.
pub fn handle_router_link(
    event: &Event,
    props: &PropSnapshot,
    nav_manager: Option<&dyn NavManager>,
) -> NavigationOutcome {
    if supplied(props, ROUTER_LINK).is_none() {
        return NavigationOutcome::NotRequested;
    }

    match nav_manager {
        Some(nav_manager) => {
            nav_manager.navigate(navigation_payload(event, props));
            NavigationOutcome::Navigated
        }
        None => {
            tracing::warn!(
                "Tried to navigate, but no router was found. Make sure you have mounted a router."
            );
            NavigationOutcome::NoRouter
        }
    }
}

/// Run the user's `onClick`, then navigate unless it prevented default.
pub fn handle_click(
    event: &Event,
    props: &PropSnapshot,
    nav_manager: Option<&dyn NavManager>,
) -> NavigationOutcome {
    if let Some(on_click) = supplied(props, "onClick").and_then(PropValue::as_callback) {
        on_click.call(event);
    }

    if event.default_prevented() {
        return NavigationOutcome::Prevented;
    }

    handle_router_link(event, props, nav_manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{Callback, EMPTY_PROP};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNav {
        calls: RefCell<Vec<NavigationPayload>>,
    }

    impl NavManager for RecordingNav {
        fn navigate(&self, payload: NavigationPayload) {
            self.calls.borrow_mut().push(payload);
        }
    }

    fn props(entries: &[(&str, PropValue)]) -> PropSnapshot {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn navigates_with_router_props_only() {
        let nav = RecordingNav::default();
        let props = props(&[
            (ROUTER_LINK, "/home".into()),
            ("routerDirection", "back".into()),
            ("routerAnimation", EMPTY_PROP),
            ("color", "primary".into()),
        ]);
        let event = Event::new("click");

        let outcome = handle_click(&event, &props, Some(&nav));

        assert_eq!(outcome, NavigationOutcome::Navigated);
        let calls = nav.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].event.same_event(&event));
        assert_eq!(
            calls[0].props.keys().collect::<Vec<_>>(),
            vec!["routerDirection", "routerLink"]
        );
    }

    #[test]
    fn skips_when_router_link_is_empty() {
        let nav = RecordingNav::default();
        let props = props(&[(ROUTER_LINK, EMPTY_PROP)]);

        let outcome = handle_click(&Event::new("click"), &props, Some(&nav));

        assert_eq!(outcome, NavigationOutcome::NotRequested);
        assert!(nav.calls.borrow().is_empty());
    }

    #[test]
    fn prevent_default_in_user_handler_stops_navigation() {
        let nav = RecordingNav::default();
        let props = props(&[
            (ROUTER_LINK, "/home".into()),
            ("onClick", Callback::new(|e| e.prevent_default()).into()),
        ]);

        let outcome = handle_click(&Event::new("click"), &props, Some(&nav));

        assert_eq!(outcome, NavigationOutcome::Prevented);
        assert!(nav.calls.borrow().is_empty());
    }

    #[test]
    fn missing_router_is_not_fatal() {
        let props = props(&[(ROUTER_LINK, "/home".into())]);

        let outcome = handle_click(&Event::new("click"), &props, None);

        assert_eq!(outcome, NavigationOutcome::NoRouter);
    }
}
