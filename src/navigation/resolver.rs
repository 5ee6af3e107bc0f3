//! The route resolver.
//!
//! # Responsibilities
//! - Resolve requested locations against the route table
//! - Own the current navigation state (the only mutator of it)
//! - Notify observers after every navigation, successful or not
//!
//! # Design Decisions
//! - An explicit context object owned by the application root, not a global
//! - A miss clears the current route and is reported to the caller; the
//!   resolver never redirects or falls back on its own
//! - Navigating twice to the same location yields the same state and still
//!   notifies observers

use std::sync::Arc;

use crate::navigation::observer::{ObserverRegistry, Subscription};
use crate::navigation::state::NavigationState;
use crate::routing::{
    ConfigurationError, NotFoundError, RouteDefinition, RouteError, RouteMatch, RouteTable,
};

/// Resolves locations to routes and tracks where the application is.
#[derive(Debug)]
pub struct RouteResolver {
    table: Arc<RouteTable>,
    state: NavigationState,
    observers: ObserverRegistry,
}

impl RouteResolver {
    /// Create a resolver over an already registered table.
    ///
    /// `initial_location` is the environment's starting location; no route is
    /// current until the first navigation.
    pub fn new(table: Arc<RouteTable>, initial_location: impl Into<String>) -> Self {
        Self {
            table,
            state: NavigationState::initial(initial_location),
            observers: ObserverRegistry::new(),
        }
    }

    /// Register a route table and build a resolver over it.
    pub fn register<I>(
        definitions: I,
        initial_location: impl Into<String>,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let table = RouteTable::register(definitions)?;
        Ok(Self::new(Arc::new(table), initial_location))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve `location` and make the result current.
    pub fn navigate(&mut self, location: &str) -> Result<RouteMatch, NotFoundError> {
        let matched = self.table.resolve(location);

        match &matched {
            Some(m) => tracing::debug!(
                location = %location,
                route = m.route.path.as_str(),
                name = m.name(),
                "Navigated"
            ),
            None => tracing::warn!(location = %location, "No route matches location"),
        }

        self.commit(location.to_string(), matched.clone());
        matched.ok_or_else(|| NotFoundError::new(location))
    }

    /// Navigate to a named route, building its location from `params`.
    ///
    /// Unknown names and missing parameters leave the state untouched and
    /// notify nobody.
    pub fn navigate_named(
        &mut self,
        name: &str,
        params: &[(&str, &str)],
    ) -> Result<RouteMatch, RouteError> {
        let (location, matched) = self.table.resolve_named(name, params)?;
        tracing::debug!(location = %location, name, "Navigated by name");

        self.commit(location, Some(matched.clone()));
        Ok(matched)
    }

    /// Location of a named route, without navigating.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        self.table.href(name, params)
    }

    /// Snapshot of the current navigation state.
    pub fn current_state(&self) -> NavigationState {
        self.state.clone()
    }

    /// Register an observer called after every navigation, in subscription order.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&NavigationState) + 'static,
    {
        self.observers.subscribe(observer)
    }

    fn commit(&mut self, location: String, route: Option<RouteMatch>) {
        self.state = NavigationState {
            current_location: location,
            current_route: route,
            navigated: true,
        };
        self.observers.notify(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn resolver() -> RouteResolver {
        RouteResolver::register(
            vec![
                RouteDefinition::new("/", "LocalMap").named("home"),
                RouteDefinition::new("/labs", "LabsView").named("labs"),
                RouteDefinition::new("/labs/:id", "LabDetail").named("lab"),
            ],
            "/",
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state_has_no_route() {
        let r = resolver();
        let state = r.current_state();
        assert_eq!(state.current_location, "/");
        assert!(!state.has_route());
        assert!(!state.navigated);
    }

    #[test]
    fn test_navigate_hit_and_miss() {
        let mut r = resolver();

        let m = r.navigate("/labs").unwrap();
        assert_eq!(m.name(), Some("labs"));
        assert_eq!(r.current_state().route_name(), Some("labs"));

        let err = r.navigate("/unknown").unwrap_err();
        assert_eq!(err, NotFoundError::new("/unknown"));
        let state = r.current_state();
        assert_eq!(state.current_location, "/unknown");
        assert!(state.current_route.is_none());
    }

    #[test]
    fn test_navigate_named_failure_is_silent() {
        let mut r = resolver();
        let calls = Rc::new(RefCell::new(0));
        let _sub = {
            let calls = Rc::clone(&calls);
            r.subscribe(move |_| *calls.borrow_mut() += 1)
        };

        r.navigate("/labs").unwrap();
        let before = r.current_state();

        assert!(matches!(
            r.navigate_named("lab", &[]),
            Err(RouteError::MissingParam { .. })
        ));
        assert!(matches!(
            r.navigate_named("nope", &[]),
            Err(RouteError::UnknownName(_))
        ));
        assert_eq!(r.current_state(), before);
        assert_eq!(*calls.borrow(), 1);

        let m = r.navigate_named("lab", &[("id", "3")]).unwrap();
        assert_eq!(m.param("id"), Some("3"));
        assert_eq!(r.current_state().current_location, "/labs/3");
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_resolvers_share_a_table() {
        let table = Arc::new(
            RouteTable::register(vec![RouteDefinition::new("/dev", "DevTools")]).unwrap(),
        );
        let mut a = RouteResolver::new(Arc::clone(&table), "/");
        let b = RouteResolver::new(table, "/");

        a.navigate("/dev").unwrap();
        assert!(a.current_state().has_route());
        assert!(!b.current_state().has_route());
    }
}
