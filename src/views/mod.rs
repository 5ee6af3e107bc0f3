//! View lookup owned by the view layer.
//!
//! The resolver only carries component ids; this registry turns them into
//! whatever the view layer renders with (a render function, a trait object,
//! a source path). The resolver never calls into it.

use std::collections::HashMap;

use crate::navigation::NavigationState;
use crate::routing::RouteTable;

/// Maps component ids to views, with an optional not-found view.
#[derive(Debug, Clone)]
pub struct ViewRegistry<V> {
    views: HashMap<String, V>,
    not_found: Option<V>,
}

impl<V> Default for ViewRegistry<V> {
    fn default() -> Self {
        Self {
            views: HashMap::new(),
            not_found: None,
        }
    }
}

impl<V> ViewRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `component` to `view`, replacing any earlier binding.
    pub fn register(&mut self, component: impl Into<String>, view: V) -> &mut Self {
        self.views.insert(component.into(), view);
        self
    }

    /// View shown when navigation found no route.
    pub fn with_not_found(mut self, view: V) -> Self {
        self.not_found = Some(view);
        self
    }

    pub fn get(&self, component: &str) -> Option<&V> {
        self.views.get(component)
    }

    /// View for the current state: the route's view, or the not-found view
    /// after a miss. `None` until the first navigation.
    pub fn view_for(&self, state: &NavigationState) -> Option<&V> {
        if !state.navigated {
            return None;
        }
        match &state.current_route {
            Some(route) => self.get(route.component()),
            None => self.not_found.as_ref(),
        }
    }

    /// Component ids referenced by `table` with no registered view, in table order.
    pub fn missing<'t>(&self, table: &'t RouteTable) -> Vec<&'t str> {
        let mut missing: Vec<&str> = Vec::new();
        for route in table.iter() {
            let component = route.component.as_str();
            if !self.views.contains_key(component) && !missing.contains(&component) {
                missing.push(component);
            }
        }
        missing
    }
}
