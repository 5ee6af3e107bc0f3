//! Navigation state snapshot.

use crate::routing::RouteMatch;

/// The resolver's view of "where the application is".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Location string most recently navigated to (or the starting location).
    pub current_location: String,

    /// Matched route, `None` before the first navigation or after a miss.
    pub current_route: Option<RouteMatch>,

    /// False until the first navigation commits.
    pub navigated: bool,
}

impl NavigationState {
    pub fn initial(location: impl Into<String>) -> Self {
        Self {
            current_location: location.into(),
            current_route: None,
            navigated: false,
        }
    }

    pub fn has_route(&self) -> bool {
        self.current_route.is_some()
    }

    /// Name of the current route, if it has one.
    pub fn route_name(&self) -> Option<&str> {
        self.current_route.as_ref().and_then(RouteMatch::name)
    }
}
