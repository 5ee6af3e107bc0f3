//! Shared helpers for integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use spa_router::navigation::{NavigationState, RouteResolver, Subscription};
use spa_router::routing::RouteDefinition;

/// The stock shell table plus a parameterized lab route.
pub fn tour_routes() -> Vec<RouteDefinition> {
    vec![
        RouteDefinition::new("/", "LocalMap").named("home"),
        RouteDefinition::new("/labs", "LabsView").named("labs"),
        RouteDefinition::new("/labs/:id", "LabDetail").named("lab"),
        RouteDefinition::new("/stories", "StoriesView"),
        RouteDefinition::new("/activities", "ActivitiesView"),
        RouteDefinition::new("/dev", "DevTools").named("dev"),
    ]
}

pub fn tour_resolver() -> RouteResolver {
    RouteResolver::register(tour_routes(), "/").unwrap()
}

/// Observer that appends `"{tag}:{location}"` for every notification.
pub fn record(
    resolver: &RouteResolver,
    tag: &'static str,
    log: &Rc<RefCell<Vec<String>>>,
) -> Subscription {
    let log = Rc::clone(log);
    resolver.subscribe(move |state: &NavigationState| {
        log.borrow_mut()
            .push(format!("{tag}:{}", state.current_location));
    })
}
