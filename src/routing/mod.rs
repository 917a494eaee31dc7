//! Route table module
//!
//! Binds (method, path pattern) pairs to handler actions and resolves
//! incoming requests to the action that should run.

mod matcher;

pub use matcher::{PathParams, PathPattern};

use hyper::Method;

/// Action to run when a route matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Return the full list of item names
    ListItems,
    /// Return a single item looked up by the bound `name` parameter
    FetchItem,
}

/// A (method, path-pattern) binding to a handler action
#[derive(Debug)]
pub struct Route {
    pub name: &'static str,
    pub method: Method,
    pub pattern: PathPattern,
    pub action: RouteAction,
}

impl Route {
    pub fn new(name: &'static str, method: Method, pattern: &str, action: RouteAction) -> Self {
        Self {
            name,
            method,
            pattern: PathPattern::parse(pattern),
            action,
        }
    }
}

/// Result of resolving a request against the route table
#[derive(Debug)]
pub enum RouteMatch<'p> {
    /// A route matched; run its action with the bound parameters
    Matched {
        action: RouteAction,
        params: PathParams<'p>,
    },
    /// The path is registered but not under this method
    MethodNotAllowed { allow: Vec<Method> },
    /// No registered pattern matches the path
    NotFound,
}

/// Ordered route list; the first matching route wins
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Registered routes in registration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a request to a route action
    ///
    /// Routes are checked in registration order. A path that matches some
    /// pattern only under other methods reports the allowed method set so
    /// the caller can answer 405 without invoking any handler.
    pub fn match_request<'p>(&self, method: &Method, path: &'p str) -> RouteMatch<'p> {
        let mut allow: Vec<Method> = Vec::new();

        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };
            if &route.method == method {
                return RouteMatch::Matched {
                    action: route.action,
                    params,
                };
            }
            if !allow.contains(&route.method) {
                allow.push(route.method.clone());
            }
        }

        if allow.is_empty() {
            RouteMatch::NotFound
        } else {
            RouteMatch::MethodNotAllowed { allow }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> RouteTable {
        RouteTable::new(vec![
            Route::new("list_items", Method::GET, "/items", RouteAction::ListItems),
            Route::new("get_item", Method::GET, "/items/{name}", RouteAction::FetchItem),
        ])
    }

    #[test]
    fn test_match_collection_route() {
        let table = make_table();
        match table.match_request(&Method::GET, "/items") {
            RouteMatch::Matched { action, params } => {
                assert_eq!(action, RouteAction::ListItems);
                assert!(params.is_empty());
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_match_single_item_route() {
        let table = make_table();
        match table.match_request(&Method::GET, "/items/item2") {
            RouteMatch::Matched { action, params } => {
                assert_eq!(action, RouteAction::FetchItem);
                assert_eq!(params.get("name"), Some("item2"));
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn test_method_mismatch_reports_allowed_set() {
        let table = make_table();
        match table.match_request(&Method::POST, "/items") {
            RouteMatch::MethodNotAllowed { allow } => {
                assert_eq!(allow, vec![Method::GET]);
            }
            other => panic!("expected method not allowed, got {other:?}"),
        }
    }

    #[test]
    fn test_unregistered_path_is_not_found() {
        let table = make_table();
        assert!(matches!(
            table.match_request(&Method::GET, "/nodes"),
            RouteMatch::NotFound
        ));
        assert!(matches!(
            table.match_request(&Method::GET, "/items/item1/extra"),
            RouteMatch::NotFound
        ));
    }

    #[test]
    fn test_first_match_wins() {
        // A literal route registered before a param route takes priority
        let table = RouteTable::new(vec![
            Route::new("special", Method::GET, "/items/special", RouteAction::ListItems),
            Route::new("get_item", Method::GET, "/items/{name}", RouteAction::FetchItem),
        ]);
        match table.match_request(&Method::GET, "/items/special") {
            RouteMatch::Matched { action, .. } => assert_eq!(action, RouteAction::ListItems),
            other => panic!("expected match, got {other:?}"),
        }
    }
}
