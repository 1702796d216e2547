use serde::Serialize;
use tracing::debug;

use crate::models::{Route, RouteId};

/// Named preset routes, kept in insertion order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the example routes
    pub fn with_examples() -> Self {
        Self {
            routes: vec![
                Route::new("Neighborhood Loop", 2.0),
                Route::new("Park Trail", 3.1),
                Route::new("River Run", 4.5),
                Route::new("Downtown Circuit", 5.0),
            ],
        }
    }

    pub fn list(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|route| route.id == id)
    }

    /// First route whose name matches, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn add(&mut self, name: impl Into<String>, distance: f64) -> Route {
        let route = Route::new(name, distance);
        debug!(id = %route.id, name = %route.name, distance, "route added");
        self.routes.push(route.clone());
        route
    }

    /// Replace the stored route with the same id; `false` when none matches
    pub fn update(&mut self, route: Route) -> bool {
        match self.routes.iter_mut().find(|existing| existing.id == route.id) {
            Some(existing) => {
                debug!(id = %route.id, "route updated");
                *existing = route;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: RouteId) -> bool {
        let before = self.routes.len();
        self.routes.retain(|route| route.id != id);
        self.routes.len() != before
    }
}
