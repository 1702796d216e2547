//! Composition root for the three catalogs
//!
//! A `RuckStore` is built once by the host and handed to whatever needs the
//! data. It also turns user queries and workout drafts into catalog calls.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::draft::WorkoutDraft;
use crate::error::{EntityKind, Result, RuckError};
use crate::gear::GearCatalog;
use crate::models::{GearItem, Route, Workout};
use crate::routes::RouteCatalog;
use crate::workouts::WorkoutLog;

/// Shortest id prefix accepted by the resolvers
pub const MIN_ID_PREFIX: usize = 4;

/// Store shared between threads; every mutation goes through the lock
pub type SharedStore = Arc<Mutex<RuckStore>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RuckStore {
    pub gear: GearCatalog,
    pub routes: RouteCatalog,
    pub workouts: WorkoutLog,
}

impl RuckStore {
    /// Store with no gear, routes or workouts
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store loaded with the example gear, routes and five workouts ending now
    pub fn seeded() -> Self {
        Self::seeded_at(Utc::now())
    }

    pub fn seeded_at(now: DateTime<Utc>) -> Self {
        let gear = GearCatalog::with_examples();
        let routes = RouteCatalog::with_examples();
        let workouts = WorkoutLog::with_examples(&gear, &routes, now);

        info!(
            gear = gear.len(),
            routes = routes.len(),
            workouts = workouts.len(),
            "store seeded with examples"
        );

        Self {
            gear,
            routes,
            workouts,
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Record the workout described by `draft`.
    ///
    /// Nothing is recorded when the draft names an unknown route or carries
    /// distance text that is not a number. Selected gear that has since left
    /// the catalog is skipped.
    pub fn submit(&mut self, draft: &WorkoutDraft) -> Result<Workout> {
        let (distance, route_name) = match draft.route {
            Some(route_id) => {
                let route = self
                    .routes
                    .get(route_id)
                    .ok_or_else(|| RuckError::not_found(EntityKind::Route, route_id.to_string()))?;
                (route.distance, Some(route.name.clone()))
            }
            None => {
                // Surrounding whitespace is accepted, unlike a strict numeric parse
                let text = draft.distance_text.trim();
                let distance = text.parse::<f64>().map_err(|_| {
                    RuckError::Validation(format!("distance '{}' is not a number", text))
                })?;
                (distance, None)
            }
        };

        let selected: Vec<GearItem> = self
            .gear
            .list()
            .iter()
            .filter(|item| draft.gear.contains(&item.id))
            .cloned()
            .collect();

        if selected.len() != draft.gear.len() {
            debug!(
                requested = draft.gear.len(),
                found = selected.len(),
                "some selected gear is no longer in the catalog"
            );
        }

        Ok(self
            .workouts
            .add(distance, draft.duration_seconds(), selected, route_name))
    }

    pub fn resolve_gear(&self, query: &str) -> Result<&GearItem> {
        resolve(
            EntityKind::Gear,
            query,
            self.gear.list(),
            |item| item.id,
            |item| Some(item.name.as_str()),
        )
    }

    pub fn resolve_route(&self, query: &str) -> Result<&Route> {
        resolve(
            EntityKind::Route,
            query,
            self.routes.list(),
            |route| route.id,
            |route| Some(route.name.as_str()),
        )
    }

    pub fn resolve_workout(&self, query: &str) -> Result<&Workout> {
        resolve(
            EntityKind::Workout,
            query,
            self.workouts.list(),
            |workout| workout.id,
            |_| None,
        )
    }
}

/// Find one entity by full id, case-insensitive name, or unique id prefix.
///
/// An exact name wins over an id prefix, so an item named "cafe" is never
/// shadowed by another item whose id happens to start with `cafe`.
fn resolve<'a, T>(
    kind: EntityKind,
    query: &str,
    items: &'a [T],
    id_of: impl Fn(&T) -> Uuid,
    name_of: impl Fn(&T) -> Option<&str>,
) -> Result<&'a T> {
    let query = query.trim();

    if let Ok(id) = Uuid::parse_str(query) {
        return items
            .iter()
            .find(|item| id_of(*item) == id)
            .ok_or_else(|| RuckError::not_found(kind, query));
    }

    let by_name: Vec<&T> = items
        .iter()
        .filter(|item| name_of(*item).is_some_and(|name| name.eq_ignore_ascii_case(query)))
        .collect();
    if !by_name.is_empty() {
        return single(kind, query, by_name);
    }

    let prefix = query.to_lowercase().replace('-', "");
    if prefix.len() >= MIN_ID_PREFIX && prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        let by_prefix: Vec<&T> = items
            .iter()
            .filter(|item| id_of(*item).simple().to_string().starts_with(&prefix))
            .collect();
        return single(kind, query, by_prefix);
    }

    Err(RuckError::not_found(kind, query))
}

fn single<'a, T>(kind: EntityKind, query: &str, matches: Vec<&'a T>) -> Result<&'a T> {
    match matches.as_slice() {
        [] => Err(RuckError::not_found(kind, query)),
        [only] => Ok(*only),
        _ => Err(RuckError::Ambiguous {
            kind,
            query: query.to_string(),
            matches: matches.len(),
        }),
    }
}
