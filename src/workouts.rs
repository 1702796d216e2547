use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::gear::GearCatalog;
use crate::models::{total_weight, GearItem, Route, Workout, WorkoutId};
use crate::routes::RouteCatalog;

/// Estimate calories burned for a ruck.
///
/// `calories = distance * (weight * 0.1) * (minutes * 0.05)`. This is a
/// rough load-times-distance heuristic rather than a physiological model;
/// zero weight or zero duration gives zero.
pub fn calculate_calories(distance: f64, duration: f64, total_weight: f64) -> f64 {
    let duration_minutes = duration / 60.0;
    distance * (total_weight * 0.1) * (duration_minutes * 0.05)
}

/// Recorded workouts in the order they were added
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
}

/// Example sessions: days before now, route, duration in seconds, gear names
const EXAMPLE_WORKOUTS: [(i64, &str, f64, &[&str]); 5] = [
    (0, "River Run", 3600.0, &["GORUCK Rucker 4.0", "20lb Plate"]),
    (1, "Park Trail", 2700.0, &["GORUCK Rucker 4.0", "30lb Sandbag"]),
    (2, "Neighborhood Loop", 1800.0, &["GORUCK Rucker 4.0", "20lb Plate"]),
    (
        3,
        "River Run",
        4500.0,
        &["GORUCK Rucker 4.0", "20lb Plate", "30lb Sandbag"],
    ),
    (4, "Park Trail", 2400.0, &["GORUCK Rucker 4.0", "20lb Plate"]),
];

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log seeded with five example workouts ending at `now`.
    ///
    /// Gear and routes are looked up by name in the given catalogs; an
    /// example whose route is missing is skipped, missing gear is left out.
    pub fn with_examples(gear: &GearCatalog, routes: &RouteCatalog, now: DateTime<Utc>) -> Self {
        let mut log = Self::new();

        for (days_ago, route_name, duration, gear_names) in EXAMPLE_WORKOUTS {
            let Some(route) = routes.find_by_name(route_name) else {
                warn!(route = route_name, "example route missing, skipping workout");
                continue;
            };

            let selected: Vec<GearItem> = gear_names
                .iter()
                .filter_map(|name| gear.list().iter().find(|item| item.name == *name))
                .cloned()
                .collect();

            log.add_from_route(now - Duration::days(days_ago), route, duration, selected);
        }

        log
    }

    pub fn list(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn get(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Workouts sorted newest first; equal dates keep insertion order
    pub fn history(&self) -> Vec<&Workout> {
        let mut sorted: Vec<&Workout> = self.workouts.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Record a workout dated now.
    ///
    /// `selected_gear` is taken by value, so the log owns its own copies.
    pub fn add(
        &mut self,
        distance: f64,
        duration: f64,
        selected_gear: Vec<GearItem>,
        route_name: Option<String>,
    ) -> Workout {
        self.record(Utc::now(), distance, duration, selected_gear, route_name)
    }

    /// Record a workout over a preset route at the given date
    pub fn add_from_route(
        &mut self,
        date: DateTime<Utc>,
        route: &Route,
        duration: f64,
        selected_gear: Vec<GearItem>,
    ) -> Workout {
        self.record(
            date,
            route.distance,
            duration,
            selected_gear,
            Some(route.name.clone()),
        )
    }

    fn record(
        &mut self,
        date: DateTime<Utc>,
        distance: f64,
        duration: f64,
        selected_gear: Vec<GearItem>,
        route_name: Option<String>,
    ) -> Workout {
        let calories = calculate_calories(distance, duration, total_weight(&selected_gear));
        let workout = Workout {
            id: Uuid::new_v4(),
            date,
            distance,
            duration,
            selected_gear,
            calories,
            route_name,
        };

        debug!(
            id = %workout.id,
            distance,
            duration,
            calories,
            gear = workout.selected_gear.len(),
            "workout recorded"
        );
        self.workouts.push(workout.clone());
        workout
    }

    /// Replace the whole record with the same id.
    ///
    /// The stored calories are whatever the supplied record carries; nothing
    /// is recomputed. Returns `false` when no record matches.
    pub fn update(&mut self, workout: Workout) -> bool {
        match self.workouts.iter_mut().find(|existing| existing.id == workout.id) {
            Some(existing) => {
                debug!(id = %workout.id, "workout updated");
                *existing = workout;
                true
            }
            None => {
                debug!(id = %workout.id, "workout update ignored, no such record");
                false
            }
        }
    }

    pub fn delete(&mut self, id: WorkoutId) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|workout| workout.id != id);
        let removed = self.workouts.len() != before;
        debug!(%id, removed, "workout delete");
        removed
    }
}
