use std::collections::BTreeSet;

use crate::gear::GearCatalog;
use crate::models::{GearId, RouteId};

/// An unsubmitted "new workout" form.
///
/// Distance comes either from a preset route or from free text that is only
/// parsed on submission. Gear is a set of catalog ids; the actual copies are
/// taken from the catalog when the draft is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutDraft {
    pub route: Option<RouteId>,
    pub distance_text: String,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub gear: BTreeSet<GearId>,
}

impl WorkoutDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: RouteId) -> Self {
        self.route = Some(route);
        self
    }

    pub fn with_distance(mut self, text: impl Into<String>) -> Self {
        self.route = None;
        self.distance_text = text.into();
        self
    }

    pub fn with_duration(mut self, hours: u32, minutes: u32, seconds: u32) -> Self {
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
        self
    }

    pub fn with_gear(mut self, ids: impl IntoIterator<Item = GearId>) -> Self {
        self.gear.extend(ids);
        self
    }

    /// Select the item if it is not selected, deselect it otherwise
    pub fn toggle_gear(&mut self, id: GearId) {
        if !self.gear.remove(&id) {
            self.gear.insert(id);
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.hours) * 3600.0 + f64::from(self.minutes) * 60.0 + f64::from(self.seconds)
    }

    /// Weight of the currently selected gear as it stands in the catalog
    pub fn total_weight(&self, catalog: &GearCatalog) -> f64 {
        let ids: Vec<GearId> = self.gear.iter().copied().collect();
        catalog.total_weight(&ids)
    }

    /// Clear the form back to its initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
