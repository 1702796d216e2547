use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RuckError;

pub type GearId = Uuid;
pub type RouteId = Uuid;
pub type WorkoutId = Uuid;

/// Kinds of load a gear item can be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GearCategory {
    Vest,
    Stone,
    Backpack,
    Sandbag,
}

impl GearCategory {
    /// All categories in declaration order
    pub const ALL: [GearCategory; 4] = [
        GearCategory::Vest,
        GearCategory::Stone,
        GearCategory::Backpack,
        GearCategory::Sandbag,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GearCategory::Vest => "Vest",
            GearCategory::Stone => "Stone",
            GearCategory::Backpack => "Backpack",
            GearCategory::Sandbag => "Sandbag",
        }
    }
}

impl std::fmt::Display for GearCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for GearCategory {
    type Err = RuckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vest" => Ok(GearCategory::Vest),
            "stone" => Ok(GearCategory::Stone),
            "backpack" => Ok(GearCategory::Backpack),
            "sandbag" => Ok(GearCategory::Sandbag),
            _ => Err(RuckError::InvalidCategory(s.to_string())),
        }
    }
}

/// A piece of equipment that adds load to a ruck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearItem {
    /// Unique identifier, fixed for the life of the item
    pub id: GearId,

    /// Display name
    pub name: String,

    /// Weight in pounds
    pub weight: f64,

    pub category: GearCategory,
}

impl GearItem {
    /// Create a gear item with a freshly generated identifier
    pub fn new(name: impl Into<String>, weight: f64, category: GearCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            weight,
            category,
        }
    }
}

/// A named preset route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,

    /// Distance in miles
    pub distance: f64,
}

impl Route {
    pub fn new(name: impl Into<String>, distance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            distance,
        }
    }
}

/// A recorded rucking session
///
/// The gear list holds copies taken when the workout was recorded, so later
/// edits to the gear catalog never reach back into history. Calories are
/// frozen at creation while pace is derived on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier for the workout
    pub id: WorkoutId,

    /// When the workout took place
    pub date: DateTime<Utc>,

    /// Distance in miles
    pub distance: f64,

    /// Duration in seconds
    pub duration: f64,

    /// Gear carried, copied at creation time
    pub selected_gear: Vec<GearItem>,

    /// Estimated calories, computed once at creation
    pub calories: f64,

    /// Name of the preset route, if one was used
    pub route_name: Option<String>,
}

impl Workout {
    /// Combined weight of the embedded gear copies in pounds
    pub fn total_gear_weight(&self) -> f64 {
        total_weight(&self.selected_gear)
    }

    /// Seconds per mile, or zero when no distance was covered
    pub fn pace(&self) -> f64 {
        if self.distance > 0.0 {
            self.duration / self.distance
        } else {
            0.0
        }
    }
}

/// Sum of gear weights, folded left from positive zero
pub fn total_weight<'a, I>(gear: I) -> f64
where
    I: IntoIterator<Item = &'a GearItem>,
{
    gear.into_iter().fold(0.0, |acc, item| acc + item.weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workout(distance: f64, duration: f64, gear: Vec<GearItem>) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            date: Utc::now(),
            distance,
            duration,
            selected_gear: gear,
            calories: 0.0,
            route_name: None,
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("vest".parse::<GearCategory>().unwrap(), GearCategory::Vest);
        assert_eq!(" Sandbag ".parse::<GearCategory>().unwrap(), GearCategory::Sandbag);
        assert_eq!("BACKPACK".parse::<GearCategory>().unwrap(), GearCategory::Backpack);
        assert!(matches!(
            "kettlebell".parse::<GearCategory>(),
            Err(RuckError::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_category_display_matches_name() {
        for category in GearCategory::ALL {
            assert_eq!(category.to_string(), category.name());
            assert_eq!(category.name().parse::<GearCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&GearCategory::Stone).unwrap();
        assert_eq!(json, "\"Stone\"");
    }

    #[test]
    fn test_new_gear_items_get_distinct_ids() {
        let a = GearItem::new("Plate", 20.0, GearCategory::Vest);
        let b = GearItem::new("Plate", 20.0, GearCategory::Vest);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_total_gear_weight() {
        let workout = sample_workout(
            2.0,
            1800.0,
            vec![
                GearItem::new("Rucker", 45.0, GearCategory::Backpack),
                GearItem::new("Plate", 20.0, GearCategory::Vest),
            ],
        );
        assert_eq!(workout.total_gear_weight(), 65.0);
    }

    #[test]
    fn test_total_gear_weight_without_gear_is_positive_zero() {
        let workout = sample_workout(2.0, 1800.0, Vec::new());
        let weight = workout.total_gear_weight();
        assert_eq!(weight, 0.0);
        assert!(weight.is_sign_positive());
    }

    #[test]
    fn test_pace() {
        let workout = sample_workout(4.0, 3600.0, Vec::new());
        assert_eq!(workout.pace(), 900.0);
    }

    #[test]
    fn test_pace_with_zero_distance_is_zero() {
        let workout = sample_workout(0.0, 3600.0, Vec::new());
        assert_eq!(workout.pace(), 0.0);
    }

    #[test]
    fn test_pace_tracks_edits() {
        let mut workout = sample_workout(2.0, 1200.0, Vec::new());
        assert_eq!(workout.pace(), 600.0);
        workout.duration = 1500.0;
        assert_eq!(workout.pace(), 750.0);
    }
}
