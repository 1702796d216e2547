//! Text rendering for workouts and gear
//!
//! Durations are shown as `HH:MM:SS`, distances and weights with one decimal
//! and calories as whole numbers.

use std::fmt;

use crate::models::{GearItem, Workout};

/// Format seconds as `HH:MM:SS`, truncating fractional seconds
pub fn format_duration(seconds: f64) -> String {
    let total = seconds as i64;
    let hours = total / 3600;
    let minutes = total / 60 % 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format a pace in seconds per mile
pub fn format_pace(seconds_per_mile: f64) -> String {
    format!("{}/mile", format_duration(seconds_per_mile))
}

pub fn format_distance(miles: f64) -> String {
    format!("{:.1} miles", miles)
}

pub fn format_weight(pounds: f64) -> String {
    format!("{:.1} lbs", pounds)
}

pub fn format_calories(calories: f64) -> String {
    format!("{:.0}", calories)
}

pub fn format_date(workout: &Workout) -> String {
    workout.date.format("%b %-d, %Y at %H:%M").to_string()
}

/// First eight characters of an id, enough to look it up again
pub fn short_id(id: &uuid::Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// One history entry: date, distance, duration and total weight
pub fn workout_row(workout: &Workout) -> String {
    format!(
        "{}\n  {}  {}\n  Total Weight: {}",
        format_date(workout),
        format_distance(workout.distance),
        format_duration(workout.duration),
        format_weight(workout.total_gear_weight())
    )
}

/// The full detail view of a workout
pub fn workout_detail(workout: &Workout) -> String {
    WorkoutDetail(workout).to_string()
}

/// Display adapter rendering the detail view of a workout
pub struct WorkoutDetail<'a>(pub &'a Workout);

impl fmt::Display for WorkoutDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let workout = self.0;

        writeln!(f, "WORKOUT DETAILS")?;
        writeln!(f, "{:-<40}", "")?;
        writeln!(f, "{:<12}{}", "Date", format_date(workout))?;
        if let Some(route) = &workout.route_name {
            writeln!(f, "{:<12}{}", "Route", route)?;
        }
        writeln!(f, "{:<12}{}", "Distance", format_distance(workout.distance))?;
        writeln!(f, "{:<12}{}", "Duration", format_duration(workout.duration))?;
        writeln!(f, "{:<12}{}", "Pace", format_pace(workout.pace()))?;
        writeln!(f, "{:<12}{}", "Calories", format_calories(workout.calories))?;
        writeln!(f)?;
        writeln!(f, "GEAR USED")?;
        writeln!(f, "{:-<40}", "")?;
        for item in &workout.selected_gear {
            writeln!(f, "{}", gear_line(item))?;
        }
        write!(
            f,
            "{:<28}{:>12}",
            "Total Weight",
            format_weight(workout.total_gear_weight())
        )
    }
}

fn gear_line(item: &GearItem) -> String {
    format!("{:<28}{:>12}", item.name, format_weight(item.weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GearCategory;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample() -> Workout {
        Workout {
            id: Uuid::new_v4(),
            date: Utc.with_ymd_and_hms(2024, 10, 5, 7, 30, 0).unwrap(),
            distance: 4.5,
            duration: 3600.0,
            selected_gear: vec![
                GearItem::new("GORUCK Rucker 4.0", 45.0, GearCategory::Backpack),
                GearItem::new("20lb Plate", 20.0, GearCategory::Vest),
            ],
            calories: 87.75,
            route_name: Some("River Run".to_string()),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(4500.0), "01:15:00");
        assert_eq!(format_duration(59.9), "00:00:59");
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(360000.0), "100:00:00");
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(800.0), "00:13:20/mile");
        assert_eq!(format_pace(0.0), "00:00:00/mile");
    }

    #[test]
    fn test_numeric_formats() {
        assert_eq!(format_distance(3.1), "3.1 miles");
        assert_eq!(format_weight(45.0), "45.0 lbs");
        assert_eq!(format_calories(87.75), "88");
        assert_eq!(format_calories(0.0), "0");
    }

    #[test]
    fn test_short_id() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(short_id(&id), "67e55044");
    }

    #[test]
    fn test_workout_row() {
        let row = workout_row(&sample());
        assert!(row.starts_with("Oct 5, 2024 at 07:30"));
        assert!(row.contains("4.5 miles  01:00:00"));
        assert!(row.ends_with("Total Weight: 65.0 lbs"));
    }

    #[test]
    fn test_workout_detail() {
        let detail = workout_detail(&sample());
        assert!(detail.contains("Route       River Run"));
        assert!(detail.contains("Pace        00:13:20/mile"));
        assert!(detail.contains("Calories    88"));
        assert!(detail.contains("GORUCK Rucker 4.0"));
        assert!(detail.contains("45.0 lbs"));
        assert!(detail.lines().last().unwrap().contains("65.0 lbs"));
    }

    #[test]
    fn test_workout_detail_without_route_or_gear() {
        let mut workout = sample();
        workout.route_name = None;
        workout.selected_gear.clear();

        let detail = format!("{}", WorkoutDetail(&workout));
        assert!(!detail.contains("Route"));
        assert!(detail.contains("GEAR USED"));
        assert!(detail.lines().last().unwrap().ends_with("0.0 lbs"));
        assert_eq!(detail, workout_detail(&workout));
    }
}
