//! Timetable logic that runs before anything is painted: filtering, lane layout, calendar math

pub mod calendar;
pub mod filter;
pub mod layout;

pub use calendar::{navigate, SemesterSeason, ViewMode};
pub use filter::{lecturer_busy_at, FilterOptions, ScheduleFilter};
pub use layout::{assign_lanes, Placement};

use crate::api::time::day_order;
use crate::api::ScheduleEntry;

/// List view order: weekday, then start time
pub fn sort_for_list(entries: &mut [&ScheduleEntry]) {
    entries.sort_by(|a, b| {
        day_order(&a.day_of_week)
            .cmp(&day_order(&b.day_of_week))
            .then_with(|| a.start_minutes().cmp(&b.start_minutes()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, day: &str, start: &str) -> ScheduleEntry {
        ScheduleEntry {
            id,
            offered_module_id: None,
            day_of_week: day.into(),
            start_time: start.into(),
            end_time: "23:00".into(),
            module_name: String::new(),
            lecturer_name: String::new(),
            room_name: String::new(),
            semester: String::new(),
            group_ids: Vec::new(),
            group_names: Vec::new(),
        }
    }

    #[test]
    fn list_order_is_weekday_then_time() {
        let entries = vec![
            entry(1, "Wednesday", "09:00"),
            entry(2, "Monday", "14:00"),
            entry(3, "Someday", "08:00"),
            entry(4, "Monday", "08:30"),
        ];
        let mut refs: Vec<&ScheduleEntry> = entries.iter().collect();
        sort_for_list(&mut refs);
        let ids: Vec<i64> = refs.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }
}
