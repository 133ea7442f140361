use std::collections::BTreeSet;

use chrono::Weekday;

use crate::api::time::parse_day_of_week;
use crate::api::ScheduleEntry;

/// Equality filters applied to the timetable before layout. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub lecturer: Option<String>,
    pub group: Option<String>,
    pub room: Option<String>,
}

impl ScheduleFilter {
    pub fn is_empty(&self) -> bool {
        self.lecturer.is_none() && self.group.is_none() && self.room.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, entry: &ScheduleEntry) -> bool {
        self.lecturer.as_ref().map_or(true, |l| &entry.lecturer_name == l)
            && self.group.as_ref().map_or(true, |g| entry.group_names.contains(g))
            && self.room.as_ref().map_or(true, |r| &entry.room_name == r)
    }

    pub fn apply<'a>(&self, entries: &'a [ScheduleEntry]) -> Vec<&'a ScheduleEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Entries that fall on `day`, in their original order
pub fn entries_on<'a>(entries: &[&'a ScheduleEntry], day: Weekday) -> Vec<&'a ScheduleEntry> {
    entries
        .iter()
        .copied()
        .filter(|e| parse_day_of_week(&e.day_of_week) == Some(day))
        .collect()
}

/// True when `lecturer` already teaches during `[slot_start, slot_start + slot_minutes)` on `day`.
/// Pass the unfiltered schedule: the check must see every class of that lecturer.
pub fn lecturer_busy_at(
    entries: &[ScheduleEntry],
    day: Weekday,
    slot_start: u32,
    slot_minutes: u32,
    lecturer: &str,
) -> bool {
    let slot_end = slot_start + slot_minutes;
    entries.iter().any(|e| {
        e.lecturer_name == lecturer
            && parse_day_of_week(&e.day_of_week) == Some(day)
            && slot_start < e.end_minutes()
            && slot_end > e.start_minutes()
    })
}

/// Values offered by the filter dropdowns
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub lecturers: Vec<String>,
    pub groups: Vec<String>,
    pub rooms: Vec<String>,
}

impl FilterOptions {
    pub fn from_entries(entries: &[ScheduleEntry]) -> Self {
        let mut lecturers = BTreeSet::new();
        let mut groups = BTreeSet::new();
        let mut rooms = BTreeSet::new();
        for entry in entries {
            if !entry.lecturer_name.is_empty() {
                lecturers.insert(entry.lecturer_name.clone());
            }
            if !entry.room_name.is_empty() {
                rooms.insert(entry.room_name.clone());
            }
            groups.extend(entry.group_names.iter().filter(|g| !g.is_empty()).cloned());
        }
        Self {
            lecturers: lecturers.into_iter().collect(),
            groups: groups.into_iter().collect(),
            rooms: rooms.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, day: &str, start: &str, end: &str, lecturer: &str, room: &str, groups: &[&str]) -> ScheduleEntry {
        ScheduleEntry {
            id,
            offered_module_id: Some(id),
            day_of_week: day.into(),
            start_time: start.into(),
            end_time: end.into(),
            module_name: format!("Module {}", id),
            lecturer_name: lecturer.into(),
            room_name: room.into(),
            semester: "Winter 2025".into(),
            group_ids: Vec::new(),
            group_names: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn sample() -> Vec<ScheduleEntry> {
        vec![
            entry(1, "Monday", "09:00", "10:30", "Ada Lovelace", "A-101", &["CS-1", "CS-2"]),
            entry(2, "Monday", "11:00", "12:00", "Alan Turing", "B-201", &["CS-1"]),
            entry(3, "Tuesday", "09:00", "10:00", "Ada Lovelace", "B-201", &["DS-1"]),
            entry(4, "Friday", "14:00", "15:00", "Grace Hopper", "A-101", &[]),
        ]
    }

    #[test]
    fn empty_filter_matches_all() {
        let entries = sample();
        let filter = ScheduleFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&entries).len(), 4);
    }

    #[test]
    fn set_fields_combine_with_and() {
        let entries = sample();
        let filter = ScheduleFilter {
            lecturer: Some("Ada Lovelace".into()),
            room: Some("B-201".into()),
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&entries).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn group_filter_uses_membership() {
        let entries = sample();
        let filter = ScheduleFilter {
            group: Some("CS-1".into()),
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&entries).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let entries = sample();
        let filter = ScheduleFilter {
            group: Some("CS-1".into()),
            lecturer: Some("Ada Lovelace".into()),
            room: None,
        };
        let once: Vec<ScheduleEntry> = filter.apply(&entries).into_iter().cloned().collect();
        let twice: Vec<ScheduleEntry> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn entries_on_picks_the_weekday() {
        let entries = sample();
        let all = ScheduleFilter::default().apply(&entries);
        assert_eq!(entries_on(&all, Weekday::Mon).len(), 2);
        assert!(entries_on(&all, Weekday::Wed).is_empty());
    }

    #[test]
    fn busy_check_sees_overlaps_only() {
        let entries = sample();
        // 10:00-10:30 overlaps Ada's Monday 09:00-10:30
        assert!(lecturer_busy_at(&entries, Weekday::Mon, 600, 30, "Ada Lovelace"));
        // 10:30 touches the end and is free
        assert!(!lecturer_busy_at(&entries, Weekday::Mon, 630, 30, "Ada Lovelace"));
        assert!(!lecturer_busy_at(&entries, Weekday::Mon, 600, 30, "Grace Hopper"));
        assert!(!lecturer_busy_at(&entries, Weekday::Wed, 540, 60, "Ada Lovelace"));
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let options = FilterOptions::from_entries(&sample());
        assert_eq!(options.lecturers, vec!["Ada Lovelace", "Alan Turing", "Grace Hopper"]);
        assert_eq!(options.groups, vec!["CS-1", "CS-2", "DS-1"]);
        assert_eq!(options.rooms, vec!["A-101", "B-201"]);
    }
}
