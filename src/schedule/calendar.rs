//! Date arithmetic behind the day / week / month / semester views

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::api::time::{format_date_short, week_start};
use crate::config::StartView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Day,
    Week,
    Month,
    Semester,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Day, ViewMode::Week, ViewMode::Month, ViewMode::Semester];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Day => "Day",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Semester => "Semester",
        }
    }
}

impl From<StartView> for ViewMode {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Day => ViewMode::Day,
            StartView::Week => ViewMode::Week,
            StartView::Month => ViewMode::Month,
            StartView::Semester => ViewMode::Semester,
        }
    }
}

/// Move the focused date one step backward (`-1`) or forward (`1`).
/// The list view always pages by week; the semester view does not page at all.
pub fn navigate(date: NaiveDate, mode: ViewMode, list_view: bool, direction: i32) -> NaiveDate {
    let forward = direction >= 0;
    if list_view {
        return shift_days(date, 7, forward);
    }
    match mode {
        ViewMode::Day => shift_days(date, 1, forward),
        ViewMode::Week => shift_days(date, 7, forward),
        ViewMode::Month => {
            let shifted = if forward {
                date.checked_add_months(Months::new(1))
            } else {
                date.checked_sub_months(Months::new(1))
            };
            shifted.unwrap_or(date)
        }
        ViewMode::Semester => date,
    }
}

fn shift_days(date: NaiveDate, days: i64, forward: bool) -> NaiveDate {
    if forward {
        date + Duration::days(days)
    } else {
        date - Duration::days(days)
    }
}

/// ISO calendar week number ("CW")
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Monday to Friday of the focused week, as "(dd.mm.yy-dd.mm.yy)"
pub fn week_range_label(date: NaiveDate) -> String {
    let monday = week_start(date);
    let friday = monday + Duration::days(4);
    format!("({}-{})", format_date_short(monday), format_date_short(friday))
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June",
        "July", "August", "September", "October", "November", "December",
    ];
    NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Title for the header of each view
pub fn period_title(date: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Day => date.format("%A, %d %B %Y").to_string(),
        ViewMode::Week => format!("CW {} {}", iso_week(date), week_range_label(date)),
        ViewMode::Month => format!("{} {}", month_name(date.month()), date.year()),
        ViewMode::Semester => String::new(),
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

/// Monday-first weeks covering a month; days outside the month are `None`
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut day = first;
    while day.month() == month {
        let col = day.weekday().num_days_from_monday() as usize;
        week[col] = Some(day);
        if day.weekday() == Weekday::Sun {
            weeks.push(week);
            week = [None; 7];
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemesterSeason {
    /// October to February
    Winter,
    /// April to August
    Summer,
}

impl SemesterSeason {
    /// "Winter 2025" and "WiSe 25/26" are winter terms; anything else is summer
    pub fn from_semester_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("winter") || lower.contains("wise") || lower.starts_with("ws") {
            SemesterSeason::Winter
        } else {
            SemesterSeason::Summer
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SemesterSeason::Winter => "Winter Semester (Oct - Feb)",
            SemesterSeason::Summer => "Summer Semester (Apr - Aug)",
        }
    }

    /// (year, month) pairs of the teaching months, starting in `year`
    pub fn months(&self, year: i32) -> Vec<(i32, u32)> {
        match self {
            SemesterSeason::Winter => vec![(year, 10), (year, 11), (year, 12), (year + 1, 1), (year + 1, 2)],
            SemesterSeason::Summer => (4..=8).map(|m| (year, m)).collect(),
        }
    }
}

/// First four-digit year in a semester name, e.g. 2025 in "Winter 2025/26"
pub fn semester_year(name: &str) -> Option<i32> {
    name.split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == 4)
        .and_then(|part| part.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_and_week_steps() {
        let d = date(2025, 10, 16);
        assert_eq!(navigate(d, ViewMode::Day, false, 1), date(2025, 10, 17));
        assert_eq!(navigate(d, ViewMode::Day, false, -1), date(2025, 10, 15));
        assert_eq!(navigate(d, ViewMode::Week, false, 1), date(2025, 10, 23));
        assert_eq!(navigate(d, ViewMode::Week, false, -1), date(2025, 10, 9));
    }

    #[test]
    fn month_steps_clamp_to_month_end() {
        assert_eq!(navigate(date(2025, 1, 31), ViewMode::Month, false, 1), date(2025, 2, 28));
        assert_eq!(navigate(date(2024, 1, 31), ViewMode::Month, false, 1), date(2024, 2, 29));
        assert_eq!(navigate(date(2025, 3, 31), ViewMode::Month, false, -1), date(2025, 2, 28));
    }

    #[test]
    fn semester_does_not_move_and_list_pages_by_week() {
        let d = date(2025, 10, 16);
        assert_eq!(navigate(d, ViewMode::Semester, false, 1), d);
        assert_eq!(navigate(d, ViewMode::Semester, true, 1), date(2025, 10, 23));
        assert_eq!(navigate(d, ViewMode::Day, true, -1), date(2025, 10, 9));
    }

    #[test]
    fn week_header() {
        let d = date(2025, 10, 16);
        assert_eq!(week_range_label(d), "(13.10.25-17.10.25)");
        assert_eq!(iso_week(d), 42);
        assert_eq!(iso_week(date(2027, 1, 1)), 53);
        assert_eq!(period_title(d, ViewMode::Week), "CW 42 (13.10.25-17.10.25)");
        assert_eq!(period_title(d, ViewMode::Month), "October 2025");
    }

    #[test]
    fn month_grid_is_monday_first() {
        // October 2025 starts on a Wednesday and ends on a Friday
        let grid = month_grid(2025, 10);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], None);
        assert_eq!(grid[0][2], Some(date(2025, 10, 1)));
        assert_eq!(grid[4][4], Some(date(2025, 10, 31)));
        assert_eq!(grid[4][5], None);
        let days: usize = grid.iter().map(|w| w.iter().flatten().count()).sum();
        assert_eq!(days, 31);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn semester_seasons() {
        assert_eq!(SemesterSeason::from_semester_name("Winter 2025"), SemesterSeason::Winter);
        assert_eq!(SemesterSeason::from_semester_name("WS 24/25"), SemesterSeason::Winter);
        assert_eq!(SemesterSeason::from_semester_name("Summer 2026"), SemesterSeason::Summer);
        assert_eq!(
            SemesterSeason::Winter.months(2025),
            vec![(2025, 10), (2025, 11), (2025, 12), (2026, 1), (2026, 2)]
        );
        assert_eq!(SemesterSeason::Summer.months(2026).len(), 5);
        assert_eq!(semester_year("Winter 2025/26"), Some(2025));
        assert_eq!(semester_year("Summer"), None);
    }
}
