//! Time parsing and formatting utilities for schedule times ("HH:MM") and weekday names

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Weekdays the timetable grid renders, in display order
pub const TEACHING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Parse "HH:MM" (or "HH:MM:SS") to minutes since midnight.
/// Malformed input yields 0; callers feed this from time pickers and the API.
pub fn time_to_minutes(time: &str) -> u32 {
    let mut parts = time.trim().split(':');
    let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
        return 0;
    };
    match (h.trim().parse::<u32>(), m.trim().parse::<u32>()) {
        (Ok(h), Ok(m)) => h.checked_mul(60).and_then(|v| v.checked_add(m)).unwrap_or(0),
        _ => 0,
    }
}

/// Strict "HH:MM" (or "HH:MM:SS") parse for typed input.
/// Rejects anything outside 00:00..=23:59.
pub fn parse_hhmm(time: &str) -> Option<u32> {
    let parts: Vec<&str> = time.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let field = |s: &str, max: u32| -> Option<u32> {
        let s = s.trim();
        if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u32>().ok().filter(|v| *v <= max)
    };
    let hour = field(parts[0], 23)?;
    let minute = field(parts[1], 59)?;
    if let Some(seconds) = parts.get(2) {
        field(seconds, 59)?;
    }
    Some(hour * 60 + minute)
}

/// Format minutes since midnight as zero-padded "HH:MM". No range check.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Add minutes to an "HH:MM" time, wrapping past midnight
pub fn add_minutes_to_time(time: &str, minutes: u32) -> String {
    minutes_to_time((time_to_minutes(time) + minutes) % MINUTES_PER_DAY)
}

/// Visible range of the day grid, in minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: u32,
    pub end: u32,
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::from_hours(8, 20)
    }
}

impl DayWindow {
    /// Build a window from whole hours. `end` is clamped to 24:00 and never precedes `start`.
    pub fn from_hours(start_hour: u8, end_hour: u8) -> Self {
        let start = (start_hour as u32 * 60).min(MINUTES_PER_DAY - 60);
        let end = (end_hour as u32 * 60).clamp(start + 60, MINUTES_PER_DAY);
        Self { start, end }
    }

    pub fn clamp(&self, minutes: u32) -> u32 {
        minutes.clamp(self.start, self.end)
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.start && minutes < self.end
    }

    /// Hourly row labels from start to end inclusive ("08:00" .. "20:00")
    pub fn hour_slots(&self) -> Vec<String> {
        (self.start..=self.end)
            .step_by(60)
            .map(minutes_to_time)
            .collect()
    }

    /// Half-hour row labels from start to end inclusive, used by the day view
    pub fn half_hour_slots(&self) -> Vec<String> {
        (self.start..=self.end)
            .step_by(30)
            .map(minutes_to_time)
            .collect()
    }
}

/// Parse an English weekday name as sent by the API ("Monday", "mon", ...)
pub fn parse_day_of_week(name: &str) -> Option<Weekday> {
    match name.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Full English weekday name, the form the API stores
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn short_day_name(day: Weekday) -> &'static str {
    &day_name(day)[..3]
}

/// Sort key for weekday names; unknown names sort last
pub fn day_order(name: &str) -> u32 {
    parse_day_of_week(name)
        .map(|d| d.num_days_from_monday())
        .unwrap_or(7)
}

/// "dd.mm.yy"
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d.%m.%y").to_string()
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Date on which `day` falls in the Monday-based week containing `date`
pub fn date_for_weekday(date: NaiveDate, day: Weekday) -> NaiveDate {
    week_start(date) + Duration::days(day.num_days_from_monday() as i64)
}

/// Parse an ISO date ("2025-10-01"), tolerating a trailing time component
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_times() {
        assert_eq!(time_to_minutes("00:00"), 0);
        assert_eq!(time_to_minutes("09:30"), 570);
        assert_eq!(time_to_minutes("23:59"), 1439);
        assert_eq!(time_to_minutes("9:05"), 545);
        assert_eq!(time_to_minutes("14:15:00"), 855);
    }

    #[test]
    fn malformed_times_fall_back_to_zero() {
        assert_eq!(time_to_minutes(""), 0);
        assert_eq!(time_to_minutes("noon"), 0);
        assert_eq!(time_to_minutes("12"), 0);
        assert_eq!(time_to_minutes("ab:cd"), 0);
    }

    #[test]
    fn oversized_hours_fall_back_to_zero() {
        assert_eq!(time_to_minutes("99999999:00"), 0);
        assert_eq!(time_to_minutes("71582788:59"), 0);
        assert_eq!(time_to_minutes("4294967295:00"), 0);
    }

    #[test]
    fn strict_parse_accepts_clock_times_only() {
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("9:05"), Some(545));
        assert_eq!(parse_hhmm(" 23:59 "), Some(1439));
        assert_eq!(parse_hhmm("14:15:00"), Some(855));

        for bad in ["", "10", "10:99", "25:00", "24:00", "99:00", "99999999:00", "10:5x", "-1:00", "+9:00", "010:00", "10:00:61", "10:00:00:00", ":30"] {
            assert_eq!(parse_hhmm(bad), None, "{bad}");
        }
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(minutes_to_time(0), "00:00");
        assert_eq!(minutes_to_time(545), "09:05");
        // Not clamped: values past midnight keep counting hours
        assert_eq!(minutes_to_time(25 * 60), "25:00");
    }

    #[test]
    fn every_well_formed_time_round_trips() {
        for h in 0..24 {
            for m in 0..60 {
                let s = format!("{:02}:{:02}", h, m);
                assert_eq!(minutes_to_time(time_to_minutes(&s)), s);
            }
        }
    }

    #[test]
    fn add_minutes_wraps_at_midnight() {
        assert_eq!(add_minutes_to_time("09:30", 60), "10:30");
        assert_eq!(add_minutes_to_time("23:30", 60), "00:30");
    }

    #[test]
    fn day_window_clamps_and_lists_slots() {
        let window = DayWindow::from_hours(8, 10);
        assert_eq!(window.clamp(7 * 60), 480);
        assert_eq!(window.clamp(11 * 60), 600);
        assert_eq!(window.clamp(540), 540);
        assert_eq!(window.hour_slots(), vec!["08:00", "09:00", "10:00"]);
        assert_eq!(
            window.half_hour_slots(),
            vec!["08:00", "08:30", "09:00", "09:30", "10:00"]
        );
    }

    #[test]
    fn day_window_never_inverts() {
        let window = DayWindow::from_hours(18, 6);
        assert_eq!(window.start, 18 * 60);
        assert_eq!(window.end, 19 * 60);

        let late = DayWindow::from_hours(23, 30);
        assert_eq!(late.end, MINUTES_PER_DAY);
    }

    #[test]
    fn weekday_names_parse_both_ways() {
        for day in TEACHING_DAYS {
            assert_eq!(parse_day_of_week(day_name(day)), Some(day));
        }
        assert_eq!(parse_day_of_week(" sunday "), Some(Weekday::Sun));
        assert_eq!(parse_day_of_week("Someday"), None);
        assert!(day_order("Monday") < day_order("Friday"));
        assert_eq!(day_order("???"), 7);
    }

    #[test]
    fn date_helpers() {
        let thu = NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
        assert_eq!(week_start(thu), NaiveDate::from_ymd_opt(2025, 10, 13).unwrap());
        assert_eq!(
            date_for_weekday(thu, Weekday::Fri),
            NaiveDate::from_ymd_opt(2025, 10, 17).unwrap()
        );
        assert_eq!(format_date_short(thu), "16.10.25");
        assert_eq!(parse_date("2025-10-01T00:00:00"), NaiveDate::from_ymd_opt(2025, 10, 1));
        assert_eq!(parse_date("not a date"), None);
    }
}
