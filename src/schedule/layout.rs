//! Side-by-side layout of overlapping entries within one day column

use crate::api::time::DayWindow;
use crate::api::ScheduleEntry;

/// Anything with a start and end in minutes since midnight
pub trait TimeSpan {
    fn start_minute(&self) -> u32;
    fn end_minute(&self) -> u32;
}

impl TimeSpan for ScheduleEntry {
    fn start_minute(&self) -> u32 {
        self.start_minutes()
    }

    fn end_minute(&self) -> u32 {
        self.end_minutes()
    }
}

impl<T: TimeSpan + ?Sized> TimeSpan for &T {
    fn start_minute(&self) -> u32 {
        (**self).start_minute()
    }

    fn end_minute(&self) -> u32 {
        (**self).end_minute()
    }
}

impl TimeSpan for (u32, u32) {
    fn start_minute(&self) -> u32 {
        self.0
    }

    fn end_minute(&self) -> u32 {
        self.1
    }
}

/// Where one entry goes inside its day column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position of the entry in the input slice
    pub index: usize,
    pub lane: usize,
    /// Lanes in use across everything overlapping this entry
    pub lane_count: usize,
    pub start: u32,
    /// Exclusive; always greater than `start`
    pub end: u32,
}

impl Placement {
    fn overlaps(&self, other: &Placement) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn width_fraction(&self) -> f32 {
        1.0 / self.lane_count.max(1) as f32
    }

    pub fn left_fraction(&self) -> f32 {
        self.lane as f32 * self.width_fraction()
    }

    /// Top and bottom as fractions of the visible window, or `None` when the
    /// entry lies entirely outside it
    pub fn vertical_span(&self, window: &DayWindow) -> Option<(f32, f32)> {
        if self.end <= window.start || self.start >= window.end {
            return None;
        }
        let len = window.len().max(1) as f32;
        let top = (window.clamp(self.start) - window.start) as f32 / len;
        let bottom = (window.clamp(self.end) - window.start) as f32 / len;
        Some((top, bottom))
    }
}

/// Greedy lane packing. Entries are taken by start time (ties by end time) and
/// each lands in the first lane that is free at its start. Touching entries
/// may share a lane. An entry ending at or before its start is treated as a
/// one-minute event.
///
/// Results come back in input order.
pub fn assign_lanes<T: TimeSpan>(items: &[T]) -> Vec<Placement> {
    let mut placements: Vec<Placement> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let start = item.start_minute();
            let end = item.end_minute().max(start + 1);
            Placement {
                index,
                lane: 0,
                lane_count: 1,
                start,
                end,
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..placements.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (&placements[a], &placements[b]);
        pa.start.cmp(&pb.start).then_with(|| pa.end.cmp(&pb.end))
    });

    let mut lane_ends: Vec<u32> = Vec::new();
    for &i in &order {
        let p = &mut placements[i];
        let lane = lane_ends
            .iter()
            .position(|&lane_end| lane_end <= p.start)
            .unwrap_or_else(|| {
                lane_ends.push(p.start);
                lane_ends.len() - 1
            });
        lane_ends[lane] = p.end;
        p.lane = lane;
    }

    let lane_counts: Vec<usize> = placements
        .iter()
        .map(|p| {
            placements
                .iter()
                .filter(|other| p.overlaps(other))
                .map(|other| other.lane)
                .max()
                .unwrap_or(p.lane)
                + 1
        })
        .collect();
    for (p, count) in placements.iter_mut().zip(lane_counts) {
        p.lane_count = count;
    }

    placements
}

/// Lanes needed for the whole set: the peak number of simultaneous entries
pub fn lanes_used(placements: &[Placement]) -> usize {
    placements.iter().map(|p| p.lane + 1).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::time::time_to_minutes;

    fn span(start: &str, end: &str) -> (u32, u32) {
        (time_to_minutes(start), time_to_minutes(end))
    }

    #[test]
    fn three_way_overlap_uses_three_lanes() {
        let entries = [
            span("09:00", "10:00"),
            span("09:30", "10:30"),
            span("09:45", "11:00"),
        ];
        let placements = assign_lanes(&entries);
        assert_eq!(lanes_used(&placements), 3);
        let lanes: Vec<usize> = placements.iter().map(|p| p.lane).collect();
        assert_eq!(lanes, vec![0, 1, 2]);
        assert!(placements.iter().all(|p| p.lane_count == 3));
    }

    #[test]
    fn touching_entries_share_lane_zero() {
        let placements = assign_lanes(&[span("09:00", "10:00"), span("10:00", "11:00")]);
        assert_eq!(placements[0].lane, 0);
        assert_eq!(placements[1].lane, 0);
        assert_eq!(placements[0].lane_count, 1);
        assert_eq!(placements[1].width_fraction(), 1.0);
    }

    #[test]
    fn results_follow_input_order() {
        let placements = assign_lanes(&[span("11:00", "12:00"), span("08:00", "09:00")]);
        assert_eq!(placements[0].index, 0);
        assert_eq!(placements[0].start, 660);
        assert_eq!(placements[1].start, 480);
    }

    #[test]
    fn no_lane_holds_overlapping_entries() {
        let entries = [
            span("08:00", "09:30"),
            span("08:15", "08:45"),
            span("08:45", "10:00"),
            span("09:00", "09:15"),
            span("09:10", "12:00"),
            span("09:30", "10:30"),
            span("11:00", "11:30"),
            span("08:30", "08:31"),
        ];
        let placements = assign_lanes(&entries);
        for a in &placements {
            for b in &placements {
                if a.index != b.index && a.lane == b.lane {
                    assert!(!a.overlaps(b), "{:?} and {:?} collide", a, b);
                }
            }
        }
    }

    #[test]
    fn lanes_used_equals_peak_concurrency() {
        let entries = [
            span("08:00", "12:00"),
            span("08:30", "09:00"),
            span("09:00", "09:30"),
            span("09:15", "10:00"),
            span("09:20", "09:40"),
        ];
        let placements = assign_lanes(&entries);
        // 09:20-09:30: the long block, 09:00-09:30, 09:15-10:00, 09:20-09:40
        assert_eq!(lanes_used(&placements), 4);
    }

    #[test]
    fn separate_clusters_keep_their_own_lane_counts() {
        let entries = [
            span("08:00", "09:00"),
            span("08:30", "09:30"),
            span("13:00", "14:00"),
        ];
        let placements = assign_lanes(&entries);
        assert_eq!(placements[0].lane_count, 2);
        assert_eq!(placements[1].lane_count, 2);
        assert_eq!(placements[2].lane_count, 1);
        assert_eq!(placements[1].left_fraction(), 0.5);
    }

    #[test]
    fn degenerate_entries_get_a_lane_of_their_own() {
        let placements = assign_lanes(&[span("09:00", "10:00"), span("09:00", "09:00")]);
        let zero = placements[1];
        assert_eq!(zero.end, zero.start + 1);
        assert_ne!(zero.lane, placements[0].lane);

        let inverted = assign_lanes(&[span("10:00", "09:00")]);
        assert_eq!(inverted[0].end, 601);
        assert_eq!(inverted[0].lane_count, 1);
    }

    #[test]
    fn vertical_span_is_clamped_to_the_window() {
        let window = DayWindow::from_hours(8, 20);
        let placements = assign_lanes(&[
            span("07:00", "09:00"),
            span("14:00", "15:00"),
            span("06:00", "07:30"),
        ]);
        let (top, bottom) = placements[0].vertical_span(&window).unwrap();
        assert_eq!(top, 0.0);
        assert!((bottom - 60.0 / 720.0).abs() < 1e-6);
        let (top, _) = placements[1].vertical_span(&window).unwrap();
        assert!((top - 0.5).abs() < 1e-6);
        assert!(placements[2].vertical_span(&window).is_none());
    }

    #[test]
    fn empty_day() {
        let placements = assign_lanes::<(u32, u32)>(&[]);
        assert!(placements.is_empty());
        assert_eq!(lanes_used(&placements), 0);
    }
}
