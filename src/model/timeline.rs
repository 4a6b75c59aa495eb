use chrono::NaiveDate;

use super::task::Task;

const MIN_PIXELS_PER_DAY: f32 = 2.0;
const MAX_PIXELS_PER_DAY: f32 = 80.0;
const ZOOM_STEP: f32 = 1.2;

/// Controls what scale the timeline header displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

/// Maps dates onto the horizontal axis of the chart.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date.
    pub end: NaiveDate,
    pub scale: TimelineScale,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            scale: TimelineScale::Weeks,
            pixels_per_day: 18.0,
        }
    }

    /// A viewport spanning `tasks` with a week of margin before and a month after.
    pub fn fit_to(tasks: &[Task], fallback: NaiveDate) -> Self {
        let start = tasks.iter().map(|t| t.start).min().unwrap_or(fallback);
        let end = tasks.iter().map(|t| t.end).max().unwrap_or(fallback);
        Self::new(
            start - chrono::Duration::days(7),
            end + chrono::Duration::days(30),
        )
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start).num_days() as f32;
        days * self.pixels_per_day
    }

    /// Convert an x-pixel offset back to a date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        let days = (x / self.pixels_per_day).round() as i64;
        self.start + chrono::Duration::days(days)
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end)
    }

    /// Zoom in. Returns `true` if the scale actually changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_pixels_per_day(self.pixels_per_day * ZOOM_STEP)
    }

    /// Zoom out. Returns `true` if the scale actually changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_pixels_per_day(self.pixels_per_day / ZOOM_STEP)
    }

    fn set_pixels_per_day(&mut self, value: f32) -> bool {
        let clamped = value.clamp(MIN_PIXELS_PER_DAY, MAX_PIXELS_PER_DAY);
        let changed = clamped != self.pixels_per_day;
        self.pixels_per_day = clamped;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[test]
    fn dates_round_trip_through_pixels() {
        let viewport = TimelineViewport::new(day(1), day(28));
        let x = viewport.date_to_x(day(11));
        assert_eq!(x, 180.0);
        assert_eq!(viewport.x_to_date(x + 4.0), day(11));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = TimelineViewport::new(day(1), day(28));
        while viewport.zoom_in() {}
        assert_eq!(viewport.pixels_per_day, MAX_PIXELS_PER_DAY);
        assert!(!viewport.zoom_in());
        assert!(viewport.zoom_out());
    }

    #[test]
    fn fit_adds_margins() {
        let task = Task::new("A", day(10), day(12));
        let viewport = TimelineViewport::fit_to(&[task], day(1));
        assert_eq!(viewport.start, day(3));
        assert_eq!(viewport.end, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }
}
