//! The minute-range model backing the dual-handle time slider.
//!
//! Everything here is pure arithmetic on minutes since local midnight, so
//! the drag behavior is testable without a browser. The wasm controller
//! owns a [`RangeState`] plus one [`RowOffsets`] per result row and derives
//! every display value from them; the server is only consulted on commit.

use jiff::civil::Date;

pub const MINUTES_PER_DAY: i32 = 1440;
pub const MAX_MINUTES: i32 = 1439;

/// Slider snapping granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Snap {
    #[default]
    Minute,
    Five,
    Quarter,
}

impl Snap {
    pub fn step(self) -> i32 {
        match self {
            Snap::Minute => 1,
            Snap::Five => 5,
            Snap::Quarter => 15,
        }
    }

    /// Round to the nearest step and clamp into `[0, MAX_MINUTES]`.
    pub fn apply(self, minutes: f64) -> i32 {
        let step = self.step() as f64;
        let snapped = (minutes / step).round() * step;
        (snapped as i32).clamp(0, MAX_MINUTES)
    }
}

/// Map a pointer position expressed as a fraction of the track width to a
/// snapped minute value.
pub fn minutes_at_fraction(fraction: f64, snap: Snap) -> i32 {
    snap.apply(fraction.clamp(0.0, 1.0) * MINUTES_PER_DAY as f64)
}

/// Convert a pointer displacement into a snapped minute delta. Unlike
/// [`minutes_at_fraction`] the result is signed and unclamped; range-shift
/// clamping happens in [`RangeState::shifted`].
pub fn delta_at_displacement(dx: f64, track_width: f64, snap: Snap) -> i32 {
    if track_width <= 0.0 {
        return 0;
    }
    let raw = dx / track_width * MINUTES_PER_DAY as f64;
    let step = snap.step() as f64;
    ((raw / step).round() * step) as i32
}

/// The primary slider's endpoints, in minutes since local midnight.
///
/// The pair is allowed to invert mid-drag (dragging one thumb past the
/// other); [`RangeState::normalized`] restores order before anything is
/// displayed or committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeState {
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl RangeState {
    pub fn new(start_minutes: i32, end_minutes: i32) -> Self {
        Self {
            start_minutes: start_minutes.clamp(0, MAX_MINUTES),
            end_minutes: end_minutes.clamp(0, MAX_MINUTES),
        }
    }

    pub fn span(&self) -> i32 {
        self.end_minutes - self.start_minutes
    }

    /// Auto-swap so `start <= end`.
    pub fn normalized(self) -> Self {
        if self.start_minutes > self.end_minutes {
            Self {
                start_minutes: self.end_minutes,
                end_minutes: self.start_minutes,
            }
        } else {
            self
        }
    }

    /// Shift the whole range captured at drag start by `delta_minutes`.
    ///
    /// When the shift would push an endpoint outside `[0, MAX_MINUTES]`,
    /// the near boundary clamps and the far endpoint is recomputed so the
    /// span length is preserved exactly.
    pub fn shifted(origin: RangeState, delta_minutes: i32) -> RangeState {
        let span = origin.span();
        let mut start = origin.start_minutes + delta_minutes;
        let mut end = origin.end_minutes + delta_minutes;
        if start < 0 {
            start = 0;
            end = span;
        } else if end > MAX_MINUTES {
            end = MAX_MINUTES;
            start = MAX_MINUTES - span;
        }
        RangeState {
            start_minutes: start,
            end_minutes: end,
        }
    }

    pub fn start_percent(&self) -> f64 {
        self.start_minutes as f64 / MINUTES_PER_DAY as f64 * 100.0
    }

    pub fn end_percent(&self) -> f64 {
        self.end_minutes as f64 / MINUTES_PER_DAY as f64 * 100.0
    }
}

/// What a drag gesture is moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    Start,
    End,
    /// Whole-range drag; carries the pointer origin and the pre-drag
    /// endpoints so the span survives clamping.
    Range {
        origin_x: f64,
        origin: RangeState,
    },
}

/// Wrap a minute total into `[0, 1440)` plus the number of whole days
/// carried over. Negative totals wrap backwards.
pub fn normalize_minutes(total: i32) -> (i32, i32) {
    (
        total.rem_euclid(MINUTES_PER_DAY),
        total.div_euclid(MINUTES_PER_DAY),
    )
}

pub fn minutes_to_hhmm(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Strict `HH:mm` parsing for direct time-field edits. Anything else is
/// rejected so the controller can revert the field.
pub fn parse_hhmm(value: &str) -> Option<i32> {
    let (hours, minutes) = value.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    // digits only; i32::from_str would also accept a leading sign
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// A contiguous portion of the gradient bar to reveal, in percent of the
/// track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSegment {
    pub from_percent: f64,
    pub to_percent: f64,
}

/// Reveal geometry for a row's visual bar. When the effective range wraps
/// past midnight (`start > end`), the reveal splits into `[0, end]` and
/// `[start, 100]`.
pub fn reveal_segments(
    start_percent: f64,
    end_percent: f64,
) -> Vec<RevealSegment> {
    let start = start_percent.clamp(0.0, 100.0);
    let end = end_percent.clamp(0.0, 100.0);
    if start <= end {
        vec![RevealSegment {
            from_percent: start,
            to_percent: end,
        }]
    } else {
        vec![
            RevealSegment {
                from_percent: 0.0,
                to_percent: end,
            },
            RevealSegment {
                from_percent: start,
                to_percent: 100.0,
            },
        ]
    }
}

/// Per-row linear offsets captured when the results region is rendered.
///
/// They relate the primary slider's minutes to this row's minutes, letting
/// the controller recompute every row display during a drag without calling
/// the server. The relationship is only exact while no row crosses a DST
/// transition between render and commit; the next commit re-captures.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOffsets {
    pub start_offset: i32,
    pub end_offset: i32,
    pub base_day_diff: i32,
    pub base_local_date: Option<Date>,
}

impl RowOffsets {
    /// Capture offsets from a rendered row against the slider reference.
    ///
    /// A row whose end-of-range wraps past midnight relative to its start
    /// gets `+1440` folded into the end offset, keeping the arithmetic
    /// linear across the boundary.
    pub fn capture(
        row_start_minutes: i32,
        row_end_minutes: i32,
        base_day_diff: i32,
        base_local_date: Option<Date>,
        reference: RangeState,
    ) -> Self {
        let end_day_bump = if row_end_minutes < row_start_minutes {
            MINUTES_PER_DAY
        } else {
            0
        };
        Self {
            start_offset: row_start_minutes - reference.start_minutes,
            end_offset: row_end_minutes - reference.end_minutes + end_day_bump,
            base_day_diff,
            base_local_date,
        }
    }

    /// Derive the row's live display values from the slider's current
    /// (normalized) minutes.
    pub fn display(&self, range: RangeState) -> RowDisplay {
        let (start_minutes, start_day_offset) =
            normalize_minutes(range.start_minutes + self.start_offset);
        let (end_minutes, _) =
            normalize_minutes(range.end_minutes + self.end_offset);
        let local_date = self.base_local_date.and_then(|date| {
            date.checked_add(jiff::Span::new().days(start_day_offset as i64))
                .ok()
        });
        RowDisplay {
            start_minutes,
            end_minutes,
            day_diff: self.base_day_diff + start_day_offset,
            local_date,
        }
    }
}

/// Live display values for one result row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDisplay {
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub day_diff: i32,
    pub local_date: Option<Date>,
}

impl RowDisplay {
    pub fn start_percent(&self) -> f64 {
        self.start_minutes as f64 / MINUTES_PER_DAY as f64 * 100.0
    }

    pub fn end_percent(&self) -> f64 {
        self.end_minutes as f64 / MINUTES_PER_DAY as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn snap_rounds_and_clamps() {
        assert_eq!(Snap::Minute.apply(601.4), 601);
        assert_eq!(Snap::Five.apply(601.4), 600);
        assert_eq!(Snap::Quarter.apply(610.0), 615);
        assert_eq!(Snap::Minute.apply(2000.0), MAX_MINUTES);
        assert_eq!(Snap::Minute.apply(-5.0), 0);
    }

    #[test]
    fn fraction_maps_proportionally() {
        assert_eq!(minutes_at_fraction(0.0, Snap::Minute), 0);
        assert_eq!(minutes_at_fraction(0.5, Snap::Minute), 720);
        // full-width drag clamps to the last representable minute
        assert_eq!(minutes_at_fraction(1.0, Snap::Minute), MAX_MINUTES);
        assert_eq!(minutes_at_fraction(1.5, Snap::Minute), MAX_MINUTES);
    }

    #[test]
    fn displacement_delta_is_signed_and_snapped() {
        // half the track is 720 minutes
        assert_eq!(delta_at_displacement(360.0, 720.0, Snap::Minute), 720);
        assert_eq!(delta_at_displacement(-360.0, 720.0, Snap::Minute), -720);
        assert_eq!(delta_at_displacement(1.0, 720.0, Snap::Five), 0);
        assert_eq!(delta_at_displacement(0.0, 0.0, Snap::Minute), 0);
    }

    #[test]
    fn normalized_swaps_inverted_range() {
        let range = RangeState::new(600, 480).normalized();
        assert_eq!(range.start_minutes, 480);
        assert_eq!(range.end_minutes, 600);
        // already ordered ranges are untouched
        assert_eq!(RangeState::new(480, 600).normalized(), range);
    }

    #[test]
    fn shift_preserves_span_at_lower_clamp() {
        let origin = RangeState::new(60, 180);
        let shifted = RangeState::shifted(origin, -120);
        assert_eq!(shifted.start_minutes, 0);
        assert_eq!(shifted.end_minutes, 120);
        assert_eq!(shifted.span(), origin.span());
    }

    #[test]
    fn shift_preserves_span_at_upper_clamp() {
        let origin = RangeState::new(1200, 1320);
        let shifted = RangeState::shifted(origin, 300);
        assert_eq!(shifted.end_minutes, MAX_MINUTES);
        assert_eq!(shifted.start_minutes, MAX_MINUTES - 120);
        assert_eq!(shifted.span(), 120);
    }

    #[test]
    fn shift_without_clamp_moves_both_endpoints() {
        let shifted = RangeState::shifted(RangeState::new(480, 600), 30);
        assert_eq!(shifted.start_minutes, 510);
        assert_eq!(shifted.end_minutes, 630);
    }

    #[test]
    fn normalize_minutes_wraps_both_directions() {
        assert_eq!(normalize_minutes(0), (0, 0));
        assert_eq!(normalize_minutes(1500), (60, 1));
        assert_eq!(normalize_minutes(-60), (1380, -1));
        assert_eq!(normalize_minutes(2880), (0, 2));
    }

    #[test]
    fn hhmm_round_trip() {
        assert_eq!(minutes_to_hhmm(0), "00:00");
        assert_eq!(minutes_to_hhmm(545), "09:05");
        assert_eq!(parse_hhmm("09:05"), Some(545));
        assert_eq!(parse_hhmm("23:59"), Some(MAX_MINUTES));
    }

    #[test]
    fn hhmm_rejects_malformed_input() {
        for bad in [
            "24:00", "12:60", "9:00", "12:5", "noon", "", "12-30",
            // signed components must not sneak through integer parsing
            "-1:30", "+1:30", "1-:30", "12:+5",
        ] {
            assert_eq!(parse_hhmm(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn reveal_is_single_segment_when_ordered() {
        let segments = reveal_segments(25.0, 75.0);
        assert_eq!(
            segments,
            vec![RevealSegment {
                from_percent: 25.0,
                to_percent: 75.0
            }]
        );
    }

    #[test]
    fn reveal_splits_across_midnight() {
        let segments = reveal_segments(90.0, 10.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].from_percent, 0.0);
        assert_eq!(segments[0].to_percent, 10.0);
        assert_eq!(segments[1].from_percent, 90.0);
        assert_eq!(segments[1].to_percent, 100.0);
    }

    #[test]
    fn row_offsets_follow_the_slider() {
        // Tokyo 09:00-17:00 base, New York row at 20:00-04:00 the previous
        // day; the end wraps midnight so it gets the +1440 bump.
        let reference = RangeState::new(540, 1020);
        let offsets = RowOffsets::capture(
            1200,
            240,
            -1,
            Some(date(2024, 5, 31)),
            reference,
        );
        assert_eq!(offsets.start_offset, 660);
        assert_eq!(offsets.end_offset, 240 - 1020 + MINUTES_PER_DAY);

        // unchanged slider reproduces the rendered row
        let display = offsets.display(reference);
        assert_eq!(display.start_minutes, 1200);
        assert_eq!(display.end_minutes, 240);
        assert_eq!(display.day_diff, -1);
        assert_eq!(display.local_date, Some(date(2024, 5, 31)));

        // dragging the start past midnight advances the row's date and
        // day-diff together
        let display = offsets.display(RangeState::new(900, 1020));
        assert_eq!(display.start_minutes, 120);
        assert_eq!(display.day_diff, 0);
        assert_eq!(display.local_date, Some(date(2024, 6, 1)));
    }

    #[test]
    fn row_display_percentages() {
        let display = RowDisplay {
            start_minutes: 360,
            end_minutes: 1080,
            day_diff: 0,
            local_date: None,
        };
        assert!((display.start_percent() - 25.0).abs() < f64::EPSILON);
        assert!((display.end_percent() - 75.0).abs() < f64::EPSILON);
    }
}
