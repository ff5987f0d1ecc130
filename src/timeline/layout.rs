//! Converts one reporting day's duty events into positioned, proportioned
//! segments on a 24-hour axis.
//!
//! Geometry is expressed in percentages of the day width so the rendering
//! layer can place segments with plain CSS offsets. Events are laid out in
//! their given order with no overlap resolution: a later event at the same
//! horizontal position paints over an earlier one. Callers who want stacked
//! rendering instead opt into [`assign_lanes`].

use chrono::NaiveTime;

use crate::models::{DailyLog, DutyStatus};
use crate::utils::time::to_hms_string;

use super::style::{style_for, SegmentStyle};

pub const DAY_TOTAL_SECONDS: f64 = 24.0 * 3600.0;

/// Floor width so zero-duration events stay visible and clickable.
pub const MIN_SEGMENT_WIDTH_PCT: f64 = 0.5;

/// One positioned timeline segment.
#[derive(Debug, Clone)]
pub struct DaySegment {
    pub status: DutyStatus,
    pub style: SegmentStyle,
    /// Percent offset from the left edge of the 24-hour axis.
    pub left_pct: f64,
    /// Percent of the axis width.
    pub width_pct: f64,
    /// Seconds from the day's midnight to the event start.
    pub start_seconds: f64,
    pub duration_seconds: f64,
    pub remark: Option<String>,
    /// `STATUS • duration • start: offset [• remark]`.
    pub tooltip: String,
}

/// A fully laid-out reporting day.
#[derive(Debug, Clone)]
pub struct DayLayout {
    /// Formatted day start, or the raw wire string when it fails to parse.
    pub start_label: String,
    pub segments: Vec<DaySegment>,
    pub total_driving: f64,
    pub total_on_duty: f64,
    pub total_off_duty: f64,
}

/// Percent offset for an event starting `event_start_seconds` after the
/// day's midnight, clamped at the left edge.
pub fn left_pct(event_start_seconds: f64) -> f64 {
    (event_start_seconds / DAY_TOTAL_SECONDS * 100.0).max(0.0)
}

/// Percent width for a duration, never below the visibility floor.
pub fn width_pct(duration_seconds: f64) -> f64 {
    (duration_seconds / DAY_TOTAL_SECONDS * 100.0).max(MIN_SEGMENT_WIDTH_PCT)
}

/// Lays out one day. Event offsets in the log are relative to the day's
/// start timestamp, so each event is shifted by the start's distance from
/// UTC midnight before positioning. Totals are passed through as received;
/// see [`validate_totals`] for the opt-in cross-check.
pub fn layout_day(log: &DailyLog) -> DayLayout {
    let start = log.start();

    let offset_from_midnight = start
        .map(|t| {
            let midnight = t.date_naive().and_time(NaiveTime::MIN).and_utc();
            (t - midnight).num_milliseconds() as f64 / 1000.0
        })
        .unwrap_or(0.0);

    let start_label = match start {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => log.start_time.clone(),
    };

    let segments = log
        .log_events
        .iter()
        .map(|event| {
            let start_seconds = offset_from_midnight + event.time_from_start_seconds;
            let mut tooltip = format!(
                "{} • {} • start: {}",
                event.status.display_label(),
                to_hms_string(event.duration_seconds),
                to_hms_string(event.time_from_start_seconds),
            );
            if let Some(remark) = &event.remark {
                tooltip.push_str(" • ");
                tooltip.push_str(remark);
            }

            DaySegment {
                status: event.status.clone(),
                style: style_for(&event.status),
                left_pct: left_pct(start_seconds),
                width_pct: width_pct(event.duration_seconds),
                start_seconds,
                duration_seconds: event.duration_seconds,
                remark: event.remark.clone(),
                tooltip,
            }
        })
        .collect();

    DayLayout {
        start_label,
        segments,
        total_driving: log.total_driving,
        total_on_duty: log.total_on_duty,
        total_off_duty: log.total_off_duty,
    }
}

/// Positions of the 25 vertical ruler lines (0h through 24h inclusive), in
/// percent of the axis width.
pub fn ruler_marks() -> Vec<f64> {
    (0..=24).map(|i| f64::from(i) / 24.0 * 100.0).collect()
}

/// Position and hour value for each of the 24 hour labels.
pub fn hour_label_marks() -> Vec<(f64, u8)> {
    (0..24u8)
        .map(|i| (f64::from(i) / 24.0 * 100.0, i))
        .collect()
}

/// Optional overlap avoidance: greedily assigns each segment to the first
/// lane whose previous segment has ended. Returns one lane index per
/// segment, in input order. The default rendering ignores lanes and keeps
/// the original overlapping behavior.
pub fn assign_lanes(segments: &[DaySegment]) -> Vec<usize> {
    const EPS: f64 = 1e-9;
    let mut lane_ends: Vec<f64> = Vec::new();
    let mut lanes = Vec::with_capacity(segments.len());

    for segment in segments {
        let start = segment.left_pct;
        let end = segment.left_pct + segment.width_pct;

        let mut assigned = None;
        for (lane, lane_end) in lane_ends.iter_mut().enumerate() {
            if start + EPS >= *lane_end {
                *lane_end = end;
                assigned = Some(lane);
                break;
            }
        }

        let lane = assigned.unwrap_or_else(|| {
            lane_ends.push(end);
            lane_ends.len() - 1
        });
        lanes.push(lane);
    }

    lanes
}

/// Reported-vs-computed drift for one duty status.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsDrift {
    pub status: DutyStatus,
    pub reported: f64,
    pub computed: f64,
}

/// Opt-in cross-check of the day's aggregate totals against its event list.
/// The layout itself always trusts the reported totals; this only reports
/// where they disagree by more than `tolerance_seconds`.
pub fn validate_totals(log: &DailyLog, tolerance_seconds: f64) -> Vec<TotalsDrift> {
    let mut driving = 0.0;
    let mut on_duty = 0.0;
    let mut off_duty = 0.0;
    for event in &log.log_events {
        match event.status {
            DutyStatus::Drive => driving += event.duration_seconds,
            DutyStatus::OnDuty => on_duty += event.duration_seconds,
            DutyStatus::OffDuty => off_duty += event.duration_seconds,
            DutyStatus::Other(_) => {}
        }
    }

    let mut drift = Vec::new();
    for (status, reported, computed) in [
        (DutyStatus::Drive, log.total_driving, driving),
        (DutyStatus::OnDuty, log.total_on_duty, on_duty),
        (DutyStatus::OffDuty, log.total_off_duty, off_duty),
    ] {
        if (reported - computed).abs() > tolerance_seconds {
            drift.push(TotalsDrift {
                status,
                reported,
                computed,
            });
        }
    }
    drift
}
