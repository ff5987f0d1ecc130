mod layout;
mod style;

pub use layout::{
    assign_lanes, hour_label_marks, layout_day, left_pct, ruler_marks, validate_totals,
    width_pct, DayLayout, DaySegment, TotalsDrift, DAY_TOTAL_SECONDS, MIN_SEGMENT_WIDTH_PCT,
};
pub use style::{style_for, SegmentStyle};
