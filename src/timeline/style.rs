use crate::models::DutyStatus;

/// Fixed color/emphasis mapping for a duty status. `fill` and `ring` are the
/// style tokens the rendering layer applies to a timeline segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStyle {
    pub fill: &'static str,
    pub ring: Option<&'static str>,
}

/// Unrecognized statuses get the neutral fill with no emphasis ring.
pub fn style_for(status: &DutyStatus) -> SegmentStyle {
    match status {
        DutyStatus::Drive => SegmentStyle {
            fill: "bg-red-600",
            ring: Some("ring-1 ring-red-700"),
        },
        DutyStatus::OffDuty => SegmentStyle {
            fill: "bg-green-600",
            ring: Some("ring-1 ring-green-700"),
        },
        DutyStatus::OnDuty => SegmentStyle {
            fill: "bg-yellow-400",
            ring: Some("ring-1 ring-yellow-600"),
        },
        DutyStatus::Other(_) => SegmentStyle {
            fill: "bg-gray-600",
            ring: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_gets_neutral_style() {
        let style = style_for(&DutyStatus::Other("yard_move".to_string()));
        assert_eq!(style.fill, "bg-gray-600");
        assert!(style.ring.is_none());
    }

    #[test]
    fn known_statuses_have_emphasis() {
        assert!(style_for(&DutyStatus::Drive).ring.is_some());
        assert!(style_for(&DutyStatus::OnDuty).ring.is_some());
        assert!(style_for(&DutyStatus::OffDuty).ring.is_some());
    }
}
