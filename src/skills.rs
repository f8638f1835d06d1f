pub const FILL_ATTRIBUTE: &str = "data-fill";

/// Parses a bar's `data-fill` value. Non-numeric values use `default`; numbers are clamped to 0..=100.
pub fn parse_fill_percent(raw: Option<&str>, default: u8) -> u8 {
    raw.map(str::trim)
        .map(|value| value.trim_end_matches('%'))
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(default)
}

pub fn fill_style(percent: u8) -> String {
    format!("width: {percent}%;")
}

/// Tracks a single bar so its fill is applied on the first intersection only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkillBar {
    fill: Option<u8>,
}

impl SkillBar {
    #[cfg(test)]
    pub fn fill(&self) -> Option<u8> {
        self.fill
    }

    /// Returns the width to apply, once; the caller stops observing when this is `Some`.
    pub fn on_intersection(&mut self, is_intersecting: bool, percent: u8) -> Option<u8> {
        if !is_intersecting || self.fill.is_some() {
            return None;
        }

        self.fill = Some(percent);
        self.fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_invalid_fill_uses_default() {
        assert_eq!(parse_fill_percent(None, 60), 60);
        assert_eq!(parse_fill_percent(Some(""), 60), 60);
        assert_eq!(parse_fill_percent(Some("lots"), 60), 60);
    }

    #[test]
    fn fill_values_are_clamped() {
        assert_eq!(parse_fill_percent(Some("85"), 60), 85);
        assert_eq!(parse_fill_percent(Some(" 72% "), 60), 72);
        assert_eq!(parse_fill_percent(Some("140"), 60), 100);
        assert_eq!(parse_fill_percent(Some("-5"), 60), 0);
    }

    #[test]
    fn fill_applies_only_after_first_intersection() {
        let mut bar = SkillBar::default();

        assert_eq!(bar.on_intersection(false, 80), None);
        assert_eq!(bar.fill(), None);
        assert_eq!(bar.on_intersection(true, 80), Some(80));
        assert_eq!(bar.on_intersection(true, 80), None);
        assert_eq!(bar.on_intersection(false, 80), None);
        assert_eq!(bar.fill(), Some(80));
    }

    #[test]
    fn style_sets_width() {
        assert_eq!(fill_style(60), "width: 60%;");
    }
}
