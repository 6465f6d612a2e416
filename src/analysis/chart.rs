//! Two-slice donut chart spec derived from the matched percentage

use serde::{Deserialize, Serialize};

pub const MATCHED_COLOR: &str = "#2E8B57";
pub const GAP_COLOR: &str = "#FF6B6B";

/// Declarative proportion chart for whatever front-end renders the report:
/// matched share vs. gap, with the percentage repeated in the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub labels: [String; 2],
    pub values: [u8; 2],
    pub colors: [String; 2],
    pub hole: f32,
    pub title: String,
    pub center_label: String,
}

impl ChartSpec {
    /// No chart for an absent or zero percentage; callers must tolerate that.
    pub fn from_percentage(percentage: Option<u8>) -> Option<Self> {
        let p = percentage?;
        if p == 0 {
            return None;
        }

        Some(Self {
            labels: ["Matched Skills".to_string(), "Skills Gap".to_string()],
            values: [p, 100 - p],
            colors: [MATCHED_COLOR.to_string(), GAP_COLOR.to_string()],
            hole: 0.4,
            title: format!("Resume Match Analysis: {}%", p),
            center_label: format!("{}%", p),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_split_match_and_gap() {
        let chart = ChartSpec::from_percentage(Some(82)).unwrap();
        assert_eq!(chart.values, [82, 18]);
        assert_eq!(chart.labels[0], "Matched Skills");
        assert_eq!(chart.labels[1], "Skills Gap");
        assert_eq!(chart.center_label, "82%");
        assert_eq!(chart.title, "Resume Match Analysis: 82%");
    }

    #[test]
    fn test_full_match_has_empty_gap() {
        let chart = ChartSpec::from_percentage(Some(100)).unwrap();
        assert_eq!(chart.values, [100, 0]);
    }

    #[test]
    fn test_zero_or_absent_yields_no_chart() {
        assert_eq!(ChartSpec::from_percentage(Some(0)), None);
        assert_eq!(ChartSpec::from_percentage(None), None);
    }
}
