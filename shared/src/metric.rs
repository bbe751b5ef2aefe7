use serde::{Deserialize, Serialize};

use crate::entity::Summary;

pub const PER_MILLION: f64 = 1_000_000.0;

/// Which summary field a map tab reads, and which scale pair applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricSelector {
    Confirmed,
    Death,
    DaysToDouble,
}

impl MetricSelector {
    pub const ALL: [MetricSelector; 3] = [
        MetricSelector::Confirmed,
        MetricSelector::Death,
        MetricSelector::DaysToDouble,
    ];

    /// Value used in the `detailed` URL query parameter.
    pub const fn as_param(self) -> &'static str {
        match self {
            MetricSelector::Confirmed => "confirmed",
            MetricSelector::Death => "death",
            MetricSelector::DaysToDouble => "daysToDouble",
        }
    }

    /// Parse a query-parameter value. Absent or unrecognized values fall
    /// back to the default tab rather than failing.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("confirmed") => MetricSelector::Confirmed,
            Some("death") => MetricSelector::Death,
            Some("daysToDouble") => MetricSelector::DaysToDouble,
            _ => MetricSelector::Confirmed,
        }
    }

    /// Tab button label.
    pub const fn label(self) -> &'static str {
        match self {
            MetricSelector::Confirmed => "Confirmed",
            MetricSelector::Death => "Death",
            MetricSelector::DaysToDouble => "Days to Double",
        }
    }

    /// Raw metric value from a summary. Zero and absent fields are both
    /// "no data".
    pub fn raw(self, summary: &Summary) -> Option<f64> {
        let value = match self {
            MetricSelector::Confirmed => summary.confirmed as f64,
            MetricSelector::Death => summary.deaths as f64,
            MetricSelector::DaysToDouble => summary.days_to_double,
        };
        (value > 0.0).then_some(value)
    }
}

/// Metric extraction: summary field, optionally normalized per million
/// population. A zero population makes the per-capita figure undefined, so
/// it degrades to "no data" instead of dividing.
pub fn extract(
    summary: &Summary,
    population: u64,
    selector: MetricSelector,
    per_capita: bool,
) -> Option<f64> {
    let raw = selector.raw(summary)?;
    if !per_capita {
        return Some(raw);
    }
    if population == 0 {
        return None;
    }
    Some(raw / population as f64 * PER_MILLION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(confirmed: u64, deaths: u64, days: f64) -> Summary {
        Summary {
            confirmed,
            deaths,
            days_to_double: days,
        }
    }

    #[test]
    fn extract_reads_selected_field() {
        let s = summary(500, 20, 3.5);
        assert_eq!(
            extract(&s, 1_000_000, MetricSelector::Confirmed, false),
            Some(500.0)
        );
        assert_eq!(
            extract(&s, 1_000_000, MetricSelector::Death, false),
            Some(20.0)
        );
        assert_eq!(
            extract(&s, 1_000_000, MetricSelector::DaysToDouble, false),
            Some(3.5)
        );
    }

    #[test]
    fn extract_normalizes_per_million() {
        let s = summary(500, 0, 0.0);
        assert_eq!(
            extract(&s, 1_000_000, MetricSelector::Confirmed, true),
            Some(500.0)
        );
        assert_eq!(
            extract(&s, 2_000_000, MetricSelector::Confirmed, true),
            Some(250.0)
        );
    }

    #[test]
    fn zero_field_is_no_data() {
        let s = summary(100, 0, 0.0);
        assert_eq!(extract(&s, 1_000_000, MetricSelector::Death, false), None);
        assert_eq!(extract(&s, 1_000_000, MetricSelector::Death, true), None);
    }

    #[test]
    fn zero_population_never_divides() {
        let s = summary(100, 5, 0.0);
        let value = extract(&s, 0, MetricSelector::Confirmed, true);
        assert_eq!(value, None);
        // Absolute values are still fine with a zero population.
        assert_eq!(
            extract(&s, 0, MetricSelector::Confirmed, false),
            Some(100.0)
        );
    }

    #[test]
    fn param_roundtrip() {
        for selector in MetricSelector::ALL {
            assert_eq!(
                MetricSelector::from_param(Some(selector.as_param())),
                selector
            );
        }
    }

    #[test]
    fn unknown_or_absent_param_defaults_to_confirmed() {
        assert_eq!(
            MetricSelector::from_param(None),
            MetricSelector::Confirmed
        );
        assert_eq!(
            MetricSelector::from_param(Some("hospitalized")),
            MetricSelector::Confirmed
        );
        assert_eq!(
            MetricSelector::from_param(Some("")),
            MetricSelector::Confirmed
        );
    }
}
