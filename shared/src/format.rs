use crate::entity::Entity;
use crate::metric::{MetricSelector, PER_MILLION};

/// Tooltip text for a hovered entity under the active metric tab.
///
/// Returns `None` when the entity has no data for the metric, which
/// suppresses the tooltip node entirely. Per-million figures round to
/// whole numbers; doubling time keeps one decimal. A zero population
/// drops the per-million clause instead of dividing.
pub fn tooltip_text(entity: &Entity, selector: MetricSelector) -> Option<String> {
    let summary = entity.summary();
    let value = selector.raw(summary)?;
    let name = entity.name();
    let population = entity.population();

    let text = match selector {
        MetricSelector::Confirmed => {
            let mut text = format!("{name}, Confirmed: {}", summary.confirmed);
            if population > 0 {
                let per_million = value / population as f64 * PER_MILLION;
                text.push_str(&format!(", Confirm/Mil: {per_million:.0}"));
            }
            text
        }
        MetricSelector::Death => {
            let mut text = format!("{name}, Deaths: {}", summary.deaths);
            if population > 0 {
                let per_million = value / population as f64 * PER_MILLION;
                text.push_str(&format!(", Deaths/Mil: {per_million:.0}"));
            }
            text
        }
        MetricSelector::DaysToDouble => {
            format!("{name} Days to 2x: {value:.1} days")
        }
    };
    Some(text)
}
