use crate::model::callout::EditorialCallout;

/// Editorial callouts whose `[start_time, end_time]` window contains `t`.
///
/// Ingestion already guarantees minimum duration and non-overlap, so this is a plain membership
/// test with no cooldown state.
pub fn active_callouts(all: &[EditorialCallout], t: f64) -> Vec<&EditorialCallout> {
    all.iter().filter(|c| c.is_active_at(t)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/callouts.rs"]
mod tests;
