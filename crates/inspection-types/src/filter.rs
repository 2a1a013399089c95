use crate::model::Inspection;

/// Case-insensitive text search over the listing fields
///
/// Matches when the query is a substring of the bridge name, location or
/// inspector name. A blank query keeps every inspection. Storage order is
/// preserved.
pub fn filter_inspections<'a>(inspections: &'a [Inspection], query: &str) -> Vec<&'a Inspection> {
    if query.trim().is_empty() {
        return inspections.iter().collect();
    }
    let needle = query.to_lowercase();
    inspections
        .iter()
        .filter(|i| {
            i.bridge_name.to_lowercase().contains(&needle)
                || i.location.to_lowercase().contains(&needle)
                || i.inspector_name.to_lowercase().contains(&needle)
        })
        .collect()
}
