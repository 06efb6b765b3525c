use crate::features::reports::models::PetReport;

/// Merge the lost and found sets into one feed ordering.
///
/// Newest first by `created_at`; the sort is stable, so equal timestamps
/// keep their relative order (lost before found, then insertion order within
/// a source). Every input item appears exactly once.
pub fn merge_reports(lost: &[PetReport], found: &[PetReport]) -> Vec<PetReport> {
    let mut merged: Vec<PetReport> = lost.iter().chain(found.iter()).cloned().collect();
    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    merged
}
