//! Progress aggregation over phases and gewerke.
//!
//! Pure, synchronous computation. Inputs are assumed to already be
//! defaulted at the read boundary (missing fortschritt -> 0), so there
//! are no error conditions here.

/// Rounded mean progress of the gewerke in a single phase.
///
/// An empty phase has progress 0.
pub fn phase_progress(fortschritte: &[i32]) -> i32 {
    if fortschritte.is_empty() {
        return 0;
    }
    let sum: i64 = fortschritte.iter().map(|&f| f as i64).sum();
    let mean = sum as f64 / fortschritte.len() as f64;
    mean.round() as i32
}

/// Project-wide progress over all phases.
///
/// Computed as the rounded mean over the FLATTENED set of all gewerk
/// fortschritt values, not the mean of per-phase means. Phases with more
/// gewerke therefore weigh more: [[0, 0], [100]] yields 33, not 50.
pub fn overall_progress(phasen: &[Vec<i32>]) -> i32 {
    let alle: Vec<i32> = phasen.iter().flatten().copied().collect();
    phase_progress(&alle)
}
