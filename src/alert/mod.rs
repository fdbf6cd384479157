/// Threshold constants and severity classification.
///
/// Submodules:
/// - `thresholds` — temperature bands, accretion efficiency, risk tiers and
///   refreeze grading shared by both analysis passes.

pub mod thresholds;
