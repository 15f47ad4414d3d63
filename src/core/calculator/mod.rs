pub mod breakdown;
pub mod coverage;
pub mod efficacy;
pub mod monthly;

/// Percentage rounded to two decimals, clamped to [0, 100]; 0 when the
/// denominator is 0.
pub fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let pct = 100.0 * numerator as f64 / denominator as f64;
    round2(pct.clamp(0.0, 100.0))
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
