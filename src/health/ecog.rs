/// ECOG performance-status estimate from average daily step count.
///
/// Thresholds are a hard contract with the backend's equivalent
/// computation; the two must agree exactly at every boundary.
pub fn estimate_ecog_from_steps(steps_per_day: f64) -> u8 {
    if steps_per_day >= 7000.0 {
        0
    } else if steps_per_day >= 4000.0 {
        1
    } else if steps_per_day >= 1500.0 {
        2
    } else if steps_per_day >= 500.0 {
        3
    } else {
        4
    }
}

/// Short descriptor shown alongside an ECOG score.
pub fn ecog_descriptor(score: u8) -> &'static str {
    match score {
        0 => "Fully active",
        1 => "Restricted but ambulatory",
        2 => "Ambulatory, capable of self-care",
        3 => "Limited self-care",
        _ => "Completely disabled",
    }
}
