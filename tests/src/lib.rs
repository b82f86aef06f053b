//! Shared fixtures for the workspace integration tests.

use los_eval::{PredictionPair, StayRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEPARTMENTS: [&str; 5] = [
    "gynecology",
    "anesthesia",
    "radiotherapy",
    "TB & Chest disease",
    "surgery",
];
const AGE_BANDS: [&str; 4] = ["21-30", "31-40", "41-50", "51-60"];

/// Deterministic right-skewed cohort: most stays are short with a long tail.
pub fn synthetic_cohort(n: usize, seed: u64) -> Vec<StayRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u: f64 = rng.gen_range(1e-6..1.0);
            let los = 1.0 + (-u.ln() * 6.0).min(60.0);
            StayRecord::new(los.round())
                .with_feature("Department", DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())])
                .with_feature("Age", AGE_BANDS[rng.gen_range(0..AGE_BANDS.len())])
                .with_feature("Admission_Deposit", rng.gen_range(1800.0f64..11000.0))
                .with_feature("Available Extra Rooms in Hospital", rng.gen_range(0u32..10) as f64)
        })
        .collect()
}

/// Predictions pulled toward `center` by `strength` (0 = perfect, 1 = constant).
pub fn shrink_toward(records: &[StayRecord], center: f64, strength: f64) -> Vec<PredictionPair> {
    records
        .iter()
        .map(|r| {
            let a = r.los_days();
            PredictionPair::from_record(r, a + strength * (center - a))
        })
        .collect()
}
