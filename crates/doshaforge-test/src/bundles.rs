//! Feature bundle fixtures for the reference table.

use doshaforge_core::{Feature, FeatureBundle};

/// A bundle with all four features.
pub fn full_bundle(hr: f64, hrv: f64, amplitude: f64, morphology: f64) -> FeatureBundle {
    FeatureBundle::new()
        .with(Feature::Hr, hr)
        .with(Feature::Hrv, hrv)
        .with(Feature::Amplitude, amplitude)
        .with(Feature::Morphology, morphology)
}

/// Every feature in the low band: slow pulse, low variability, smooth.
pub fn kapha_bundle() -> FeatureBundle {
    full_bundle(50.0, 25.0, 0.0, 0.0)
}

/// Every feature in the mid band.
pub fn pitta_bundle() -> FeatureBundle {
    full_bundle(75.0, 50.0, 1.0, 1.0)
}

/// Every feature in the high band: fast pulse, high variability, irregular.
pub fn vata_bundle() -> FeatureBundle {
    full_bundle(110.0, 90.0, 2.0, 2.0)
}
