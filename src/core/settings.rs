use crate::{core::texts::Language, prelude::*, quantity::rate::KilowattHoursPer100Km};

/// Validated user configuration, immutable for the lifetime of one computation.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Settings {
    pub consumption: KilowattHoursPer100Km,
    pub language: Language,
}

impl Settings {
    /// The engine divides by the consumption rate, so anything that is not a
    /// strictly positive finite number is rejected here and never reaches it.
    pub fn try_new(consumption: KilowattHoursPer100Km, language: Language) -> Result<Self> {
        ensure!(
            consumption.0.is_finite() && consumption.0 > 0.0,
            "the consumption rate must be positive, got {consumption}",
        );
        Ok(Self { consumption, language })
    }
}
