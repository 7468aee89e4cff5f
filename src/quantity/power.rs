use crate::quantity::energy::KilowattHours;

quantity!(Kilowatts, f64, "kW");

impl Kilowatts {
    pub fn from_watts(watts: f64) -> Self {
        Self(watts * 0.001)
    }

    /// Energy generated if the reading held for a full hour.
    ///
    /// An instantaneous power reading carries no duration, so the metrics are
    /// defined over the convention of one hour of generation at the observed
    /// power.
    pub const fn over_one_hour(self) -> KilowattHours {
        KilowattHours(self.0)
    }
}
