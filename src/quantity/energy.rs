use std::ops::Div;

use crate::quantity::{distance::Kilometers, rate::KilowattHoursPer100Km};

quantity!(KilowattHours, f64, "kWh");

impl KilowattHours {
    pub fn from_watt_hours(watt_hours: f64) -> Self {
        Self(watt_hours * 0.001)
    }
}

/// Driving range at the given consumption rate.
impl Div<KilowattHoursPer100Km> for KilowattHours {
    type Output = Kilometers;

    fn div(self, rhs: KilowattHoursPer100Km) -> Self::Output {
        Kilometers(self.0 / rhs.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_watt_hours() {
        assert_abs_diff_eq!(KilowattHours::from_watt_hours(1000.0).0, 1.0);
    }

    #[test]
    fn test_range() {
        let range = KilowattHours(5.0) / KilowattHoursPer100Km(18.0);
        assert_abs_diff_eq!(range.0, 27.777_777_777_777_78, epsilon = 1e-12);
    }
}
