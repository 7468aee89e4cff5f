use crate::quantity::{energy::KilowattHours, power::Kilowatts};

/// Host marker for a sensor that exists but has no usable state.
pub const UNAVAILABLE: &str = "unavailable";

/// Host marker for a state that was never set.
pub const UNKNOWN: &str = "unknown";

/// Unit symbol reported on a source sensor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Unit {
    #[value(name = "w")]
    Watts,

    #[value(name = "kw")]
    Kilowatts,

    #[value(name = "wh")]
    WattHours,

    #[value(name = "kwh")]
    KilowattHours,
}

impl Unit {
    /// Parses a `unit_of_measurement` attribute.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "W" => Some(Self::Watts),
            "kW" => Some(Self::Kilowatts),
            "Wh" => Some(Self::WattHours),
            "kWh" => Some(Self::KilowattHours),
            _ => None,
        }
    }
}

/// One raw sensor observation: the numeric state and its reported unit.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub unit: Option<Unit>,
}

impl Reading {
    /// Parses a raw state string.
    ///
    /// [`None`] for the `unknown`/`unavailable` markers and for anything that
    /// does not parse into a finite number.
    pub fn try_parse(state: &str, unit: Option<Unit>) -> Option<Self> {
        match state.trim() {
            UNKNOWN | UNAVAILABLE => None,
            state => {
                let value = state.parse().ok().filter(|value: &f64| value.is_finite())?;
                Some(Self { value, unit })
            }
        }
    }
}

/// What the normalized energy was derived from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Energy,
    Power,
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Power => "power",
        }
    }
}

/// Canonical energy quantity with the classification of its origin.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NormalizedEnergy {
    pub kwh: KilowattHours,
    pub kind: SourceKind,
}

impl From<Reading> for NormalizedEnergy {
    fn from(reading: Reading) -> Self {
        match reading.unit {
            Some(Unit::WattHours) => Self {
                kwh: KilowattHours::from_watt_hours(reading.value),
                kind: SourceKind::Energy,
            },
            Some(Unit::KilowattHours) => {
                Self { kwh: KilowattHours(reading.value), kind: SourceKind::Energy }
            }
            Some(Unit::Watts) => Self {
                kwh: Kilowatts::from_watts(reading.value).over_one_hour(),
                kind: SourceKind::Power,
            },
            Some(Unit::Kilowatts) => {
                Self { kwh: Kilowatts(reading.value).over_one_hour(), kind: SourceKind::Power }
            }
            // Unrecognized units pass the raw value through.
            None => Self { kwh: KilowattHours(reading.value), kind: SourceKind::Power },
        }
    }
}
