use bon::Builder;
use chrono::{DateTime, Local};
use enumset::{EnumSet, EnumSetType};
use serde_json::json;

use crate::{
    core::{
        constants::{self, Assumptions},
        reading::{SourceKind, UNAVAILABLE},
        texts,
    },
    quantity::{distance::Kilometers, energy::KilowattHours},
};

/// Identifier of one derived metric.
///
/// The discriminant doubles as the metric's index inside [`MetricBundle`],
/// so the declaration order is load-bearing.
#[derive(Debug, EnumSetType)]
pub enum MetricKey {
    Distance,
    /// Human-readable summary sentence, the only non-numeric metric.
    Message,
    EarthRounds,
    LisbonBerlinTrips,
    NycMexicoTrips,
    MarathonEquivalents,
    FuelSavedLiters,
    Co2SavedKg,
    CoffeeCups,
    PhoneCharges,
    LaptopCharges,
    LedBulbHours,
    TvHours,
    HeatPumpHours,
    FridgeDays,
    WashingCycles,
    DishwasherCycles,
    HotShowers,
    MicrowaveMeals,
    KettleBoils,
    SelfConsumedKwh,
    SelfConsumptionRatio,
    GridImportKwh,
    GridExportKwh,
    GridNetKwh,
    AutarkyRatio,
}

impl MetricKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Message => "message",
            Self::EarthRounds => "earth_rounds",
            Self::LisbonBerlinTrips => "lisbon_berlin_trips",
            Self::NycMexicoTrips => "nyc_mexico_trips",
            Self::MarathonEquivalents => "marathon_equivalents",
            Self::FuelSavedLiters => "fuel_saved_liters",
            Self::Co2SavedKg => "co2_saved_kg",
            Self::CoffeeCups => "coffee_cups",
            Self::PhoneCharges => "phone_charges",
            Self::LaptopCharges => "laptop_charges",
            Self::LedBulbHours => "led_bulb_hours",
            Self::TvHours => "tv_hours",
            Self::HeatPumpHours => "heat_pump_hours",
            Self::FridgeDays => "fridge_days",
            Self::WashingCycles => "washing_cycles",
            Self::DishwasherCycles => "dishwasher_cycles",
            Self::HotShowers => "hot_showers",
            Self::MicrowaveMeals => "microwave_meals",
            Self::KettleBoils => "kettle_boils",
            Self::SelfConsumedKwh => "self_consumed_kwh",
            Self::SelfConsumptionRatio => "self_consumption_ratio",
            Self::GridImportKwh => "grid_import_kwh",
            Self::GridExportKwh => "grid_export_kwh",
            Self::GridNetKwh => "grid_net_kwh",
            Self::AutarkyRatio => "autarky_ratio",
        }
    }

    /// Rounding precision of the metric's value.
    ///
    /// Countable units (charges, hours, meals, boils) round to whole numbers,
    /// fractional ones (days, cycles, showers, cups) keep one decimal.
    pub const fn decimals(self) -> usize {
        match self {
            Self::EarthRounds => 3,
            Self::Distance
            | Self::LisbonBerlinTrips
            | Self::NycMexicoTrips
            | Self::MarathonEquivalents
            | Self::SelfConsumedKwh
            | Self::GridImportKwh
            | Self::GridExportKwh
            | Self::GridNetKwh => 2,
            Self::FuelSavedLiters
            | Self::Co2SavedKg
            | Self::CoffeeCups
            | Self::FridgeDays
            | Self::WashingCycles
            | Self::DishwasherCycles
            | Self::HotShowers
            | Self::SelfConsumptionRatio
            | Self::AutarkyRatio => 1,
            Self::Message
            | Self::PhoneCharges
            | Self::LaptopCharges
            | Self::LedBulbHours
            | Self::TvHours
            | Self::HeatPumpHours
            | Self::MicrowaveMeals
            | Self::KettleBoils => 0,
        }
    }

    /// The fixed constant the metric divides by, if any.
    pub const fn reference(self) -> Option<f64> {
        match self {
            Self::EarthRounds => Some(constants::EARTH_CIRCUMFERENCE_KM),
            Self::LisbonBerlinTrips => Some(constants::LISBON_BERLIN_KM),
            Self::NycMexicoTrips => Some(constants::NYC_MEXICO_CITY_KM),
            Self::MarathonEquivalents => Some(constants::MARATHON_KM),
            Self::CoffeeCups => Some(constants::COFFEE_CUP_KWH),
            Self::PhoneCharges => Some(constants::PHONE_CHARGE_KWH),
            Self::LaptopCharges => Some(constants::LAPTOP_CHARGE_KWH),
            Self::LedBulbHours => Some(constants::LED_BULB_HOUR_KWH),
            Self::TvHours => Some(constants::TV_HOUR_KWH),
            Self::HeatPumpHours => Some(constants::HEAT_PUMP_HOUR_KWH),
            Self::FridgeDays => Some(constants::FRIDGE_DAY_KWH),
            Self::WashingCycles => Some(constants::WASHING_CYCLE_KWH),
            Self::DishwasherCycles => Some(constants::DISHWASHER_CYCLE_KWH),
            Self::HotShowers => Some(constants::HOT_SHOWER_KWH),
            Self::MicrowaveMeals => Some(constants::MICROWAVE_MEAL_KWH),
            Self::KettleBoils => Some(constants::KETTLE_BOIL_KWH),
            _ => None,
        }
    }

    pub const fn unit_symbol(self) -> Option<&'static str> {
        match self {
            Self::Distance => Some("km"),
            Self::FuelSavedLiters => Some("L"),
            Self::Co2SavedKg => Some("kg"),
            Self::LedBulbHours | Self::TvHours | Self::HeatPumpHours => Some("h"),
            Self::FridgeDays => Some("d"),
            Self::SelfConsumedKwh
            | Self::GridImportKwh
            | Self::GridExportKwh
            | Self::GridNetKwh => Some("kWh"),
            Self::SelfConsumptionRatio | Self::AutarkyRatio => Some("%"),
            _ => None,
        }
    }

    pub const fn state_class(self) -> Option<&'static str> {
        match self {
            Self::Message => None,
            _ => Some("measurement"),
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Distance => "mdi:car-electric",
            Self::Message => "mdi:message-text",
            Self::EarthRounds => "mdi:earth",
            Self::LisbonBerlinTrips | Self::NycMexicoTrips => "mdi:map-marker-distance",
            Self::MarathonEquivalents => "mdi:run",
            Self::FuelSavedLiters => "mdi:gas-station",
            Self::Co2SavedKg => "mdi:molecule-co2",
            Self::CoffeeCups => "mdi:coffee",
            Self::PhoneCharges => "mdi:cellphone",
            Self::LaptopCharges => "mdi:laptop",
            Self::LedBulbHours => "mdi:lightbulb-on",
            Self::TvHours => "mdi:television",
            Self::HeatPumpHours => "mdi:heat-pump",
            Self::FridgeDays => "mdi:fridge",
            Self::WashingCycles => "mdi:washing-machine",
            Self::DishwasherCycles => "mdi:dishwasher",
            Self::HotShowers => "mdi:shower-head",
            Self::MicrowaveMeals => "mdi:microwave",
            Self::KettleBoils => "mdi:kettle",
            Self::SelfConsumedKwh => "mdi:home-lightning-bolt",
            Self::SelfConsumptionRatio => "mdi:percent",
            Self::GridImportKwh => "mdi:transmission-tower-import",
            Self::GridExportKwh => "mdi:transmission-tower-export",
            Self::GridNetKwh => "mdi:transmission-tower",
            Self::AutarkyRatio => "mdi:shield-sun",
        }
    }

    pub const fn friendly_name(self) -> &'static str {
        match self {
            Self::Distance => "Solar driving distance",
            Self::Message => "Solar fun fact",
            Self::EarthRounds => "Earth rounds",
            Self::LisbonBerlinTrips => "Lisbon to Berlin trips",
            Self::NycMexicoTrips => "New York to Mexico City trips",
            Self::MarathonEquivalents => "Marathon equivalents",
            Self::FuelSavedLiters => "Fuel saved",
            Self::Co2SavedKg => "CO₂ saved",
            Self::CoffeeCups => "Coffee cups",
            Self::PhoneCharges => "Phone charges",
            Self::LaptopCharges => "Laptop charges",
            Self::LedBulbHours => "LED bulb hours",
            Self::TvHours => "TV hours",
            Self::HeatPumpHours => "Heat pump hours",
            Self::FridgeDays => "Fridge days",
            Self::WashingCycles => "Washing cycles",
            Self::DishwasherCycles => "Dishwasher cycles",
            Self::HotShowers => "Hot showers",
            Self::MicrowaveMeals => "Microwave meals",
            Self::KettleBoils => "Kettle boils",
            Self::SelfConsumedKwh => "Self-consumed energy",
            Self::SelfConsumptionRatio => "Self-consumption ratio",
            Self::GridImportKwh => "Grid import",
            Self::GridExportKwh => "Grid export",
            Self::GridNetKwh => "Net grid balance",
            Self::AutarkyRatio => "Autarky ratio",
        }
    }
}

/// One derived metric: its rounded value and rendered sentence.
///
/// Both are [`None`] when the metric could not be derived.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub key: MetricKey,
    pub value: Option<f64>,
    pub text: Option<String>,
}

impl Metric {
    /// State string as published to the host: the formatted value, the
    /// rendered message, or the unavailability marker.
    pub fn state(&self) -> String {
        match self.key {
            MetricKey::Message => self.text.clone().unwrap_or_else(|| UNAVAILABLE.to_string()),
            _ => self
                .value
                .map_or_else(|| UNAVAILABLE.to_string(), |value| texts::display_value(self.key, value)),
        }
    }
}

/// The complete set of metrics derived from one polling cycle.
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct MetricBundle {
    #[builder(default)]
    pub available: bool,

    pub calculated_at: DateTime<Local>,

    pub distance: Option<Kilometers>,

    pub pv_kwh: Option<KilowattHours>,

    pub source_kind: Option<SourceKind>,

    #[builder(default = constants::ASSUMPTIONS)]
    pub assumptions: Assumptions,

    /// Indexed by [`MetricKey`] discriminant.
    metrics: Vec<Metric>,
}

impl MetricBundle {
    /// Bundle for a cycle whose production reading was absent: every metric
    /// is null and the bundle is flagged unavailable.
    pub fn unavailable(calculated_at: DateTime<Local>) -> Self {
        let metrics = EnumSet::all()
            .iter()
            .map(|key| Metric { key, value: None, text: None })
            .collect();
        Self::builder().calculated_at(calculated_at).metrics(metrics).build()
    }

    pub fn get(&self, key: MetricKey) -> &Metric {
        let metric = &self.metrics[key as usize];
        debug_assert!(metric.key == key);
        metric
    }

    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let values: serde_json::Map<String, serde_json::Value> = self
            .metrics
            .iter()
            .map(|metric| (metric.key.as_str().to_string(), json!(metric.value)))
            .collect();
        let texts: serde_json::Map<String, serde_json::Value> = self
            .metrics
            .iter()
            .map(|metric| (metric.key.as_str().to_string(), json!(metric.text)))
            .collect();
        json!({
            "available": self.available,
            "calculated_at": self.calculated_at,
            "distance_km": self.distance,
            "pv_kwh": self.pv_kwh,
            "source_kind": self.source_kind,
            "metrics": values,
            "texts": texts,
            "assumptions": self.assumptions,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_unavailable_bundle_nulls_everything() {
        let bundle = MetricBundle::unavailable(Local::now());
        assert!(!bundle.available);
        assert!(bundle.distance.is_none());
        for key in EnumSet::<MetricKey>::all() {
            let metric = bundle.get(key);
            assert!(metric.value.is_none(), "{key:?}");
            assert!(metric.text.is_none(), "{key:?}");
            assert_eq!(metric.state(), UNAVAILABLE);
        }
    }

    #[test]
    fn test_keys_index_their_own_metrics() {
        let bundle = MetricBundle::unavailable(Local::now());
        for key in EnumSet::<MetricKey>::all() {
            assert_eq!(bundle.get(key).key, key);
        }
    }

    #[test]
    fn test_key_strings_are_unique() {
        let keys: HashSet<&str> =
            EnumSet::<MetricKey>::all().iter().map(MetricKey::as_str).collect();
        assert_eq!(keys.len(), EnumSet::<MetricKey>::all().len());
    }

    #[test]
    fn test_metadata() {
        assert_eq!(MetricKey::EarthRounds.decimals(), 3);
        assert_eq!(MetricKey::CoffeeCups.decimals(), 1);
        assert_eq!(MetricKey::PhoneCharges.decimals(), 0);
        assert_eq!(MetricKey::Distance.unit_symbol(), Some("km"));
        assert_eq!(MetricKey::Message.unit_symbol(), None);
        assert_eq!(MetricKey::Message.state_class(), None);
        assert_eq!(MetricKey::AutarkyRatio.unit_symbol(), Some("%"));
        assert_eq!(MetricKey::MarathonEquivalents.reference(), Some(42.195));
        assert_eq!(MetricKey::Distance.reference(), None);
        assert_eq!(MetricKey::KettleBoils.icon(), "mdi:kettle");
    }

    #[test]
    fn test_to_json_shape() {
        let calculated_at = Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let json = MetricBundle::unavailable(calculated_at).to_json();
        assert_eq!(json["available"], json!(false));
        assert_eq!(json["distance_km"], json!(null));
        assert_eq!(json["metrics"]["coffee_cups"], json!(null));
        assert_eq!(json["texts"]["message"], json!(null));
        assert_eq!(json["assumptions"]["power_window_hours"], json!(1.0));
    }
}
