//! Derives the metric bundle from normalized readings.

use bon::Builder;
use chrono::{DateTime, Local};
use enumset::EnumSet;

use crate::{
    core::{
        bundle::{Metric, MetricBundle, MetricKey},
        constants,
        reading::{NormalizedEnergy, Reading},
        settings::Settings,
        texts,
    },
    prelude::*,
    quantity::{distance::Kilometers, energy::KilowattHours},
};

/// Normalized inputs of one derivation cycle.
#[derive(Builder, Copy, Clone, Debug)]
pub struct Snapshot {
    pub pv: NormalizedEnergy,
    pub grid_import: Option<KilowattHours>,
    pub grid_export: Option<KilowattHours>,
}

/// Derives the bundle from raw readings.
///
/// A missing production reading makes the whole bundle unavailable. Missing
/// grid readings only null out the metrics that depend on them.
pub fn evaluate(
    pv: Option<Reading>,
    grid_import: Option<Reading>,
    grid_export: Option<Reading>,
    settings: &Settings,
    calculated_at: DateTime<Local>,
) -> MetricBundle {
    let Some(pv) = pv else {
        warn!("the production reading is unavailable");
        return MetricBundle::unavailable(calculated_at);
    };
    let snapshot = Snapshot::builder()
        .pv(NormalizedEnergy::from(pv))
        .maybe_grid_import(grid_import.map(|reading| NormalizedEnergy::from(reading).kwh))
        .maybe_grid_export(grid_export.map(|reading| NormalizedEnergy::from(reading).kwh))
        .build();
    compute(&snapshot, settings, calculated_at)
}

#[instrument(
    skip_all,
    fields(pv_kwh = snapshot.pv.kwh.0, kind = snapshot.pv.kind.as_str()),
)]
pub fn compute(
    snapshot: &Snapshot,
    settings: &Settings,
    calculated_at: DateTime<Local>,
) -> MetricBundle {
    let pv = snapshot.pv.kwh;
    let distance = rounded((pv / settings.consumption).0, MetricKey::Distance.decimals());

    // Production that did not leave through the grid meter.
    let self_consumed = snapshot
        .grid_export
        .map(|export| (pv - export).max(KilowattHours::zero()).0);

    // The carbon figure multiplies the already rounded liters, so both come
    // out the way they are displayed.
    let fuel_saved = distance.and_then(|distance| {
        rounded(
            distance * constants::FUEL_LITERS_PER_100KM / 100.0,
            MetricKey::FuelSavedLiters.decimals(),
        )
    });

    let value_for = |key: MetricKey| -> Option<f64> {
        match key {
            MetricKey::Distance => distance,
            MetricKey::Message => None,
            MetricKey::EarthRounds => {
                distance.map(|distance| distance / constants::EARTH_CIRCUMFERENCE_KM)
            }
            MetricKey::LisbonBerlinTrips => {
                distance.map(|distance| distance / constants::LISBON_BERLIN_KM)
            }
            MetricKey::NycMexicoTrips => {
                distance.map(|distance| distance / constants::NYC_MEXICO_CITY_KM)
            }
            MetricKey::MarathonEquivalents => {
                distance.map(|distance| distance / constants::MARATHON_KM)
            }
            MetricKey::FuelSavedLiters => fuel_saved,
            MetricKey::Co2SavedKg => {
                fuel_saved.map(|fuel_saved| fuel_saved * constants::CO2_KG_PER_LITER)
            }
            MetricKey::CoffeeCups => Some(pv.0 / constants::COFFEE_CUP_KWH),
            MetricKey::PhoneCharges => Some(pv.0 / constants::PHONE_CHARGE_KWH),
            MetricKey::LaptopCharges => Some(pv.0 / constants::LAPTOP_CHARGE_KWH),
            MetricKey::LedBulbHours => Some(pv.0 / constants::LED_BULB_HOUR_KWH),
            MetricKey::TvHours => Some(pv.0 / constants::TV_HOUR_KWH),
            MetricKey::HeatPumpHours => Some(pv.0 / constants::HEAT_PUMP_HOUR_KWH),
            MetricKey::FridgeDays => Some(pv.0 / constants::FRIDGE_DAY_KWH),
            MetricKey::WashingCycles => Some(pv.0 / constants::WASHING_CYCLE_KWH),
            MetricKey::DishwasherCycles => Some(pv.0 / constants::DISHWASHER_CYCLE_KWH),
            MetricKey::HotShowers => Some(pv.0 / constants::HOT_SHOWER_KWH),
            MetricKey::MicrowaveMeals => Some(pv.0 / constants::MICROWAVE_MEAL_KWH),
            MetricKey::KettleBoils => Some(pv.0 / constants::KETTLE_BOIL_KWH),
            MetricKey::SelfConsumedKwh => self_consumed,
            MetricKey::SelfConsumptionRatio => self_consumed
                .filter(|_| pv.0 > 0.0)
                .map(|self_consumed| self_consumed / pv.0 * 100.0),
            MetricKey::GridImportKwh => snapshot.grid_import.map(|import| import.0),
            MetricKey::GridExportKwh => snapshot.grid_export.map(|export| export.0),
            MetricKey::GridNetKwh => match (snapshot.grid_export, snapshot.grid_import) {
                (None, None) => None,
                (export, import) => {
                    let export = export.unwrap_or_else(KilowattHours::zero);
                    let import = import.unwrap_or_else(KilowattHours::zero);
                    Some((export - import).0)
                }
            },
            MetricKey::AutarkyRatio => match (self_consumed, snapshot.grid_import) {
                (Some(self_consumed), Some(import)) => {
                    let consumed_total = self_consumed + import.0;
                    (consumed_total > 0.0).then(|| self_consumed / consumed_total * 100.0)
                }
                _ => None,
            },
        }
    };

    let metrics = EnumSet::all()
        .iter()
        .map(|key| {
            let value = value_for(key).and_then(|value| rounded(value, key.decimals()));
            let text = match key {
                MetricKey::Message => distance.map(|distance| {
                    texts::message(
                        settings.language,
                        snapshot.pv.kind,
                        Kilometers(distance),
                        settings.consumption,
                    )
                }),
                _ => value.map(|value| texts::sentence(settings.language, key, value)),
            };
            Metric { key, value, text }
        })
        .collect();

    debug!(?distance, "derived");
    MetricBundle::builder()
        .available(true)
        .calculated_at(calculated_at)
        .maybe_distance(distance.map(Kilometers))
        .pv_kwh(pv)
        .source_kind(snapshot.pv.kind)
        .metrics(metrics)
        .build()
}

const ROUNDING_FACTORS: [f64; 4] = [1.0, 10.0, 100.0, 1000.0];

/// Rounds to the metric's precision. Non-finite intermediates become null
/// instead of poisoning the bundle.
fn rounded(value: f64, decimals: usize) -> Option<f64> {
    let factor = ROUNDING_FACTORS[decimals];
    let rounded = (value * factor).round() / factor;
    rounded.is_finite().then_some(rounded)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    use super::*;
    use crate::{
        core::{
            reading::{SourceKind, Unit},
            texts::Language,
        },
        quantity::rate::KilowattHoursPer100Km,
    };

    fn settings() -> Settings {
        Settings::try_new(KilowattHoursPer100Km(18.0), Language::En).unwrap()
    }

    fn calculated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn kwh(value: f64) -> Option<Reading> {
        Some(Reading { value, unit: Some(Unit::KilowattHours) })
    }

    fn value(bundle: &MetricBundle, key: MetricKey) -> f64 {
        bundle.get(key).value.unwrap()
    }

    #[test]
    fn test_energy_scenario() {
        let bundle = evaluate(kwh(5.0), None, None, &settings(), calculated_at());

        assert!(bundle.available);
        assert_eq!(bundle.source_kind, Some(SourceKind::Energy));
        assert_abs_diff_eq!(value(&bundle, MetricKey::Distance), 27.78);
        assert_abs_diff_eq!(value(&bundle, MetricKey::CoffeeCups), 71.4);
        assert_abs_diff_eq!(value(&bundle, MetricKey::EarthRounds), 0.001);
        assert_abs_diff_eq!(value(&bundle, MetricKey::MarathonEquivalents), 0.66);
        assert_abs_diff_eq!(value(&bundle, MetricKey::TvHours), 50.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::PhoneCharges), 333.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::FuelSavedLiters), 1.9);
        assert_abs_diff_eq!(value(&bundle, MetricKey::Co2SavedKg), 4.4, epsilon = 1e-9);
        assert_eq!(
            bundle.get(MetricKey::Message).text.as_deref(),
            Some(
                "With your current solar energy you could drive about 27.78 km \
                 at a consumption of 18.0 kWh/100 km."
            ),
        );
    }

    #[test]
    fn test_power_scenario() {
        let reading = Reading { value: 2.0, unit: Some(Unit::Kilowatts) };
        let bundle = evaluate(Some(reading), None, None, &settings(), calculated_at());

        assert_eq!(bundle.source_kind, Some(SourceKind::Power));
        assert_abs_diff_eq!(bundle.pv_kwh.unwrap().0, 2.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::Distance), 11.11);
        let message = bundle.get(MetricKey::Message).text.clone().unwrap();
        assert!(message.contains("solar power (1 h)"), "{message}");
        assert!(message.contains("11.11 km"), "{message}");
    }

    #[test]
    fn test_watts_normalize_before_derivation() {
        let reading = Reading { value: 2500.0, unit: Some(Unit::Watts) };
        let bundle = evaluate(Some(reading), None, None, &settings(), calculated_at());
        assert_abs_diff_eq!(bundle.pv_kwh.unwrap().0, 2.5);
        assert_abs_diff_eq!(value(&bundle, MetricKey::Distance), 13.89);
    }

    #[test]
    fn test_missing_production_nulls_the_whole_bundle() {
        let bundle = evaluate(None, kwh(2.0), kwh(1.0), &settings(), calculated_at());
        assert!(!bundle.available);
        for key in EnumSet::<MetricKey>::all() {
            assert!(bundle.get(key).value.is_none(), "{key:?}");
            assert!(bundle.get(key).text.is_none(), "{key:?}");
        }
    }

    #[test]
    fn test_zero_production() {
        let bundle = evaluate(kwh(0.0), None, kwh(0.0), &settings(), calculated_at());

        assert_abs_diff_eq!(value(&bundle, MetricKey::Distance), 0.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::EarthRounds), 0.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::CoffeeCups), 0.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::SelfConsumedKwh), 0.0);
        // No production means no denominator for the ratio.
        assert_eq!(bundle.get(MetricKey::SelfConsumptionRatio).value, None);
        assert!(bundle.get(MetricKey::Message).text.is_some());
    }

    #[test]
    fn test_import_only_nulls_export_dependents() {
        let bundle = evaluate(kwh(5.0), kwh(2.0), None, &settings(), calculated_at());

        assert_abs_diff_eq!(value(&bundle, MetricKey::GridImportKwh), 2.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::GridNetKwh), -2.0);
        assert_eq!(bundle.get(MetricKey::GridExportKwh).value, None);
        assert_eq!(bundle.get(MetricKey::SelfConsumedKwh).value, None);
        assert_eq!(bundle.get(MetricKey::SelfConsumptionRatio).value, None);
        assert_eq!(bundle.get(MetricKey::AutarkyRatio).value, None);
        // The distance chain is untouched by grid gaps.
        assert_abs_diff_eq!(value(&bundle, MetricKey::Distance), 27.78);
    }

    #[test]
    fn test_full_grid_picture() {
        let bundle = evaluate(kwh(10.0), kwh(2.0), kwh(4.0), &settings(), calculated_at());

        assert_abs_diff_eq!(value(&bundle, MetricKey::SelfConsumedKwh), 6.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::SelfConsumptionRatio), 60.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::GridNetKwh), 2.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::AutarkyRatio), 75.0);
        assert_eq!(
            bundle.get(MetricKey::AutarkyRatio).text.as_deref(),
            Some("Solar covered 75.0 % of your consumption."),
        );
    }

    #[test]
    fn test_export_exceeding_production_clamps_to_zero() {
        let bundle = evaluate(kwh(3.0), kwh(1.0), kwh(5.0), &settings(), calculated_at());

        assert_abs_diff_eq!(value(&bundle, MetricKey::SelfConsumedKwh), 0.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::SelfConsumptionRatio), 0.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::AutarkyRatio), 0.0);
        assert_abs_diff_eq!(value(&bundle, MetricKey::GridNetKwh), 4.0);
    }

    #[test]
    fn test_grid_readings_normalize_units() {
        let import = Reading { value: 2000.0, unit: Some(Unit::WattHours) };
        let bundle = evaluate(kwh(5.0), Some(import), None, &settings(), calculated_at());
        assert_abs_diff_eq!(value(&bundle, MetricKey::GridImportKwh), 2.0);
    }

    #[test]
    fn test_deterministic_for_equal_inputs() {
        let first = evaluate(kwh(5.0), kwh(2.0), kwh(1.0), &settings(), calculated_at());
        let second = evaluate(kwh(5.0), kwh(2.0), kwh(1.0), &settings(), calculated_at());
        assert_eq!(first, second);
    }

    #[test]
    fn test_distance_grows_with_production() {
        let smaller = evaluate(kwh(1.0), None, None, &settings(), calculated_at());
        let larger = evaluate(kwh(2.0), None, None, &settings(), calculated_at());
        assert!(value(&larger, MetricKey::Distance) > value(&smaller, MetricKey::Distance));
    }

    #[test]
    fn test_distance_shrinks_with_consumption() {
        let thirsty = Settings::try_new(KilowattHoursPer100Km(36.0), Language::En).unwrap();
        let frugal = evaluate(kwh(5.0), None, None, &settings(), calculated_at());
        let heavy = evaluate(kwh(5.0), None, None, &thirsty, calculated_at());
        assert!(value(&heavy, MetricKey::Distance) < value(&frugal, MetricKey::Distance));
    }

    #[test]
    fn test_german_sentences() {
        let settings =
            Settings::try_new(KilowattHoursPer100Km(18.0), Language::De).unwrap();
        let bundle = evaluate(kwh(5.0), None, None, &settings, calculated_at());
        let message = bundle.get(MetricKey::Message).text.clone().unwrap();
        assert!(message.starts_with("Mit deiner aktuellen Solarenergie"), "{message}");
        assert_eq!(
            bundle.get(MetricKey::CoffeeCups).text.as_deref(),
            Some("Genug Energie für 71.4 Tassen Kaffee."),
        );
    }
}
