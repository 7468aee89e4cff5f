//! Reference constants behind the derived metrics.
//!
//! Fixed by design, not configurable. The [`ASSUMPTIONS`] record echoes all
//! of them into the published bundle so a consumer can audit the figures.

use serde::Serialize;

/// Equatorial circumference of the Earth (WGS 84).
pub const EARTH_CIRCUMFERENCE_KM: f64 = 40_075.0;

/// Road distance from Lisbon to Berlin.
pub const LISBON_BERLIN_KM: f64 = 2_310.0;

/// Great-circle distance from New York to Mexico City.
pub const NYC_MEXICO_CITY_KM: f64 = 3_366.0;

pub const MARATHON_KM: f64 = 42.195;

/// Petrol consumption of a typical combustion car.
pub const FUEL_LITERS_PER_100KM: f64 = 7.0;

/// CO₂ released by burning one liter of petrol.
pub const CO2_KG_PER_LITER: f64 = 2.31;

pub const COFFEE_CUP_KWH: f64 = 0.07;
pub const PHONE_CHARGE_KWH: f64 = 0.015;
pub const LAPTOP_CHARGE_KWH: f64 = 0.06;
pub const LED_BULB_HOUR_KWH: f64 = 0.01;
pub const TV_HOUR_KWH: f64 = 0.1;
pub const HEAT_PUMP_HOUR_KWH: f64 = 2.5;
pub const FRIDGE_DAY_KWH: f64 = 0.75;
pub const WASHING_CYCLE_KWH: f64 = 0.9;
pub const DISHWASHER_CYCLE_KWH: f64 = 1.2;
pub const HOT_SHOWER_KWH: f64 = 1.5;
pub const MICROWAVE_MEAL_KWH: f64 = 0.12;
pub const KETTLE_BOIL_KWH: f64 = 0.11;

/// Every reference constant the metrics are derived from.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Assumptions {
    pub earth_circumference_km: f64,
    pub lisbon_berlin_km: f64,
    pub nyc_mexico_city_km: f64,
    pub marathon_km: f64,
    pub fuel_liters_per_100km: f64,
    pub co2_kg_per_liter: f64,
    pub coffee_cup_kwh: f64,
    pub phone_charge_kwh: f64,
    pub laptop_charge_kwh: f64,
    pub led_bulb_hour_kwh: f64,
    pub tv_hour_kwh: f64,
    pub heat_pump_hour_kwh: f64,
    pub fridge_day_kwh: f64,
    pub washing_cycle_kwh: f64,
    pub dishwasher_cycle_kwh: f64,
    pub hot_shower_kwh: f64,
    pub microwave_meal_kwh: f64,
    pub kettle_boil_kwh: f64,
    pub power_window_hours: f64,
}

pub const ASSUMPTIONS: Assumptions = Assumptions {
    earth_circumference_km: EARTH_CIRCUMFERENCE_KM,
    lisbon_berlin_km: LISBON_BERLIN_KM,
    nyc_mexico_city_km: NYC_MEXICO_CITY_KM,
    marathon_km: MARATHON_KM,
    fuel_liters_per_100km: FUEL_LITERS_PER_100KM,
    co2_kg_per_liter: CO2_KG_PER_LITER,
    coffee_cup_kwh: COFFEE_CUP_KWH,
    phone_charge_kwh: PHONE_CHARGE_KWH,
    laptop_charge_kwh: LAPTOP_CHARGE_KWH,
    led_bulb_hour_kwh: LED_BULB_HOUR_KWH,
    tv_hour_kwh: TV_HOUR_KWH,
    heat_pump_hour_kwh: HEAT_PUMP_HOUR_KWH,
    fridge_day_kwh: FRIDGE_DAY_KWH,
    washing_cycle_kwh: WASHING_CYCLE_KWH,
    dishwasher_cycle_kwh: DISHWASHER_CYCLE_KWH,
    hot_shower_kwh: HOT_SHOWER_KWH,
    microwave_meal_kwh: MICROWAVE_MEAL_KWH,
    kettle_boil_kwh: KETTLE_BOIL_KWH,
    // Power readings count as one hour of generation.
    power_window_hours: 1.0,
};
