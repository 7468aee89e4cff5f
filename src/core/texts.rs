//! Static sentence tables, one per supported language.

use crate::{
    core::{bundle::MetricKey, reading::SourceKind},
    quantity::{distance::Kilometers, rate::KilowattHoursPer100Km},
};

/// Display language of the rendered sentences.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Language {
    De,
    En,
    Fr,
    It,
    Es,
}

impl Language {
    /// Matches a host-reported language tag, for example `en-GB`.
    ///
    /// Only the primary subtag matters; unsupported languages fall back to
    /// English.
    pub fn from_tag(tag: &str) -> Self {
        let subtag = tag.split(['-', '_']).next().unwrap_or_default();
        match subtag.to_ascii_lowercase().as_str() {
            "de" => Self::De,
            "fr" => Self::Fr,
            "it" => Self::It,
            "es" => Self::Es,
            _ => Self::En,
        }
    }
}

/// Renders the sentence for a metric's rounded value.
pub fn sentence(language: Language, key: MetricKey, value: f64) -> String {
    let rendered = Texts::of(language).template(key).replace("{value}", &display_value(key, value));
    match key.reference() {
        Some(reference) => rendered.replace("{reference}", &reference.to_string()),
        None => rendered,
    }
}

/// Renders the composite message with the source-kind-dependent label.
pub fn message(
    language: Language,
    kind: SourceKind,
    distance: Kilometers,
    consumption: KilowattHoursPer100Km,
) -> String {
    let texts = Texts::of(language);
    let template = match kind {
        SourceKind::Energy => texts.message_energy,
        SourceKind::Power => texts.message_power,
    };
    template
        .replace("{distance}", &format!("{:.2}", distance.0))
        .replace("{consumption}", &format!("{:.1}", consumption.0))
}

/// Formats a value with the metric's precision.
pub fn display_value(key: MetricKey, value: f64) -> String {
    format!("{value:.precision$}", precision = key.decimals())
}

/// Sentence templates of one language.
///
/// `{value}` takes the metric's rounded value and `{reference}` the metric's
/// reference constant. The two message templates take `{distance}` and
/// `{consumption}` instead.
struct Texts {
    message_energy: &'static str,
    message_power: &'static str,
    distance: &'static str,
    earth_rounds: &'static str,
    lisbon_berlin_trips: &'static str,
    nyc_mexico_trips: &'static str,
    marathon_equivalents: &'static str,
    fuel_saved_liters: &'static str,
    co2_saved_kg: &'static str,
    coffee_cups: &'static str,
    phone_charges: &'static str,
    laptop_charges: &'static str,
    led_bulb_hours: &'static str,
    tv_hours: &'static str,
    heat_pump_hours: &'static str,
    fridge_days: &'static str,
    washing_cycles: &'static str,
    dishwasher_cycles: &'static str,
    hot_showers: &'static str,
    microwave_meals: &'static str,
    kettle_boils: &'static str,
    self_consumed_kwh: &'static str,
    self_consumption_ratio: &'static str,
    grid_import_kwh: &'static str,
    grid_export_kwh: &'static str,
    grid_net_kwh: &'static str,
    autarky_ratio: &'static str,
}

impl Texts {
    const fn of(language: Language) -> &'static Self {
        match language {
            Language::De => &DE,
            Language::En => &EN,
            Language::Fr => &FR,
            Language::It => &IT,
            Language::Es => &ES,
        }
    }

    const fn template(&self, key: MetricKey) -> &'static str {
        match key {
            // The message is rendered through `message`, never through
            // `sentence`; the energy variant stands in for completeness.
            MetricKey::Message => self.message_energy,
            MetricKey::Distance => self.distance,
            MetricKey::EarthRounds => self.earth_rounds,
            MetricKey::LisbonBerlinTrips => self.lisbon_berlin_trips,
            MetricKey::NycMexicoTrips => self.nyc_mexico_trips,
            MetricKey::MarathonEquivalents => self.marathon_equivalents,
            MetricKey::FuelSavedLiters => self.fuel_saved_liters,
            MetricKey::Co2SavedKg => self.co2_saved_kg,
            MetricKey::CoffeeCups => self.coffee_cups,
            MetricKey::PhoneCharges => self.phone_charges,
            MetricKey::LaptopCharges => self.laptop_charges,
            MetricKey::LedBulbHours => self.led_bulb_hours,
            MetricKey::TvHours => self.tv_hours,
            MetricKey::HeatPumpHours => self.heat_pump_hours,
            MetricKey::FridgeDays => self.fridge_days,
            MetricKey::WashingCycles => self.washing_cycles,
            MetricKey::DishwasherCycles => self.dishwasher_cycles,
            MetricKey::HotShowers => self.hot_showers,
            MetricKey::MicrowaveMeals => self.microwave_meals,
            MetricKey::KettleBoils => self.kettle_boils,
            MetricKey::SelfConsumedKwh => self.self_consumed_kwh,
            MetricKey::SelfConsumptionRatio => self.self_consumption_ratio,
            MetricKey::GridImportKwh => self.grid_import_kwh,
            MetricKey::GridExportKwh => self.grid_export_kwh,
            MetricKey::GridNetKwh => self.grid_net_kwh,
            MetricKey::AutarkyRatio => self.autarky_ratio,
        }
    }
}

static EN: Texts = Texts {
    message_energy: "With your current solar energy you could drive about {distance} km at a consumption of {consumption} kWh/100 km.",
    message_power: "With your current solar power (1 h) you could drive about {distance} km at a consumption of {consumption} kWh/100 km.",
    distance: "Enough to drive an electric car about {value} km.",
    earth_rounds: "That is {value} times around the Earth.",
    lisbon_berlin_trips: "Enough for {value} trips from Lisbon to Berlin ({reference} km each).",
    nyc_mexico_trips: "Enough for {value} trips from New York to Mexico City ({reference} km each).",
    marathon_equivalents: "That covers {value} marathons of {reference} km.",
    fuel_saved_liters: "Roughly {value} liters of petrol left unburned.",
    co2_saved_kg: "About {value} kg of CO₂ avoided.",
    coffee_cups: "Enough energy for {value} cups of coffee.",
    phone_charges: "Enough to fully charge a phone {value} times.",
    laptop_charges: "Enough to fully charge a laptop {value} times.",
    led_bulb_hours: "An LED bulb could shine for {value} hours.",
    tv_hours: "Enough to watch TV for {value} hours.",
    heat_pump_hours: "Enough to run a heat pump for {value} hours.",
    fridge_days: "Keeps the fridge cold for {value} days.",
    washing_cycles: "Enough for {value} loads of laundry.",
    dishwasher_cycles: "Enough for {value} dishwasher runs.",
    hot_showers: "Enough for {value} hot showers.",
    microwave_meals: "Heats up {value} microwave meals.",
    kettle_boils: "Boils the kettle {value} times.",
    self_consumed_kwh: "You used {value} kWh of your solar energy directly.",
    self_consumption_ratio: "You consumed {value} % of your solar yield yourself.",
    grid_import_kwh: "You drew {value} kWh from the grid.",
    grid_export_kwh: "You fed {value} kWh into the grid.",
    grid_net_kwh: "Your net grid balance is {value} kWh.",
    autarky_ratio: "Solar covered {value} % of your consumption.",
};

static DE: Texts = Texts {
    message_energy: "Mit deiner aktuellen Solarenergie könntest du bei einem Verbrauch von {consumption} kWh/100 km etwa {distance} km fahren.",
    message_power: "Mit deiner aktuellen Solarleistung (1 h) könntest du bei einem Verbrauch von {consumption} kWh/100 km etwa {distance} km fahren.",
    distance: "Genug, um etwa {value} km elektrisch zu fahren.",
    earth_rounds: "Das sind {value} Runden um die Erde.",
    lisbon_berlin_trips: "Genug für {value} Fahrten von Lissabon nach Berlin (je {reference} km).",
    nyc_mexico_trips: "Genug für {value} Fahrten von New York nach Mexiko-Stadt (je {reference} km).",
    marathon_equivalents: "Das entspricht {value} Marathons zu {reference} km.",
    fuel_saved_liters: "Ungefähr {value} Liter Benzin bleiben unverbrannt.",
    co2_saved_kg: "Etwa {value} kg CO₂ vermieden.",
    coffee_cups: "Genug Energie für {value} Tassen Kaffee.",
    phone_charges: "Lädt ein Handy {value} Mal voll auf.",
    laptop_charges: "Lädt einen Laptop {value} Mal voll auf.",
    led_bulb_hours: "Eine LED-Lampe könnte {value} Stunden leuchten.",
    tv_hours: "Reicht für {value} Stunden Fernsehen.",
    heat_pump_hours: "Betreibt eine Wärmepumpe für {value} Stunden.",
    fridge_days: "Hält den Kühlschrank {value} Tage kalt.",
    washing_cycles: "Reicht für {value} Wäscheladungen.",
    dishwasher_cycles: "Reicht für {value} Spülmaschinengänge.",
    hot_showers: "Reicht für {value} heiße Duschen.",
    microwave_meals: "Erwärmt {value} Mikrowellengerichte.",
    kettle_boils: "Bringt den Wasserkocher {value} Mal zum Kochen.",
    self_consumed_kwh: "Du hast {value} kWh deiner Solarenergie direkt genutzt.",
    self_consumption_ratio: "Du hast {value} % deines Solarertrags selbst verbraucht.",
    grid_import_kwh: "Du hast {value} kWh aus dem Netz bezogen.",
    grid_export_kwh: "Du hast {value} kWh ins Netz eingespeist.",
    grid_net_kwh: "Deine Netto-Netzbilanz beträgt {value} kWh.",
    autarky_ratio: "Solar hat {value} % deines Verbrauchs gedeckt.",
};

static FR: Texts = Texts {
    message_energy: "Avec votre énergie solaire actuelle, vous pourriez parcourir environ {distance} km avec une consommation de {consumption} kWh/100 km.",
    message_power: "Avec votre puissance solaire actuelle (1 h), vous pourriez parcourir environ {distance} km avec une consommation de {consumption} kWh/100 km.",
    distance: "De quoi rouler environ {value} km en voiture électrique.",
    earth_rounds: "Cela fait {value} tours de la Terre.",
    lisbon_berlin_trips: "De quoi faire {value} trajets de Lisbonne à Berlin ({reference} km chacun).",
    nyc_mexico_trips: "De quoi faire {value} trajets de New York à Mexico ({reference} km chacun).",
    marathon_equivalents: "Cela couvre {value} marathons de {reference} km.",
    fuel_saved_liters: "Environ {value} litres d'essence non brûlés.",
    co2_saved_kg: "Environ {value} kg de CO₂ évités.",
    coffee_cups: "Assez d'énergie pour {value} tasses de café.",
    phone_charges: "De quoi recharger un téléphone {value} fois.",
    laptop_charges: "De quoi recharger un ordinateur portable {value} fois.",
    led_bulb_hours: "Une ampoule LED pourrait briller {value} heures.",
    tv_hours: "De quoi regarder la télévision pendant {value} heures.",
    heat_pump_hours: "Fait tourner une pompe à chaleur pendant {value} heures.",
    fridge_days: "Garde le réfrigérateur au froid pendant {value} jours.",
    washing_cycles: "De quoi faire {value} lessives.",
    dishwasher_cycles: "De quoi lancer {value} cycles de lave-vaisselle.",
    hot_showers: "De quoi prendre {value} douches chaudes.",
    microwave_meals: "Réchauffe {value} plats au micro-ondes.",
    kettle_boils: "Fait bouillir la bouilloire {value} fois.",
    self_consumed_kwh: "Vous avez utilisé directement {value} kWh de votre énergie solaire.",
    self_consumption_ratio: "Vous avez consommé vous-même {value} % de votre production solaire.",
    grid_import_kwh: "Vous avez soutiré {value} kWh du réseau.",
    grid_export_kwh: "Vous avez injecté {value} kWh dans le réseau.",
    grid_net_kwh: "Votre bilan net avec le réseau est de {value} kWh.",
    autarky_ratio: "Le solaire a couvert {value} % de votre consommation.",
};

static IT: Texts = Texts {
    message_energy: "Con la tua energia solare attuale potresti percorrere circa {distance} km con un consumo di {consumption} kWh/100 km.",
    message_power: "Con la tua potenza solare attuale (1 h) potresti percorrere circa {distance} km con un consumo di {consumption} kWh/100 km.",
    distance: "Abbastanza per percorrere circa {value} km in auto elettrica.",
    earth_rounds: "Sono {value} giri intorno alla Terra.",
    lisbon_berlin_trips: "Abbastanza per {value} viaggi da Lisbona a Berlino ({reference} km ciascuno).",
    nyc_mexico_trips: "Abbastanza per {value} viaggi da New York a Città del Messico ({reference} km ciascuno).",
    marathon_equivalents: "Copre {value} maratone da {reference} km.",
    fuel_saved_liters: "Circa {value} litri di benzina non bruciati.",
    co2_saved_kg: "Circa {value} kg di CO₂ evitati.",
    coffee_cups: "Energia sufficiente per {value} tazze di caffè.",
    phone_charges: "Ricarica completamente un telefono {value} volte.",
    laptop_charges: "Ricarica completamente un laptop {value} volte.",
    led_bulb_hours: "Una lampadina LED potrebbe brillare per {value} ore.",
    tv_hours: "Abbastanza per guardare la TV per {value} ore.",
    heat_pump_hours: "Fa funzionare una pompa di calore per {value} ore.",
    fridge_days: "Mantiene freddo il frigorifero per {value} giorni.",
    washing_cycles: "Abbastanza per {value} lavatrici.",
    dishwasher_cycles: "Abbastanza per {value} cicli di lavastoviglie.",
    hot_showers: "Abbastanza per {value} docce calde.",
    microwave_meals: "Riscalda {value} piatti al microonde.",
    kettle_boils: "Fa bollire il bollitore {value} volte.",
    self_consumed_kwh: "Hai usato direttamente {value} kWh della tua energia solare.",
    self_consumption_ratio: "Hai consumato tu stesso il {value} % della tua produzione solare.",
    grid_import_kwh: "Hai prelevato {value} kWh dalla rete.",
    grid_export_kwh: "Hai immesso {value} kWh in rete.",
    grid_net_kwh: "Il tuo saldo netto con la rete è di {value} kWh.",
    autarky_ratio: "Il solare ha coperto il {value} % dei tuoi consumi.",
};

static ES: Texts = Texts {
    message_energy: "Con tu energía solar actual podrías recorrer aproximadamente {distance} km con un consumo de {consumption} kWh/100 km.",
    message_power: "Con tu potencia solar actual (1 h) podrías recorrer aproximadamente {distance} km con un consumo de {consumption} kWh/100 km.",
    distance: "Suficiente para recorrer unos {value} km en coche eléctrico.",
    earth_rounds: "Son {value} vueltas a la Tierra.",
    lisbon_berlin_trips: "Suficiente para {value} viajes de Lisboa a Berlín ({reference} km cada uno).",
    nyc_mexico_trips: "Suficiente para {value} viajes de Nueva York a Ciudad de México ({reference} km cada uno).",
    marathon_equivalents: "Cubre {value} maratones de {reference} km.",
    fuel_saved_liters: "Unos {value} litros de gasolina sin quemar.",
    co2_saved_kg: "Alrededor de {value} kg de CO₂ evitados.",
    coffee_cups: "Energía suficiente para {value} tazas de café.",
    phone_charges: "Carga por completo un teléfono {value} veces.",
    laptop_charges: "Carga por completo un portátil {value} veces.",
    led_bulb_hours: "Una bombilla LED podría lucir {value} horas.",
    tv_hours: "Suficiente para ver la tele durante {value} horas.",
    heat_pump_hours: "Hace funcionar una bomba de calor durante {value} horas.",
    fridge_days: "Mantiene frío el frigorífico durante {value} días.",
    washing_cycles: "Suficiente para {value} coladas.",
    dishwasher_cycles: "Suficiente para {value} ciclos de lavavajillas.",
    hot_showers: "Suficiente para {value} duchas calientes.",
    microwave_meals: "Calienta {value} platos en el microondas.",
    kettle_boils: "Hierve el hervidor {value} veces.",
    self_consumed_kwh: "Usaste directamente {value} kWh de tu energía solar.",
    self_consumption_ratio: "Consumiste tú mismo el {value} % de tu producción solar.",
    grid_import_kwh: "Tomaste {value} kWh de la red.",
    grid_export_kwh: "Vertiste {value} kWh a la red.",
    grid_net_kwh: "Tu balance neto con la red es de {value} kWh.",
    autarky_ratio: "La energía solar cubrió el {value} % de tu consumo.",
};

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag("en"), Language::En);
        assert_eq!(Language::from_tag("en-GB"), Language::En);
        assert_eq!(Language::from_tag("DE"), Language::De);
        assert_eq!(Language::from_tag("de-AT"), Language::De);
        assert_eq!(Language::from_tag("it_IT"), Language::It);
        assert_eq!(Language::from_tag("pt-BR"), Language::En);
        assert_eq!(Language::from_tag(""), Language::En);
    }

    #[test]
    fn test_energy_message() {
        let rendered = message(
            Language::En,
            SourceKind::Energy,
            Kilometers(27.78),
            KilowattHoursPer100Km(18.0),
        );
        assert_eq!(
            rendered,
            "With your current solar energy you could drive about 27.78 km \
             at a consumption of 18.0 kWh/100 km.",
        );
    }

    #[test]
    fn test_power_message_carries_the_window_label() {
        let rendered = message(
            Language::En,
            SourceKind::Power,
            Kilometers(11.11),
            KilowattHoursPer100Km(18.0),
        );
        assert!(rendered.contains("solar power (1 h)"), "{rendered}");
    }

    #[test]
    fn test_german_message() {
        let rendered = message(
            Language::De,
            SourceKind::Energy,
            Kilometers(27.78),
            KilowattHoursPer100Km(18.0),
        );
        assert_eq!(
            rendered,
            "Mit deiner aktuellen Solarenergie könntest du bei einem Verbrauch von \
             18.0 kWh/100 km etwa 27.78 km fahren.",
        );
    }

    #[test]
    fn test_every_template_resolves_completely() {
        for language in [Language::De, Language::En, Language::Fr, Language::It, Language::Es] {
            for key in EnumSet::<MetricKey>::all() {
                if key == MetricKey::Message {
                    continue;
                }
                let rendered = sentence(language, key, 1.0);
                assert!(
                    !rendered.contains(['{', '}']),
                    "unresolved placeholder in {language:?}/{key:?}: {rendered}",
                );
            }
            for kind in [SourceKind::Energy, SourceKind::Power] {
                let rendered =
                    message(language, kind, Kilometers(1.0), KilowattHoursPer100Km(18.0));
                assert!(!rendered.contains(['{', '}']), "{language:?}/{kind:?}: {rendered}");
            }
        }
    }

    #[test]
    fn test_display_value_honors_precision() {
        assert_eq!(display_value(MetricKey::CoffeeCups, 71.428_571), "71.4");
        assert_eq!(display_value(MetricKey::PhoneCharges, 333.0), "333");
        assert_eq!(display_value(MetricKey::EarthRounds, 0.000_693), "0.001");
        assert_eq!(display_value(MetricKey::Distance, 27.78), "27.78");
    }

    #[test]
    fn test_sentence_embeds_reference() {
        let rendered = sentence(Language::En, MetricKey::MarathonEquivalents, 0.66);
        assert_eq!(rendered, "That covers 0.66 marathons of 42.195 km.");
    }
}
