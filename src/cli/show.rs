use chrono::Local;
use clap::Parser;

use crate::{
    cli::SettingsArgs,
    core::{
        engine,
        reading::{Reading, Unit},
        settings::Settings,
        texts::Language,
    },
    prelude::*,
    quantity::energy::KilowattHours,
    tables::build_bundle_table,
};

#[derive(Parser)]
pub struct ShowArgs {
    /// Raw production state, as the host would report it.
    #[clap(long = "pv-state")]
    pv_state: String,

    /// Unit of the production state. Omitted means a raw kilowatt-hour figure.
    #[clap(long = "pv-unit", value_enum)]
    pv_unit: Option<Unit>,

    /// Grid export meter reading in kilowatt-hours.
    #[clap(long = "grid-export-kwh")]
    grid_export: Option<KilowattHours>,

    /// Grid import meter reading in kilowatt-hours.
    #[clap(long = "grid-import-kwh")]
    grid_import: Option<KilowattHours>,

    /// Print the bundle as JSON instead of a table.
    #[clap(long)]
    json: bool,

    #[clap(flatten)]
    settings: SettingsArgs,
}

impl ShowArgs {
    pub fn run(self) -> Result {
        let settings = Settings::try_new(
            self.settings.consumption,
            self.settings.language.unwrap_or(Language::En),
        )?;
        let pv = Reading::try_parse(&self.pv_state, self.pv_unit);
        let grid_import = self.grid_import.map(Self::kilowatt_hour_reading);
        let grid_export = self.grid_export.map(Self::kilowatt_hour_reading);
        let bundle = engine::evaluate(pv, grid_import, grid_export, &settings, Local::now());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&bundle.to_json())?);
        } else {
            println!("{}", build_bundle_table(&bundle));
        }
        Ok(())
    }

    fn kilowatt_hour_reading(value: KilowattHours) -> Reading {
        Reading { value: value.0, unit: Some(Unit::KilowattHours) }
    }
}
