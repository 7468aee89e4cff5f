use std::time::Duration;

use bon::Builder;
use chrono::Local;
use clap::Parser;
use serde_json::json;
use tokio::{
    time::{MissedTickBehavior, interval},
    try_join,
};

use crate::{
    api::home_assistant::Api,
    cli::{HeartbeatArgs, HomeAssistantConnectionArgs, SettingsArgs},
    core::{
        bundle::{Metric, MetricBundle, MetricKey},
        engine,
        reading::{Reading, Unit},
        settings::Settings,
        texts::Language,
    },
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    /// Polling interval.
    #[clap(long, env = "POLLING_INTERVAL", default_value = "30s")]
    polling_interval: humantime::Duration,

    /// Prefix of the published entity IDs.
    #[clap(long, env = "ENTITY_PREFIX", default_value = "sunfacts")]
    entity_prefix: String,

    /// Entity ID of the solar production sensor.
    #[clap(long = "pv-entity-id", env = "PV_ENTITY_ID")]
    pv_entity_id: String,

    /// Entity ID of the grid export meter. Enables the self-consumption metrics.
    #[clap(long = "grid-export-entity-id", env = "GRID_EXPORT_ENTITY_ID")]
    grid_export_entity_id: Option<String>,

    /// Entity ID of the grid import meter. Enables the grid and autarky metrics.
    #[clap(long = "grid-import-entity-id", env = "GRID_IMPORT_ENTITY_ID")]
    grid_import_entity_id: Option<String>,

    /// Derive and log the metrics without publishing them back.
    #[clap(long)]
    dry_run: bool,

    #[clap(flatten)]
    connection: HomeAssistantConnectionArgs,

    #[clap(flatten)]
    settings: SettingsArgs,

    #[clap(flatten)]
    heartbeat: HeartbeatArgs,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let api = self.connection.try_new_api()?;
        let language = match self.settings.language {
            Some(language) => language,
            None => Language::from_tag(&api.get_language().await?),
        };
        let settings = Settings::try_new(self.settings.consumption, language)?;

        Watcher::builder()
            .api(api)
            .polling_interval(self.polling_interval)
            .entity_prefix(self.entity_prefix)
            .pv_entity_id(self.pv_entity_id)
            .maybe_grid_export_entity_id(self.grid_export_entity_id)
            .maybe_grid_import_entity_id(self.grid_import_entity_id)
            .dry_run(self.dry_run)
            .settings(settings)
            .heartbeat(self.heartbeat)
            .build()
            .run()
            .await
    }
}

#[derive(Builder)]
struct Watcher {
    api: Api,

    #[builder(into)]
    polling_interval: Duration,

    entity_prefix: String,
    pv_entity_id: String,
    grid_export_entity_id: Option<String>,
    grid_import_entity_id: Option<String>,
    dry_run: bool,
    settings: Settings,
    heartbeat: HeartbeatArgs,
}

impl Watcher {
    async fn run(self) -> Result {
        let mut interval = interval(self.polling_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_readings = None;

        loop {
            interval.tick().await;

            let readings = self.fetch().await?;
            if last_readings.as_ref() == Some(&readings) {
                debug!("nothing changed");
            } else {
                let bundle = engine::evaluate(
                    readings.pv,
                    readings.grid_import,
                    readings.grid_export,
                    &self.settings,
                    Local::now(),
                );
                self.publish(&bundle).await?;
                last_readings = Some(readings);
            }

            self.heartbeat.send().await;
        }
    }

    #[instrument(skip_all)]
    async fn fetch(&self) -> Result<SourceReadings> {
        let (pv, grid_import, grid_export) = try_join!(
            self.read(Some(&self.pv_entity_id)),
            self.read(self.grid_import_entity_id.as_deref()),
            self.read(self.grid_export_entity_id.as_deref()),
        )?;
        Ok(SourceReadings { pv, grid_import, grid_export })
    }

    async fn read(&self, entity_id: Option<&str>) -> Result<Option<Reading>> {
        let Some(entity_id) = entity_id else {
            return Ok(None);
        };
        let Some(state) = self.api.get_state(entity_id).await? else {
            warn!(entity_id = entity_id, "the entity is not registered");
            return Ok(None);
        };
        let unit = state.attributes.unit_of_measurement.as_deref().and_then(Unit::from_symbol);
        Ok(Reading::try_parse(&state.state, unit))
    }

    #[instrument(skip_all, fields(available = bundle.available))]
    async fn publish(&self, bundle: &MetricBundle) -> Result {
        for metric in bundle.metrics() {
            let entity_id = format!("sensor.{}_{}", self.entity_prefix, metric.key.as_str());
            if self.dry_run {
                debug!(entity_id = %entity_id, state = %metric.state());
            } else {
                self.api.post_state(&entity_id, &self.build_state_body(bundle, metric)).await?;
            }
        }
        if self.dry_run {
            info!("dry run, nothing published");
        } else {
            info!("published!");
        }
        Ok(())
    }

    fn build_state_body(&self, bundle: &MetricBundle, metric: &Metric) -> serde_json::Value {
        let mut attributes = json!({
            "friendly_name": metric.key.friendly_name(),
            "icon": metric.key.icon(),
            "unit_of_measurement": metric.key.unit_symbol(),
            "state_class": metric.key.state_class(),
            "text": metric.text,
            "calculated_at": bundle.calculated_at,
        });
        // The distance sensor doubles as the aggregate: its attributes carry
        // the entire bundle and the derivation diagnostics for dashboards
        // that want a single entity.
        if metric.key == MetricKey::Distance {
            attributes["details"] = bundle.to_json();
            attributes["pv_entity_id"] = json!(self.pv_entity_id);
            attributes["consumption_kwh_per_100km"] = json!(self.settings.consumption);
            attributes["source_kind"] = json!(bundle.source_kind);
        }
        json!({
            "state": metric.state(),
            "attributes": attributes,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct SourceReadings {
    pv: Option<Reading>,
    grid_import: Option<Reading>,
    grid_export: Option<Reading>,
}
