use std::time::Duration;

use chrono::{DateTime, Local};
use reqwest::{
    Client,
    ClientBuilder,
    StatusCode,
    Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::Deserialize;

use crate::prelude::*;

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(access_token: &str, base_url: Url) -> Result<Self> {
        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&format!("Bearer {access_token}"))?,
        )]);
        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut().map_err(|()| anyhow!("invalid base URL"))?.extend(segments);
        Ok(url)
    }

    /// Fetches the current state of the entity.
    ///
    /// [`None`] when the entity is not registered at all.
    #[instrument(skip_all, fields(entity_id = entity_id))]
    pub async fn get_state(&self, entity_id: &str) -> Result<Option<EntityState>> {
        let response = self
            .client
            .get(self.url(&["states", entity_id])?)
            .send()
            .await
            .with_context(|| format!("failed to request the state of `{entity_id}`"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let state: EntityState = response
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("failed to deserialize the state of `{entity_id}`"))?;
        debug!(state = %state.state, last_updated = %state.last_updated_at);
        Ok(Some(state))
    }

    /// Fetches the instance's configured language tag.
    #[instrument(skip_all)]
    pub async fn get_language(&self) -> Result<String> {
        let configuration: Configuration = self
            .client
            .get(self.url(&["config"])?)
            .send()
            .await
            .context("failed to request the instance configuration")?
            .error_for_status()?
            .json()
            .await
            .context("failed to deserialize the instance configuration")?;
        info!(language = %configuration.language);
        Ok(configuration.language)
    }

    /// Creates or updates the entity with the given state and attributes.
    #[instrument(skip_all, fields(entity_id = entity_id))]
    pub async fn post_state(&self, entity_id: &str, body: &serde_json::Value) -> Result {
        self.client
            .post(self.url(&["states", entity_id])?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("failed to post the state of `{entity_id}`"))?
            .error_for_status()
            .with_context(|| format!("the host rejected the state of `{entity_id}`"))?;
        Ok(())
    }
}

#[must_use]
#[derive(Debug, Deserialize)]
pub struct EntityState {
    pub state: String,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(rename = "last_updated")]
    pub last_updated_at: DateTime<Local>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub unit_of_measurement: Option<String>,
}

#[derive(Deserialize)]
struct Configuration {
    language: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_deserialize_entity_state_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "entity_id": "sensor.pv_energy_today",
                "state": "5.21",
                "attributes": {
                    "state_class": "total_increasing",
                    "unit_of_measurement": "kWh",
                    "device_class": "energy",
                    "friendly_name": "PV energy today"
                },
                "last_changed": "2025-10-01T17:08:40.326747+00:00",
                "last_updated": "2025-10-01T17:08:40.326747+00:00"
            }
        "#;
        let state = serde_json::from_str::<EntityState>(RESPONSE)?;
        assert_eq!(state.state, "5.21");
        assert_eq!(state.attributes.unit_of_measurement.as_deref(), Some("kWh"));
        assert_eq!(
            state.last_updated_at,
            Local.timestamp_micros(1_759_338_520_326_747).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_deserialize_entity_state_without_unit_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "entity_id": "sensor.pv_power",
                "state": "unavailable",
                "attributes": {},
                "last_changed": "2025-10-01T17:08:40.326747+00:00",
                "last_updated": "2025-10-01T17:08:40.326747+00:00"
            }
        "#;
        let state = serde_json::from_str::<EntityState>(RESPONSE)?;
        assert_eq!(state.state, "unavailable");
        assert_eq!(state.attributes.unit_of_measurement, None);
        Ok(())
    }

    #[test]
    fn test_deserialize_configuration_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "latitude": 52.3731,
                "longitude": 4.8922,
                "elevation": 0,
                "unit_system": {"length": "km", "mass": "g", "temperature": "°C", "volume": "L"},
                "location_name": "Home",
                "time_zone": "Europe/Amsterdam",
                "language": "de",
                "version": "2025.5.3"
            }
        "#;
        let configuration = serde_json::from_str::<Configuration>(RESPONSE)?;
        assert_eq!(configuration.language, "de");
        Ok(())
    }
}
