mod show;
mod watch;

use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::{Client, Url};

use crate::{
    api::home_assistant,
    cli::{show::ShowArgs, watch::WatchArgs},
    core::texts::Language,
    prelude::*,
    quantity::rate::KilowattHoursPer100Km,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: poll the source sensors, derive the metrics, and publish them back.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Derive the metrics from readings given on the command line and print them.
    #[clap(name = "show")]
    Show(Box<ShowArgs>),
}

#[derive(Parser)]
pub struct HomeAssistantConnectionArgs {
    /// Home Assistant API access token.
    #[clap(long = "home-assistant-access-token", env = "HOME_ASSISTANT_ACCESS_TOKEN")]
    pub access_token: String,

    /// Home Assistant API base URL. For example: `http://localhost:8123/api`.
    #[clap(long = "home-assistant-api-base-url", env = "HOME_ASSISTANT_API_BASE_URL")]
    pub base_url: Url,
}

impl HomeAssistantConnectionArgs {
    pub fn try_new_api(&self) -> Result<home_assistant::Api> {
        home_assistant::Api::try_new(&self.access_token, self.base_url.clone())
    }
}

#[derive(Parser)]
pub struct SettingsArgs {
    /// Electric car consumption the distance conversion divides by.
    #[clap(
        long = "consumption-kwh-per-100km",
        env = "CONSUMPTION_KWH_PER_100KM",
        default_value = "18.0",
        value_parser = parse_consumption,
    )]
    pub consumption: KilowattHoursPer100Km,

    /// Sentence language. Falls back to the instance language where available.
    #[clap(long, env = "SENTENCE_LANGUAGE", value_enum)]
    pub language: Option<Language>,
}

fn parse_consumption(value: &str) -> Result<KilowattHoursPer100Km, String> {
    let rate: f64 = value.parse().map_err(|error: std::num::ParseFloatError| error.to_string())?;
    if (1.0..=100.0).contains(&rate) {
        Ok(KilowattHoursPer100Km(rate))
    } else {
        Err(format!("the consumption must be between 1 and 100 kWh/100 km, got `{value}`"))
    }
}

#[derive(Parser)]
pub struct HeartbeatArgs {
    /// URL to `POST` after every cycle.
    #[clap(long = "heartbeat-url", env = "HEARTBEAT_URL")]
    pub url: Option<Url>,
}

impl HeartbeatArgs {
    /// Failures are logged, never propagated.
    pub async fn send(&self) {
        if let Some(url) = &self.url
            && let Err(error) = Self::send_fallible(url.clone()).await
        {
            warn!("failed to send the heartbeat: {error:#}");
        }
    }

    #[instrument(skip_all)]
    async fn send_fallible(url: Url) -> Result {
        info!("sending a heartbeat…");
        Client::builder().timeout(Duration::from_secs(3)).build()?.post(url).send().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_consumption() {
        assert!(parse_consumption("18.0").is_ok());
        assert!(parse_consumption("1").is_ok());
        assert!(parse_consumption("100").is_ok());
        assert!(parse_consumption("0").is_err());
        assert!(parse_consumption("-5").is_err());
        assert!(parse_consumption("101").is_err());
        assert!(parse_consumption("NaN").is_err());
        assert!(parse_consumption("fast").is_err());
    }
}
