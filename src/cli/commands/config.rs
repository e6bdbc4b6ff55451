//! Implementation of the `tilewatch config` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    #[serde(flatten)]
    pub config: Config,
}

impl ConfigOutput {
    /// Copy of `config` with the API token masked.
    pub fn redacted(config: &Config) -> Self {
        let mut config = config.clone();
        if config.travis.token.is_some() {
            config.travis.token = Some("********".to_string());
        }
        Self { config }
    }
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    output(&ConfigOutput::redacted(config), json_mode);
    Ok(())
}
