//! Game configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock game: one worker chasing a Resident with the built-in
//! catalog and a one-second tick.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::actor::worker::EffectPolicy;
use crate::blueprint::{catalog::Catalog, model::Value};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Resource whose first unit ends the game.
    pub goal: String,
    pub tick_interval_ms: u64,
    /// Worker names, processed in this order every tick.
    pub workers: Vec<String>,
    pub effect_policy: EffectPolicy,
    /// Stop after this many ticks even if the goal was not reached.
    pub max_ticks: Option<u64>,
    pub resources: Vec<Value<i64>>,
    pub buildings: Vec<Value<u32>>,
    pub catalog: Catalog,
    pub logging: LoggingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal: "Resident".to_string(),
            tick_interval_ms: 1000,
            workers: vec!["Bob".to_string()],
            effect_policy: EffectPolicy::default(),
            max_ticks: None,
            resources: ["Wood", "Stone", "Ore", "Pipe", "Resident"]
                .into_iter()
                .map(|name| Value::new(name, 0))
                .collect(),
            buildings: [
                ("Forest", 1),
                ("Quarry", 0),
                ("Mine", 0),
                ("Factory", 0),
                ("House", 0),
            ]
            .into_iter()
            .map(|(name, count)| Value::new(name, count))
            .collect(),
            catalog: Catalog::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit log lines as JSON instead of human-readable text.
    pub json: bool,
}

impl GameConfig {
    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Json`] if it is not valid JSON for this schema and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goal.is_empty() {
            return Err(invalid("goal must not be empty"));
        }
        if self.workers.is_empty() {
            return Err(invalid("at least one worker is required"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be at least 1"));
        }
        if let Some(task) = self.catalog.tasks.iter().find(|t| t.duration_ticks == 0) {
            return Err(invalid(&format!(
                "task {} must last at least one tick",
                task.name
            )));
        }
        for task in &self.catalog.tasks {
            if let Some(name) = repeated_name(&task.consumes) {
                return Err(invalid(&format!("task {} consumes {name} twice", task.name)));
            }
            if let Some(name) = repeated_name(&task.produces) {
                return Err(invalid(&format!("task {} produces {name} twice", task.name)));
            }
        }
        for building in &self.catalog.buildings {
            if let Some(name) = repeated_name(&building.cost) {
                return Err(invalid(&format!(
                    "building {} lists {name} twice in its cost",
                    building.name
                )));
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn repeated_name(values: &[Value<u32>]) -> Option<&str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|value| value.name.as_str())
        .find(|name| !seen.insert(*name))
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}
