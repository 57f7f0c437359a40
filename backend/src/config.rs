//! Configuration management for the Cat Box Planner
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CBP__ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::models::{
    BoxCatalog, BoxTypeConfig, PlanSettings, WeeklyPlan, DEFAULT_MEALS_PER_DAY,
    DEFAULT_SAFETY_MARGIN, DEFAULT_SPLIT_DAYS,
};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Defaults for plans that omit settings
    pub planner: PlannerConfig,

    /// Order storage
    pub storage: StorageConfig,

    /// Log output
    pub logging: LoggingConfig,

    /// Replaces the built-in box catalog when present
    #[serde(default)]
    pub box_types: Option<Vec<BoxTypeConfig>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Fraction packed on top of the computed need
    pub safety_margin: f64,

    /// Wet feedings per pouch or can
    pub split_days: u8,

    pub meals_per_day: u8,

    /// 1-based meal slot that receives the wet food
    pub wet_meal_index: u8,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    JsonFile,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Orders file for the json_file backend
    pub orders_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Filter used when RUST_LOG is unset
    pub filter: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CBP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CBP__ prefix)
            .add_source(
                Environment::with_prefix("CBP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Code defaults only
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?.build()?.try_deserialize()
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("planner.safety_margin", DEFAULT_SAFETY_MARGIN)?
            .set_default("planner.split_days", i64::from(DEFAULT_SPLIT_DAYS))?
            .set_default("planner.meals_per_day", i64::from(DEFAULT_MEALS_PER_DAY))?
            .set_default("planner.wet_meal_index", 1)?
            .set_default("storage.backend", "json_file")?
            .set_default("storage.orders_path", "data/orders.json")?
            .set_default("logging.json", false)?
            .set_default("logging.filter", "cbp=info,cbp_backend=info,shared=info")
    }

    /// Box catalog from configuration, or the built-in tiers
    pub fn catalog(&self) -> BoxCatalog {
        match &self.box_types {
            Some(box_types) if !box_types.is_empty() => BoxCatalog::new(box_types.clone()),
            _ => BoxCatalog::default(),
        }
    }
}

impl PlannerConfig {
    /// Settings applied when a plan request omits them
    pub fn settings(&self) -> PlanSettings {
        PlanSettings {
            split_days: self.split_days,
            safety_margin: self.safety_margin,
            ..PlanSettings::default()
        }
    }

    /// Weekly plan applied when a plan request omits it; no wet days
    pub fn weekly_plan(&self) -> WeeklyPlan {
        WeeklyPlan {
            meals_per_day: self.meals_per_day,
            wet_meal_index: self.wet_meal_index,
            ..WeeklyPlan::default()
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            safety_margin: DEFAULT_SAFETY_MARGIN,
            split_days: DEFAULT_SPLIT_DAYS,
            meals_per_day: DEFAULT_MEALS_PER_DAY,
            wet_meal_index: 1,
        }
    }
}
