use crate::config::toml_config::{GameSettings, TomlConfig};
use crate::config::CatalogSettings;
use crate::core::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "movie-quiz")]
#[command(about = "Guess which of three movies was released in a given year")]
pub struct CliConfig {
    /// Path to a TOML configuration file; command line flags override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Play against a local catalog file (.json, .jsonl or .csv)
    #[arg(long)]
    pub movies_file: Option<String>,

    /// MongoDB connection string, or the base URL of an HTTP data API
    #[arg(long, env = "DB_URI", hide_env_values = true)]
    pub endpoint: Option<String>,

    /// Data API key; not used with a connection string
    #[arg(long, env = "DB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Data API cluster name
    #[arg(long)]
    pub data_source: Option<String>,

    #[arg(long)]
    pub database: Option<String>,

    #[arg(long)]
    pub collection: Option<String>,

    /// Deadline for each catalog query
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Seed for reproducible rounds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the year prompt
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            kind: None,
            path: self.movies_file.clone(),
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            data_source: self.data_source.clone(),
            database: self.database.clone(),
            collection: self.collection.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }

    /// Applies flags given on the command line on top of a file configuration.
    pub fn overlay(&self, mut file: TomlConfig) -> TomlConfig {
        let catalog = &mut file.catalog;
        if self.movies_file.is_some() {
            catalog.path = self.movies_file.clone();
            catalog.kind = None;
        }
        for (target, flag) in [
            (&mut catalog.endpoint, &self.endpoint),
            (&mut catalog.api_key, &self.api_key),
            (&mut catalog.data_source, &self.data_source),
            (&mut catalog.database, &self.database),
            (&mut catalog.collection, &self.collection),
        ] {
            if flag.is_some() {
                *target = flag.clone();
            }
        }
        if self.timeout_seconds.is_some() {
            catalog.timeout_seconds = self.timeout_seconds;
        }

        let game = file.game.get_or_insert_with(GameSettings::default);
        if self.seed.is_some() {
            game.seed = self.seed;
        }
        if self.year.is_some() {
            game.year = self.year;
        }
        file
    }
}

impl ConfigProvider for CliConfig {
    fn catalog_source(&self) -> Result<CatalogSource> {
        self.catalog_settings().source()
    }

    fn query_timeout(&self) -> Duration {
        self.catalog_settings().timeout()
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn preset_year(&self) -> Option<i64> {
        self.year
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.catalog_settings().validate()
    }
}
