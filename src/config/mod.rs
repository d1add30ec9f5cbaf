#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::adapters::data_api::DEFAULT_DATA_SOURCE;
use crate::adapters::{DEFAULT_COLLECTION, DEFAULT_DATABASE};
use crate::core::CatalogSource;
use crate::core::round_builder::DEFAULT_QUERY_TIMEOUT;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_connection_string, validate_file_extension, validate_non_empty_string, validate_path,
    validate_positive_number, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const CATALOG_FILE_EXTENSIONS: [&str; 3] = ["json", "jsonl", "csv"];
pub const DATA_API_SCHEMES: [&str; 2] = ["http", "https"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    File,
    Mongo,
    DataApi,
}

/// Where to read movies from. Shared by the command line and the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    pub kind: Option<CatalogKind>,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub data_source: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl CatalogSettings {
    /// Without an explicit `kind`, a `path` selects the file catalog and an
    /// http(s) endpoint the data API. Anything else is a MongoDB connection string.
    pub fn kind(&self) -> CatalogKind {
        if let Some(kind) = self.kind {
            return kind;
        }
        if self.path.is_some() {
            return CatalogKind::File;
        }
        match self.endpoint.as_deref().and_then(|e| e.split_once("://")) {
            Some((scheme, _)) if DATA_API_SCHEMES.contains(&scheme) => CatalogKind::DataApi,
            _ => CatalogKind::Mongo,
        }
    }

    fn database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
    }

    fn collection(&self) -> String {
        self.collection
            .clone()
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_QUERY_TIMEOUT)
    }

    pub fn source(&self) -> Result<CatalogSource> {
        self.validate()?;
        match self.kind() {
            CatalogKind::File => {
                let path = validate_required_field("catalog.path", &self.path)?;
                Ok(CatalogSource::File {
                    path: PathBuf::from(path),
                })
            }
            CatalogKind::Mongo => Ok(CatalogSource::Mongo {
                uri: validate_required_field("catalog.endpoint", &self.endpoint)?.clone(),
                database: self.database(),
                collection: self.collection(),
            }),
            CatalogKind::DataApi => Ok(CatalogSource::DataApi {
                endpoint: validate_required_field("catalog.endpoint", &self.endpoint)?.clone(),
                api_key: validate_required_field("catalog.api_key", &self.api_key)?.clone(),
                data_source: self
                    .data_source
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string()),
                database: self.database(),
                collection: self.collection(),
            }),
        }
    }
}

impl Validate for CatalogSettings {
    fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("catalog.timeout_seconds", timeout, 1)?;
        }

        match self.kind() {
            CatalogKind::File => {
                let path = validate_required_field("catalog.path", &self.path)?;
                validate_path("catalog.path", path)?;
                validate_file_extension("catalog.path", path, &CATALOG_FILE_EXTENSIONS)?;
            }
            CatalogKind::Mongo => {
                let uri = validate_required_field("catalog.endpoint", &self.endpoint)?;
                validate_connection_string("catalog.endpoint", uri)?;
            }
            CatalogKind::DataApi => {
                let endpoint = validate_required_field("catalog.endpoint", &self.endpoint)?;
                validate_url("catalog.endpoint", endpoint, &DATA_API_SCHEMES)?;
                let api_key = validate_required_field("catalog.api_key", &self.api_key)?;
                validate_non_empty_string("catalog.api_key", api_key)?;
                if let Some(data_source) = &self.data_source {
                    validate_non_empty_string("catalog.data_source", data_source)?;
                }
            }
        }

        if self.kind() != CatalogKind::File {
            for (field, value) in [
                ("catalog.database", &self.database),
                ("catalog.collection", &self.collection),
            ] {
                if let Some(value) = value {
                    validate_non_empty_string(field, value)?;
                }
            }
        }
        Ok(())
    }
}
