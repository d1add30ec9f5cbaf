// Adapters layer: concrete catalog implementations for the stores a quiz can read from.

pub mod data_api;
pub mod memory;
pub mod mongo;
mod pipeline;

use crate::core::{Catalog, CatalogSource, ConfigProvider, MovieRecord};
use crate::utils::error::Result;
use serde_json::Value;

pub use data_api::DataApiCatalog;
pub use memory::MemoryCatalog;
pub use mongo::MongoCatalog;

pub const DEFAULT_DATABASE: &str = "general";
pub const DEFAULT_COLLECTION: &str = "movies";

/// Opens the catalog described by `config`.
pub async fn build_catalog<C: ConfigProvider>(config: &C) -> Result<Box<dyn Catalog>> {
    match config.catalog_source()? {
        CatalogSource::File { path } => {
            tracing::debug!("Using file catalog at {}", path.display());
            Ok(Box::new(MemoryCatalog::from_file(&path, config.seed())?))
        }
        CatalogSource::Mongo {
            uri,
            database,
            collection,
        } => {
            // the connection string may carry credentials, so it is not logged
            tracing::debug!("Using MongoDB catalog {}.{}", database, collection);
            Ok(Box::new(
                MongoCatalog::connect(&uri, &database, &collection, config.query_timeout())
                    .await?,
            ))
        }
        CatalogSource::DataApi {
            endpoint,
            api_key,
            data_source,
            database,
            collection,
        } => {
            tracing::debug!("Using data API catalog {}/{} at {}", database, collection, endpoint);
            Ok(Box::new(DataApiCatalog::new(
                &endpoint,
                api_key,
                data_source,
                database,
                collection,
                config.query_timeout(),
            )?))
        }
    }
}

/// Reads an integer that may be plain JSON or extended JSON
/// (`{"$numberInt": "1995"}` / `{"$numberLong": "1995"}`).
pub(crate) fn integer_field(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::Object(obj) => obj
            .get("$numberInt")
            .or_else(|| obj.get("$numberLong"))
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        _ => None,
    }
}

/// Converts a stored movie document into a record, skipping documents whose
/// title or year are unusable.
pub(crate) fn movie_from_document(document: &Value) -> Option<MovieRecord> {
    let Some(title) = document.get("title").and_then(Value::as_str) else {
        tracing::warn!("Skipping movie document without a title");
        return None;
    };
    let Some(year) = document.get("year").and_then(integer_field) else {
        tracing::warn!("Skipping '{}': year is missing or not an integer", title);
        return None;
    };
    let genres = document
        .get("genres")
        .and_then(Value::as_array)
        .map(|genres| {
            genres
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(MovieRecord {
        title: title.to_string(),
        year,
        genres,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_field_accepts_extended_json() {
        assert_eq!(integer_field(&json!(1995)), Some(1995));
        assert_eq!(integer_field(&json!(1995.0)), Some(1995));
        assert_eq!(integer_field(&json!({"$numberInt": "1995"})), Some(1995));
        assert_eq!(integer_field(&json!({"$numberLong": "2001"})), Some(2001));
        assert_eq!(integer_field(&json!("2012è")), None);
    }

    #[test]
    fn test_movie_from_document() {
        let movie = movie_from_document(&json!({
            "_id": {"$oid": "573a1390f29313caabcd4135"},
            "title": "Blacksmith Scene",
            "year": 1893,
            "genres": ["Short"]
        }))
        .unwrap();
        assert_eq!(movie, MovieRecord::new("Blacksmith Scene", 1893, &["Short"]));

        let no_genres = movie_from_document(&json!({"title": "Untagged", "year": 1950})).unwrap();
        assert!(no_genres.genres.is_empty());

        assert!(movie_from_document(&json!({"title": "Bad", "year": "1999è"})).is_none());
        assert!(movie_from_document(&json!({"year": 1999})).is_none());
    }
}
