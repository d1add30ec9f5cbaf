use crate::domain::model::MovieRecord;
use crate::utils::error::CatalogError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Read-only access to a movie collection. Absence is an empty result,
/// never an error.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Number of movies in the whole collection.
    async fn total_count(&self) -> CatalogResult<u64>;

    async fn count_by_year(&self, year: i64) -> CatalogResult<u64>;

    /// Distinct genres of all movies released in `year`, in the store's
    /// enumeration order.
    async fn genres_for_year(&self, year: i64) -> CatalogResult<Vec<String>>;

    /// A uniformly random movie from `year` tagged with `genre`.
    async fn sample_one(&self, year: i64, genre: &str) -> CatalogResult<Option<MovieRecord>>;

    /// Up to `count` distinct random movies with `min_year < year < max_year`
    /// tagged with `genre`.
    async fn sample_many(
        &self,
        min_year_exclusive: i64,
        max_year_exclusive: i64,
        genre: &str,
        count: usize,
    ) -> CatalogResult<Vec<MovieRecord>>;
}

#[async_trait]
impl<T: Catalog + ?Sized> Catalog for Box<T> {
    async fn total_count(&self) -> CatalogResult<u64> {
        (**self).total_count().await
    }

    async fn count_by_year(&self, year: i64) -> CatalogResult<u64> {
        (**self).count_by_year(year).await
    }

    async fn genres_for_year(&self, year: i64) -> CatalogResult<Vec<String>> {
        (**self).genres_for_year(year).await
    }

    async fn sample_one(&self, year: i64, genre: &str) -> CatalogResult<Option<MovieRecord>> {
        (**self).sample_one(year, genre).await
    }

    async fn sample_many(
        &self,
        min_year_exclusive: i64,
        max_year_exclusive: i64,
        genre: &str,
        count: usize,
    ) -> CatalogResult<Vec<MovieRecord>> {
        (**self)
            .sample_many(min_year_exclusive, max_year_exclusive, genre, count)
            .await
    }
}

/// Where the movies come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File {
        path: PathBuf,
    },
    Mongo {
        uri: String,
        database: String,
        collection: String,
    },
    DataApi {
        endpoint: String,
        api_key: String,
        data_source: String,
        database: String,
        collection: String,
    },
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_source(&self) -> crate::utils::error::Result<CatalogSource>;
    fn query_timeout(&self) -> Duration;
    fn seed(&self) -> Option<u64>;
    fn preset_year(&self) -> Option<i64>;
}
