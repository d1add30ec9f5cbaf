use crate::adapters::pipeline;
use crate::core::{Catalog, CatalogResult, MovieRecord};
use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde_json::Value;
use std::time::Duration;

/// Catalog backed by a MongoDB deployment reached through a `mongodb://` or
/// `mongodb+srv://` connection string.
pub struct MongoCatalog {
    collection: Collection<Document>,
}

impl MongoCatalog {
    /// Parses the connection string and prepares the client. The first
    /// query opens the connection; `timeout` bounds server selection.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options
            .app_name
            .get_or_insert_with(|| env!("CARGO_PKG_NAME").to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        Ok(Self {
            collection: client.database(database).collection(collection),
        })
    }

    async fn aggregate(&self, stages: Vec<Document>) -> CatalogResult<Vec<Value>> {
        tracing::debug!("Aggregating on {}: {:?}", self.collection.namespace(), stages);

        let mut cursor = self.collection.aggregate(stages).await?;
        let mut documents = Vec::new();
        while cursor.advance().await? {
            let document: Document = cursor.deserialize_current()?;
            documents.push(pipeline::to_json(document));
        }

        tracing::debug!("Aggregation returned {} documents", documents.len());
        Ok(documents)
    }
}

#[async_trait]
impl Catalog for MongoCatalog {
    async fn total_count(&self) -> CatalogResult<u64> {
        let documents = self.aggregate(pipeline::total_count()).await?;
        Ok(pipeline::read_count(&documents))
    }

    async fn count_by_year(&self, year: i64) -> CatalogResult<u64> {
        let documents = self.aggregate(pipeline::count_by_year(year)).await?;
        Ok(pipeline::read_count(&documents))
    }

    async fn genres_for_year(&self, year: i64) -> CatalogResult<Vec<String>> {
        let documents = self.aggregate(pipeline::genres_for_year(year)).await?;
        Ok(pipeline::read_genres(&documents))
    }

    async fn sample_one(&self, year: i64, genre: &str) -> CatalogResult<Option<MovieRecord>> {
        let documents = self.aggregate(pipeline::sample_one(year, genre)).await?;
        Ok(pipeline::read_movies(&documents).into_iter().next())
    }

    async fn sample_many(
        &self,
        min_year_exclusive: i64,
        max_year_exclusive: i64,
        genre: &str,
        count: usize,
    ) -> CatalogResult<Vec<MovieRecord>> {
        let documents = self
            .aggregate(pipeline::sample_many(
                min_year_exclusive,
                max_year_exclusive,
                genre,
                count,
            ))
            .await?;
        Ok(pipeline::read_movies(&documents))
    }
}
