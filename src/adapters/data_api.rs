use crate::adapters::pipeline;
use crate::core::{Catalog, CatalogResult, MovieRecord};
use crate::utils::error::CatalogError;
use async_trait::async_trait;
use mongodb::bson::Document;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DATA_SOURCE: &str = "Cluster0";

/// Catalog backed by a document store's HTTP data API. Every query is an
/// aggregation pipeline posted to `{endpoint}/action/aggregate`.
pub struct DataApiCatalog {
    client: Client,
    aggregate_url: Url,
    api_key: String,
    data_source: String,
    database: String,
    collection: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AggregateRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    pipeline: Value,
}

#[derive(Debug, Deserialize)]
struct AggregateResponse {
    #[serde(default)]
    documents: Vec<Value>,
}

impl DataApiCatalog {
    pub fn new(
        endpoint: &str,
        api_key: String,
        data_source: String,
        database: String,
        collection: String,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let base = format!("{}/", endpoint.trim_end_matches('/'));
        let aggregate_url = Url::parse(&base)
            .and_then(|url| url.join("action/aggregate"))
            .map_err(|e| CatalogError::Malformed {
                message: format!("invalid data API endpoint '{}': {}", endpoint, e),
            })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            aggregate_url,
            api_key,
            data_source,
            database,
            collection,
        })
    }

    async fn aggregate(&self, stages: Vec<Document>) -> CatalogResult<Vec<Value>> {
        let pipeline = pipeline::pipeline_json(stages);
        tracing::debug!("Aggregating on {}.{}: {}", self.database, self.collection, pipeline);

        let request = AggregateRequest {
            data_source: &self.data_source,
            database: &self.database,
            collection: &self.collection,
            pipeline,
        };
        let response = self
            .client
            .post(self.aggregate_url.clone())
            .header("api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AggregateResponse = serde_json::from_str(&body)?;
        tracing::debug!("Aggregation returned {} documents", parsed.documents.len());
        Ok(parsed.documents)
    }
}

#[async_trait]
impl Catalog for DataApiCatalog {
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
