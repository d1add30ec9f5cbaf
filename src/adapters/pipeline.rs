// Aggregation pipelines run by the remote catalogs, and readers for their results.

use crate::adapters::{integer_field, movie_from_document};
use crate::core::MovieRecord;
use mongodb::bson::{doc, Bson, Document};
use serde_json::Value;

const COUNT_FIELD: &str = "moviecount";

pub(crate) fn total_count() -> Vec<Document> {
    vec![doc! { "$count": COUNT_FIELD }]
}

pub(crate) fn count_by_year(year: i64) -> Vec<Document> {
    vec![doc! { "$match": { "year": year } }, doc! { "$count": COUNT_FIELD }]
}

pub(crate) fn genres_for_year(year: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "year": year } },
        doc! { "$unwind": "$genres" },
        doc! { "$group": { "_id": "$genres" } },
    ]
}

pub(crate) fn sample_one(year: i64, genre: &str) -> Vec<Document> {
    sample(doc! { "year": year, "genres": genre }, 1)
}

pub(crate) fn sample_many(
    min_year_exclusive: i64,
    max_year_exclusive: i64,
    genre: &str,
    count: usize,
) -> Vec<Document> {
    sample(
        doc! {
            "year": { "$gt": min_year_exclusive, "$lt": max_year_exclusive },
            "genres": genre
        },
        count,
    )
}

fn sample(filter: Document, size: usize) -> Vec<Document> {
    let size = i64::try_from(size).unwrap_or(i64::MAX);
    vec![doc! { "$match": filter }, doc! { "$sample": { "size": size } }]
}

/// Relaxed extended JSON, the shape the data API expects and returns.
pub(crate) fn to_json(document: Document) -> Value {
    Bson::Document(document).into_relaxed_extjson()
}

pub(crate) fn pipeline_json(pipeline: Vec<Document>) -> Value {
    Value::Array(pipeline.into_iter().map(to_json).collect())
}

/// `$count` emits no document at all when nothing matched.
pub(crate) fn read_count(documents: &[Value]) -> u64 {
    documents
        .first()
        .and_then(|doc| doc.get(COUNT_FIELD))
        .and_then(integer_field)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0)
}

pub(crate) fn read_genres(documents: &[Value]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|doc| doc.get("_id").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

pub(crate) fn read_movies(documents: &[Value]) -> Vec<MovieRecord> {
    documents.iter().filter_map(movie_from_document).collect()
}
