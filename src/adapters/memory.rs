use crate::adapters::movie_from_document;
use crate::core::{Catalog, CatalogResult, MovieRecord};
use crate::utils::error::CatalogError;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Catalog held entirely in memory, loaded from a file or built in tests.
pub struct MemoryCatalog {
    movies: Vec<MovieRecord>,
    rng: Mutex<StdRng>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    year: String,
    #[serde(default)]
    genres: String,
}

impl MemoryCatalog {
    pub fn from_records(movies: Vec<MovieRecord>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            movies,
            rng: Mutex::new(rng),
        }
    }

    /// Loads `.json` (array), `.jsonl` (one document per line) or `.csv`
    /// (`title,year,genres` with `|` between genres).
    pub fn from_file<P: AsRef<Path>>(path: P, seed: Option<u64>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let movies = match extension {
            "json" => Self::parse_json(&content)?,
            "jsonl" => Self::parse_json_lines(&content)?,
            "csv" => Self::parse_csv(&content)?,
            other => {
                return Err(CatalogError::Malformed {
                    message: format!("unsupported catalog file type '{}'", other),
                })
            }
        };

        tracing::info!("Loaded {} movies from {}", movies.len(), path.display());
        Ok(Self::from_records(movies, seed))
    }

    fn parse_json(content: &str) -> CatalogResult<Vec<MovieRecord>> {
        let documents: Vec<serde_json::Value> = serde_json::from_str(content)?;
        Ok(documents.iter().filter_map(movie_from_document).collect())
    }

    fn parse_json_lines(content: &str) -> CatalogResult<Vec<MovieRecord>> {
        let mut movies = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let document: serde_json::Value = serde_json::from_str(line)?;
            movies.extend(movie_from_document(&document));
        }
        Ok(movies)
    }

    fn parse_csv(content: &str) -> CatalogResult<Vec<MovieRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut movies = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            let Ok(year) = row.year.parse::<i64>() else {
                tracing::warn!("Skipping '{}': year '{}' is not a number", row.title, row.year);
                continue;
            };
            let genres = row
                .genres
                .split('|')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect();
            movies.push(MovieRecord {
                title: row.title,
                year,
                genres,
            });
        }
        Ok(movies)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn matching(&self, genre: &str, year_filter: impl Fn(i64) -> bool) -> Vec<&MovieRecord> {
        self.movies
            .iter()
            .filter(|m| year_filter(m.year) && m.has_genre(genre))
            .collect()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn total_count(&self) -> CatalogResult<u64> {
        Ok(self.movies.len() as u64)
    }

    async fn count_by_year(&self, year: i64) -> CatalogResult<u64> {
        Ok(self.movies.iter().filter(|m| m.year == year).count() as u64)
    }

    async fn genres_for_year(&self, year: i64) -> CatalogResult<Vec<String>> {
        let mut seen = HashSet::new();
        let genres = self
            .movies
            .iter()
            .filter(|m| m.year == year)
            .flat_map(|m| m.genres.iter())
            .filter(|g| seen.insert(g.as_str()))
            .cloned()
            .collect();
        Ok(genres)
    }

    async fn sample_one(&self, year: i64, genre: &str) -> CatalogResult<Option<MovieRecord>> {
        let candidates = self.matching(genre, |y| y == year);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(candidates.choose(&mut *rng).map(|m| (*m).clone()))
    }

    async fn sample_many(
        &self,
        min_year_exclusive: i64,
        max_year_exclusive: i64,
        genre: &str,
        count: usize,
    ) -> CatalogResult<Vec<MovieRecord>> {
        let candidates = self.matching(genre, |y| y > min_year_exclusive && y < max_year_exclusive);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(candidates
            .choose_multiple(&mut *rng, count)
            .map(|m| (*m).clone())
            .collect())
    }
}
