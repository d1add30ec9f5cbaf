use crate::core::{Catalog, CatalogResult, GenreMenu, MovieRecord, Round};
use crate::domain::model::CHOICE_COUNT;
use crate::utils::error::RoundError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Decoys come from the open window `(year - DECOY_MAX_AGE, year - DECOY_MIN_AGE)`.
pub const DECOY_MIN_AGE: i64 = 5;
pub const DECOY_MAX_AGE: i64 = 10;

const DECOY_COUNT: usize = CHOICE_COUNT - 1;

pub struct RoundBuilder<C: Catalog, R: Rng = StdRng> {
    catalog: C,
    rng: R,
    query_timeout: Duration,
}

impl<C: Catalog> RoundBuilder<C, StdRng> {
    pub fn new(catalog: C) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    pub fn seeded(catalog: C, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }
}

impl<C: Catalog, R: Rng> RoundBuilder<C, R> {
    pub fn with_rng(catalog: C, rng: R) -> Self {
        Self {
            catalog,
            rng,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub async fn total_count(&self) -> Result<u64, RoundError> {
        self.query("total_count", self.catalog.total_count()).await
    }

    pub async fn count_by_year(&self, year: i64) -> Result<u64, RoundError> {
        self.query("count_by_year", self.catalog.count_by_year(year))
            .await
    }

    /// Fetches the genres of `year` once and freezes their order for display
    /// and later index resolution.
    pub async fn genre_menu(&self, year: i64) -> Result<GenreMenu, RoundError> {
        let genres = self
            .query("genres_for_year", self.catalog.genres_for_year(year))
            .await?;
        tracing::debug!("Year {} has {} genres", year, genres.len());
        GenreMenu::new(year, genres)
    }

    /// Builds a round for `year` using the 1-based `genre_choice_index`.
    pub async fn build_round(
        &mut self,
        year: i64,
        genre_choice_index: i64,
    ) -> Result<Round, RoundError> {
        let menu = self.genre_menu(year).await?;
        self.build_round_from_menu(&menu, genre_choice_index).await
    }

    /// Builds a round against a menu that was already shown to the player.
    pub async fn build_round_from_menu(
        &mut self,
        menu: &GenreMenu,
        genre_choice_index: i64,
    ) -> Result<Round, RoundError> {
        let year = menu.year();
        let genre = menu.resolve(genre_choice_index)?.to_string();
        tracing::debug!("Resolved genre choice {} to {}", genre_choice_index, genre);

        let target = self
            .query("sample_one", self.catalog.sample_one(year, &genre))
            .await?
            .filter(|movie| {
                let fits = movie.year == year && movie.has_genre(&genre);
                if !fits {
                    tracing::warn!(
                        "Catalog returned '{}' ({}) for {} {}; ignoring it",
                        movie.title,
                        movie.year,
                        year,
                        genre
                    );
                }
                fits
            })
            .ok_or_else(|| RoundError::NoTargetMovie {
                year,
                genre: genre.clone(),
            })?;

        let insufficient = |found: usize| RoundError::InsufficientDecoys {
            genre: genre.clone(),
            found,
            required: DECOY_COUNT,
        };
        // An upper bound below i64::MIN leaves no year to pick from.
        let Some(max_year) = year.checked_sub(DECOY_MIN_AGE) else {
            tracing::debug!("No decoy window exists before {}", year);
            return Err(insufficient(0));
        };
        let min_year = year.saturating_sub(DECOY_MAX_AGE);

        let sampled = self
            .query(
                "sample_many",
                self.catalog
                    .sample_many(min_year, max_year, &genre, DECOY_COUNT),
            )
            .await?;
        let mut decoys: Vec<MovieRecord> = Vec::with_capacity(DECOY_COUNT);
        for movie in sampled {
            let in_window = movie.year > min_year && movie.year < max_year;
            let usable = in_window
                && movie.has_genre(&genre)
                && movie != target
                && !decoys.contains(&movie);
            if !usable {
                tracing::warn!(
                    "Catalog returned unusable decoy '{}' ({}) for {} before {}; ignoring it",
                    movie.title,
                    movie.year,
                    genre,
                    year
                );
                continue;
            }
            decoys.push(movie);
        }
        decoys.truncate(DECOY_COUNT);
        let [first_decoy, second_decoy]: [MovieRecord; DECOY_COUNT] =
            decoys.try_into().map_err(|found: Vec<MovieRecord>| {
                tracing::debug!("Only {} decoys for {} before {}", found.len(), genre, year);
                insufficient(found.len())
            })?;

        let mut tagged = [(true, target), (false, first_decoy), (false, second_decoy)];
        tagged.shuffle(&mut self.rng);
        let correct_index = tagged
            .iter()
            .position(|(is_target, _)| *is_target)
            .unwrap_or_default();
        let choices = tagged.map(|(_, movie)| movie);

        tracing::debug!("Round ready: {} {} correct at {}", year, genre, correct_index + 1);
        Ok(Round::new(year, genre, choices, correct_index))
    }

    async fn query<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = CatalogResult<T>>,
    ) -> Result<T, RoundError> {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!("Catalog {} failed: {}", operation, e);
                Err(RoundError::CatalogUnavailable {
                    operation,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                tracing::warn!("Catalog {} timed out after {:?}", operation, self.query_timeout);
                Err(RoundError::CatalogUnavailable {
                    operation,
                    reason: format!("no response within {:?}", self.query_timeout),
                })
            }
        }
    }
}
