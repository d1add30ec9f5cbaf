use crate::utils::error::RoundError;
use serde::{Deserialize, Serialize};

/// Number of candidates shown in one round.
pub const CHOICE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: i64,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl MovieRecord {
    pub fn new<S: Into<String>>(title: S, year: i64, genres: &[&str]) -> Self {
        Self {
            title: title.into(),
            year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// The genres of one year, frozen in the order they were shown to the player.
///
/// Numbering shown on screen and index resolution both go through the same
/// instance, so the catalog is never asked twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreMenu {
    year: i64,
    genres: Vec<String>,
}

impl GenreMenu {
    pub(crate) fn new(year: i64, genres: Vec<String>) -> std::result::Result<Self, RoundError> {
        if genres.is_empty() {
            return Err(RoundError::NoGenresForYear { year });
        }
        Ok(Self { year, genres })
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// `(position, genre)` pairs with 1-based positions, ready for display.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.genres
            .iter()
            .enumerate()
            .map(|(i, genre)| (i + 1, genre.as_str()))
    }

    /// Resolves a 1-based position into a genre label.
    pub fn resolve(&self, index: i64) -> std::result::Result<&str, RoundError> {
        usize::try_from(index)
            .ok()
            .filter(|i| (1..=self.genres.len()).contains(i))
            .map(|i| self.genres[i - 1].as_str())
            .ok_or(RoundError::InvalidGenreIndex {
                index,
                available: self.genres.len(),
            })
    }
}

/// One playable quiz unit. Exactly one choice is from `target_year`; the
/// others are same-genre decoys from the older window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    target_year: i64,
    genre: String,
    choices: [MovieRecord; CHOICE_COUNT],
    correct_index: usize,
}

impl Round {
    pub(crate) fn new(
        target_year: i64,
        genre: String,
        choices: [MovieRecord; CHOICE_COUNT],
        correct_index: usize,
    ) -> Self {
        debug_assert!(correct_index < CHOICE_COUNT);
        Self {
            target_year,
            genre,
            choices,
            correct_index,
        }
    }

    pub fn target_year(&self) -> i64 {
        self.target_year
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn choices(&self) -> &[MovieRecord] {
        &self.choices
    }

    /// 0-based position of the target-year movie.
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedMovie {
    pub title: String,
    pub year: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// The 1-based index the player entered.
    pub chosen_index: i64,
    pub correct: bool,
    pub target_year: i64,
    /// Every candidate with its real year, in displayed order.
    pub revealed: Vec<RevealedMovie>,
}

impl GuessOutcome {
    /// The movie behind `chosen_index`, if it names one of `revealed`.
    pub fn chosen(&self) -> Option<&RevealedMovie> {
        usize::try_from(self.chosen_index)
            .ok()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.revealed.get(index))
    }
}
