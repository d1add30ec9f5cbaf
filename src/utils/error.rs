use thiserror::Error;

/// Failures reported by a catalog adapter.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Catalog response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Catalog file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed catalog data: {message}")]
    Malformed { message: String },
}

/// Terminal outcomes of a round that could not be assembled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("No genres found for year {year}")]
    NoGenresForYear { year: i64 },

    #[error("Genre choice {index} is out of range (1-{available})")]
    InvalidGenreIndex { index: i64, available: usize },

    #[error("No movie found for year {year} in genre {genre}")]
    NoTargetMovie { year: i64, genre: String },

    #[error("Not enough older movies (5-10 years older) found in genre {genre}: found {found}, need {required}")]
    InsufficientDecoys {
        genre: String,
        found: usize,
        required: usize,
    },

    #[error("Catalog unavailable during {operation}: {reason}")]
    CatalogUnavailable {
        operation: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Invalid choice {index}, expected 1-{available}")]
    InvalidChoice { index: i64, available: usize },
}

#[derive(Error, Debug)]
pub enum QuizError {
    #[error(transparent)]
    Round(#[from] RoundError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Input error: {message}")]
    InputError { message: String },
}

impl QuizError {
    /// Message shown to the player, without internal detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            QuizError::Round(RoundError::CatalogUnavailable { .. }) | QuizError::Catalog(_) => {
                "The movie catalog is not reachable right now.".to_string()
            }
            QuizError::Round(e) => e.to_string(),
            QuizError::Scoring(_) => "Invalid choice.".to_string(),
            QuizError::IoError(e) => format!("Could not read or write the console: {}", e),
            QuizError::ConfigError { .. }
            | QuizError::InvalidConfigValueError { .. }
            | QuizError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            QuizError::InputError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuizError::Round(RoundError::NoGenresForYear { .. }) => {
                "Try a different year that the catalog has movies for"
            }
            QuizError::Round(RoundError::InvalidGenreIndex { .. }) => {
                "Pick a number from the genre list"
            }
            QuizError::Round(RoundError::NoTargetMovie { .. })
            | QuizError::Round(RoundError::InsufficientDecoys { .. }) => {
                "Try another genre or a more recent year"
            }
            QuizError::Round(RoundError::CatalogUnavailable { .. }) | QuizError::Catalog(_) => {
                "Check DB_URI (and DB_API_KEY for the data API) and your network connection, or raise --timeout-seconds"
            }
            QuizError::Scoring(_) => "Pick one of the numbered movies",
            QuizError::IoError(_) => "Check that the terminal or catalog file is accessible",
            QuizError::ConfigError { .. }
            | QuizError::InvalidConfigValueError { .. }
            | QuizError::MissingConfigError { .. } => {
                "Check the command line flags, the .env file and the TOML configuration"
            }
            QuizError::InputError { .. } => "Enter a number and press return",
        }
    }

    /// Process exit code for the binary: 1 for gameplay outcomes, 2 for
    /// configuration problems, 3 for catalog or system failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuizError::Round(RoundError::CatalogUnavailable { .. })
            | QuizError::Catalog(_)
            | QuizError::IoError(_) => 3,
            QuizError::ConfigError { .. }
            | QuizError::InvalidConfigValueError { .. }
            | QuizError::MissingConfigError { .. } => 2,
            QuizError::Round(_) | QuizError::Scoring(_) | QuizError::InputError { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_errors_stay_distinguishable() {
        let err: QuizError = RoundError::InsufficientDecoys {
            genre: "Drama".to_string(),
            found: 1,
            required: 2,
        }
        .into();

        assert!(matches!(
            err,
            QuizError::Round(RoundError::InsufficientDecoys { found: 1, .. })
        ));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_catalog_unavailable_hides_reason_from_player() {
        let err = QuizError::Round(RoundError::CatalogUnavailable {
            operation: "genres_for_year",
            reason: "deadline elapsed".to_string(),
        });

        assert!(!err.user_friendly_message().contains("deadline"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_errors_exit_with_two() {
        let err = QuizError::MissingConfigError {
            field: "catalog.endpoint".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("catalog.endpoint"));
    }
}
