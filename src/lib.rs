pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{build_catalog, DataApiCatalog, MemoryCatalog, MongoCatalog};
pub use app::console::ConsoleGame;
pub use crate::core::quiz_session::{score, QuizSession};
pub use crate::core::round_builder::RoundBuilder;
pub use domain::model::{GenreMenu, GuessOutcome, MovieRecord, RevealedMovie, Round};
pub use domain::ports::Catalog;
pub use utils::error::{CatalogError, QuizError, Result, RoundError, ScoringError};
