pub mod quiz_session;
pub mod round_builder;

pub use crate::domain::model::{GenreMenu, GuessOutcome, MovieRecord, RevealedMovie, Round};
pub use crate::domain::ports::{Catalog, CatalogResult, CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
