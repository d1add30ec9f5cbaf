use anyhow::Result;
use movie_quiz::core::ConfigProvider;
use movie_quiz::{
    build_catalog, score, MemoryCatalog, MovieRecord, RoundBuilder, RoundError, ScoringError,
    TomlConfig,
};
use tempfile::TempDir;

fn catalog(seed: u64) -> MemoryCatalog {
    MemoryCatalog::from_records(
        vec![
            MovieRecord::new("Heat", 1995, &["Drama", "Crime"]),
            MovieRecord::new("X", 1995, &["Comedy"]),
            MovieRecord::new("Sixteen Candles", 1984, &["Comedy"]),
            MovieRecord::new("Back to School", 1986, &["Comedy"]),
            MovieRecord::new("Big", 1988, &["Comedy", "Drama"]),
            MovieRecord::new("Tootsie", 1982, &["Comedy"]),
            MovieRecord::new("Home Alone", 1990, &["Comedy"]),
            MovieRecord::new("Rain Man", 1988, &["Drama"]),
        ],
        Some(seed),
    )
}

/// Year 1995 offers Drama, Crime, Comedy; choice 3 resolves to Comedy.
#[tokio::test]
async fn test_comedy_round_for_1995() -> Result<()> {
    let mut builder = RoundBuilder::seeded(catalog(3), 3);

    let menu = builder.genre_menu(1995).await?;
    assert_eq!(menu.genres(), ["Drama", "Crime", "Comedy"]);

    let round = builder.build_round(1995, 3).await?;

    assert_eq!(round.genre(), "Comedy");
    assert_eq!(round.choices().len(), 3);
    assert_eq!(round.choices()[round.correct_index()].title, "X");
    let target_years = round.choices().iter().filter(|m| m.year == 1995).count();
    assert_eq!(target_years, 1);
    for (i, movie) in round.choices().iter().enumerate() {
        if i != round.correct_index() {
            assert!((1986..=1989).contains(&movie.year), "{:?}", movie);
            assert!(movie.has_genre("Comedy"));
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_every_valid_round_satisfies_year_invariants() -> Result<()> {
    for seed in 0..50 {
        let mut builder = RoundBuilder::seeded(catalog(seed), seed);
        let round = builder.build_round(1995, 3).await?;

        assert_eq!(round.choices()[round.correct_index()].year, 1995);
        let outcome = score(&round, round.correct_index() as i64 + 1)?;
        assert!(outcome.correct);
        assert_eq!(outcome.revealed.len(), 3);
    }
    Ok(())
}

#[tokio::test]
async fn test_only_target_position_scores() -> Result<()> {
    let mut builder = RoundBuilder::seeded(catalog(8), 8);
    let round = builder.build_round(1995, 3).await?;

    for index in 1..=3 {
        let outcome = score(&round, index)?;
        assert_eq!(outcome.correct, index - 1 == round.correct_index() as i64);
    }
    assert_eq!(
        score(&round, 0),
        Err(ScoringError::InvalidChoice {
            index: 0,
            available: 3
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_genre_without_decoys_is_insufficient() {
    // Crime has a 1995 movie but nothing in the decoy window.
    let mut builder = RoundBuilder::seeded(catalog(1), 1);

    let err = builder.build_round(1995, 2).await.unwrap_err();

    assert_eq!(
        err,
        RoundError::InsufficientDecoys {
            genre: "Crime".to_string(),
            found: 0,
            required: 2
        }
    );
}

#[tokio::test]
async fn test_year_without_movies() {
    let mut builder = RoundBuilder::seeded(catalog(1), 1);
    assert_eq!(
        builder.build_round(1895, 1).await.unwrap_err(),
        RoundError::NoGenresForYear { year: 1895 }
    );
}

#[tokio::test]
async fn test_round_from_toml_configured_file_catalog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let movies_path = temp_dir.path().join("movies.json");
    let movies = serde_json::json!([
        {"title": "The Matrix", "year": 1999, "genres": ["Action", "Sci-Fi"]},
        {"title": "Terminator 2", "year": 1991, "genres": ["Action", "Sci-Fi"]},
        {"title": "Predator", "year": 1987, "genres": ["Action"]},
        {"title": "Total Recall", "year": 1990, "genres": ["Action", "Sci-Fi"]},
        {"title": "Broken Year", "year": "1991è", "genres": ["Action"]}
    ]);
    std::fs::write(&movies_path, serde_json::to_string(&movies)?)?;

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[catalog]
path = "{}"

[game]
seed = 17
"#,
        movies_path.to_str().unwrap().replace('\\', "/")
    ))?;

    let catalog = build_catalog(&config).await?;
    let mut builder = RoundBuilder::seeded(catalog, config.seed().unwrap_or_default());

    assert_eq!(builder.total_count().await?, 4);
    let menu = builder.genre_menu(1999).await?;
    assert_eq!(menu.genres(), ["Action", "Sci-Fi"]);

    let round = builder.build_round_from_menu(&menu, 1).await?;
    let titles: Vec<_> = round.choices().iter().map(|m| m.title.as_str()).collect();
    assert!(titles.contains(&"The Matrix"));
    assert!(titles.contains(&"Terminator 2"));
    assert!(titles.contains(&"Total Recall"));
    Ok(())
}

#[tokio::test]
async fn test_bundled_sample_catalog_plays_1995() -> Result<()> {
    let catalog = MemoryCatalog::from_file(
        concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_movies.csv"),
        Some(99),
    )?;
    let mut builder = RoundBuilder::seeded(catalog, 99);

    let menu = builder.genre_menu(1995).await?;
    let comedy = menu
        .numbered()
        .find(|(_, genre)| *genre == "Comedy")
        .map(|(position, _)| position as i64)
        .expect("1995 has comedies");

    let round = builder.build_round_from_menu(&menu, comedy).await?;
    assert_eq!(round.choices()[round.correct_index()].year, 1995);
    assert_eq!(
        round
            .choices()
            .iter()
            .filter(|m| m.year > 1985 && m.year < 1990)
            .count(),
        2
    );
    Ok(())
}

#[tokio::test]
async fn test_earliest_possible_year_does_not_panic() {
    let year = i64::MIN + 3;
    let catalog =
        MemoryCatalog::from_records(vec![MovieRecord::new("Old", year, &["Drama"])], Some(1));
    let mut builder = RoundBuilder::seeded(catalog, 1);

    assert_eq!(
        builder.build_round(year, 1).await.unwrap_err(),
        RoundError::InsufficientDecoys {
            genre: "Drama".to_string(),
            found: 0,
            required: 2
        }
    );
}
