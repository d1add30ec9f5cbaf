use anyhow::Context;
use clap::Parser;
use movie_quiz::core::ConfigProvider;
use movie_quiz::utils::{logger, validation::Validate};
use movie_quiz::{build_catalog, CliConfig, ConsoleGame, QuizError, RoundBuilder, TomlConfig};

#[tokio::main]
async fn main() {
    // .env must be loaded before clap reads DB_URI / DB_API_KEY
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting movie-quiz");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match &cli.config {
        Some(path) => match TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))
        {
            Ok(file) => run(cli.overlay(file)).await,
            Err(e) => Err(e),
        },
        None => run(cli.clone()).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<QuizError>() {
            // already shown to the player by the console
            Some(quiz_error)
                if matches!(quiz_error, QuizError::Round(_) | QuizError::Scoring(_)) =>
            {
                tracing::info!("Round ended: {}", quiz_error);
                std::process::exit(quiz_error.exit_code());
            }
            Some(quiz_error) => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {}", quiz_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", quiz_error.recovery_suggestion());
                std::process::exit(quiz_error.exit_code());
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> anyhow::Result<()> {
    config.validate()?;

    let catalog = build_catalog(&config)
        .await
        .context("Failed to open the movie catalog")?;
    let builder = match config.seed() {
        Some(seed) => RoundBuilder::seeded(catalog, seed),
        None => RoundBuilder::new(catalog),
    };
    let mut builder = builder.query_timeout(config.query_timeout());

    let mut game = ConsoleGame::new(std::io::stdin().lock(), std::io::stdout());
    let outcome = game.play(&mut builder, config.preset_year()).await?;
    if let Some(chosen) = outcome.chosen() {
        tracing::info!(
            "Round finished: guessed {} ({})",
            chosen.title,
            if outcome.correct { "correct" } else { "wrong" }
        );
    }
    Ok(())
}
