use crate::core::quiz_session::QuizSession;
use crate::core::round_builder::RoundBuilder;
use crate::core::{Catalog, GuessOutcome};
use crate::utils::error::{QuizError, Result};
use rand::Rng;
use std::io::{BufRead, Write};

/// Plays one round over a line-based terminal. All prompting and printing
/// lives here; the builder and session never touch I/O.
pub struct ConsoleGame<I: BufRead, O: Write> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> ConsoleGame<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Round and scoring failures are printed for the player and then
    /// returned so the caller can choose an exit status.
    pub async fn play<C: Catalog, R: Rng>(
        &mut self,
        builder: &mut RoundBuilder<C, R>,
        preset_year: Option<i64>,
    ) -> Result<GuessOutcome> {
        match self.play_inner(builder, preset_year).await {
            Err(e @ (QuizError::Round(_) | QuizError::Scoring(_))) => {
                writeln!(self.output, "{}", e.user_friendly_message())?;
                Err(e)
            }
            other => other,
        }
    }

    async fn play_inner<C: Catalog, R: Rng>(
        &mut self,
        builder: &mut RoundBuilder<C, R>,
        preset_year: Option<i64>,
    ) -> Result<GuessOutcome> {
        let total = builder.total_count().await?;
        writeln!(self.output, "Found {} movies", total)?;

        let year = match preset_year {
            Some(year) => year,
            None => self.read_number("Enter a year: ")?,
        };
        let count = builder.count_by_year(year).await?;
        writeln!(self.output, "Count for {}: {}", year, count)?;

        let menu = builder.genre_menu(year).await?;
        for (position, genre) in menu.numbered() {
            writeln!(self.output, "{}: {}", position, genre)?;
        }
        let genre_choice = self.read_number(&format!("Select a genre (1-{}):", menu.len()))?;
        let genre = menu.resolve(genre_choice)?;
        writeln!(self.output, "Selected {}", genre)?;

        let round = builder.build_round_from_menu(&menu, genre_choice).await?;
        let session = QuizSession::new(round);

        writeln!(self.output)?;
        for (i, title) in session.choice_titles().iter().enumerate() {
            writeln!(self.output, "{}: {}", i + 1, title)?;
        }
        let guess = self.read_number(&session.question())?;
        let outcome = session.answer(guess)?;

        writeln!(
            self.output,
            "{}",
            if outcome.correct { "Correct!" } else { "Wrong!" }
        )?;
        for movie in &outcome.revealed {
            writeln!(self.output, "{} was released in {}", movie.title, movie.year)?;
        }
        self.output.flush()?;

        Ok(outcome)
    }

    /// Prompts until a whole number is entered.
    fn read_number(&mut self, prompt: &str) -> Result<i64> {
        loop {
            writeln!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(QuizError::InputError {
                    message: "Input ended before the round was finished.".to_string(),
                });
            }
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    tracing::debug!("Rejected non-numeric input {:?}", line.trim());
                    writeln!(self.output, "Please enter a whole number.")?;
                }
            }
        }
    }
}
