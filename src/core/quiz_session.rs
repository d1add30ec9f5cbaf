use crate::core::{GuessOutcome, RevealedMovie, Round};
use crate::utils::error::ScoringError;

/// Scores a 1-based guess against `round`. Pure: the same inputs always give
/// the same outcome.
pub fn score(round: &Round, chosen_index: i64) -> Result<GuessOutcome, ScoringError> {
    let available = round.choices().len();
    let position = usize::try_from(chosen_index)
        .ok()
        .filter(|i| (1..=available).contains(i))
        .ok_or(ScoringError::InvalidChoice {
            index: chosen_index,
            available,
        })?;

    let revealed = round
        .choices()
        .iter()
        .map(|movie| RevealedMovie {
            title: movie.title.clone(),
            year: movie.year,
        })
        .collect();

    Ok(GuessOutcome {
        chosen_index,
        correct: position - 1 == round.correct_index(),
        target_year: round.target_year(),
        revealed,
    })
}

/// Holds one round between showing the choices and receiving the guess.
#[derive(Debug)]
pub struct QuizSession {
    round: Round,
}

impl QuizSession {
    pub fn new(round: Round) -> Self {
        Self { round }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Titles in display order; years stay hidden until scoring.
    pub fn choice_titles(&self) -> Vec<&str> {
        self.round
            .choices()
            .iter()
            .map(|movie| movie.title.as_str())
            .collect()
    }

    pub fn question(&self) -> String {
        format!("Which movie was released in {}?", self.round.target_year())
    }

    /// Consumes the session; a new round is needed to play again.
    pub fn answer(self, chosen_index: i64) -> Result<GuessOutcome, ScoringError> {
        let outcome = score(&self.round, chosen_index)?;
        tracing::debug!(
            "Guess {} for {} was {}",
            chosen_index,
            self.round.target_year(),
            if outcome.correct { "correct" } else { "wrong" }
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MovieRecord;

    fn round() -> Round {
        Round::new(
            1995,
            "Comedy".to_string(),
            [
                MovieRecord::new("Y", 1987, &["Comedy"]),
                MovieRecord::new("X", 1995, &["Comedy"]),
                MovieRecord::new("Z", 1988, &["Comedy"]),
            ],
            1,
        )
    }

    #[test]
    fn test_correct_only_for_target_position() {
        let round = round();
        assert!(score(&round, 2).unwrap().correct);
        assert!(!score(&round, 1).unwrap().correct);
        assert!(!score(&round, 3).unwrap().correct);
    }

    #[test]
    fn test_out_of_range_choice_is_invalid() {
        let round = round();
        for index in [0, -1, 4, i64::MAX, i64::MIN] {
            assert_eq!(
                score(&round, index),
                Err(ScoringError::InvalidChoice {
                    index,
                    available: 3
                })
            );
        }
    }

    #[test]
    fn test_reveal_lists_every_candidate_in_display_order() {
        let outcome = score(&round(), 1).unwrap();
        let revealed: Vec<_> = outcome
            .revealed
            .iter()
            .map(|m| (m.title.as_str(), m.year))
            .collect();
        assert_eq!(revealed, vec![("Y", 1987), ("X", 1995), ("Z", 1988)]);
        assert_eq!(outcome.chosen().unwrap().title, "Y");
        assert_eq!(outcome.target_year, 1995);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let round = round();
        assert_eq!(score(&round, 3), score(&round, 3));
        assert_eq!(score(&round, 9), score(&round, 9));
    }

    #[test]
    fn test_session_hides_years_until_answered() {
        let session = QuizSession::new(round());
        assert_eq!(session.choice_titles(), vec!["Y", "X", "Z"]);
        assert_eq!(session.question(), "Which movie was released in 1995?");

        let outcome = session.answer(2).unwrap();
        assert!(outcome.correct);
    }
}
