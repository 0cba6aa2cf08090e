use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::{Word, WORD_LENGTH};
use super::scorer::Score;

/// Maximum guesses per day.
pub const MAX_ATTEMPTS: u8 = 8;

/// One scored guess in today's attempt sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: Word,
    pub exact: u8,
    pub partial: u8,
}

/// A player's progress against one (day, answer) pair.
///
/// The state only ever moves forward: guesses are appended one at a time and
/// completion never reverts. A state bound to a stale day or a stale answer
/// is discarded wholesale, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSessionState {
    day: NaiveDate,
    answer: Word,
    guesses: Vec<GuessRecord>,
    current_row: u8,
    is_complete: bool,
    won: bool,
}

impl GameSessionState {
    /// A brand-new state bound to today's answer, starting at row 0.
    pub fn fresh(day: NaiveDate, answer: Word) -> GameSessionState {
        GameSessionState {
            day,
            answer,
            guesses: Vec::new(),
            current_row: 0,
            is_complete: false,
            won: false,
        }
    }

    /// A state stays valid only while both its day and its answer match the
    /// current ones. A changed answer on the same day (new seed material)
    /// invalidates it just like a day rollover.
    pub fn is_bound_to(&self, day: NaiveDate, answer: &Word) -> bool {
        self.day == day && self.answer == *answer
    }

    pub fn answer(&self) -> &Word {
        &self.answer
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn current_row(&self) -> u8 {
        self.current_row
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn has_guessed(&self, word: &Word) -> bool {
        self.guesses.iter().any(|record| record.word == *word)
    }

    /// Append an accepted guess and settle the outcome: a fully exact score
    /// wins immediately, and the final attempt without one loses.
    pub fn record_guess(&mut self, word: Word, score: Score) {
        self.guesses.push(GuessRecord {
            word,
            exact: score.exact,
            partial: score.partial,
        });
        self.current_row += 1;

        if usize::from(score.exact) == WORD_LENGTH {
            self.is_complete = true;
            self.won = true;
        } else if self.current_row >= MAX_ATTEMPTS {
            self.is_complete = true;
            self.won = false;
        }
    }
}
