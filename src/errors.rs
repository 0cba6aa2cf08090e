use std::io;

use thiserror::Error;

use crate::services::catalog::ShapeIssue;

/// The word lists could not produce a playable catalog.
///
/// Raised only at startup; without a guessable-word universe there is no
/// game, so the process must refuse to serve.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read word list {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("no usable words in {path}")]
    NoUsableWords { path: String },
}

/// The answer universe is empty, so no daily answer exists.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the answer list is empty")]
pub struct EmptyCatalog;

/// Everything that can go wrong with a single guess submission.
///
/// All variants are user-facing rejections, not faults. `RowMismatch` is the
/// one recoverable case: the client's view of the board is stale and it can
/// resynchronize from the authoritative state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("game already completed for today")]
    GameComplete,
    #[error("row {0} is outside the board")]
    RowOutOfRange(i64),
    #[error("row {claimed} does not match the current row {current}")]
    RowMismatch { claimed: i64, current: u8 },
    #[error("guess must be exactly 4 letters")]
    WrongLength,
    #[error("guess must contain only letters")]
    NotAlphabetic,
    #[error("guess must not repeat a letter")]
    RepeatedLetter,
    #[error("not a valid word")]
    UnknownWord,
    #[error("word already guessed today")]
    AlreadyGuessed,
}

impl From<ShapeIssue> for GuessError {
    fn from(issue: ShapeIssue) -> GuessError {
        match issue {
            ShapeIssue::Length => GuessError::WrongLength,
            ShapeIssue::NonAlphabetic => GuessError::NotAlphabetic,
            ShapeIssue::RepeatedLetter => GuessError::RepeatedLetter,
        }
    }
}

impl GuessError {
    /// Stable machine-readable discriminator for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            GuessError::GameComplete => "game_already_complete",
            GuessError::RowOutOfRange(_) => "invalid_attempt_index",
            GuessError::RowMismatch { .. } => "attempt_index_mismatch",
            GuessError::WrongLength | GuessError::NotAlphabetic | GuessError::RepeatedLetter => {
                "invalid_guess_shape"
            }
            GuessError::UnknownWord => "unknown_word",
            GuessError::AlreadyGuessed => "duplicate_guess",
        }
    }
}
