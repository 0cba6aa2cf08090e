use serde::{Deserialize, Serialize};

use crate::errors::GuessError;
use crate::services::game::{GameService, GuessOutcome};
use crate::services::session::GameSessionState;
use crate::store::SessionStore;

/// Application state shared across all handlers.
pub struct AppState {
    pub game: GameService,
    pub sessions: SessionStore,
}

#[derive(Deserialize)]
pub struct GuessRequest {
    pub guess: String,
    #[serde(default)]
    pub row: i64,
}

/// One scored guess as the board renders it.
#[derive(Serialize)]
pub struct GuessView {
    pub word: String,
    pub green: u8,
    pub yellow: u8,
}

#[derive(Serialize)]
pub struct StateResponse {
    pub guesses: Vec<GuessView>,
    pub is_complete: bool,
    pub won: bool,
    pub current_row: u8,
}

impl StateResponse {
    pub fn from_state(state: &GameSessionState) -> StateResponse {
        StateResponse {
            guesses: state
                .guesses()
                .iter()
                .map(|record| GuessView {
                    word: record.word.to_string(),
                    green: record.exact,
                    yellow: record.partial,
                })
                .collect(),
            is_complete: state.is_complete(),
            won: state.won(),
            current_row: state.current_row(),
        }
    }
}

#[derive(Serialize)]
pub struct GuessResponse {
    pub green: u8,
    pub yellow: u8,
    pub win: bool,
    pub answer: Option<String>,
}

impl GuessResponse {
    pub fn from_outcome(outcome: &GuessOutcome) -> GuessResponse {
        GuessResponse {
            green: outcome.exact,
            yellow: outcome.partial,
            win: outcome.win,
            answer: outcome.answer.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    /// Authoritative state, attached only when the client can use it to
    /// resynchronize a stale view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateResponse>,
}

impl ErrorResponse {
    pub fn rejection(err: &GuessError, state: StateResponse) -> ErrorResponse {
        let state = matches!(err, GuessError::RowMismatch { .. }).then_some(state);
        ErrorResponse {
            error: err.to_string(),
            kind: err.kind(),
            state,
        }
    }

    pub fn unavailable() -> ErrorResponse {
        ErrorResponse {
            error: "no answer is available for today".to_string(),
            kind: "empty_catalog",
            state: None,
        }
    }
}
