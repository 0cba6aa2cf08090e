use chrono::FixedOffset;
use log::info;

use super::catalog::{Word, WordCatalog, WORD_LENGTH};
use super::daily::{DailyAnswerSelector, GameDay};
use super::scorer;
use super::session::{GameSessionState, MAX_ATTEMPTS};
use crate::errors::{EmptyCatalog, GuessError};

/// Everything the response layer needs after an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub exact: u8,
    pub partial: u8,
    pub win: bool,
    /// Revealed only when this guess just ended the game.
    pub answer: Option<Word>,
}

/// Ties the catalog, the daily selector, and the session rules together.
///
/// Owned by the process, built once at startup, and handed to request
/// handlers by reference; it carries no ambient global state.
pub struct GameService {
    catalog: WordCatalog,
    selector: DailyAnswerSelector,
    seed_material: String,
    day_offset: FixedOffset,
}

impl GameService {
    pub fn new(catalog: WordCatalog, seed_material: String, day_offset: FixedOffset) -> GameService {
        GameService {
            catalog,
            selector: DailyAnswerSelector::new(),
            seed_material,
            day_offset,
        }
    }

    pub fn today(&self) -> GameDay {
        GameDay::today(self.day_offset)
    }

    pub fn today_answer(&self) -> Result<Word, EmptyCatalog> {
        self.selector
            .answer_for(self.today(), &self.catalog, &self.seed_material)
    }

    /// Bind the slot to today's game, resetting any state left over from a
    /// previous day or a previous answer so stale feedback never leaks into
    /// a new game.
    pub fn sync<'a>(
        &self,
        slot: &'a mut Option<GameSessionState>,
    ) -> Result<&'a mut GameSessionState, EmptyCatalog> {
        let today = self.today();
        let answer = self
            .selector
            .answer_for(today, &self.catalog, &self.seed_material)?;

        let state = slot.get_or_insert_with(|| GameSessionState::fresh(today.date(), answer.clone()));
        if !state.is_bound_to(today.date(), &answer) {
            *state = GameSessionState::fresh(today.date(), answer);
        }
        Ok(state)
    }

    /// Validate and apply one guess against today's answer.
    ///
    /// Checks run in a fixed order and the first failure wins; the state is
    /// untouched unless the guess is accepted.
    pub fn submit_guess(
        &self,
        state: &mut GameSessionState,
        raw_guess: &str,
        claimed_row: i64,
    ) -> Result<GuessOutcome, GuessError> {
        if state.is_complete() {
            return Err(GuessError::GameComplete);
        }
        if claimed_row < 0 || claimed_row >= i64::from(MAX_ATTEMPTS) {
            return Err(GuessError::RowOutOfRange(claimed_row));
        }
        if claimed_row != i64::from(state.current_row()) {
            return Err(GuessError::RowMismatch {
                claimed: claimed_row,
                current: state.current_row(),
            });
        }
        let word = Word::parse(raw_guess).map_err(GuessError::from)?;
        if !self.catalog.is_guessable(&word) {
            return Err(GuessError::UnknownWord);
        }
        if state.has_guessed(&word) {
            return Err(GuessError::AlreadyGuessed);
        }

        let score = scorer::score(&word, state.answer());
        let win = usize::from(score.exact) == WORD_LENGTH;
        let is_last = state.current_row() == MAX_ATTEMPTS - 1;
        let answer = (win || is_last).then(|| state.answer().clone());

        info!(
            "Row {} guess {} scored {}/{}",
            claimed_row, word, score.exact, score.partial
        );
        state.record_guess(word, score);

        Ok(GuessOutcome {
            exact: score.exact,
            partial: score.partial,
            win,
            answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    const TOKENS: [&str; 12] = [
        "soft", "fort", "mint", "gray", "plum", "chew", "bird", "lazy", "quip", "vend", "rock",
        "dusk",
    ];

    fn service() -> GameService {
        let catalog = WordCatalog::from_tokens(TOKENS, None::<[&str; 0]>).unwrap();
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        GameService::new(catalog, "unit-test-seed".to_string(), offset)
    }

    fn bound_state(service: &GameService) -> GameSessionState {
        GameSessionState::fresh(
            service.today().date(),
            service.today_answer().unwrap(),
        )
    }

    fn misses(service: &GameService) -> Vec<Word> {
        let answer = service.today_answer().unwrap();
        TOKENS
            .iter()
            .filter_map(|token| Word::parse(token).ok())
            .filter(|word| *word != answer)
            .collect()
    }

    #[test]
    fn winning_guess_reveals_the_answer() {
        let service = service();
        let mut state = bound_state(&service);
        let answer = service.today_answer().unwrap();

        let outcome = service.submit_guess(&mut state, answer.as_str(), 0).unwrap();
        assert!(outcome.win);
        assert_eq!(outcome.exact, 4);
        assert_eq!(outcome.answer, Some(answer));
        assert!(state.is_complete());
        assert!(state.won());
    }

    #[test]
    fn completed_game_rejects_further_guesses() {
        let service = service();
        let mut state = bound_state(&service);
        let answer = service.today_answer().unwrap();

        service.submit_guess(&mut state, answer.as_str(), 0).unwrap();
        let result = service.submit_guess(&mut state, "MINT", 1);
        assert_eq!(result, Err(GuessError::GameComplete));
    }

    #[test]
    fn row_outside_the_board_is_rejected() {
        let service = service();
        let mut state = bound_state(&service);
        let guess = misses(&service)[0].clone();

        assert_eq!(
            service.submit_guess(&mut state, guess.as_str(), -1),
            Err(GuessError::RowOutOfRange(-1))
        );
        assert_eq!(
            service.submit_guess(&mut state, guess.as_str(), 8),
            Err(GuessError::RowOutOfRange(8))
        );
    }

    #[test]
    fn stale_row_is_rejected_and_state_untouched() {
        let service = service();
        let mut state = bound_state(&service);
        let guess = misses(&service)[0].clone();

        let result = service.submit_guess(&mut state, guess.as_str(), 3);
        assert_eq!(
            result,
            Err(GuessError::RowMismatch {
                claimed: 3,
                current: 0
            })
        );
        assert!(state.guesses().is_empty());
        assert_eq!(state.current_row(), 0);
    }

    #[test]
    fn shape_failures_map_to_their_rule() {
        let service = service();
        let mut state = bound_state(&service);

        assert_eq!(
            service.submit_guess(&mut state, "CRANE", 0),
            Err(GuessError::WrongLength)
        );
        // Rejected for length before the repeated P could matter.
        assert_eq!(
            service.submit_guess(&mut state, "APPLE", 0),
            Err(GuessError::WrongLength)
        );
        assert_eq!(
            service.submit_guess(&mut state, "A1BC", 0),
            Err(GuessError::NotAlphabetic)
        );
        assert_eq!(
            service.submit_guess(&mut state, "BOOK", 0),
            Err(GuessError::RepeatedLetter)
        );
    }

    #[test]
    fn words_outside_the_catalog_are_rejected() {
        let service = service();
        let mut state = bound_state(&service);
        assert_eq!(
            service.submit_guess(&mut state, "WXYZ", 0),
            Err(GuessError::UnknownWord)
        );
    }

    #[test]
    fn repeating_a_word_is_rejected() {
        let service = service();
        let mut state = bound_state(&service);
        let guess = misses(&service)[0].clone();

        service.submit_guess(&mut state, guess.as_str(), 0).unwrap();
        // Same word through the same normalization path.
        let lowered = guess.as_str().to_lowercase();
        assert_eq!(
            service.submit_guess(&mut state, &lowered, 1),
            Err(GuessError::AlreadyGuessed)
        );
    }

    #[test]
    fn answer_stays_hidden_until_the_game_ends() {
        let service = service();
        let mut state = bound_state(&service);
        let guess = misses(&service)[0].clone();

        let outcome = service.submit_guess(&mut state, guess.as_str(), 0).unwrap();
        assert!(!outcome.win);
        assert_eq!(outcome.answer, None);
    }

    #[test]
    fn eighth_miss_loses_and_reveals_the_answer() {
        let service = service();
        let mut state = bound_state(&service);
        let answer = service.today_answer().unwrap();
        let misses = misses(&service);

        for row in 0..7 {
            let outcome = service
                .submit_guess(&mut state, misses[row as usize].as_str(), i64::from(row))
                .unwrap();
            assert_eq!(outcome.answer, None);
        }
        let last = service
            .submit_guess(&mut state, misses[7].as_str(), 7)
            .unwrap();
        assert!(!last.win);
        assert_eq!(last.answer, Some(answer));
        assert!(state.is_complete());
        assert!(!state.won());
    }

    #[test]
    fn sync_resets_a_stale_day() {
        let service = service();
        let answer = service.today_answer().unwrap();
        let yesterday = service
            .today()
            .date()
            .checked_sub_days(Days::new(1))
            .unwrap();

        let mut stale = GameSessionState::fresh(yesterday, answer.clone());
        stale.record_guess(
            Word::parse("mint").unwrap(),
            crate::services::scorer::Score { exact: 0, partial: 1 },
        );

        let mut slot = Some(stale);
        let state = service.sync(&mut slot).unwrap();
        assert_eq!(state.current_row(), 0);
        assert!(state.guesses().is_empty());
        assert!(state.is_bound_to(service.today().date(), &answer));
    }

    #[test]
    fn sync_resets_a_stale_answer_binding() {
        let service = service();
        let answer = service.today_answer().unwrap();
        let other = misses(&service)[0].clone();

        let mut slot = Some(GameSessionState::fresh(service.today().date(), other));
        let state = service.sync(&mut slot).unwrap();
        assert!(state.is_bound_to(service.today().date(), &answer));
    }

    #[test]
    fn sync_fills_an_empty_slot() {
        let service = service();
        let mut slot = None;
        let state = service.sync(&mut slot).unwrap();
        assert_eq!(state.current_row(), 0);
        assert!(!state.is_complete());
    }
}
