use std::collections::HashMap;
use std::sync::RwLock;

use crate::services::session::GameSessionState;

/// In-process session storage keyed by the opaque `sid` cookie value.
///
/// The game core never touches storage; handlers hand it state values
/// through this get/mutate/put surface. Mutation happens under the write
/// lock, which also serializes concurrent submissions for the same token.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, GameSessionState>>,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Run `f` against the caller's session slot. A `None` slot means no
    /// state exists yet; whatever the closure leaves in the slot is kept.
    pub fn with_session<R>(
        &self,
        token: &str,
        f: impl FnOnce(&mut Option<GameSessionState>) -> R,
    ) -> R {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        let mut slot = sessions.remove(token);
        let result = f(&mut slot);
        if let Some(state) = slot {
            sessions.insert(token.to_string(), state);
        }
        result
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::Word;
    use chrono::NaiveDate;

    #[test]
    fn slot_contents_survive_between_calls() {
        let store = SessionStore::new();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        store.with_session("tok", |slot| {
            assert!(slot.is_none());
            *slot = Some(GameSessionState::fresh(day, Word::parse("soft").unwrap()));
        });
        store.with_session("tok", |slot| {
            assert!(slot.is_some());
        });
        store.with_session("other", |slot| {
            assert!(slot.is_none());
        });
    }
}
