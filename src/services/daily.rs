use std::sync::RwLock;

use chrono::{Datelike, FixedOffset, NaiveDate, Utc};
use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use super::catalog::{Word, WordCatalog};
use crate::errors::EmptyCatalog;

/// A calendar day in the game's fixed-offset timezone.
///
/// Day rollover follows the configured offset, never the host timezone, so
/// every instance agrees on which day it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameDay(NaiveDate);

impl GameDay {
    pub fn today(offset: FixedOffset) -> GameDay {
        GameDay(Utc::now().with_timezone(&offset).date_naive())
    }

    pub fn from_date(date: NaiveDate) -> GameDay {
        GameDay(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Days since the common era; the index into the daily cycle.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.0.num_days_from_ce())
    }
}

/// One shuffled pass over the answer candidates, tagged with the inputs that
/// produced it so a seed or catalog change forces a rebuild.
struct DailyCycle {
    order: Vec<Word>,
    seed: [u8; 32],
    candidates: usize,
}

/// Deterministic day-to-answer assignment.
///
/// The seed material is hashed into an RNG seed, the candidate list is
/// shuffled once per (seed, candidate-count) pair, and the day ordinal
/// indexes into the shuffle. Identical inputs give identical answers on
/// every instance, so concurrent workers never coordinate, and no answer
/// repeats until the whole cycle has elapsed.
pub struct DailyAnswerSelector {
    cycle: RwLock<Option<DailyCycle>>,
}

impl DailyAnswerSelector {
    pub fn new() -> DailyAnswerSelector {
        DailyAnswerSelector {
            cycle: RwLock::new(None),
        }
    }

    pub fn answer_for(
        &self,
        day: GameDay,
        catalog: &WordCatalog,
        seed_material: &str,
    ) -> Result<Word, EmptyCatalog> {
        let candidates = catalog.answer_candidates();
        if candidates.is_empty() {
            return Err(EmptyCatalog);
        }
        let seed = derive_seed(seed_material);

        if let Some(word) = self.cached(day, &seed, candidates.len()) {
            return Ok(word);
        }

        let mut order = candidates.to_vec();
        let mut rng = ChaCha20Rng::from_seed(seed);
        order.shuffle(&mut rng);
        debug!("Rebuilt daily cycle over {} candidates", order.len());

        let word = pick(&order, day);
        let mut slot = self.cycle.write().expect("daily cycle lock poisoned");
        *slot = Some(DailyCycle {
            order,
            seed,
            candidates: candidates.len(),
        });
        Ok(word)
    }

    /// Concurrent rebuilds are harmless: every writer produces the identical
    /// permutation, and the slot is replaced whole so a torn cycle is never
    /// observable.
    fn cached(&self, day: GameDay, seed: &[u8; 32], candidates: usize) -> Option<Word> {
        let slot = self.cycle.read().expect("daily cycle lock poisoned");
        match slot.as_ref() {
            Some(cycle) if cycle.seed == *seed && cycle.candidates == candidates => {
                Some(pick(&cycle.order, day))
            }
            _ => None,
        }
    }
}

impl Default for DailyAnswerSelector {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(order: &[Word], day: GameDay) -> Word {
    let index = day.ordinal().rem_euclid(order.len() as i64) as usize;
    order[index].clone()
}

/// Hash the configured seed material into a 32-byte RNG seed.
fn derive_seed(material: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(material.as_bytes());
    hasher.finalize().into()
}
