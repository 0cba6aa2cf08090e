use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// Every playable word has exactly this many letters.
pub const WORD_LENGTH: usize = 4;

/// A playable word: four distinct ASCII letters, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

/// Which shape rule a raw token broke, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeIssue {
    Length,
    NonAlphabetic,
    RepeatedLetter,
}

impl Word {
    /// Normalize a raw token (trim + uppercase) and validate its shape.
    ///
    /// The same normalization serves shape validation and duplicate-guess
    /// detection, so the two checks can never disagree about a token.
    pub fn parse(raw: &str) -> Result<Word, ShapeIssue> {
        let text = raw.trim().to_uppercase();
        if text.chars().count() != WORD_LENGTH {
            return Err(ShapeIssue::Length);
        }
        if !text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ShapeIssue::NonAlphabetic);
        }
        let distinct: HashSet<char> = text.chars().collect();
        if distinct.len() != WORD_LENGTH {
            return Err(ShapeIssue::RepeatedLetter);
        }
        Ok(Word(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Bypass shape validation, for exercising letter-duplication handling.
    #[cfg(test)]
    pub(crate) fn raw(text: &str) -> Word {
        Word(text.to_string())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The immutable word universe: a validation set plus an ordered answer list.
///
/// Built once at startup and shared read-only across all workers. The answer
/// list is always a subset of the guessable set, sorted lexicographically so
/// that the daily cycle never depends on source-file ordering.
pub struct WordCatalog {
    guessable: HashSet<Word>,
    answers: Vec<Word>,
}

impl WordCatalog {
    /// Load both word lists from disk.
    ///
    /// The guessable list is mandatory. A missing or empty answer list falls
    /// back to the guessable set as the answer universe.
    pub fn load(guessable_path: &Path, answers_path: &Path) -> Result<WordCatalog, CatalogError> {
        let guessable = read_words(guessable_path).map_err(|source| CatalogError::Unreadable {
            path: guessable_path.display().to_string(),
            source,
        })?;
        if guessable.is_empty() {
            return Err(CatalogError::NoUsableWords {
                path: guessable_path.display().to_string(),
            });
        }

        let answers = match read_words(answers_path) {
            Ok(words) if !words.is_empty() => Some(words),
            Ok(_) => {
                warn!(
                    "Answer list {} has no usable words; reusing the guessable list",
                    answers_path.display()
                );
                None
            }
            Err(err) => {
                warn!(
                    "Answer list {} unavailable ({}); reusing the guessable list",
                    answers_path.display(),
                    err
                );
                None
            }
        };

        Ok(Self::assemble(guessable, answers))
    }

    /// Build a catalog from in-memory token lists with the same filter the
    /// file loader applies.
    pub fn from_tokens<'a, G, A>(guessable: G, answers: Option<A>) -> Result<WordCatalog, CatalogError>
    where
        G: IntoIterator<Item = &'a str>,
        A: IntoIterator<Item = &'a str>,
    {
        let guessable: Vec<Word> = guessable
            .into_iter()
            .filter_map(|token| Word::parse(token).ok())
            .collect();
        if guessable.is_empty() {
            return Err(CatalogError::NoUsableWords {
                path: "guessable tokens".to_string(),
            });
        }
        let answers = answers
            .map(|tokens| {
                tokens
                    .into_iter()
                    .filter_map(|token| Word::parse(token).ok())
                    .collect::<Vec<Word>>()
            })
            .filter(|words| !words.is_empty());
        Ok(Self::assemble(guessable, answers))
    }

    fn assemble(guessable: Vec<Word>, answers: Option<Vec<Word>>) -> WordCatalog {
        let mut guessable: HashSet<Word> = guessable.into_iter().collect();
        let mut answers = answers.unwrap_or_else(|| guessable.iter().cloned().collect());
        answers.sort();
        answers.dedup();
        // Every answer candidate must also be accepted as a guess.
        for word in &answers {
            guessable.insert(word.clone());
        }
        info!(
            "Catalog ready: {} guessable words, {} answer candidates",
            guessable.len(),
            answers.len()
        );
        WordCatalog { guessable, answers }
    }

    pub fn is_guessable(&self, word: &Word) -> bool {
        self.guessable.contains(word)
    }

    pub fn answer_candidates(&self) -> &[Word] {
        &self.answers
    }

    pub fn guessable_count(&self) -> usize {
        self.guessable.len()
    }

    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> WordCatalog {
        WordCatalog {
            guessable: HashSet::new(),
            answers: Vec::new(),
        }
    }
}

/// Read one word per line, dropping every token the shape filter rejects.
fn read_words(path: &Path) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);

    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Ok(word) = Word::parse(&line) {
            words.push(word);
        }
    }
    Ok(words)
}
