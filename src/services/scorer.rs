use super::catalog::{Word, WORD_LENGTH};

/// Letter-position feedback for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub exact: u8,
    pub partial: u8,
}

/// Compare a guess to the answer.
///
/// Two passes with consumption flags: the first claims every positional
/// match, the second walks the unclaimed guess letters and consumes the
/// first unclaimed answer letter that matches. Each letter on either side
/// counts at most once, so duplicate letters never double-score even though
/// the word lists forbid them.
pub fn score(guess: &Word, answer: &Word) -> Score {
    let guess = guess.as_bytes();
    let answer = answer.as_bytes();

    let mut exact = 0u8;
    let mut partial = 0u8;
    let mut guess_used = [false; WORD_LENGTH];
    let mut answer_used = [false; WORD_LENGTH];

    for i in 0..WORD_LENGTH {
        if guess[i] == answer[i] {
            exact += 1;
            guess_used[i] = true;
            answer_used[i] = true;
        }
    }

    for i in 0..WORD_LENGTH {
        if guess_used[i] {
            continue;
        }
        for j in 0..WORD_LENGTH {
            if answer_used[j] {
                continue;
            }
            if guess[i] == answer[j] {
                partial += 1;
                answer_used[j] = true;
                break;
            }
        }
    }

    Score { exact, partial }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::parse(text).unwrap()
    }

    #[test]
    fn fort_against_soft() {
        // O and T sit in place; F survives as a partial, R matches nothing.
        assert_eq!(
            score(&word("FORT"), &word("SOFT")),
            Score { exact: 2, partial: 1 }
        );
    }

    #[test]
    fn answer_against_itself_is_all_exact() {
        for text in ["SOFT", "MINT", "ZINC"] {
            assert_eq!(
                score(&word(text), &word(text)),
                Score { exact: 4, partial: 0 }
            );
        }
    }

    #[test]
    fn totals_never_exceed_word_length() {
        let words = ["SOFT", "FORT", "MINT", "TONE", "SALT"].map(word);
        for guess in &words {
            for answer in &words {
                let result = score(guess, answer);
                assert!(usize::from(result.exact + result.partial) <= WORD_LENGTH);
            }
        }
    }

    #[test]
    fn exact_count_is_symmetric() {
        let words = ["SOFT", "FORT", "MINT", "TONE", "SALT"].map(word);
        for guess in &words {
            for answer in &words {
                assert_eq!(score(guess, answer).exact, score(answer, guess).exact);
            }
        }
    }

    #[test]
    fn duplicate_letters_consume_at_most_once() {
        // The word lists forbid duplicates, but the algorithm must not care.
        assert_eq!(
            score(&Word::raw("ABBA"), &Word::raw("BABA")),
            Score { exact: 2, partial: 2 }
        );
        assert_eq!(
            score(&Word::raw("BOOB"), &Word::raw("BOLT")),
            Score { exact: 2, partial: 0 }
        );
        assert_eq!(
            score(&Word::raw("AAAA"), &Word::raw("ABCD")),
            Score { exact: 1, partial: 0 }
        );
    }
}
