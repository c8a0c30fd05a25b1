use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Snapshot of a word exact accumulator, the unit exchanged between workers.
///
/// `correct <= total` always holds; deserializing a snapshot that breaks it
/// fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWordExactState")]
pub struct WordExactState {
    correct: u64,
    total: u64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWordExactState {
    correct: u64,
    total: u64,
}

impl TryFrom<RawWordExactState> for WordExactState {
    type Error = Error;

    fn try_from(raw: RawWordExactState) -> Result<Self> {
        WordExactState::new(raw.correct, raw.total)
    }
}

impl WordExactState {
    pub fn new(correct: u64, total: u64) -> Result<WordExactState> {
        if correct > total {
            return Err(Error::InvalidArgument(format!(
                "correct count ({}) exceeds total count ({})",
                correct, total
            )));
        }
        Ok(WordExactState { correct, total })
    }

    // Callers guarantee correct <= total.
    pub(crate) fn from_counts(correct: u64, total: u64) -> WordExactState {
        WordExactState { correct, total }
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn ratio(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(Error::NotComputable(
                "no samples have been accumulated".to_owned(),
            ));
        }
        Ok(self.correct as f64 / self.total as f64)
    }

    pub fn checked_add(&self, other: &WordExactState) -> Result<WordExactState> {
        let overflow = || {
            Error::InvalidArgument(format!(
                "counter overflow adding {}/{} to {}/{}",
                other.correct, other.total, self.correct, self.total
            ))
        };
        // correct <= total on both sides, so total overflows first.
        let total = self.total.checked_add(other.total).ok_or_else(overflow)?;
        let correct = self.correct.checked_add(other.correct).ok_or_else(overflow)?;
        Ok(WordExactState { correct, total })
    }
}

/// Sum-reduce snapshots from any number of workers. Order and grouping do
/// not affect the result. Fails instead of wrapping if a counter would
/// overflow.
pub fn reduce<'a, I>(states: I) -> Result<WordExactState>
where
    I: IntoIterator<Item = &'a WordExactState>,
{
    states
        .into_iter()
        .try_fold(WordExactState::default(), |acc, state| acc.checked_add(state))
}

/// Process-wide accuracy: sum every counter, then divide once.
pub fn compute_reduced<'a, I>(states: I) -> Result<f64>
where
    I: IntoIterator<Item = &'a WordExactState>,
{
    reduce(states)?.ratio()
}
