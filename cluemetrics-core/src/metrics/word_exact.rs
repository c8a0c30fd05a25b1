use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_default::DefaultFromSerde;
use tracing::debug;

use crate::error::{Error, Result};

use super::{reduce, WordExactState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, DefaultFromSerde)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct WordExactConfig {
    /// When set, `compute` only reports a value once the local counters have
    /// been combined with every other worker's through `sync`.
    #[serde(default)]
    pub distributed_sync: bool,
}

/// Running exact match accuracy between predicted and target strings.
///
/// Comparison is plain string equality: case sensitive, no trimming and no
/// unicode normalization. Counters only grow until `reset` starts a new epoch.
///
/// The accumulator is single writer. To evaluate across several workers keep
/// one instance per worker and combine their [`WordExactState`] snapshots
/// with [`reduce`] or [`WordExactMetric::sync`].
#[derive(Clone, Debug, Default)]
pub struct WordExactMetric {
    correct: u64,
    total: u64,
    config: WordExactConfig,
    synced: Option<WordExactState>,
}

impl WordExactMetric {
    pub fn new() -> WordExactMetric {
        WordExactMetric::with_config(WordExactConfig::default())
    }

    pub fn with_config(config: WordExactConfig) -> WordExactMetric {
        WordExactMetric {
            correct: 0,
            total: 0,
            config,
            synced: None,
        }
    }

    pub fn from_state(state: WordExactState, config: WordExactConfig) -> WordExactMetric {
        WordExactMetric {
            correct: state.correct(),
            total: state.total(),
            config,
            synced: None,
        }
    }

    pub fn config(&self) -> &WordExactConfig {
        &self.config
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Consume one batch of position-paired predictions and targets.
    ///
    /// Fails with [`Error::InvalidInput`] when the lengths differ, or with
    /// [`Error::InvalidArgument`] if a counter would overflow. Either way the
    /// counters are left untouched.
    pub fn update<P, T>(&mut self, predictions: &[P], targets: &[T]) -> Result<()>
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        if predictions.len() != targets.len() {
            return Err(Error::InvalidInput {
                predictions: predictions.len(),
                targets: targets.len(),
            });
        }

        let matches = predictions
            .iter()
            .zip(targets)
            .filter(|(pred, label)| pred.as_ref() == label.as_ref())
            .count() as u64;

        self.apply(&WordExactState::from_counts(
            matches,
            predictions.len() as u64,
        ))?;

        debug!(
            batch = predictions.len(),
            matches,
            correct = self.correct,
            total = self.total,
            "word exact update"
        );
        Ok(())
    }

    /// Accuracy of everything accumulated so far.
    ///
    /// With `distributed_sync` enabled the value comes from the state stored
    /// by the last [`WordExactMetric::sync`], and [`Error::NotSynchronized`]
    /// is returned if the local counters changed since then.
    pub fn compute(&self) -> Result<f64> {
        if self.config.distributed_sync {
            return self.synced.ok_or(Error::NotSynchronized)?.ratio();
        }
        self.compute_local()
    }

    /// Accuracy of this instance alone, ignoring any synchronized state.
    pub fn compute_local(&self) -> Result<f64> {
        self.state().ratio()
    }

    pub fn reset(&mut self) {
        self.correct = 0;
        self.total = 0;
        self.synced = None;
    }

    pub fn state(&self) -> WordExactState {
        WordExactState::from_counts(self.correct, self.total)
    }

    /// Fold another instance's counters into this one.
    pub fn merge(&mut self, other: &WordExactState) -> Result<()> {
        self.apply(other)
    }

    fn apply(&mut self, delta: &WordExactState) -> Result<()> {
        let next = self.state().checked_add(delta)?;
        self.correct = next.correct();
        self.total = next.total();
        self.synced = None;
        Ok(())
    }

    /// Sum this instance's counters with every peer snapshot and keep the
    /// result as the global state `compute` reports from. Local counters are
    /// not modified, so the same snapshot can be handed to the peers.
    pub fn sync(&mut self, peers: &[WordExactState]) -> Result<WordExactState> {
        let local = self.state();
        let global = reduce(std::iter::once(&local).chain(peers))?;
        debug!(
            peers = peers.len(),
            correct = global.correct(),
            total = global.total(),
            "word exact sync"
        );
        self.synced = Some(global);
        Ok(global)
    }

    pub fn get_name(&self) -> String {
        "Word exact match".to_owned()
    }
}
