//! Random grounding sweep: how often does a random set of size `k` work?
//!
//! For each candidate size `k`, draw `trials` uniform random `k`-subsets of
//! the non-mandatory words, add the mandatory set, and test whether the
//! closure covers the graph. Each point reports the empirical success rate
//! and a bootstrap 95% confidence interval.
//!
//! Sizes are processed largest first. Large sizes succeed most often, so the
//! log shows where the success curve drops off before the slow small-`k`
//! points run.

use std::collections::BTreeMap;

use groundset_core::{DefinitionGraph, GraphError, WordId, WordSet};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bootstrap::bootstrap_interval;
use crate::closure::Propagator;
use crate::error::SearchError;

/// Confidence level of the reported interval.
pub const CONFIDENCE: f64 = 0.95;

/// Sweep settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Sample sizes to test; duplicates are run once.
    pub ks: Vec<usize>,
    /// Random subsets per size.
    pub trials: usize,
    /// Bootstrap resamples per interval.
    pub resamples: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            ks: Vec::new(),
            trials: 100,
            resamples: 1000,
        }
    }
}

/// Outcome for one sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Mandatory words plus `k`.
    pub grounding_set_size: usize,
    pub trials: usize,
    pub success_rate: f64,
    pub lower_bound_95: f64,
    pub upper_bound_95: f64,
}

/// Sweep outcome keyed by `k`.
pub type SweepResult = BTreeMap<usize, SweepPoint>;

/// `min..=max` in steps of `step`, largest first.
pub fn descending_ks(min: usize, max: usize, step: usize) -> Vec<usize> {
    if min > max {
        return Vec::new();
    }
    let mut ks: Vec<usize> = (min..=max).step_by(step.max(1)).collect();
    ks.reverse();
    ks
}

/// Runs the sweep. `rng` drives both the subset draws and the bootstrap.
pub fn sweep<R: Rng + ?Sized>(
    graph: &DefinitionGraph,
    mandatory: &WordSet,
    config: &SweepConfig,
    rng: &mut R,
) -> Result<SweepResult, SearchError> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph.into());
    }
    if config.trials == 0 {
        return Err(SearchError::NoTrials);
    }

    let rest: Vec<WordId> = graph.ids().filter(|&id| !mandatory.contains(id)).collect();
    let mut ks = config.ks.clone();
    ks.sort_unstable_by(|a, b| b.cmp(a));
    ks.dedup();
    if let Some(&k) = ks.first() {
        if k > rest.len() {
            return Err(SearchError::SampleTooLarge {
                k,
                available: rest.len(),
            });
        }
    }

    tracing::info!(
        sizes = ks.len(),
        trials = config.trials,
        candidates = rest.len(),
        mandatory = mandatory.len(),
        "starting random grounding sweep"
    );

    let mut propagator = Propagator::new(graph);
    let mut seed = graph.empty_set();
    let mut result = SweepResult::new();

    for k in ks {
        let mut successes = 0usize;
        for _ in 0..config.trials {
            seed.clear();
            seed.union_with(mandatory);
            for i in index::sample(&mut *rng, rest.len(), k).iter() {
                seed.insert(rest[i]);
            }
            if propagator.covers_all(graph, &seed) {
                successes += 1;
            }
        }

        let success_rate = successes as f64 / config.trials as f64;
        let (lower, upper) =
            bootstrap_interval(successes, config.trials, config.resamples, CONFIDENCE, &mut *rng)?;
        let point = SweepPoint {
            grounding_set_size: mandatory.len() + k,
            trials: config.trials,
            success_rate,
            lower_bound_95: lower,
            upper_bound_95: upper,
        };
        tracing::info!(
            k,
            grounding_set_size = point.grounding_set_size,
            success_rate,
            lower_bound_95 = lower,
            upper_bound_95 = upper,
            "sweep point"
        );
        result.insert(k, point);
    }

    Ok(result)
}
