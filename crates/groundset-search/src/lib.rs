//! Grounding-set search over dictionary definition graphs.
//!
//! All algorithms share one kernel: per-word counts of unknown predecessors,
//! decremented as words are learned, with a frontier of words whose count
//! has reached zero.
//!
//! # Modules
//!
//! - [`mandatory`]: words every grounding set must contain
//! - [`closure`]: forward closure of a known set ([`Propagator`])
//! - [`greedy`]: frontier-driven construction with a backoff policy
//! - [`rank_search`]: binary search over an out-degree ranking
//! - [`sweep`]: random-subset success rates with bootstrap intervals
//! - [`verify`]: grounding-set validation
//!
//! Randomized entry points take an explicit `rng`; callers seed a
//! `rand_chacha::ChaCha8Rng` for reproducible runs.

pub mod bootstrap;
pub mod closure;
pub mod error;
pub mod frontier;
pub mod greedy;
pub mod mandatory;
pub mod rank_search;
pub mod sweep;
pub mod verify;

#[cfg(test)]
mod test_support;

pub use closure::{closure, closure_with_order, Propagator};
pub use error::SearchError;
pub use frontier::{Frontier, FrontierOrder};
pub use greedy::{Backoff, GreedyConfig, GroundingResult, InitialGrounding};
pub use mandatory::{mandatory_set, mandatory_words, MandatoryReason, MandatoryWord};
pub use rank_search::RankSearchResult;
pub use sweep::{SweepConfig, SweepPoint, SweepResult};
pub use verify::{verify, verify_words, Verification};
