// Core algorithm exports
pub mod aggregator;
pub mod matcher;
pub mod scorers;
pub mod weights;

pub use aggregator::{aggregate, score_pair, PairScore};
pub use matcher::{DealBreakerPolicy, MatchMode, MatchOutcome, Matcher};
pub use weights::{expand_priorities, Factor, PriorityWeights, WeightError, WeightVector};
