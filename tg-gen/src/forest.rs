//! Forest generation.
//!
//! Nodes are built one at a time and appended to a single arena (`Vec<NodeRecord>`). A non-root
//! node only ever points at an index that already exists in the arena, so the parent graph is
//! acyclic by construction. Depth is capped at `max_level`: when the randomly picked parent is
//! already at the ceiling, a replacement is drawn from the arena indices whose level is still
//! below it. That index list is filled during the same pass, so the fallback never rescans
//! history.

use rand::Rng;
use rand_distr::{
    Distribution,
    Uniform,
};
use tg_core::{
    random_id,
    TimeWindow,
};
use thiserror::Error;
use tracing::{
    debug,
    instrument,
};

use crate::model::{
    NodeRecord,
    Source,
};

/// Default probability that a node (other than the first) is a root.
pub const DEFAULT_ROOT_SHARE: f64 = 0.1;
/// Default accepted-but-unused branching hint.
pub const DEFAULT_MAX_CHILDREN_HINT: i64 = 6;
/// Default lower bound for health values.
pub const DEFAULT_HEALTH_MIN: f64 = 0.0;
/// Default upper bound for health values.
pub const DEFAULT_HEALTH_MAX: f64 = 200.0;
/// Default depth ceiling.
pub const DEFAULT_MAX_LEVEL: u32 = 100;

/// Invalid generation parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// `rows` was zero.
    #[error("row count must be positive")]
    NoRows,

    /// `root_share` outside `[0, 1]` (or NaN).
    #[error("root share must be between 0 and 1, got {0}")]
    RootShareOutOfRange(f64),

    /// Health bounds are inverted or not finite.
    #[error("health minimum ({min}) cannot exceed health maximum ({max})")]
    InvertedHealthBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Health bounds are ordered but too far apart to sample between.
    #[error("health range [{min}, {max}] is too wide to sample from")]
    HealthRangeOverflow {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// `max_level` was zero.
    #[error("maximum tree depth must be positive")]
    NoLevels,
}

/// Everything the generator needs besides a random source.
#[derive(Clone, Debug)]
pub struct ForestConfig {
    /// Number of records to produce.
    pub rows: usize,
    /// Probability that a non-first node is a root.
    pub root_share: f64,
    /// Accepted for compatibility; does not influence generation.
    pub max_children_hint: i64,
    /// Inclusive lower bound for `health`.
    pub health_min: f64,
    /// Inclusive upper bound for `health`.
    pub health_max: f64,
    /// Window that timestamps are drawn from.
    pub window: TimeWindow,
    /// Maximum `level` any node may have.
    pub max_level: u32,
}

impl ForestConfig {
    /// Config with every knob at its default except the row count and time window.
    #[must_use]
    pub const fn new(rows: usize, window: TimeWindow) -> Self {
        Self {
            rows,
            root_share: DEFAULT_ROOT_SHARE,
            max_children_hint: DEFAULT_MAX_CHILDREN_HINT,
            health_min: DEFAULT_HEALTH_MIN,
            health_max: DEFAULT_HEALTH_MAX,
            window,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Check every numeric parameter. The time window is validated when it is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if !(0.0..=1.0).contains(&self.root_share) {
            return Err(ConfigError::RootShareOutOfRange(self.root_share));
        }
        if !self.health_min.is_finite() || !self.health_max.is_finite() || self.health_min > self.health_max {
            return Err(ConfigError::InvertedHealthBounds { min: self.health_min, max: self.health_max });
        }
        if !(self.health_max - self.health_min).is_finite() {
            return Err(ConfigError::HealthRangeOverflow { min: self.health_min, max: self.health_max });
        }
        if self.max_level == 0 {
            return Err(ConfigError::NoLevels);
        }
        Ok(())
    }
}

/// Round to two decimals and keep the result inside `[min, max]`.
fn round_health(raw: f64, min: f64, max: f64) -> f64 {
    ((raw * 100.0).round() / 100.0).clamp(min, max)
}

/// Build `config.rows` nodes drawing all randomness from `rng`.
///
/// Callers are expected to have run [`ForestConfig::validate`]; the same `rng` state and config
/// always yield the same records.
#[instrument(skip_all, fields(rows = config.rows, max_level = config.max_level))]
pub fn generate_forest<R: Rng + ?Sized>(config: &ForestConfig, rng: &mut R) -> Vec<NodeRecord> {
    let health_dist = Uniform::new_inclusive(config.health_min, config.health_max);

    let mut nodes: Vec<NodeRecord> = Vec::with_capacity(config.rows);
    // Arena indices of nodes whose level is below the ceiling; append-only.
    let mut below_ceiling: Vec<usize> = Vec::new();
    let (mut roots, mut fallbacks) = (0usize, 0usize);

    for i in 0..config.rows {
        let id = random_id(rng);
        let session_id = random_id(rng);
        let health = round_health(health_dist.sample(rng), config.health_min, config.health_max);
        let timestamp = config.window.sample(rng);

        let parent = if i == 0 || rng.gen::<f64>() < config.root_share {
            None
        } else {
            let candidate = rng.gen_range(0..i);
            if nodes[candidate].level < config.max_level {
                Some(candidate)
            } else {
                fallbacks += 1;
                // Only empty when max_level == 1; the node then starts a new tree.
                (!below_ceiling.is_empty()).then(|| below_ceiling[rng.gen_range(0..below_ceiling.len())])
            }
        };

        let (source, level) = match parent {
            Some(p) => (Source::Node(nodes[p].id), nodes[p].level + 1),
            None => {
                roots += 1;
                (Source::Root, 1)
            },
        };

        if level < config.max_level {
            below_ceiling.push(i);
        }
        nodes.push(NodeRecord { timestamp, id, health, session_id, source, level });
    }

    let deepest = nodes.iter().map(|n| n.level).max().unwrap_or(0);
    debug!(roots, fallbacks, deepest, eligible_parents = below_ceiling.len(), "forest generated");
    nodes
}
