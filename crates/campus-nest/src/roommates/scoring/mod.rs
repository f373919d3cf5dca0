mod config;
pub(crate) mod pools;

pub use config::{BudgetBand, ScoringConfig};

use super::domain::RoommateProfile;
use serde::Serialize;

/// Upper bound of any compatibility score.
pub const MAX_SCORE: u8 = 100;

/// The four independent categories a compatibility score is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityPool {
    University,
    Budget,
    Habits,
    Interests,
}

impl CompatibilityPool {
    pub const fn label(self) -> &'static str {
        match self {
            Self::University => "University",
            Self::Budget => "Budget",
            Self::Habits => "Habits",
            Self::Interests => "Shared interests",
        }
    }
}

/// Contribution of a single pool, kept so rankings can be explained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolScore {
    pub pool: CompatibilityPool,
    pub points: u8,
    pub notes: String,
}

/// Per-pool audit trail plus the clamped total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityBreakdown {
    pub total: u8,
    pub components: Vec<PoolScore>,
}

impl CompatibilityBreakdown {
    pub fn points_for(&self, pool: CompatibilityPool) -> u8 {
        self.components
            .iter()
            .find(|component| component.pool == pool)
            .map(|component| component.points)
            .unwrap_or(0)
    }
}

/// Stateless scorer applying a [`ScoringConfig`] to pairs of profiles.
///
/// Pools only contribute when both profiles carry the data they compare, so a missing field
/// never penalises a pair and never blocks the other pools. Every pool compares the two sides
/// symmetrically, which makes `score(a, b) == score(b, a)`.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    config: ScoringConfig,
}

impl CompatibilityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, a: &RoommateProfile, b: &RoommateProfile) -> u8 {
        self.breakdown(a, b).total
    }

    pub fn breakdown(&self, a: &RoommateProfile, b: &RoommateProfile) -> CompatibilityBreakdown {
        let components: Vec<PoolScore> = [
            pools::university(a, b, &self.config),
            pools::budget(a, b, &self.config),
            pools::habits(a, b, &self.config),
            pools::interests(a, b, &self.config),
        ]
        .into_iter()
        .flatten()
        .collect();

        let raw: u16 = components
            .iter()
            .map(|component| u16::from(component.points))
            .sum();
        let total = raw.min(u16::from(MAX_SCORE)) as u8;

        CompatibilityBreakdown { total, components }
    }
}
