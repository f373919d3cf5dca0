//! Roommate matching: profile validation, compatibility scoring, match reasons and ranking,
//! plus the service and router that expose them over HTTP.

pub mod domain;
pub mod import;
pub mod ranking;
pub mod reasons;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AuthenticatedPrincipal, BudgetDocument, BudgetRange, CandidateSummary, Cleanliness,
    CompatibilityResult, CookingFrequency, Habits, HabitsDocument, NoiseTolerance,
    ProfileDocument, PublicRoommateProfile, RoommateMatch, RoommateProfile, SleepSchedule, UserId,
    UserRecord,
};
pub use import::{RosterImport, RosterImportError, RosterImporter, SkippedRow};
pub use ranking::rank_candidates;
pub use reasons::{match_reasons, HIGH_COMPATIBILITY_THRESHOLD};
pub use repository::{is_opted_in_candidate, DirectoryError, UserDirectory};
pub use router::{roommate_router, PRINCIPAL_HEADER};
pub use scoring::{
    BudgetBand, CompatibilityBreakdown, CompatibilityPool, CompatibilityScorer, PoolScore,
    ScoringConfig, MAX_SCORE,
};
pub use service::{MatchServiceError, RoommateMatchService};
pub use validation::{validate_profile, ProfileValidationError};
