use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The caller on whose behalf an operation runs, resolved by whatever authenticates requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub user_id: UserId,
}

impl AuthenticatedPrincipal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// User record as held by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub roommate_profile: Option<ProfileDocument>,
    #[serde(default)]
    pub saved_roommates: Vec<UserId>,
    #[serde(default)]
    pub profile_updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: String::new(),
            roommate_profile: None,
            saved_roommates: Vec::new(),
            profile_updated_at: None,
        }
    }

    pub fn with_profile(mut self, profile: ProfileDocument) -> Self {
        self.roommate_profile = Some(profile);
        self
    }

    pub fn public_view(&self) -> PublicRoommateProfile {
        PublicRoommateProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            roommate_profile: self.roommate_profile.clone(),
        }
    }
}

/// Roommate profile exactly as stored and as accepted from the profile editor.
///
/// Enumerated habits arrive as free strings and budgets as plain numbers; the `validation`
/// module turns a document into a [`RoommateProfile`]. Unknown keys are rejected so the
/// update endpoint only ever writes whitelisted fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habits: Option<HabitsDocument>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_needs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub looking_for_roommate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HabitsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanliness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pets: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BudgetDocument {
    pub min: f64,
    pub max: f64,
}

/// Validated roommate profile consumed by scoring, reasons and ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoommateProfile {
    pub university: Option<String>,
    pub major: Option<String>,
    pub habits: Option<Habits>,
    pub interests: Vec<String>,
    pub budget: Option<BudgetRange>,
    pub special_needs: Option<String>,
    pub bio: Option<String>,
    pub looking_for_roommate: bool,
}

/// Living habits; every field is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Habits {
    pub sleep_schedule: Option<SleepSchedule>,
    pub cleanliness: Option<Cleanliness>,
    pub noise: Option<NoiseTolerance>,
    pub smoking: Option<bool>,
    pub pets: Option<bool>,
    pub cooking: Option<CookingFrequency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepSchedule {
    Early,
    Late,
    Flexible,
}

impl SleepSchedule {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "early" => Some(Self::Early),
            "late" => Some(Self::Late),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Late => "late",
            Self::Flexible => "flexible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseTolerance {
    Quiet,
    Moderate,
    Social,
}

impl NoiseTolerance {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Self::Quiet),
            "moderate" => Some(Self::Moderate),
            "social" => Some(Self::Social),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Moderate => "moderate",
            Self::Social => "social",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingFrequency {
    Often,
    Sometimes,
    Rarely,
}

impl CookingFrequency {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "often" => Some(Self::Often),
            "sometimes" => Some(Self::Sometimes),
            "rarely" => Some(Self::Rarely),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Often => "often",
            Self::Sometimes => "sometimes",
            Self::Rarely => "rarely",
        }
    }
}

/// Cleanliness self-rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cleanliness(u8);

impl Cleanliness {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn distance(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

/// Monthly budget window in the marketplace currency unit. `min` may exceed `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn midpoint_gap(&self, other: &BudgetRange) -> f64 {
        (self.midpoint() - other.midpoint()).abs()
    }
}

/// Display-only fields shown for each candidate in the match list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
    pub university: Option<String>,
    pub major: Option<String>,
    pub bio: Option<String>,
    pub budget: Option<BudgetRange>,
    pub interests: Vec<String>,
}

impl CandidateSummary {
    pub fn from_record(record: &UserRecord, profile: &RoommateProfile) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            avatar: record.avatar.clone(),
            university: profile.university.clone(),
            major: profile.major.clone(),
            bio: profile.bio.clone(),
            budget: profile.budget,
            interests: profile.interests.clone(),
        }
    }
}

/// Outcome of scoring one candidate against the requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub candidate_user_id: UserId,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// One entry of the `findMatches` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoommateMatch {
    pub user: CandidateSummary,
    pub compatibility_score: u8,
    pub match_reasons: Vec<String>,
}

/// Profile as exposed by the public lookup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRoommateProfile {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
    pub roommate_profile: Option<ProfileDocument>,
}
