use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    AuthenticatedPrincipal, CandidateSummary, ProfileDocument, PublicRoommateProfile,
    RoommateMatch, RoommateProfile, UserId, UserRecord,
};
use super::ranking::rank_candidates;
use super::repository::{DirectoryError, UserDirectory};
use super::scoring::{CompatibilityBreakdown, CompatibilityScorer, ScoringConfig};
use super::validation::{validate_profile, ProfileValidationError};

/// Service composing the user directory with the compatibility scorer.
pub struct RoommateMatchService<D> {
    directory: Arc<D>,
    scorer: Arc<CompatibilityScorer>,
}

impl<D> RoommateMatchService<D>
where
    D: UserDirectory + 'static,
{
    pub fn new(directory: Arc<D>, config: ScoringConfig) -> Self {
        Self {
            directory,
            scorer: Arc::new(CompatibilityScorer::new(config)),
        }
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    /// Rank every opted-in user against the principal's roommate profile.
    pub fn find_matches(
        &self,
        principal: &AuthenticatedPrincipal,
    ) -> Result<Vec<RoommateMatch>, MatchServiceError> {
        let requester = self.require_user(&principal.user_id)?;
        let profile = opted_in_profile(&requester)?;

        let candidates: Vec<(UserRecord, RoommateProfile)> = self
            .directory
            .opted_in(&requester.id)?
            .into_iter()
            .filter(|record| record.id != requester.id)
            .filter_map(scoreable_candidate)
            .collect();

        let results = rank_candidates(
            &self.scorer,
            &profile,
            candidates
                .iter()
                .map(|(record, candidate)| (&record.id, candidate)),
        );

        let mut summaries: HashMap<&UserId, CandidateSummary> = candidates
            .iter()
            .map(|(record, candidate)| {
                (&record.id, CandidateSummary::from_record(record, candidate))
            })
            .collect();

        let matches: Vec<RoommateMatch> = results
            .into_iter()
            .filter_map(|result| {
                summaries
                    .remove(&result.candidate_user_id)
                    .map(|user| RoommateMatch {
                        user,
                        compatibility_score: result.score,
                        match_reasons: result.reasons,
                    })
            })
            .collect();

        debug!(
            requester = %requester.id,
            candidates = matches.len(),
            "ranked roommate candidates"
        );
        Ok(matches)
    }

    /// Per-pool explanation of how the principal scores against one candidate.
    pub fn breakdown(
        &self,
        principal: &AuthenticatedPrincipal,
        candidate_id: &UserId,
    ) -> Result<CompatibilityBreakdown, MatchServiceError> {
        let requester = self.require_user(&principal.user_id)?;
        let profile = opted_in_profile(&requester)?;
        let candidate = self.require_user(candidate_id)?;
        let candidate_profile = match &candidate.roommate_profile {
            Some(document) => validate_profile(document)?,
            None => RoommateProfile::default(),
        };

        Ok(self.scorer.breakdown(&profile, &candidate_profile))
    }

    /// Public roommate profile for a single user.
    pub fn public_profile(
        &self,
        user_id: &UserId,
    ) -> Result<PublicRoommateProfile, MatchServiceError> {
        let record = self.require_user(user_id)?;
        Ok(record.public_view())
    }

    /// Replace the principal's roommate profile after validating the document.
    ///
    /// Only the profile and its timestamp are written; the saved list is left as stored.
    pub fn update_profile(
        &self,
        principal: &AuthenticatedPrincipal,
        document: ProfileDocument,
    ) -> Result<PublicRoommateProfile, MatchServiceError> {
        validate_profile(&document)?;

        let looking = document.looking_for_roommate;
        let updated_at = Utc::now();
        let record = self.modify_user(&principal.user_id, &mut |record| {
            record.roommate_profile = Some(document.clone());
            record.profile_updated_at = Some(updated_at);
        })?;

        info!(user = %record.id, looking_for_roommate = looking, "roommate profile updated");
        Ok(record.public_view())
    }

    /// Save `target` to the principal's list, or remove it if already saved.
    ///
    /// Returns whether the target is saved afterwards.
    pub fn toggle_saved(
        &self,
        principal: &AuthenticatedPrincipal,
        target: &UserId,
    ) -> Result<bool, MatchServiceError> {
        if &principal.user_id == target {
            return Err(MatchServiceError::SelfReference);
        }

        self.require_user(target)?;

        let mut saved = false;
        self.modify_user(&principal.user_id, &mut |owner| {
            saved = match owner.saved_roommates.iter().position(|id| id == target) {
                Some(index) => {
                    owner.saved_roommates.remove(index);
                    false
                }
                None => {
                    owner.saved_roommates.push(target.clone());
                    true
                }
            };
        })?;

        debug!(owner = %principal.user_id, target = %target, saved, "saved roommates toggled");
        Ok(saved)
    }

    /// Summaries of the principal's saved roommates that still exist, in saved order.
    pub fn saved_roommates(
        &self,
        principal: &AuthenticatedPrincipal,
    ) -> Result<Vec<CandidateSummary>, MatchServiceError> {
        let owner = self.require_user(&principal.user_id)?;
        let mut summaries = Vec::with_capacity(owner.saved_roommates.len());

        for id in &owner.saved_roommates {
            let Some(record) = self.directory.fetch(id)? else {
                continue;
            };
            let profile = match &record.roommate_profile {
                Some(document) => match validate_profile(document) {
                    Ok(profile) => profile,
                    Err(err) => {
                        warn!(user = %record.id, error = %err, "skipping saved roommate with invalid profile");
                        continue;
                    }
                },
                None => RoommateProfile::default(),
            };
            summaries.push(CandidateSummary::from_record(&record, &profile));
        }

        Ok(summaries)
    }

    fn modify_user(
        &self,
        id: &UserId,
        apply: &mut dyn FnMut(&mut UserRecord),
    ) -> Result<UserRecord, MatchServiceError> {
        self.directory.modify(id, apply).map_err(|err| match err {
            DirectoryError::NotFound => MatchServiceError::UserNotFound(id.clone()),
            other => MatchServiceError::Directory(other),
        })
    }

    fn require_user(&self, id: &UserId) -> Result<UserRecord, MatchServiceError> {
        self.directory
            .fetch(id)?
            .ok_or_else(|| MatchServiceError::UserNotFound(id.clone()))
    }
}

fn opted_in_profile(record: &UserRecord) -> Result<RoommateProfile, MatchServiceError> {
    match &record.roommate_profile {
        Some(document) if document.looking_for_roommate => Ok(validate_profile(document)?),
        _ => Err(MatchServiceError::ProfileIncomplete),
    }
}

fn scoreable_candidate(record: UserRecord) -> Option<(UserRecord, RoommateProfile)> {
    let document = record.roommate_profile.as_ref()?;
    if !document.looking_for_roommate {
        return None;
    }

    match validate_profile(document) {
        Ok(profile) => Some((record, profile)),
        Err(err) => {
            warn!(candidate = %record.id, error = %err, "skipping candidate with invalid roommate profile");
            None
        }
    }
}

/// Error raised by the roommate match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("Please complete your roommate profile first and set lookingForRoommate to true")]
    ProfileIncomplete,
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("you cannot save your own roommate profile")]
    SelfReference,
    #[error("invalid roommate profile: {0}")]
    InvalidProfile(#[from] ProfileValidationError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
