use super::domain::{CompatibilityResult, RoommateProfile, UserId};
use super::reasons::match_reasons;
use super::scoring::CompatibilityScorer;

/// Scores every candidate against the requester and orders them best first.
///
/// The sort is stable, so candidates with equal scores keep their pool order.
pub fn rank_candidates<'a, I>(
    scorer: &CompatibilityScorer,
    requester: &RoommateProfile,
    candidates: I,
) -> Vec<CompatibilityResult>
where
    I: IntoIterator<Item = (&'a UserId, &'a RoommateProfile)>,
{
    let mut results: Vec<CompatibilityResult> = candidates
        .into_iter()
        .map(|(candidate_id, profile)| {
            let score = scorer.score(requester, profile);
            CompatibilityResult {
                candidate_user_id: candidate_id.clone(),
                score,
                reasons: match_reasons(requester, profile, score),
            }
        })
        .collect();

    results.sort_by(|left, right| right.score.cmp(&left.score));
    results
}
