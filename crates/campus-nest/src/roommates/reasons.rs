use super::domain::RoommateProfile;
use super::scoring::pools::shared_interests;

/// Scores at or above this value are called out as a strong match.
pub const HIGH_COMPATIBILITY_THRESHOLD: u8 = 70;

/// How many shared interests the reason text names.
pub const SHARED_INTERESTS_SHOWN: usize = 3;

/// Human readable explanations for a match, in display order.
pub fn match_reasons(requester: &RoommateProfile, candidate: &RoommateProfile, score: u8) -> Vec<String> {
    let mut reasons = Vec::new();

    if let (Some(mine), Some(theirs)) = (&requester.university, &candidate.university) {
        if mine == theirs {
            reasons.push("Same university".to_string());
        }
    }

    let shared = shared_interests(requester, candidate);
    if !shared.is_empty() {
        let shown: Vec<&str> = shared.into_iter().take(SHARED_INTERESTS_SHOWN).collect();
        reasons.push(format!("Shared interests: {}", shown.join(", ")));
    }

    if score >= HIGH_COMPATIBILITY_THRESHOLD {
        reasons.push("High compatibility".to_string());
    }

    reasons
}
