use std::collections::HashSet;

use super::super::domain::{BudgetRange, Habits, RoommateProfile};
use super::config::ScoringConfig;
use super::{CompatibilityPool, PoolScore};

pub(crate) fn university(
    a: &RoommateProfile,
    b: &RoommateProfile,
    config: &ScoringConfig,
) -> Option<PoolScore> {
    match (a.university.as_deref(), b.university.as_deref()) {
        (Some(left), Some(right)) if left == right => Some(PoolScore {
            pool: CompatibilityPool::University,
            points: config.university_points,
            notes: format!("both attend {left}"),
        }),
        (Some(_), Some(_)) => Some(PoolScore {
            pool: CompatibilityPool::University,
            points: 0,
            notes: "different universities".to_string(),
        }),
        _ => None,
    }
}

pub(crate) fn budget(
    a: &RoommateProfile,
    b: &RoommateProfile,
    config: &ScoringConfig,
) -> Option<PoolScore> {
    let (left, right) = (a.budget.as_ref()?, b.budget.as_ref()?);
    let gap = left.midpoint_gap(right);
    let points = budget_points(left, right, config);

    Some(PoolScore {
        pool: CompatibilityPool::Budget,
        points,
        notes: format!("budget midpoints {:.0} apart", gap),
    })
}

pub(crate) fn budget_points(left: &BudgetRange, right: &BudgetRange, config: &ScoringConfig) -> u8 {
    let gap = left.midpoint_gap(right);
    config
        .budget_bands
        .iter()
        .find(|band| gap < band.below)
        .map(|band| band.points)
        .unwrap_or(0)
}

pub(crate) fn habits(
    a: &RoommateProfile,
    b: &RoommateProfile,
    config: &ScoringConfig,
) -> Option<PoolScore> {
    let (left, right) = (a.habits.as_ref()?, b.habits.as_ref()?);
    let mut points: u8 = 0;
    let mut matched = Vec::new();

    if both_equal(left, right, |habits| habits.sleep_schedule) {
        points = points.saturating_add(config.sleep_schedule_points);
        matched.push("sleep schedule");
    }

    if let (Some(l), Some(r)) = (left.cleanliness, right.cleanliness) {
        if l.distance(r) <= config.cleanliness_tolerance {
            points = points.saturating_add(config.cleanliness_points);
            matched.push("cleanliness");
        }
    }

    if both_equal(left, right, |habits| habits.noise) {
        points = points.saturating_add(config.noise_points);
        matched.push("noise");
    }

    if both_equal(left, right, |habits| habits.smoking) {
        points = points.saturating_add(config.smoking_points);
        matched.push("smoking");
    }

    if both_equal(left, right, |habits| habits.cooking) {
        points = points.saturating_add(config.cooking_points);
        matched.push("cooking");
    }

    let notes = if matched.is_empty() {
        "no matching habits".to_string()
    } else {
        format!("matching habits: {}", matched.join(", "))
    };

    Some(PoolScore {
        pool: CompatibilityPool::Habits,
        points,
        notes,
    })
}

fn both_equal<T, F>(left: &Habits, right: &Habits, field: F) -> bool
where
    T: PartialEq,
    F: Fn(&Habits) -> Option<T>,
{
    match (field(left), field(right)) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

pub(crate) fn interests(
    a: &RoommateProfile,
    b: &RoommateProfile,
    config: &ScoringConfig,
) -> Option<PoolScore> {
    if a.interests.is_empty() || b.interests.is_empty() {
        return None;
    }

    let shared = shared_interests(a, b);
    let count = u8::try_from(shared.len()).unwrap_or(u8::MAX);
    let points = count
        .saturating_mul(config.points_per_shared_interest)
        .min(config.shared_interest_cap);

    Some(PoolScore {
        pool: CompatibilityPool::Interests,
        points,
        notes: format!("{} shared interest(s)", shared.len()),
    })
}

/// Interests both sides list, deduplicated, in the order `a` lists them.
pub(crate) fn shared_interests<'a>(a: &'a RoommateProfile, b: &RoommateProfile) -> Vec<&'a str> {
    let theirs: HashSet<&str> = b.interests.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    a.interests
        .iter()
        .map(String::as_str)
        .filter(|interest| theirs.contains(interest) && seen.insert(*interest))
        .collect()
}
