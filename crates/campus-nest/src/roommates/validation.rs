use super::domain::{
    BudgetDocument, BudgetRange, Cleanliness, CookingFrequency, Habits, HabitsDocument,
    NoiseTolerance, ProfileDocument, RoommateProfile, SleepSchedule,
};

/// Validation errors raised while turning a stored document into a scoreable profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("unknown sleep schedule '{0}' (expected early, late or flexible)")]
    UnknownSleepSchedule(String),
    #[error("unknown noise preference '{0}' (expected quiet, moderate or social)")]
    UnknownNoise(String),
    #[error("unknown cooking frequency '{0}' (expected often, sometimes or rarely)")]
    UnknownCooking(String),
    #[error("cleanliness must be a whole number between 1 and 5 (found {0})")]
    CleanlinessOutOfRange(f64),
    #[error("budget {field} must be a finite, non-negative amount (found {value})")]
    InvalidBudget { field: &'static str, value: f64 },
}

/// Converts a stored roommate document into the typed profile used by the scorer.
pub fn validate_profile(document: &ProfileDocument) -> Result<RoommateProfile, ProfileValidationError> {
    let habits = document.habits.as_ref().map(validate_habits).transpose()?;
    let budget = document.budget.as_ref().map(validate_budget).transpose()?;

    Ok(RoommateProfile {
        university: non_blank(document.university.as_deref()),
        major: non_blank(document.major.as_deref()),
        habits,
        interests: normalize_interests(&document.interests),
        budget,
        special_needs: non_blank(document.special_needs.as_deref()),
        bio: non_blank(document.bio.as_deref()),
        looking_for_roommate: document.looking_for_roommate,
    })
}

fn validate_habits(document: &HabitsDocument) -> Result<Habits, ProfileValidationError> {
    let sleep_schedule = document
        .sleep_schedule
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            SleepSchedule::parse(value)
                .ok_or_else(|| ProfileValidationError::UnknownSleepSchedule(value.to_string()))
        })
        .transpose()?;

    let noise = document
        .noise
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            NoiseTolerance::parse(value)
                .ok_or_else(|| ProfileValidationError::UnknownNoise(value.to_string()))
        })
        .transpose()?;

    let cooking = document
        .cooking
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            CookingFrequency::parse(value)
                .ok_or_else(|| ProfileValidationError::UnknownCooking(value.to_string()))
        })
        .transpose()?;

    let cleanliness = document.cleanliness.map(validate_cleanliness).transpose()?;

    Ok(Habits {
        sleep_schedule,
        cleanliness,
        noise,
        smoking: document.smoking,
        pets: document.pets,
        cooking,
    })
}

fn validate_cleanliness(raw: f64) -> Result<Cleanliness, ProfileValidationError> {
    if !raw.is_finite() || raw.fract() != 0.0 {
        return Err(ProfileValidationError::CleanlinessOutOfRange(raw));
    }
    if raw < f64::from(Cleanliness::MIN) || raw > f64::from(Cleanliness::MAX) {
        return Err(ProfileValidationError::CleanlinessOutOfRange(raw));
    }

    Cleanliness::new(raw as u8).ok_or(ProfileValidationError::CleanlinessOutOfRange(raw))
}

fn validate_budget(document: &BudgetDocument) -> Result<BudgetRange, ProfileValidationError> {
    for (field, value) in [("min", document.min), ("max", document.max)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ProfileValidationError::InvalidBudget { field, value });
        }
    }

    Ok(BudgetRange {
        min: document.min,
        max: document.max,
    })
}

/// Whitespace-only text counts as absent; anything else is kept byte for byte.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn normalize_interests(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|interest| interest.trim())
        .filter(|interest| !interest.is_empty())
        .map(str::to_string)
        .collect()
}
