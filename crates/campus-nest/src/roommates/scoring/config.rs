/// One row of the budget gap table: gaps strictly below `below` earn `points`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetBand {
    pub below: f64,
    pub points: u8,
}

/// Weights for the four compatibility pools.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub university_points: u8,
    /// Ordered from the tightest band outwards; the first band the gap falls under wins.
    pub budget_bands: Vec<BudgetBand>,
    pub sleep_schedule_points: u8,
    pub cleanliness_points: u8,
    pub cleanliness_tolerance: u8,
    pub noise_points: u8,
    pub smoking_points: u8,
    pub cooking_points: u8,
    pub points_per_shared_interest: u8,
    pub shared_interest_cap: u8,
}

impl ScoringConfig {
    /// Multiplies every budget band bound, keeping the points untouched.
    pub fn with_budget_scale(mut self, scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            for band in &mut self.budget_bands {
                band.below *= scale;
            }
        }
        self
    }

    pub fn max_budget_points(&self) -> u8 {
        self.budget_bands
            .iter()
            .map(|band| band.points)
            .max()
            .unwrap_or(0)
    }

    pub fn max_habit_points(&self) -> u8 {
        self.sleep_schedule_points
            .saturating_add(self.cleanliness_points)
            .saturating_add(self.noise_points)
            .saturating_add(self.smoking_points)
            .saturating_add(self.cooking_points)
    }

    /// Score reached when every pool pays out in full.
    pub fn natural_maximum(&self) -> u16 {
        u16::from(self.university_points)
            + u16::from(self.max_budget_points())
            + u16::from(self.max_habit_points())
            + u16::from(self.shared_interest_cap)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            university_points: 30,
            budget_bands: vec![
                BudgetBand {
                    below: 500_000.0,
                    points: 25,
                },
                BudgetBand {
                    below: 1_000_000.0,
                    points: 15,
                },
                BudgetBand {
                    below: 2_000_000.0,
                    points: 5,
                },
            ],
            sleep_schedule_points: 8,
            cleanliness_points: 8,
            cleanliness_tolerance: 1,
            noise_points: 5,
            smoking_points: 2,
            cooking_points: 2,
            points_per_shared_interest: 4,
            shared_interest_cap: 20,
        }
    }
}
