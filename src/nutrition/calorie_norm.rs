//! Daily calorie norm
//!
//! Mifflin-St Jeor BMR, scaled by a fixed "lightly active" multiplier and
//! shifted by a flat offset for the user's goal.

use serde::Serialize;

use super::profile::{BiometricProfile, Goal, Sex};

/// TDEE multiplier. Only the lightly active level is modeled.
pub const ACTIVITY_MULTIPLIER: f64 = 1.375;

/// kcal removed for `Lose` and added for `Gain`
pub const GOAL_OFFSET_KCAL: f64 = 500.0;

const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -161.0;

/// Intermediate values of a norm calculation
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CalorieBreakdown {
    pub bmr: f64,
    pub tdee: f64,
    pub target: i64,
}

/// Basal metabolic rate: `10w + 6.25h - 5a + s`, s = +5 male / -161 female
pub fn basal_metabolic_rate(profile: &BiometricProfile) -> f64 {
    let sex_offset = match profile.sex() {
        Sex::Male => MALE_OFFSET,
        Sex::Female => FEMALE_OFFSET,
    };

    10.0 * profile.weight_kg() + 6.25 * f64::from(profile.height_cm())
        - 5.0 * f64::from(profile.age())
        + sex_offset
}

pub fn total_daily_energy_expenditure(profile: &BiometricProfile) -> f64 {
    basal_metabolic_rate(profile) * ACTIVITY_MULTIPLIER
}

/// Daily calorie target, rounded half away from zero
pub fn daily_calorie_target(profile: &BiometricProfile) -> i64 {
    goal_adjusted(total_daily_energy_expenditure(profile), profile.goal())
}

pub fn calorie_breakdown(profile: &BiometricProfile) -> CalorieBreakdown {
    let bmr = basal_metabolic_rate(profile);
    let tdee = bmr * ACTIVITY_MULTIPLIER;
    CalorieBreakdown {
        bmr,
        tdee,
        target: goal_adjusted(tdee, profile.goal()),
    }
}

fn goal_adjusted(tdee: f64, goal: Goal) -> i64 {
    let adjusted = match goal {
        Goal::Lose => tdee - GOAL_OFFSET_KCAL,
        Goal::Maintain => tdee,
        Goal::Gain => tdee + GOAL_OFFSET_KCAL,
    };
    // f64::round rounds ties away from zero; the cast saturates on overflow.
    adjusted.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(weight_kg: f64, height_cm: u32, age: u32, sex: Sex, goal: Goal) -> BiometricProfile {
        BiometricProfile::new(weight_kg, height_cm, age, sex, goal).unwrap()
    }

    #[test]
    fn test_male_maintain_uses_tdee() {
        let p = profile(80.0, 180, 30, Sex::Male, Goal::Maintain);
        assert_eq!(daily_calorie_target(&p), 2448);
    }

    #[test]
    fn test_female_lose_subtracts_500() {
        let p = profile(60.0, 165, 28, Sex::Female, Goal::Lose);
        assert_eq!(daily_calorie_target(&p), 1329);
    }

    #[test]
    fn test_male_gain_adds_500() {
        let p = profile(70.0, 175, 25, Sex::Male, Goal::Gain);
        assert_eq!(daily_calorie_target(&p), 2801);
    }

    #[test]
    fn test_male_maintain_matches_formula() {
        for &(w, h, a) in &[(55.5, 160, 19), (80.0, 180, 30), (102.3, 193, 61), (68.0, 171, 44)] {
            let p = profile(w, h, a, Sex::Male, Goal::Maintain);
            let expected = ((10.0 * w + 6.25 * f64::from(h) - 5.0 * f64::from(a) + 5.0) * 1.375).round() as i64;
            assert_eq!(daily_calorie_target(&p), expected);
        }
    }

    #[test]
    fn test_goal_offsets_are_exactly_500() {
        for &(w, h, a, sex) in &[
            (80.0, 180, 30, Sex::Male),
            (60.0, 165, 28, Sex::Female),
            (72.4, 168, 37, Sex::Female),
            (95.0, 188, 52, Sex::Male),
        ] {
            let maintain = daily_calorie_target(&profile(w, h, a, sex, Goal::Maintain));
            let lose = daily_calorie_target(&profile(w, h, a, sex, Goal::Lose));
            let gain = daily_calorie_target(&profile(w, h, a, sex, Goal::Gain));
            assert_eq!(lose, maintain - 500);
            assert_eq!(gain, maintain + 500);
        }
    }

    #[test]
    fn test_tie_rounds_away_from_zero() {
        // BMR 1780 * 1.375 = 2447.5 exactly
        let p = profile(80.0, 180, 30, Sex::Male, Goal::Maintain);
        assert_eq!(total_daily_energy_expenditure(&p), 2447.5);
        assert_eq!(daily_calorie_target(&p), 2448);
    }

    #[test]
    fn test_breakdown_matches_target() {
        let p = profile(60.0, 165, 28, Sex::Female, Goal::Lose);
        let breakdown = calorie_breakdown(&p);
        assert!((breakdown.bmr - 1330.25).abs() < 1e-9);
        assert!((breakdown.tdee - 1829.09375).abs() < 1e-9);
        assert_eq!(breakdown.target, daily_calorie_target(&p));
    }
}
