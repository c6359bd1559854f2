//! Biometric profile and free-text normalization
//!
//! Sex and goal arrive as free text, possibly localized ("male", "Мужчина",
//! "Похудеть", "gain weight"). Everything funnels through the keyword tables
//! below so there is exactly one place deciding what a label means.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Labels recognized as male. Matched exactly after trimming, case-insensitive.
pub const MALE_KEYWORDS: &[&str] = &["male", "мужчина"];

/// Substrings marking a weight-loss goal. Checked before [`GAIN_KEYWORDS`].
pub const LOSE_KEYWORDS: &[&str] = &["lose", "похуд"];

/// Substrings marking a weight-gain goal.
pub const GAIN_KEYWORDS: &[&str] = &["gain", "набрать"];

/// Biological sex as used by the BMR formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Normalize a free-text label. Anything not in [`MALE_KEYWORDS`] is female.
    pub fn from_label(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        if MALE_KEYWORDS.contains(&lower.as_str()) {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

/// Dietary objective driving the flat calorie offset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    /// Normalize a free-text goal by substring match. Unrecognized text is `Maintain`.
    pub fn from_label(s: &str) -> Self {
        let lower = s.to_lowercase();
        if LOSE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Goal::Lose
        } else if GAIN_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Goal::Gain
        } else {
            Goal::Maintain
        }
    }
}

/// Rejected biometric input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("weight_kg must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("height_cm must be greater than 0")]
    InvalidHeight,

    #[error("age must be greater than 0")]
    InvalidAge,
}

/// Validated inputs for a calorie norm calculation
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BiometricProfile {
    weight_kg: f64,
    height_cm: u32,
    age: u32,
    sex: Sex,
    goal: Goal,
}

impl BiometricProfile {
    pub fn new(
        weight_kg: f64,
        height_cm: u32,
        age: u32,
        sex: Sex,
        goal: Goal,
    ) -> Result<Self, ProfileError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ProfileError::InvalidWeight(weight_kg));
        }
        if height_cm == 0 {
            return Err(ProfileError::InvalidHeight);
        }
        if age == 0 {
            return Err(ProfileError::InvalidAge);
        }

        Ok(Self {
            weight_kg,
            height_cm,
            age,
            sex,
            goal,
        })
    }

    /// Build from free-text sex and goal labels
    pub fn from_labels(
        weight_kg: f64,
        height_cm: u32,
        age: u32,
        sex: &str,
        goal: &str,
    ) -> Result<Self, ProfileError> {
        Self::new(weight_kg, height_cm, age, Sex::from_label(sex), Goal::from_label(goal))
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_from_label() {
        assert_eq!(Sex::from_label("male"), Sex::Male);
        assert_eq!(Sex::from_label("MALE"), Sex::Male);
        assert_eq!(Sex::from_label(" Male "), Sex::Male);
        assert_eq!(Sex::from_label("Мужчина"), Sex::Male);
        assert_eq!(Sex::from_label("female"), Sex::Female);
        assert_eq!(Sex::from_label("Женщина"), Sex::Female);
    }

    #[test]
    fn test_sex_from_unknown_label_is_female() {
        assert_eq!(Sex::from_label(""), Sex::Female);
        assert_eq!(Sex::from_label("other"), Sex::Female);
        // Substrings do not count for sex; "female" contains "male".
        assert_eq!(Sex::from_label("females"), Sex::Female);
        assert_eq!(Sex::from_label("m"), Sex::Female);
        assert_eq!(Sex::from_label("Мужской"), Sex::Female);
    }

    #[test]
    fn test_goal_from_label() {
        assert_eq!(Goal::from_label("lose"), Goal::Lose);
        assert_eq!(Goal::from_label("Lose weight"), Goal::Lose);
        assert_eq!(Goal::from_label("Похудеть"), Goal::Lose);
        assert_eq!(Goal::from_label("gain"), Goal::Gain);
        assert_eq!(Goal::from_label("Набрать массу"), Goal::Gain);
        assert_eq!(Goal::from_label("maintain"), Goal::Maintain);
    }

    #[test]
    fn test_goal_from_unknown_label_is_maintain() {
        assert_eq!(Goal::from_label(""), Goal::Maintain);
        assert_eq!(Goal::from_label("be healthy"), Goal::Maintain);
        assert_eq!(Goal::from_label("🍕"), Goal::Maintain);
    }

    #[test]
    fn test_goal_lose_wins_over_gain() {
        assert_eq!(Goal::from_label("lose fat, gain muscle"), Goal::Lose);
    }

    #[test]
    fn test_profile_rejects_non_positive_values() {
        assert_eq!(
            BiometricProfile::new(0.0, 180, 30, Sex::Male, Goal::Maintain),
            Err(ProfileError::InvalidWeight(0.0))
        );
        assert!(BiometricProfile::new(f64::NAN, 180, 30, Sex::Male, Goal::Maintain).is_err());
        assert_eq!(
            BiometricProfile::new(80.0, 0, 30, Sex::Male, Goal::Maintain),
            Err(ProfileError::InvalidHeight)
        );
        assert_eq!(
            BiometricProfile::new(80.0, 180, 0, Sex::Male, Goal::Maintain),
            Err(ProfileError::InvalidAge)
        );
    }

    #[test]
    fn test_profile_from_labels() {
        let profile = BiometricProfile::from_labels(60.0, 165, 28, "Женщина", "похудеть").unwrap();
        assert_eq!(profile.sex(), Sex::Female);
        assert_eq!(profile.goal(), Goal::Lose);
        assert_eq!(profile.weight_kg(), 60.0);
    }
}
