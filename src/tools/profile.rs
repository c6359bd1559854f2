//! Profile and Calorie Norm MCP Tools

use serde::Serialize;

use crate::db::Database;
use crate::models::{ProfileSet, UserProfile};
use crate::nutrition::{
    calorie_breakdown, BiometricProfile, Goal, Sex, ACTIVITY_MULTIPLIER, GOAL_OFFSET_KCAL,
};

/// Stored profile with its derived norm
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Null until every biometric is filled in
    pub calorie_norm: Option<i64>,
}

/// Calorie norm with the intermediate values
#[derive(Debug, Serialize)]
pub struct CalorieNormResponse {
    pub sex: Sex,
    pub goal: Goal,
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub goal_offset: f64,
    pub calorie_norm: i64,
}

impl CalorieNormResponse {
    fn for_profile(profile: &BiometricProfile) -> Self {
        let breakdown = calorie_breakdown(profile);
        let goal_offset = match profile.goal() {
            Goal::Lose => -GOAL_OFFSET_KCAL,
            Goal::Maintain => 0.0,
            Goal::Gain => GOAL_OFFSET_KCAL,
        };
        Self {
            sex: profile.sex(),
            goal: profile.goal(),
            bmr: breakdown.bmr,
            tdee: breakdown.tdee,
            activity_multiplier: ACTIVITY_MULTIPLIER,
            goal_offset,
            calorie_norm: breakdown.target,
        }
    }
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        let calorie_norm = profile.biometrics().map(|b| calorie_breakdown(&b).target);
        Self {
            profile,
            calorie_norm,
        }
    }
}

/// Get the stored profile
pub fn get_profile(db: &Database) -> Result<Option<ProfileResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::get(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    Ok(profile.map(ProfileResponse::from))
}

/// Replace the profile biometrics.
///
/// Sex and goal are free text ("Мужчина", "lose weight", ...) and are stored
/// normalized. The nickname is kept when not given, but a first save needs one.
pub fn update_profile(
    db: &Database,
    nickname: Option<String>,
    height_cm: u32,
    weight_kg: f64,
    age: u32,
    sex: &str,
    goal: &str,
) -> Result<ProfileResponse, String> {
    let biometrics = BiometricProfile::from_labels(weight_kg, height_cm, age, sex, goal)
        .map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let nickname = match nickname.map(|n| n.trim().to_string()) {
        Some(n) if !n.is_empty() => n,
        Some(_) => return Err("nickname cannot be empty".to_string()),
        None => UserProfile::get(&conn)
            .map_err(|e| format!("Failed to get profile: {}", e))?
            .map(|p| p.nickname)
            .ok_or_else(|| "nickname is required when creating a profile".to_string())?,
    };

    let data = ProfileSet {
        nickname,
        height_cm: Some(biometrics.height_cm()),
        weight_kg: Some(biometrics.weight_kg()),
        age: Some(biometrics.age()),
        sex: Some(biometrics.sex()),
        goal: Some(biometrics.goal()),
    };

    let profile = UserProfile::set(&conn, &data)
        .map_err(|e| format!("Failed to save profile: {}", e))?;

    Ok(ProfileResponse::from(profile))
}

/// Compute a norm from explicit biometrics without touching storage
pub fn calculate_calorie_norm(
    weight_kg: f64,
    height_cm: u32,
    age: u32,
    sex: &str,
    goal: &str,
) -> Result<CalorieNormResponse, String> {
    let profile = BiometricProfile::from_labels(weight_kg, height_cm, age, sex, goal)
        .map_err(|e| e.to_string())?;
    Ok(CalorieNormResponse::for_profile(&profile))
}

/// Norm for the stored profile; `None` without a complete profile
pub fn get_calorie_norm(db: &Database) -> Result<Option<CalorieNormResponse>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::get(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    Ok(profile
        .and_then(|p| p.biometrics())
        .map(|b| CalorieNormResponse::for_profile(&b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    #[test]
    fn test_calculate_calorie_norm_localized_labels() {
        let norm = calculate_calorie_norm(80.0, 180, 30, "Мужчина", "Поддерживать вес").unwrap();
        assert_eq!(norm.sex, Sex::Male);
        assert_eq!(norm.goal, Goal::Maintain);
        assert_eq!(norm.calorie_norm, 2448);
        assert_eq!(norm.goal_offset, 0.0);
    }

    #[test]
    fn test_calculate_calorie_norm_rejects_bad_input() {
        let err = calculate_calorie_norm(-1.0, 180, 30, "male", "lose").unwrap_err();
        assert!(err.contains("weight_kg"));
    }

    #[test]
    fn test_update_profile_requires_nickname_first_time() {
        let db = db();
        let err = update_profile(&db, None, 165, 60.0, 28, "female", "lose").unwrap_err();
        assert!(err.contains("nickname"));
    }

    #[test]
    fn test_update_profile_then_norm() {
        let db = db();
        assert!(get_profile(&db).unwrap().is_none());
        assert!(get_calorie_norm(&db).unwrap().is_none());

        let saved = update_profile(&db, Some("anna".into()), 165, 60.0, 28, "Женщина", "Похудеть").unwrap();
        assert_eq!(saved.calorie_norm, Some(1329));
        assert_eq!(saved.profile.sex, Some(Sex::Female));

        // Nickname is kept when omitted
        let saved = update_profile(&db, None, 165, 60.0, 28, "female", "gain").unwrap();
        assert_eq!(saved.profile.nickname, "anna");
        assert_eq!(saved.calorie_norm, Some(2329));

        let norm = get_calorie_norm(&db).unwrap().unwrap();
        assert_eq!(norm.calorie_norm, 2329);
        assert_eq!(norm.goal_offset, 500.0);
    }
}
