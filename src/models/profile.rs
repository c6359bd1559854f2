//! Profile model
//!
//! The diary owner's nickname and biometrics. Single-row table.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::nutrition::{BiometricProfile, Goal, Sex};

/// Stored profile. Biometrics stay optional until the user fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub nickname: String,
    pub height_cm: Option<u32>,
    pub weight_kg: Option<f64>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub goal: Option<Goal>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for writing the profile. `None` clears a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSet {
    pub nickname: String,
    pub height_cm: Option<u32>,
    pub weight_kg: Option<f64>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub goal: Option<Goal>,
}

impl UserProfile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let sex: Option<String> = row.get("sex")?;
        let goal: Option<String> = row.get("goal")?;
        Ok(Self {
            nickname: row.get("nickname")?,
            height_cm: row.get("height_cm")?,
            weight_kg: row.get("weight_kg")?,
            age: row.get("age")?,
            sex: sex.as_deref().map(Sex::from_label),
            goal: goal.as_deref().map(Goal::from_label),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the profile, if one was ever saved
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the profile (upsert)
    pub fn set(conn: &Connection, data: &ProfileSet) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO profile (id, nickname, height_cm, weight_kg, age, sex, goal)
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                nickname = excluded.nickname,
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                age = excluded.age,
                sex = excluded.sex,
                goal = excluded.goal,
                updated_at = datetime('now')
            "#,
            params![
                data.nickname,
                data.height_cm,
                data.weight_kg,
                data.age,
                data.sex.map(|s| s.as_str()),
                data.goal.map(|g| g.as_str()),
            ],
        )?;

        Self::get(conn)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Biometrics for the norm calculation; `None` while any field is missing or invalid
    pub fn biometrics(&self) -> Option<BiometricProfile> {
        BiometricProfile::new(
            self.weight_kg?,
            self.height_cm?,
            self.age?,
            self.sex?,
            self.goal?,
        )
        .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn full_profile() -> ProfileSet {
        ProfileSet {
            nickname: "anna".to_string(),
            height_cm: Some(165),
            weight_kg: Some(60.0),
            age: Some(28),
            sex: Some(Sex::Female),
            goal: Some(Goal::Lose),
        }
    }

    #[test]
    fn test_get_empty() {
        assert!(UserProfile::get(&conn()).unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let conn = conn();
        let saved = UserProfile::set(&conn, &full_profile()).unwrap();
        assert_eq!(saved.nickname, "anna");
        assert_eq!(saved.sex, Some(Sex::Female));
        assert_eq!(saved.goal, Some(Goal::Lose));

        let biometrics = saved.biometrics().unwrap();
        assert_eq!(biometrics.height_cm(), 165);
        assert_eq!(biometrics.weight_kg(), 60.0);
    }

    #[test]
    fn test_set_replaces_and_clears_fields() {
        let conn = conn();
        UserProfile::set(&conn, &full_profile()).unwrap();

        let partial = ProfileSet {
            nickname: "anna_k".to_string(),
            weight_kg: Some(58.5),
            ..Default::default()
        };
        let saved = UserProfile::set(&conn, &partial).unwrap();
        assert_eq!(saved.nickname, "anna_k");
        assert_eq!(saved.weight_kg, Some(58.5));
        assert_eq!(saved.height_cm, None);
        assert!(saved.biometrics().is_none());
    }
}
