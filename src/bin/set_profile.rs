//! Utility to set the diary profile and print the resulting calorie norm
//!
//! Usage: set_profile <nickname> <height_cm> <weight_kg> <age> <sex> <goal>

use fitdiary::{config, db, tools};

fn usage() -> String {
    "Usage: set_profile <nickname> <height_cm> <weight_kg> <age> <sex> <goal>".to_string()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [nickname, height_cm, weight_kg, age, sex, goal] = args.as_slice() else {
        return Err(usage().into());
    };

    let height_cm: u32 = height_cm.parse().map_err(|_| format!("Invalid height_cm: {}", height_cm))?;
    let weight_kg: f64 = weight_kg.parse().map_err(|_| format!("Invalid weight_kg: {}", weight_kg))?;
    let age: u32 = age.parse().map_err(|_| format!("Invalid age: {}", age))?;

    let db_path = config::database_path();
    println!("Database path: {}", db_path.display());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;
    database.with_conn(db::migrations::run_migrations)?;

    let saved = tools::profile::update_profile(
        &database,
        Some(nickname.clone()),
        height_cm,
        weight_kg,
        age,
        sex,
        goal,
    )?;

    println!("Profile set:");
    println!("  Nickname: {}", saved.profile.nickname);
    if let (Some(sex), Some(goal)) = (saved.profile.sex, saved.profile.goal) {
        println!("  Sex: {} | Goal: {}", sex.as_str(), goal.as_str());
    }
    match saved.calorie_norm {
        Some(norm) => println!("  Calorie norm: {} kcal/day", norm),
        None => println!("  Calorie norm: -"),
    }

    Ok(())
}
