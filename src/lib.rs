//! FitDiary Library
//!
//! Food diary core: calorie norm, meal logging, progress and usage metrics.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod metrics;
pub mod models;
pub mod nutrition;
pub mod tools;
