//! FitDiary Tools module
//!
//! MCP tool implementations. Each returns a serializable response or a
//! human-readable error message.

pub mod diary;
pub mod metrics;
pub mod profile;
pub mod recipes;
pub mod status;
