//! # Gigboard Common Library
//!
//! Shared code for the Gigboard booking directory:
//! - Database schema, models and store operations
//! - Show scheduling (past/upcoming classification)
//! - View assembly for venue, artist and show pages
//! - Name search
//! - Reference and sample data seeding
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod schedule;
pub mod search;
pub mod seed;
pub mod time;
pub mod uuid_utils;
pub mod views;

pub use db::genres::GenreMap;
pub use db::models::OwnerKind;
pub use error::{Error, Result};
