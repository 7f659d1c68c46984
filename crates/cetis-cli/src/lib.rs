//! # CETIS CLI
//!
//! Administrative commands and demo-data seeding for the CETIS portal.
//!
//! ```ignore
//! use cetis_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::default(), "CETIS27").await?;
//! ```

pub mod admin;
pub mod seeder;
