//! # Registrar CLI
//!
//! Administrative tasks and database seeding for development.
//!
//! The seeder works against any [`registrar_db::RecordStore`], so it goes
//! through the same uniqueness and linking rules as the HTTP API.
//!
//! ## Usage
//!
//! ```ignore
//! use registrar_cli::seeder::{SeedConfig, seed_all};
//!
//! let summary = seed_all(&store, &credentials, SeedConfig::default()).await?;
//! ```

pub mod seeder;
