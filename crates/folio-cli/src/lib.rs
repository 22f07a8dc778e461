//! # Folio CLI
//!
//! Administrative and seeding utilities for development databases.
//!
//! ## Usage
//!
//! ```ignore
//! use folio_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(20).with_contents_per_user(3);
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
