//! # Profiles Admin
//!
//! Administrative entry point for the profiles schema and accounts.
//!
//! ## Modules
//!
//! - `cli`: argument definitions
//! - `commands`: subcommand implementations

pub mod cli;
pub mod commands;
