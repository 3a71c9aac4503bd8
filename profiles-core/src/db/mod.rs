//! Database layer for profiles
//!
//! - `pool`: PostgreSQL connection pool management with health checks
//! - `migrations`: embedded schema migrations and status reporting
//!
//! Entity models and their queries live in the `models` module.

pub mod migrations;
pub mod pool;
