//! Configuration modules for the ScholarHub API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables once at startup and carried as immutable values.
//! Business logic never reads the environment directly.
//!
//! # Modules
//!
//! - [`cors`]: Allowed cross-origin sources
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: Token signing secret and lifetime
//! - [`rate_limit`]: API rate limiting configuration
//! - [`server`]: Listen port and environment mode

pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod server;
