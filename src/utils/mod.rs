//! Utility modules shared across the API.
//!
//! - [`errors`]: Application error type and response mapping
//! - [`ids`]: Path-parameter identifier parsing
//! - [`jwt`]: Token creation, verification, and header extraction
//! - [`pagination`]: Pagination parameters, metadata, and sort parsing
//! - [`password`]: Password hashing and verification
//! - [`response`]: Success response envelope
//! - [`sql`]: Small helpers for dynamically built queries

pub mod errors;
pub mod ids;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod response;
pub mod sql;
