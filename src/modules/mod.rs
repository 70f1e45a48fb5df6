pub mod auth;
pub mod favorites;
pub mod scholarships;
pub mod search;
pub mod users;
