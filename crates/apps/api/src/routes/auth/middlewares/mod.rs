pub mod common;
pub mod require_role;
pub mod user;
