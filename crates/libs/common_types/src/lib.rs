#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]
mod app_user;
mod geo;
mod job;
mod payment;

pub use app_user::*;
pub use geo::*;
pub use job::*;
pub use payment::*;
