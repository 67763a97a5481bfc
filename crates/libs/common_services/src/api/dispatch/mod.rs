pub mod availability;
pub mod distance;
pub mod error;
pub mod interfaces;
pub mod rating_gate;
pub mod scheduling;
pub mod service;
