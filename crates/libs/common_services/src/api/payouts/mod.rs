pub mod error;
pub mod fees;
pub mod interfaces;
pub mod service;
