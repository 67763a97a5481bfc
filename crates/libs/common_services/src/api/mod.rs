pub mod auth;
pub mod dispatch;
pub mod employees;
pub mod payments;
pub mod payouts;
pub mod reconciliation;
pub mod stats;
