pub mod employee_store;
pub mod job_store;
pub mod payment_store;
pub mod payout_store;
pub mod reconciliation_store;
pub mod user_store;
