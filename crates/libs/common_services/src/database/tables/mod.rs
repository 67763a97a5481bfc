pub mod app_user;
pub mod employee;
pub mod job;
pub mod payment;
pub mod payout;
pub mod reconciliation_report;
