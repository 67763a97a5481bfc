#![deny(clippy::unwrap_used)]

pub mod task_runner;
