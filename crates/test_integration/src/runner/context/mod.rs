pub mod context_utils;
pub mod fake_processor;
pub mod test_context;
