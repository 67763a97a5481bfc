/// Whether an employee may take on one more job.
///
/// The first active job is always allowed. Holding several at once requires an
/// average rating of at least `threshold`.
#[must_use]
pub fn can_take_another_job(active_jobs: i64, average_rating: f64, threshold: f64) -> bool {
    active_jobs == 0 || average_rating >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_job_is_always_allowed() {
        assert!(can_take_another_job(0, 0.0, 4.5));
        assert!(can_take_another_job(0, 1.2, 4.5));
    }

    #[test]
    fn second_job_requires_threshold() {
        assert!(!can_take_another_job(1, 4.49, 4.5));
        assert!(can_take_another_job(1, 4.5, 4.5));
        assert!(can_take_another_job(3, 5.0, 4.5));
    }
}
