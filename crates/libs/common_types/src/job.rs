use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a cleanup visit. Maps to the `job_status` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Scheduled,
    Claimed,
    InProgress,
    Completed,
    Cancelled,
    Paused,
}

impl JobStatus {
    pub const ALL: [Self; 6] = [
        Self::Scheduled,
        Self::Claimed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::Paused,
    ];

    /// Statuses that count towards an employee's concurrent workload.
    pub const ACTIVE: [Self; 2] = [Self::Claimed, Self::InProgress];

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Claimed | Self::InProgress)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a job may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Claimed | Self::Cancelled | Self::Paused)
                | (
                    Self::Claimed,
                    Self::InProgress | Self::Scheduled | Self::Cancelled
                )
                | (Self::InProgress, Self::Completed | Self::Cancelled)
                | (Self::Paused, Self::Scheduled | Self::Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_final() {
        for from in [JobStatus::Completed, JobStatus::Cancelled] {
            for to in JobStatus::ALL {
                assert!(!from.can_transition_to(to), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn happy_path_is_allowed() {
        assert!(JobStatus::Scheduled.can_transition_to(JobStatus::Claimed));
        assert!(JobStatus::Claimed.can_transition_to(JobStatus::InProgress));
        assert!(JobStatus::InProgress.can_transition_to(JobStatus::Completed));
    }

    #[test]
    fn cannot_skip_claiming() {
        assert!(!JobStatus::Scheduled.can_transition_to(JobStatus::InProgress));
        assert!(!JobStatus::Scheduled.can_transition_to(JobStatus::Completed));
        assert!(!JobStatus::Paused.can_transition_to(JobStatus::Claimed));
    }

    #[test]
    fn only_claimed_and_in_progress_are_active() {
        let active: Vec<_> = JobStatus::ALL.into_iter().filter(|s| s.is_active()).collect();
        assert_eq!(active, JobStatus::ACTIVE.to_vec());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
