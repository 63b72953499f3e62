//! Stats aggregation over the task collection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Priority, Status, Task};

/// Aggregate statistics response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub by_status: StatusBreakdown,
    pub by_priority: PriorityBreakdown,
    pub overdue: usize,
    /// Percentage of completed tasks, rounded; 0 on an empty store
    pub completion_rate: u32,
}

#[derive(Debug, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    #[serde(rename = "in-progress")]
    pub in_progress: usize,
    pub completed: usize,
}

#[derive(Debug, Serialize)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

/// Compute stats for a snapshot. Pure; `now` is passed in so overdue
/// counting is deterministic in tests.
pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let count_status = |s: Status| tasks.iter().filter(|t| t.status == s).count();
    let count_priority = |p: Priority| tasks.iter().filter(|t| t.priority == p).count();

    let total = tasks.len();
    let completed = count_status(Status::Completed);

    let completion_rate = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    TaskStats {
        total,
        by_status: StatusBreakdown {
            pending: count_status(Status::Pending),
            in_progress: count_status(Status::InProgress),
            completed,
        },
        by_priority: PriorityBreakdown {
            low: count_priority(Priority::Low),
            medium: count_priority(Priority::Medium),
            high: count_priority(Priority::High),
            critical: count_priority(Priority::Critical),
        },
        overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        completion_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(priority: Priority, status: Status, deadline: Option<DateTime<Utc>>) -> Task {
        Task {
            id: 0,
            title: "A task".to_string(),
            description: String::new(),
            priority,
            status,
            user_id: 1,
            created_at: Utc::now(),
            deadline,
            completed_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_store_rate_is_zero() {
        let stats = compute(&[], Utc::now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.overdue, 0);
    }

    #[test]
    fn test_breakdowns_and_rate() {
        let now = Utc::now();
        let tasks = vec![
            task(Priority::High, Status::Completed, None),
            task(Priority::Low, Status::Pending, None),
            task(Priority::Critical, Status::InProgress, None),
        ];

        let stats = compute(&tasks, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.pending, 1);
        assert_eq!(stats.by_status.in_progress, 1);
        assert_eq!(stats.by_status.completed, 1);
        assert_eq!(stats.by_priority.high, 1);
        assert_eq!(stats.by_priority.low, 1);
        assert_eq!(stats.by_priority.critical, 1);
        assert_eq!(stats.by_priority.medium, 0);
        // 1/3 → 33.33… rounds to 33
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn test_overdue_excludes_completed() {
        let now = Utc::now();
        let past = Some(now - Duration::hours(2));
        let tasks = vec![
            task(Priority::Medium, Status::Pending, past),
            task(Priority::Medium, Status::Completed, past),
            task(Priority::Medium, Status::Pending, Some(now + Duration::hours(2))),
        ];

        assert_eq!(compute(&tasks, now).overdue, 1);
    }

    #[test]
    fn test_serialized_shape() {
        let stats = compute(&[], Utc::now());
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["byStatus"].get("in-progress").is_some());
        assert!(json["byPriority"].get("critical").is_some());
        assert!(json.get("completionRate").is_some());
    }
}
