//! Query/filter engine.
//!
//! Pure read transforms over a task snapshot: conjunctive filtering,
//! substring search, and priority-aware ordering. Never touches the store.

use crate::model::Task;

/// Filter specification. All provided filters are ANDed together; string
/// matching is case-insensitive.
#[derive(Debug, Default, Clone)]
pub struct TaskFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Raw query-string value; a non-numeric value matches nothing
    pub user_id: Option<String>,
    /// Case-insensitive substring match against title OR description
    pub search: Option<String>,
}

/// Apply filters and sort the result.
///
/// Sort order: ascending priority rank (critical first), ties broken by
/// ascending deadline. Tasks without a deadline sort after all deadlined
/// tasks within the same priority.
pub fn apply(mut tasks: Vec<Task>, filter: &TaskFilter) -> Vec<Task> {
    if let Some(status) = &filter.status {
        tasks.retain(|t| t.status.to_string().eq_ignore_ascii_case(status));
    }

    if let Some(priority) = &filter.priority {
        tasks.retain(|t| t.priority.to_string().eq_ignore_ascii_case(priority));
    }

    if let Some(user_id) = &filter.user_id {
        // Non-numeric input yields an empty-match filter rather than an error
        match user_id.parse::<i64>() {
            Ok(uid) => tasks.retain(|t| t.user_id == uid),
            Err(_) => tasks.clear(),
        }
    }

    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        tasks.retain(|t| {
            t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        });
    }

    // Stable sort, so equal-key tasks keep their insertion order
    tasks.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| match (a.deadline, b.deadline) {
                (Some(da), Some(db)) => da.cmp(&db),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });

    tasks
}
