//! Query criteria for record lists.

use crate::model::todo::{Priority, Todo};
use chrono::NaiveDate;

/// Optional match criteria; all present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Case-insensitive substring of record text, matched as typed.
    /// All-whitespace text is ignored.
    pub search_text: Option<String>,
    /// Exact priority.
    pub priority: Option<Priority>,
    /// Exact calendar day. Records without a due date never match.
    pub due_date: Option<NaiveDate>,
    /// Exact completion state.
    pub completed: Option<bool>,
}

impl TodoFilter {
    /// Filter selecting completed records only.
    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }

    /// Returns whether no criterion constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.needle().is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }

    /// Returns whether `todo` satisfies every present criterion.
    pub fn matches(&self, todo: &Todo) -> bool {
        self.matcher()(todo)
    }

    // Lowercases the needle once per query instead of once per record.
    pub(crate) fn matcher(&self) -> impl Fn(&Todo) -> bool + '_ {
        let needle = self.needle();
        move |todo: &Todo| {
            if let Some(needle) = needle.as_deref() {
                if !todo.text.to_lowercase().contains(needle) {
                    return false;
                }
            }
            if let Some(priority) = self.priority {
                if todo.priority != priority {
                    return false;
                }
            }
            if let Some(day) = self.due_date {
                if todo.due_date != Some(day) {
                    return false;
                }
            }
            if let Some(completed) = self.completed {
                if todo.completed != completed {
                    return false;
                }
            }
            true
        }
    }

    fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(str::to_lowercase)
    }
}
