//! Plain-text output for CLI commands.

use lazytodo_core::{format_due_date, Todo, TodoId, TodoStats};
use std::fmt::Write;

const EMPTY_LIST: &str = "No todos yet. Add your first one!\n";

/// One line per record: `<id>  [x] <priority> <due> <text>`.
pub fn render_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return EMPTY_LIST.to_string();
    }
    let mut out = String::new();
    for todo in todos {
        let mark = if todo.completed { 'x' } else { ' ' };
        let due = todo
            .due_date
            .map(format_due_date)
            .unwrap_or_else(|| "-".repeat(10));
        let _ = writeln!(
            out,
            "{}  [{mark}] {:<6} {due}  {}",
            todo.id,
            todo.priority.as_str(),
            todo.text
        );
    }
    out
}

pub fn render_change(verb: &str, id: &TodoId, found: bool) -> String {
    if found {
        format!("{verb} {id}\n")
    } else {
        format!("no todo with id {id}; list unchanged\n")
    }
}

pub fn render_stats(stats: &TodoStats) -> String {
    format!(
        "total={} completed={} pending={}\n",
        stats.total, stats.completed, stats.pending
    )
}

#[cfg(test)]
mod tests {
    use super::{render_change, render_list, render_stats};
    use chrono::NaiveDate;
    use lazytodo_core::{Priority, Todo, TodoId, TodoStats};

    #[test]
    fn empty_list_renders_hint() {
        assert_eq!(render_list(&[]), "No todos yet. Add your first one!\n");
    }

    #[test]
    fn list_lines_show_completion_priority_and_due_date() {
        let id = TodoId::parse("42").unwrap();
        let mut todo = Todo::with_id(
            id,
            "Call Bob",
            Priority::High,
            NaiveDate::from_ymd_opt(2026, 10, 20),
        )
        .unwrap();
        todo.completed = true;
        let undated =
            Todo::with_id(TodoId::parse("7").unwrap(), "Buy milk", Priority::Low, None).unwrap();

        let out = render_list(&[todo, undated]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "42  [x] High   2026-10-20  Call Bob");
        assert_eq!(lines[1], "7  [ ] Low    ----------  Buy milk");
    }

    #[test]
    fn change_and_stats_lines() {
        let id = TodoId::parse("9").unwrap();
        assert_eq!(render_change("deleted", &id, true), "deleted 9\n");
        assert!(render_change("deleted", &id, false).contains("unchanged"));
        let stats = TodoStats {
            total: 3,
            completed: 1,
            pending: 2,
        };
        assert_eq!(render_stats(&stats), "total=3 completed=1 pending=2\n");
    }
}
