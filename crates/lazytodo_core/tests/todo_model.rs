use chrono::NaiveDate;
use lazytodo_core::{Priority, Todo, TodoId, TodoValidationError};

#[test]
fn todo_new_sets_defaults_and_trims_text() {
    let todo = Todo::new("  Buy milk  ", Priority::default(), None).unwrap();

    assert!(!todo.id.as_str().is_empty());
    assert_eq!(todo.text, "Buy milk");
    assert!(!todo.completed);
    assert_eq!(todo.priority, Priority::Low);
    assert_eq!(todo.due_date, None);
}

#[test]
fn todo_new_rejects_blank_text() {
    let err = Todo::new(" \n\t ", Priority::High, None).unwrap_err();
    assert_eq!(err, TodoValidationError::EmptyText);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let id = TodoId::parse("1715000000000").unwrap();
    let due = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    let mut todo = Todo::with_id(id, "Call Bob", Priority::High, Some(due)).unwrap();
    todo.completed = true;

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], "1715000000000");
    assert_eq!(json["text"], "Call Bob");
    assert_eq!(json["completed"], true);
    assert_eq!(json["dueDate"], "2026-10-20");
    assert_eq!(json["priority"], "High");

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn absent_due_date_is_omitted_from_the_wire() {
    let todo = Todo::new("undated", Priority::Medium, None).unwrap();
    let json = serde_json::to_value(&todo).unwrap();

    assert!(json.get("dueDate").is_none());
    assert_eq!(json["priority"], "Medium");
}

#[test]
fn deserialize_accepts_null_due_date_and_missing_optional_fields() {
    let value = serde_json::json!({
        "id": "42",
        "text": "legacy record",
        "dueDate": null
    });

    let todo: Todo = serde_json::from_value(value).unwrap();
    assert_eq!(todo.due_date, None);
    assert!(!todo.completed);
    assert_eq!(todo.priority, Priority::Low);
}

#[test]
fn deserialize_reduces_timestamp_due_dates_to_calendar_day() {
    let value = serde_json::json!({
        "id": "42",
        "text": "pay rent",
        "completed": false,
        "dueDate": "2026-11-01T00:00:00.000Z",
        "priority": "Medium"
    });

    let todo: Todo = serde_json::from_value(value).unwrap();
    assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));
}

#[test]
fn deserialize_rejects_blank_text_and_blank_id() {
    let blank_text = serde_json::json!({"id": "1", "text": "   ", "completed": false});
    let err = serde_json::from_value::<Todo>(blank_text).unwrap_err();
    assert!(
        err.to_string().contains("todo text cannot be empty"),
        "unexpected error: {err}"
    );

    let blank_id = serde_json::json!({"id": "", "text": "ok", "completed": false});
    let err = serde_json::from_value::<Todo>(blank_id).unwrap_err();
    assert!(
        err.to_string().contains("todo id cannot be empty"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_unknown_priority() {
    let value = serde_json::json!({
        "id": "1",
        "text": "x",
        "completed": false,
        "priority": "Urgent"
    });
    assert!(serde_json::from_value::<Todo>(value).is_err());
}
