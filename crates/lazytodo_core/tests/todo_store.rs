use chrono::NaiveDate;
use lazytodo_core::{Priority, TodoDraft, TodoFilter, TodoId, TodoList, TodoValidationError};

fn seeded(texts: &[(&str, Priority)]) -> (TodoList, Vec<TodoId>) {
    let mut list = TodoList::new();
    let mut ids = Vec::new();
    for (text, priority) in texts {
        let (next, id) = list
            .add(&TodoDraft::new(*text).with_priority(*priority))
            .unwrap();
        list = next;
        ids.push(id);
    }
    (list, ids)
}

#[test]
fn add_grows_by_one_and_puts_new_record_first() {
    let (list, _) = seeded(&[("a", Priority::Low), ("b", Priority::Low)]);

    let (next, id) = list.add(&TodoDraft::new("Walk dog")).unwrap();
    assert_eq!(next.len(), list.len() + 1);
    assert_eq!(next.as_slice()[0].id, id);
    assert_eq!(next.as_slice()[0].text, "Walk dog");
    assert!(!next.as_slice()[0].completed);
}

#[test]
fn add_with_whitespace_only_text_is_rejected() {
    let (list, _) = seeded(&[("a", Priority::Low)]);

    let err = list.add(&TodoDraft::new("   \t")).unwrap_err();
    assert_eq!(err, TodoValidationError::EmptyText);
    assert_eq!(list.len(), 1);
}

#[test]
fn toggle_complete_is_an_involution() {
    let (list, ids) = seeded(&[("a", Priority::Low), ("b", Priority::High)]);

    for id in &ids {
        let original = list.get(id).unwrap().completed;
        let once = list.toggle_complete(id);
        assert_eq!(once.get(id).unwrap().completed, !original);
        let twice = once.toggle_complete(id);
        assert_eq!(twice.get(id).unwrap().completed, original);
        assert_eq!(twice, list);
    }
}

#[test]
fn delete_twice_is_idempotent() {
    let (list, ids) = seeded(&[("a", Priority::Low), ("b", Priority::Low)]);

    let once = list.delete(&ids[0]);
    let twice = once.delete(&ids[0]);
    assert_eq!(once.len(), 1);
    assert_eq!(twice, once);
}

#[test]
fn edit_preserves_id_and_completion_and_replaces_the_rest() {
    let due = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    let (list, ids) = seeded(&[("draft", Priority::Low)]);
    let list = list.toggle_complete(&ids[0]);

    let edited = list
        .edit(
            &ids[0],
            &TodoDraft::new("  final  ")
                .with_priority(Priority::High)
                .with_due_date(Some(due)),
        )
        .unwrap();
    let todo = edited.get(&ids[0]).unwrap();
    assert_eq!(todo.id, ids[0]);
    assert!(todo.completed);
    assert_eq!(todo.text, "final");
    assert_eq!(todo.priority, Priority::High);
    assert_eq!(todo.due_date, Some(due));

    let cleared = edited
        .edit(&ids[0], &TodoDraft::new("final").with_priority(Priority::Low))
        .unwrap();
    assert_eq!(cleared.get(&ids[0]).unwrap().due_date, None);
}

#[test]
fn edit_with_blank_text_is_rejected() {
    let (list, ids) = seeded(&[("keep", Priority::Medium)]);

    let err = list.edit(&ids[0], &TodoDraft::new(" ")).unwrap_err();
    assert_eq!(err, TodoValidationError::EmptyText);
    assert_eq!(list.get(&ids[0]).unwrap().text, "keep");
}

#[test]
fn search_returns_case_insensitive_matches_in_order() {
    let (list, _) = seeded(&[
        ("Buy MILK", Priority::Low),
        ("Call Bob", Priority::Low),
        ("oat milk latte", Priority::High),
    ]);

    let hits = list.query(&TodoFilter {
        search_text: Some("milk".to_string()),
        ..TodoFilter::default()
    });
    let texts: Vec<&str> = hits.iter().map(|todo| todo.text.as_str()).collect();
    assert_eq!(texts, vec!["oat milk latte", "Buy MILK"]);
}

#[test]
fn search_text_is_matched_as_typed() {
    let (list, _) = seeded(&[("Buy milk", Priority::Low)]);

    let trailing = list.query(&TodoFilter {
        search_text: Some("milk ".to_string()),
        ..TodoFilter::default()
    });
    assert!(trailing.is_empty());

    let blank = list.query(&TodoFilter {
        search_text: Some("  ".to_string()),
        ..TodoFilter::default()
    });
    assert_eq!(blank.len(), 1);
}

#[test]
fn priority_filter_returns_exact_matches_only() {
    let (list, _) = seeded(&[
        ("a", Priority::High),
        ("b", Priority::Medium),
        ("c", Priority::High),
    ]);

    let hits = list.query(&TodoFilter {
        priority: Some(Priority::High),
        ..TodoFilter::default()
    });
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|todo| todo.priority == Priority::High));
}

#[test]
fn due_date_filter_matches_calendar_day() {
    let day = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    let (list, _) = TodoList::new()
        .add(&TodoDraft::new("dated").with_due_date(Some(day)))
        .unwrap();
    let (list, _) = list.add(&TodoDraft::new("undated")).unwrap();

    let hits = list.query(&TodoFilter {
        due_date: Some(day),
        ..TodoFilter::default()
    });
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "dated");
}

#[test]
fn empty_filter_returns_everything_without_mutating() {
    let (list, _) = seeded(&[("a", Priority::Low), ("b", Priority::High)]);
    let before = list.clone();

    let all = list.query(&TodoFilter::default());
    assert_eq!(all, list.to_vec());
    assert_eq!(list, before);
}

#[test]
fn buy_milk_call_bob_scenario() {
    let list = TodoList::new();
    let (list, milk) = list
        .add(&TodoDraft::new("Buy milk").with_priority(Priority::Low))
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.as_slice()[0].text, "Buy milk");
    assert!(!list.as_slice()[0].completed);
    assert_eq!(list.as_slice()[0].priority, Priority::Low);

    let (list, bob) = list
        .add(&TodoDraft::new("Call Bob").with_priority(Priority::High))
        .unwrap();
    let texts: Vec<&str> = list.iter().map(|todo| todo.text.as_str()).collect();
    assert_eq!(texts, vec!["Call Bob", "Buy milk"]);

    let list = list.toggle_complete(&milk);
    assert!(list.get(&milk).unwrap().completed);
    assert!(!list.get(&bob).unwrap().completed);

    let high = list.query(&TodoFilter {
        priority: Some(Priority::High),
        ..TodoFilter::default()
    });
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].text, "Call Bob");

    let list = list.delete(&bob);
    assert_eq!(list.len(), 1);
    assert_eq!(list.as_slice()[0].text, "Buy milk");
    assert!(list.as_slice()[0].completed);
}
