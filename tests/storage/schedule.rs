//! Integration tests for meet schedules

use heatsheet_foundation::{ErrorKind, EventId};
use heatsheet_storage::{STANDARD_EVENT_LIBRARY, Schedule};

fn numbers(schedule: &Schedule) -> Vec<(String, u32)> {
    schedule
        .events()
        .map(|e| (e.id.to_string(), e.event_number))
        .collect()
}

fn schedule() -> Schedule {
    let mut schedule = Schedule::new("m1");
    schedule.append("a", "Girls 8 & Under 25m Freestyle");
    schedule.append("b", "Boys 8 & Under 25m Freestyle");
    schedule.append("c", "Girls 9-10 50m Freestyle");
    schedule.append("d", "Boys 9-10 50m Freestyle");
    schedule
}

#[test]
fn append_numbers_sequentially() {
    let schedule = schedule();
    assert_eq!(schedule.len(), 4);
    assert_eq!(schedule.by_number(3).map(|e| e.id.as_str()), Some("c"));
}

#[test]
fn remove_closes_gaps() {
    let mut schedule = schedule();
    let removed = schedule.remove(&["b".into(), "zzz".into()]);
    assert_eq!(removed.len(), 1);
    assert_eq!(
        numbers(&schedule),
        vec![("a".into(), 1), ("c".into(), 2), ("d".into(), 3)]
    );
}

#[test]
fn move_shifts_events_between() {
    let mut schedule = schedule();
    schedule.move_event(&"d".into(), 1).unwrap();
    assert_eq!(
        numbers(&schedule),
        vec![("d".into(), 1), ("a".into(), 2), ("b".into(), 3), ("c".into(), 4)]
    );

    let err = schedule.move_event(&"a".into(), 5).unwrap_err();
    assert!(err.kind.is_validation());
    let err = schedule.move_event(&"q".into(), 1).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EventNotFound(EventId::new("q")));
}

#[test]
fn standard_library_skips_scheduled_names() {
    let mut schedule = schedule();
    let mut counter = 0;
    let added = schedule.add_standard_library(|_| {
        counter += 1;
        EventId::new(format!("lib{counter}"))
    });
    let already = STANDARD_EVENT_LIBRARY
        .iter()
        .filter(|name| {
            ["Girls 8 & Under 25m Freestyle", "Boys 8 & Under 25m Freestyle",
             "Girls 9-10 50m Freestyle", "Boys 9-10 50m Freestyle"]
                .contains(name)
        })
        .count();
    assert_eq!(added, STANDARD_EVENT_LIBRARY.len() - already);
    assert_eq!(schedule.len(), 4 + added);
    assert_eq!(schedule.add_standard_library(|name| name.into()), 0);
}

#[test]
fn copy_starts_empty_in_the_other_meet() {
    let schedule = schedule();
    let copy = schedule.copy_to("m2", |event| format!("m2-{}", event.id).into());
    assert_eq!(copy.meet_id().as_str(), "m2");
    assert_eq!(copy.len(), 4);
    assert!(copy.events().all(|e| e.heats.is_empty() && e.version == 0));
    assert_eq!(copy.by_number(2).map(|e| e.id.as_str()), Some("m2-b"));
}
