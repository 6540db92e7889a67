//! Optimistic concurrency between desks sharing one store

use heatsheet::engine::{EngineConfig, EntryDesk, MeetDesk, Placement};
use heatsheet::foundation::{Competitor, ErrorKind, Meet, Roster, Slot};
use heatsheet::storage::{EventState, EventStore, MemoryStore};

fn store() -> MemoryStore {
    MemoryStore::new()
        .with_roster(
            Roster::new("WCC")
                .with_competitor(Competitor::new("c1", "Ann", "Lee"))
                .with_competitor(Competitor::new("c2", "Bea", "Ray")),
        )
        .with_event(EventState::new("e1", "m1", 1, "Girls 9-10 50m Freestyle"))
}

#[test]
fn stale_write_is_refused() {
    let meet = Meet::new("m1", "Opener");
    let config = EngineConfig::default();
    let entries = EntryDesk::new(&meet, &config);
    let mut store = store();

    // Two clerks load the same event.
    let first = store.load_event(&"e1".into()).unwrap();
    let second = store.load_event(&"e1".into()).unwrap();

    let (first, _) = entries
        .add(&first, &Competitor::new("c1", "Ann", "Lee"), &"WCC".into(), Placement::Automatic)
        .unwrap();
    store.save_events([first].into_iter().collect()).unwrap();

    let (second, _) = entries
        .add(&second, &Competitor::new("c2", "Bea", "Ray"), &"WCC".into(), Placement::Automatic)
        .unwrap();
    let err = store.save_events([second].into_iter().collect()).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::ConcurrentModification {
            event: "e1".into(),
            expected: 0,
            found: 1
        }
    );

    // Reload and retry.
    let fresh = store.load_event(&"e1".into()).unwrap();
    let (retried, slot) = entries
        .add(&fresh, &Competitor::new("c2", "Bea", "Ray"), &"WCC".into(), Placement::Automatic)
        .unwrap();
    assert_eq!(slot, Slot::new(1, 2));
    store.save_events([retried].into_iter().collect()).unwrap();
    assert_eq!(store.event(&"e1".into()).unwrap().version, 2);
}

#[test]
fn desk_operations_reload_before_writing() {
    let mut desk = MeetDesk::new(store(), Meet::new("m1", "Opener"), EngineConfig::default());
    desk.enter(&"e1".into(), &"WCC".into(), &"c1".into(), Placement::Automatic)
        .unwrap();
    desk.enter(&"e1".into(), &"WCC".into(), &"c2".into(), Placement::Automatic)
        .unwrap();
    desk.withdraw(&"e1".into(), &"c1".into()).unwrap();

    let stored = desk.into_store().event(&"e1".into()).cloned().unwrap();
    assert_eq!(stored.version, 3);
    assert_eq!(stored.heats.locate(&"c2".into()), Some(Slot::new(1, 2)));
    assert_eq!(stored.heats.entry_count(), 1);
}

#[test]
fn failed_save_leaves_store_untouched() {
    let mut desk = MeetDesk::new(store(), Meet::new("m1", "Opener"), EngineConfig::default());
    desk.store_mut().set_read_only(true);
    let err = desk
        .enter(&"e1".into(), &"WCC".into(), &"c1".into(), Placement::Automatic)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Persistence(_)));

    desk.store_mut().set_read_only(false);
    assert!(desk.store().event(&"e1".into()).unwrap().heats.is_empty());
    assert_eq!(desk.store().event(&"e1".into()).unwrap().version, 0);
}
