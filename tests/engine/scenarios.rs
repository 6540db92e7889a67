//! Heat sheet scenarios from the meet desk

use heatsheet_engine::{EngineConfig, LaneAllocator, Placement, Reconciler};
use heatsheet_foundation::{Competitor, Entry, ErrorKind, Meet, Roster, Slot, TeamId};
use heatsheet_storage::{HeatTable, LaneLimits, MemoryStore, Schedule};

fn entry(id: &str, team: &str) -> Entry {
    Entry::from_competitor(&Competitor::new(id, id, "Swimmer"), &TeamId::new(team))
}

fn individual(meet: &Meet) -> LaneAllocator {
    LaneAllocator::new(meet, LaneLimits::individual(meet.lanes_available), &EngineConfig::default())
}

#[test]
fn first_automatic_entry_takes_heat_one_lane_one() {
    let meet = Meet::new("m1", "Opener");
    let (table, slot) = individual(&meet)
        .place(&HeatTable::new(), &[entry("a", "WCC")], Placement::Automatic)
        .unwrap();
    assert_eq!(slot, Slot::new(1, 1));
    assert_eq!(table.entry_count(), 1);
}

#[test]
fn ninth_entry_opens_heat_two() {
    let meet = Meet::new("m1", "Opener");
    let allocator = individual(&meet);
    let mut table = HeatTable::new();
    let mut slots = Vec::new();
    for i in 0..9 {
        let (next, slot) = allocator
            .place(&table, &[entry(&format!("c{i}"), "WCC")], Placement::Automatic)
            .unwrap();
        table = next;
        slots.push(slot);
    }

    let expected: Vec<Slot> = (1..=8)
        .map(|lane| Slot::new(1, lane))
        .chain([Slot::new(2, 1)])
        .collect();
    assert_eq!(slots, expected);
    assert_eq!(table.heat_count(), 2);
}

#[test]
fn dual_meet_splits_lanes_by_parity() {
    let meet = Meet::new("m1", "Dual").with_lanes(6).with_home_away("H", "W");
    let allocator = individual(&meet);

    let (table, home) = allocator
        .place(&HeatTable::new(), &[entry("h1", "H")], Placement::Automatic)
        .unwrap();
    let (_, away) = allocator
        .place(&table, &[entry("w1", "W")], Placement::Automatic)
        .unwrap();

    assert_eq!(home, Slot::new(1, 1));
    assert_eq!(away, Slot::new(1, 2));
}

#[test]
fn manual_placement_into_occupied_lane_fails_cleanly() {
    let meet = Meet::new("m1", "Opener");
    let allocator = individual(&meet);
    let (table, _) = allocator
        .place(&HeatTable::new(), &[entry("a", "WCC")], Placement::Manual(Slot::new(1, 3)))
        .unwrap();
    let before = table.clone();

    let err = allocator
        .place(&table, &[entry("b", "WCC")], Placement::Manual(Slot::new(1, 3)))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::SlotOccupied(Slot::new(1, 3)));
    assert_eq!(table, before);
    assert!(!table.contains(&"b".into()));
}

#[test]
fn one_bad_row_rejects_the_whole_import() {
    let meet = Meet::new("m1", "Opener");
    let config = EngineConfig::default();
    let store = MemoryStore::new().with_roster(
        Roster::new("WCC")
            .with_competitor(Competitor::new("w1", "Ann", "Lee"))
            .with_competitor(Competitor::new("w3", "Cy", "Ott")),
    );
    let mut schedule = Schedule::new("m1");
    schedule.append("e1", "Girls 9-10 50m Freestyle");

    let rejection = Reconciler::new(&meet, &config, &store)
        .reconcile_records(
            &schedule,
            vec![
                vec!["WCC", "Ann", "Lee", "1"],
                vec!["WCC", "Nobody", "Here", "1"],
                vec!["WCC", "Cy", "Ott", "1"],
            ],
        )
        .unwrap_err();

    assert_eq!(rejection.errors.len(), 1);
    let error = &rejection.errors[0];
    assert_eq!(error.row(), Some(2));
    assert!(error.kind.is_validation());
    assert!(matches!(error.kind, ErrorKind::CompetitorNotFound { .. }));
    assert!(schedule.get(&"e1".into()).unwrap().heats.is_empty());
}

#[test]
fn relay_lane_holds_four_of_one_team() {
    let meet = Meet::new("m1", "Relays");
    let allocator = LaneAllocator::new(&meet, LaneLimits::relay(8, 4), &EngineConfig::default());
    let lane = Slot::new(1, 1);

    let (mut table, first) = allocator
        .place(&HeatTable::new(), &[entry("r0", "WCC")], Placement::Manual(lane))
        .unwrap();
    assert_eq!(first, lane);

    for i in 1..4 {
        let (next, slot) = allocator
            .place(&table, &[entry(&format!("r{i}"), "WCC")], Placement::Automatic)
            .unwrap();
        assert_eq!(slot, lane);
        table = next;
    }
    assert_eq!(table.find_lane(lane).map(|l| l.len()), Some(4));

    let err = allocator
        .place(&table, &[entry("r4", "WCC")], Placement::Manual(lane))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SlotOccupied(lane));
    assert_eq!(table.find_lane(lane).map(|l| l.len()), Some(4));
}
