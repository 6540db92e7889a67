//! Heat table properties under random entry traffic

use heatsheet_engine::{EngineConfig, EntryDesk, ImportRow, Placement, Reconciler};
use heatsheet_foundation::{Competitor, ErrorKind, Meet, Roster, Slot, TeamId};
use heatsheet_storage::{EventState, LaneLimits, MemoryStore, Schedule};
use proptest::prelude::*;

const LANES: u32 = 6;

#[derive(Clone, Debug)]
enum Op {
    Auto { competitor: usize, home: bool },
    Manual { competitor: usize, heat: u32, lane: u32 },
    Remove { competitor: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..20, any::<bool>())
            .prop_map(|(competitor, home)| Op::Auto { competitor, home }),
        2 => (0usize..20, 1u32..4, 1u32..=LANES + 1)
            .prop_map(|(competitor, heat, lane)| Op::Manual { competitor, heat, lane }),
        1 => (0usize..20).prop_map(|competitor| Op::Remove { competitor }),
    ]
}

fn competitor(index: usize) -> Competitor {
    Competitor::new(format!("c{index}"), format!("First{index}"), format!("Last{index}"))
}

fn team(home: bool) -> TeamId {
    TeamId::new(if home { "H" } else { "W" })
}

fn dual_meet() -> Meet {
    Meet::new("m1", "Dual").with_lanes(LANES).with_home_away("H", "W")
}

/// Applies one operation, returning the new state on success.
fn apply(desk: &EntryDesk<'_>, event: &EventState, op: &Op) -> Option<EventState> {
    let result = match *op {
        Op::Auto { competitor: c, home } => desk
            .add(event, &competitor(c), &team(home), Placement::Automatic)
            .map(|(next, _)| next),
        Op::Manual { competitor: c, heat, lane } => desk
            .add(event, &competitor(c), &team(c % 2 == 0), Placement::Manual(Slot::new(heat, lane)))
            .map(|(next, _)| next),
        Op::Remove { competitor: c } => desk.remove(event, &competitor(c).id),
    };
    result.ok()
}

/// Applies `ops` and checks the table invariants after every step.
fn run(name: &str, ops: &[Op]) -> Result<(), TestCaseError> {
    let meet = dual_meet();
    let config = EngineConfig::default();
    let desk = EntryDesk::new(&meet, &config);
    let limits = config.limits(&meet, name);
    let mut event = EventState::new("e1", "m1", 1, name);

    for op in ops {
        // A failed operation leaves the previous state in place.
        if let Some(next) = apply(&desk, &event, op) {
            event = next;
        }
        prop_assert!(event.heats.validate(limits).is_ok(), "{:?}", event.heats.violations(limits));
    }
    Ok(())
}

proptest! {
    // Capacity, lane exclusivity, no duplicates, canonical order, no empties.
    #[test]
    fn individual_tables_stay_valid(ops in prop::collection::vec(op(), 1..60)) {
        run("Girls 9-10 50m Freestyle", &ops)?;
    }

    #[test]
    fn relay_tables_stay_valid(ops in prop::collection::vec(op(), 1..60)) {
        run("Mixed 9-10 200m Freestyle Relay", &ops)?;
    }

    #[test]
    fn automatic_placement_never_fails_for_new_competitors(
        homes in prop::collection::vec(any::<bool>(), 1..40)
    ) {
        let meet = Meet::new("m1", "Dual").with_lanes(LANES).with_home_away("H", "W");
        let config = EngineConfig::default();
        let desk = EntryDesk::new(&meet, &config);
        let mut event = EventState::new("e1", "m1", 1, "Boys 11-12 100m IM");
        for (i, home) in homes.iter().enumerate() {
            let (next, slot) = desk
                .add(&event, &competitor(i), &team(*home), Placement::Automatic)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(slot.lane >= 1 && slot.lane <= LANES);
            event = next;
        }
        prop_assert_eq!(event.heats.entry_count(), homes.len());
        // Parity only orders the scan; a heat fills completely before the next.
        prop_assert_eq!(event.heats.heat_count(), homes.len().div_ceil(LANES as usize));
    }

    // Reconciliation atomicity: either every row lands or nothing changes.
    #[test]
    fn imports_are_all_or_nothing(
        picks in prop::collection::vec((0usize..8, 1u32..4, prop::option::of((1u32..3, 1u32..=LANES))), 1..16)
    ) {
        let roster = (0..6).fold(Roster::new("WCC"), |r, i| r.with_competitor(competitor(i)));
        let store = MemoryStore::new().with_roster(roster);
        let mut schedule = Schedule::new("m1");
        schedule.append("e1", "Girls 9-10 50m Freestyle");
        schedule.append("e2", "Boys 9-10 50m Freestyle");
        let meet = Meet::new("m1", "Opener").with_lanes(LANES);
        let config = EngineConfig::default();

        let rows: Vec<ImportRow> = picks
            .iter()
            .enumerate()
            .map(|(i, &(c, event, slot))| {
                let row = ImportRow::new(i + 1, "WCC", format!("First{c}"), format!("Last{c}"), event);
                match slot {
                    Some((heat, lane)) => row.at(heat, lane),
                    None => row,
                }
            })
            .collect();

        match Reconciler::new(&meet, &config, &store).reconcile(&schedule, &rows) {
            Ok(changes) => {
                let placed: usize = changes.events().map(|e| e.heats.entry_count()).sum();
                prop_assert_eq!(placed, rows.len());
                for event in changes.events() {
                    prop_assert!(event.heats.validate(LaneLimits::individual(LANES)).is_ok());
                }
            }
            Err(rejection) => {
                prop_assert!(!rejection.errors.is_empty());
                prop_assert!(rejection.errors.iter().all(|e| e.row().is_some()));
                prop_assert!(schedule.events().all(|e| e.heats.is_empty()));
            }
        }
    }

    // Adding a newcomer and removing it again restores every heat and lane.
    #[test]
    fn add_then_remove_restores_the_table(
        ops in prop::collection::vec(op(), 0..40),
        home in any::<bool>(),
        manual in prop::option::of((1u32..5, 1u32..=LANES)),
        relay in any::<bool>(),
    ) {
        let name = if relay {
            "Mixed 9-10 200m Freestyle Relay"
        } else {
            "Girls 9-10 50m Freestyle"
        };
        let meet = dual_meet();
        let config = EngineConfig::default();
        let desk = EntryDesk::new(&meet, &config);
        let mut before = EventState::new("e1", "m1", 1, name);
        for op in &ops {
            if let Some(next) = apply(&desk, &before, op) {
                before = next;
            }
        }

        let newcomer = competitor(99);
        let placement = match manual {
            Some((heat, lane)) => Placement::Manual(Slot::new(heat, lane)),
            None => Placement::Automatic,
        };
        let Ok((added, slot)) = desk.add(&before, &newcomer, &team(home), placement) else {
            // Only a manual request into a full lane may be refused.
            prop_assert!(manual.is_some());
            return Ok(());
        };
        prop_assert_eq!(added.heats.locate(&newcomer.id), Some(slot));

        let after = desk
            .remove(&added, &newcomer.id)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(&after.heats, &before.heats);
    }

    // Removal idempotence: a second removal changes nothing and says so.
    #[test]
    fn removal_is_idempotent(count in 1usize..12, target in 0usize..12) {
        let meet = Meet::new("m1", "Opener").with_lanes(LANES);
        let config = EngineConfig::default();
        let desk = EntryDesk::new(&meet, &config);
        let mut event = EventState::new("e1", "m1", 1, "Girls 9-10 50m Freestyle");
        for i in 0..count {
            event = desk
                .add(&event, &competitor(i), &"WCC".into(), Placement::Automatic)
                .map_err(|e| TestCaseError::fail(e.to_string()))?
                .0;
        }

        let id = competitor(target).id;
        let once = match desk.remove(&event, &id) {
            Ok(next) => next,
            Err(err) => {
                prop_assert!(target >= count);
                prop_assert_eq!(err.kind, ErrorKind::EntryNotFound(id));
                return Ok(());
            }
        };
        let err = desk.remove(&once, &id).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::EntryNotFound(id.clone()));
        prop_assert!(!once.heats.contains(&id));
        prop_assert_eq!(once.heats.entry_count(), count - 1);
    }
}
