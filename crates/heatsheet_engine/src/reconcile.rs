//! Bulk, all-or-nothing import reconciliation.
//!
//! Reconciliation runs in phases:
//!
//! 1. Every row is resolved against its team roster and the meet schedule.
//!    Failures are collected; nothing short-circuits.
//! 2. Rows with both heat and lane are placed first, in input order, so their
//!    lanes are reserved before anything is filled automatically.
//! 3. If any error exists at this point the import is rejected.
//! 4. The remaining rows are placed per event, in input order, into a running
//!    heat opened after the highest heat present.
//!
//! Only a run without a single error yields a [`ChangeSet`]. The caller saves
//! that change set in one atomic write, so an import is either fully applied
//! or not at all.

use std::collections::BTreeMap;

use heatsheet_foundation::{Entry, Error, ErrorKind, EventId, Meet, Result, Roster, TeamId};
use heatsheet_storage::{ChangeSet, EventState, RosterSource, Schedule};
use tracing::{debug, info, warn};

use crate::allocator::{HeatCursor, LaneAllocator};
use crate::config::EngineConfig;
use crate::import::{ImportRow, ParsedImport, RecordParser};

/// Why an import was not applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("import rejected with {} error(s)", .errors.len())]
pub struct Rejection {
    /// Every error found, ordered by import row.
    pub errors: Vec<Error>,
}

impl Rejection {
    fn new(mut errors: Vec<Error>) -> Self {
        errors.sort_by_key(Error::row);
        Self { errors }
    }
}

impl From<Error> for Rejection {
    fn from(error: Error) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// A row whose competitor and event are known.
struct Resolved<'r> {
    row: &'r ImportRow,
    entry: Entry,
    event: EventId,
}

/// Applies import rows to a meet's schedule.
pub struct Reconciler<'a, R: ?Sized> {
    meet: &'a Meet,
    config: &'a EngineConfig,
    rosters: &'a R,
}

impl<'a, R: RosterSource + ?Sized> Reconciler<'a, R> {
    /// Creates a reconciler for `meet`, reading rosters from `rosters`.
    #[must_use]
    pub fn new(meet: &'a Meet, config: &'a EngineConfig, rosters: &'a R) -> Self {
        Self {
            meet,
            config,
            rosters,
        }
    }

    /// Parses split records, then reconciles them.
    ///
    /// Parse errors are reported together with everything found later.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] listing every error if any row fails.
    pub fn reconcile_records<I, Rec, S>(
        &self,
        schedule: &Schedule,
        records: I,
    ) -> std::result::Result<ChangeSet, Rejection>
    where
        I: IntoIterator<Item = Rec>,
        Rec: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ParsedImport { rows, errors } = RecordParser::new().parse(records);
        self.run(schedule, &rows, errors)
    }

    /// Reconciles parsed rows against `schedule`.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] listing every error if any row fails.
    pub fn reconcile(
        &self,
        schedule: &Schedule,
        rows: &[ImportRow],
    ) -> std::result::Result<ChangeSet, Rejection> {
        self.run(schedule, rows, Vec::new())
    }

    fn run(
        &self,
        schedule: &Schedule,
        rows: &[ImportRow],
        mut errors: Vec<Error>,
    ) -> std::result::Result<ChangeSet, Rejection> {
        self.meet.validate()?;

        // Resolve
        let mut rosters = BTreeMap::new();
        let mut working: BTreeMap<EventId, EventState> = BTreeMap::new();
        let mut resolved = Vec::with_capacity(rows.len());
        for row in rows {
            match self.resolve(row, schedule, &mut rosters) {
                Ok((found, event)) => {
                    working
                        .entry(event.id.clone())
                        .or_insert_with(|| event.clone());
                    resolved.push(found);
                }
                Err(mut row_errors) => errors.append(&mut row_errors),
            }
        }

        // Manual rows
        for item in resolved.iter().filter(|r| r.row.is_manual()) {
            if let Err(err) = self.apply(&mut working, item, None) {
                errors.push(err);
            }
        }

        if !errors.is_empty() {
            warn!(
                rows = rows.len(),
                errors = errors.len(),
                "import rejected before automatic placement"
            );
            return Err(Rejection::new(errors));
        }

        // Automatic rows, grouped by event in order of first appearance
        let mut order: Vec<&EventId> = Vec::new();
        let mut groups: BTreeMap<&EventId, Vec<&Resolved<'_>>> = BTreeMap::new();
        for item in resolved.iter().filter(|r| !r.row.is_manual()) {
            let group = groups.entry(&item.event).or_insert_with(|| {
                order.push(&item.event);
                Vec::new()
            });
            group.push(item);
        }
        for event in order {
            let mut cursor = HeatCursor::new();
            for item in groups.remove(event).unwrap_or_default() {
                if let Err(err) = self.apply(&mut working, item, Some(&mut cursor)) {
                    errors.push(err);
                }
            }
        }

        if !errors.is_empty() {
            warn!(
                rows = rows.len(),
                errors = errors.len(),
                "import rejected during automatic placement"
            );
            return Err(Rejection::new(errors));
        }

        let changes: ChangeSet = working
            .into_values()
            .map(|mut event| {
                event.heats.normalize();
                event
            })
            .collect();
        info!(rows = rows.len(), events = changes.len(), "import reconciled");
        Ok(changes)
    }

    fn resolve<'r, 's>(
        &self,
        row: &'r ImportRow,
        schedule: &'s Schedule,
        rosters: &mut BTreeMap<TeamId, Option<Roster>>,
    ) -> std::result::Result<(Resolved<'r>, &'s EventState), Vec<Error>> {
        let mut errors = Vec::new();

        if row.heat == Some(0) || row.lane == Some(0) {
            errors.push(Error::validation("heat and lane numbers start at 1"));
        }

        let competitor = match self.roster(&row.team, rosters) {
            Ok(Some(roster)) => match roster.find_by_name(&row.first_name, &row.last_name) {
                Some(competitor) => Some(competitor.clone()),
                None => {
                    errors.push(Error::new(ErrorKind::CompetitorNotFound {
                        team: row.team.clone(),
                        name: row.full_name(),
                    }));
                    None
                }
            },
            Ok(None) => {
                errors.push(Error::new(ErrorKind::TeamNotFound(row.team.clone())));
                None
            }
            Err(err) => {
                errors.push(err);
                None
            }
        };

        let event = schedule.by_number(row.event_number);
        if event.is_none() {
            errors.push(Error::new(ErrorKind::EventNumberNotFound(row.event_number)));
        }

        match (competitor, event) {
            (Some(competitor), Some(event)) if errors.is_empty() => {
                let entry = Entry::from_competitor(&competitor, &row.team)
                    .with_seed_time(self.config.seed_time);
                Ok((
                    Resolved {
                        row,
                        entry,
                        event: event.id.clone(),
                    },
                    event,
                ))
            }
            _ => Err(errors
                .into_iter()
                .map(|err| err.with_context(row.context()))
                .collect()),
        }
    }

    fn roster<'c>(
        &self,
        team: &TeamId,
        cache: &'c mut BTreeMap<TeamId, Option<Roster>>,
    ) -> Result<Option<&'c Roster>> {
        if !cache.contains_key(team) {
            let roster = self.rosters.roster(team)?;
            cache.insert(team.clone(), roster);
        }
        Ok(cache.get(team).and_then(Option::as_ref))
    }

    fn apply(
        &self,
        working: &mut BTreeMap<EventId, EventState>,
        item: &Resolved<'_>,
        cursor: Option<&mut HeatCursor>,
    ) -> Result<()> {
        let context = item.row.context().with_event(item.event.clone());
        let Some(state) = working.get_mut(&item.event) else {
            return Err(Error::new(ErrorKind::Internal(format!(
                "event {} was resolved but not loaded",
                item.event
            )))
            .with_context(context));
        };

        let allocator = LaneAllocator::for_event(self.meet, state, self.config);
        let group = std::slice::from_ref(&item.entry);
        let placed = match cursor {
            Some(cursor) => allocator.place_running(&state.heats, group, cursor),
            None => allocator.place(&state.heats, group, item.row.placement()),
        };
        let (heats, slot) = placed.map_err(|err| err.with_context(context))?;

        debug!(row = item.row.row, event = %item.event, %slot, "row placed");
        state.heats = heats;
        Ok(())
    }
}
