//! Import rows and the record parser.
//!
//! Records arrive already split into fields, one record per input line:
//! `team, firstName, lastName, eventNumber[, heat[, lane]]`. Splitting the
//! file is the caller's business.

use heatsheet_foundation::{Error, ErrorContext, Result, TeamId};

use crate::allocator::Placement;

/// Fields of the header line, compared ignoring case and surrounding blanks.
const HEADER: [&str; 4] = ["team", "firstname", "lastname", "eventnumber"];

/// One parsed import line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based line number in the import.
    pub row: usize,
    /// Team key, matched exactly.
    pub team: TeamId,
    /// Given name, matched ignoring case.
    pub first_name: String,
    /// Family name, matched ignoring case.
    pub last_name: String,
    /// Event number within the meet.
    pub event_number: u32,
    /// Requested heat, if any.
    pub heat: Option<u32>,
    /// Requested lane, if any.
    pub lane: Option<u32>,
}

impl ImportRow {
    /// Creates an automatic row.
    #[must_use]
    pub fn new(
        row: usize,
        team: impl Into<TeamId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        event_number: u32,
    ) -> Self {
        Self {
            row,
            team: team.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            event_number,
            heat: None,
            lane: None,
        }
    }

    /// Requests a specific heat and lane.
    #[must_use]
    pub fn at(mut self, heat: u32, lane: u32) -> Self {
        self.heat = Some(heat);
        self.lane = Some(lane);
        self
    }

    /// Returns true when both heat and lane are given.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.heat.is_some() && self.lane.is_some()
    }

    /// Returns the requested placement.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::from_parts(self.heat, self.lane)
    }

    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns error context pointing at this row.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        ErrorContext::new()
            .with_row(self.row)
            .with_event_number(self.event_number)
    }
}

/// The rows and per-line errors of one import.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedImport {
    /// Rows that parsed.
    pub rows: Vec<ImportRow>,
    /// One error per line that did not.
    pub errors: Vec<Error>,
}

/// Turns split records into [`ImportRow`]s.
///
/// A first record that reads `team,firstname,lastname,eventnumber` is a
/// header and is skipped. Blank records are skipped. A heat or lane that is
/// not a number is treated as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordParser;

impl RecordParser {
    /// Creates a parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses every record, collecting one error per bad line.
    pub fn parse<I, R, S>(&self, records: I) -> ParsedImport
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = ParsedImport::default();
        for (index, record) in records.into_iter().enumerate() {
            let owned: Vec<S> = record.into_iter().collect();
            let fields: Vec<&str> = owned.iter().map(|f| f.as_ref().trim()).collect();
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            if index == 0 && is_header(&fields) {
                continue;
            }
            match parse_record(index + 1, &fields) {
                Ok(row) => parsed.rows.push(row),
                Err(err) => parsed.errors.push(err),
            }
        }
        parsed
    }
}

fn is_header(fields: &[&str]) -> bool {
    fields.len() >= HEADER.len()
        && fields
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.eq_ignore_ascii_case(name))
}

fn parse_record(row: usize, fields: &[&str]) -> Result<ImportRow> {
    let context = ErrorContext::new().with_row(row);
    let field = |i: usize| fields.get(i).copied().unwrap_or("");

    let (team, first_name, last_name, event) = (field(0), field(1), field(2), field(3));
    if team.is_empty() || first_name.is_empty() || last_name.is_empty() || event.is_empty() {
        return Err(Error::validation(
            "invalid format, required: Team,FirstName,LastName,EventNumber",
        )
        .with_context(context));
    }

    let event_number = event.parse::<u32>().map_err(|_| {
        Error::validation(format!("event number {event:?} is not a number"))
            .with_context(context.clone())
    })?;

    Ok(ImportRow {
        row,
        team: TeamId::new(team),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        event_number,
        heat: field(4).parse().ok(),
        lane: field(5).parse().ok(),
    })
}
