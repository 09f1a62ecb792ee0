//! Turn the textual timing of a session into grid cells.
//!
//! The hour spec comes in three shapes, checked in this order:
//! - `2,4,6`: one hour per day token, paired by position. When there are
//!   fewer hours than tokens, the first hour is reused for the extra tokens.
//! - `1-2`: every day gets the whole block (labs).
//! - `3`: every day gets that hour.

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::error::{Error, Result};
use crate::timetable::layout::Layout;
use crate::timetable::models::{Session, Slot, Span};

/// Days values meaning the session has no fixed timing
const UNSCHEDULED: [&str; 3] = ["TBA", "-", "Various"];

static RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<start>\d+)\s*-\s*(?P<end>\d+)$").unwrap());

enum HourSpec {
    PerDay(Vec<u8>),
    Block(Vec<u8>),
    Single(u8),
}

impl HourSpec {
    fn read(session: &Session, layout: &Layout) -> Result<Self> {
        let spec = session.hours.trim();

        if spec.contains(',') {
            let hours = spec
                .split(',')
                .map(|part| hour(part, session, layout))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Self::PerDay(hours));
        }

        if spec.contains('-') {
            let captures = RANGE
                .captures(spec)
                .ok_or_else(|| malformed(session, "expected a range like 1-2"))?;
            let start = hour(&captures["start"], session, layout)?;
            let end = hour(&captures["end"], session, layout)?;
            if start > end {
                return Err(malformed(session, "range ends before it starts"));
            }
            let hours = (start..=end).collect::<Vec<_>>();
            if let Some(gap) = hours.iter().find(|h| !layout.has_hour(**h)) {
                return Err(malformed(session, format!("hour {gap} is outside the grid")));
            }
            return Ok(Self::Block(hours));
        }

        Ok(Self::Single(hour(spec, session, layout)?))
    }

    /// Hours taken on the day at position `index` of the days list
    fn hours_for(&self, index: usize, session: &Session) -> Vec<u8> {
        match self {
            Self::PerDay(hours) => match hours.get(index) {
                Some(hour) => vec![*hour],
                None => {
                    warn!(
                        "{} has no hour for its day #{}, using the first one",
                        session.label(),
                        index + 1
                    );
                    vec![hours[0]]
                }
            },
            Self::Block(hours) => hours.clone(),
            Self::Single(hour) => vec![*hour],
        }
    }
}

fn malformed(session: &Session, reason: impl Into<String>) -> Error {
    Error::MalformedScheduleData {
        session: session.label(),
        hours: session.hours.clone(),
        reason: reason.into(),
    }
}

fn hour(value: &str, session: &Session, layout: &Layout) -> Result<u8> {
    let value = value.trim();
    let hour = value
        .parse::<u8>()
        .map_err(|_| malformed(session, format!("{value:?} is not an hour number")))?;

    if layout.has_hour(hour) {
        Ok(hour)
    } else {
        Err(malformed(session, format!("hour {hour} is outside the grid")))
    }
}

/// Days of the session, each with its ordered contiguous hours
pub fn parse_spans(session: &Session, layout: &Layout) -> Result<Vec<Span>> {
    let days = session.days.trim();
    if UNSCHEDULED.contains(&days) {
        return Ok(vec![]);
    }

    let tokens = days.split_whitespace().collect::<Vec<_>>();
    if tokens.is_empty() {
        return Ok(vec![]);
    }

    let spec = HourSpec::read(session, layout)?;

    let mut spans = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let Some(day) = layout.day(token) else {
            debug!("{}: skipping unknown day {token:?}", session.label());
            continue;
        };
        spans.push(Span {
            day,
            hours: spec.hours_for(index, session),
        });
    }

    Ok(spans)
}

/// Every (day, hour) cell the session takes
pub fn parse_slots(session: &Session, layout: &Layout) -> Result<Vec<Slot>> {
    Ok(parse_spans(session, layout)?
        .into_iter()
        .flat_map(|span| {
            span.hours
                .into_iter()
                .map(move |hour| Slot { day: span.day, hour })
        })
        .collect())
}
