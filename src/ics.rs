use chrono::{Duration, NaiveDateTime, Utc};
use ::ics::{
    escape_text,
    properties::{Categories, Description, DtEnd, DtStart, Location, RRule, Summary},
    Event, ICalendar,
};
use log::info;

use crate::error::{Error, Result};
use crate::info::Term;
use crate::timetable::layout::Layout;
use crate::timetable::models::Selected;
use crate::timetable::slots::parse_spans;

const FORMAT: &str = "%Y%m%dT%H%M%S";

/// One weekly event per session and day, merged lab hours included
pub fn build(selected: &[Selected], layout: &Layout, term: &Term) -> Result<ICalendar<'static>> {
    let mut calendar = ICalendar::new("2.0", format!("timeclash/{}", env!("CARGO_PKG_VERSION")));
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for choice in selected {
        for span in parse_spans(choice.session, layout)? {
            let (Some(start), Some(last)) = (
                layout.start(span.first()),
                span.hours.last().and_then(|hour| layout.start(*hour)),
            ) else {
                continue;
            };

            let date = term.first_occurrence(span.day);
            let dtstart = NaiveDateTime::new(date, start);
            let dtend = NaiveDateTime::new(date, last) + Duration::minutes(layout.slot_minutes);

            let mut event = Event::new(uuid::Uuid::new_v4().to_string(), dtstamp.clone());
            event.push(Summary::new(escape_text(format!(
                "{} - {} {}",
                choice.course.name, choice.session.category, choice.session.section
            ))));
            event.push(Categories::new(choice.session.category.to_string()));
            event.push(DtStart::new(dtstart.format(FORMAT).to_string()));
            event.push(DtEnd::new(dtend.format(FORMAT).to_string()));
            event.push(RRule::new(format!("FREQ=WEEKLY;COUNT={}", term.weeks)));
            if !choice.session.room.is_empty() {
                event.push(Location::new(escape_text(choice.session.room.clone())));
            }
            let details = format!("{} {}", choice.course.code, choice.session.instructor);
            event.push(Description::new(escape_text(details.trim().to_owned())));

            calendar.add_event(event);
        }
    }

    Ok(calendar)
}

/// Write the calendar, adding the `.ics` extension when missing
pub fn export(calendar: &ICalendar, filename: &mut String) -> Result<()> {
    if !filename.ends_with(".ics") {
        filename.push_str(".ics");
    }

    calendar.save_file(filename.as_str()).map_err(|err| Error::Io {
        path: filename.clone(),
        source: err,
    })?;
    info!("calendar written to {filename}");

    Ok(())
}
