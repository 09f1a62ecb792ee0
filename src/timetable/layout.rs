use std::collections::{BTreeMap, HashMap};

use chrono::NaiveTime;
use serde::Deserialize;

use crate::timetable::models::Day;

/// Starting clock time of each hour number
const HOURS: [(u8, u32); 10] = [
    (1, 8),
    (2, 9),
    (3, 10),
    (4, 11),
    (5, 12),
    (6, 14),
    (7, 15),
    (8, 16),
    (9, 17),
    (10, 18),
];

const DAY_CODES: [(&str, Day); 6] = [
    ("M", Day::Monday),
    ("T", Day::Tuesday),
    ("W", Day::Wednesday),
    ("Th", Day::Thursday),
    ("F", Day::Friday),
    ("S", Day::Saturday),
];

const ABBREVIATIONS: [(&str, &str); 9] = [
    ("Fundamentals of Chemistry", "Chem"),
    ("Electrical Sciences", "ES"),
    ("Oscillation And Waves", "OAW"),
    ("Intro to Bio Science", "Bio"),
    ("Computer Programming", "CP"),
    ("Technical Report Writing", "TRW"),
    ("Linear Algebra and Complex Variable", "LACV"),
    ("Probability And Statistics", "P&S"),
    ("Innovation And Design Thinking", "IDT"),
];

/// Lookup tables shared by the parser, the grid and the exports.
///
/// The catalog may override any field, missing ones keep their default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Token used in the data => day
    pub day_codes: BTreeMap<String, Day>,

    /// Hour number => when it starts
    pub hours: BTreeMap<u8, NaiveTime>,

    /// Length of one hour slot, in minutes
    pub slot_minutes: i64,

    /// Course name => short name shown in the grid
    pub abbreviations: HashMap<String, String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            day_codes: DAY_CODES
                .iter()
                .map(|(code, day)| ((*code).to_owned(), *day))
                .collect(),
            hours: HOURS
                .iter()
                .filter_map(|(n, h)| NaiveTime::from_hms_opt(*h, 0, 0).map(|time| (*n, time)))
                .collect(),
            slot_minutes: 50,
            abbreviations: ABBREVIATIONS
                .iter()
                .map(|(name, short)| ((*name).to_owned(), (*short).to_owned()))
                .collect(),
        }
    }
}

impl Layout {
    pub fn day(&self, token: &str) -> Option<Day> {
        self.day_codes.get(token).copied()
    }

    /// Hour numbers of the grid, in order
    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
        self.hours.keys().copied()
    }

    pub fn has_hour(&self, hour: u8) -> bool {
        self.hours.contains_key(&hour)
    }

    pub fn start(&self, hour: u8) -> Option<NaiveTime> {
        self.hours.get(&hour).copied()
    }

    /// Clock label of an hour, i.e.: `2:00 PM`
    pub fn label(&self, hour: u8) -> String {
        self.start(hour)
            .map_or_else(|| format!("Hour {hour}"), |time| time.format("%-I:%M %p").to_string())
    }

    /// Short name of a course, falls back to its first four letters
    pub fn short_name(&self, name: &str) -> String {
        match self.abbreviations.get(name) {
            Some(short) => short.clone(),
            None => name.chars().take(4).collect(),
        }
    }
}
