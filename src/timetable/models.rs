use std::{fmt, str::FromStr};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::timetable::layout::Layout;

/// Days shown in the timetable, in week order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

pub const DAYS: [Day; 6] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
];

impl Day {
    /// Three letters name, used in headers
    pub fn short(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One cell of the week: a day and an hour number
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub day: Day,
    pub hour: u8,
}

/// Contiguous hours taken by a session on one day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub day: Day,
    /// Ordered, never empty
    pub hours: Vec<u8>,
}

impl Span {
    pub fn first(&self) -> u8 {
        self.hours[0]
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lecture,
    Tutorial,
    Lab,
}

pub const CATEGORIES: [Category; 3] = [Category::Lecture, Category::Tutorial, Category::Lab];

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lecture => "lecture",
            Self::Tutorial => "tutorial",
            Self::Lab => "lab",
        })
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lecture" => Ok(Self::Lecture),
            "tutorial" => Ok(Self::Tutorial),
            "lab" => Ok(Self::Lab),
            _ => Err(Error::InvalidPick(s.to_owned())),
        }
    }
}

/// Students are split in two groups, some courses are shared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
    #[serde(rename = "common")]
    Common,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A => "Group A",
            Self::B => "Group B",
            Self::Common => "Common",
        })
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "common" => Ok(Self::Common),
            other => Err(format!("unknown group {other}, expected A or B")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Lecture, tutorial or lab
    #[serde(rename = "type")]
    pub category: Category,

    /// Section code, unique inside a course and category
    pub section: String,

    #[serde(default)]
    pub instructor: String,

    #[serde(default)]
    pub room: String,

    /// Day tokens (`M T W Th F S`) separated by spaces, or `TBA`, `-`, `Various`
    pub days: String,

    /// Either `3`, `1-2` or `2,4,6`
    pub hours: String,

    /// Out of 10
    #[serde(default)]
    pub rating: u8,

    #[serde(default)]
    pub remarks: String,
}

impl Session {
    /// Name used in messages, i.e.: `lab P3`
    pub fn label(&self) -> String {
        format!("{} {}", self.category, self.section)
    }

    /// Human timing, i.e.: `Mon, Wed | Hr 3 | F102`
    pub fn timing(&self, layout: &Layout) -> String {
        let days = self
            .days
            .split_whitespace()
            .map(|token| layout.day(token).map_or(token, |day| day.short()))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{days} | Hr {} | {}", self.hours, self.room)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,

    pub name: String,

    /// Official code, i.e.: `CS F111`
    #[serde(default)]
    pub code: String,

    pub group: Group,

    #[serde(default)]
    pub lectures: Vec<Session>,

    #[serde(default)]
    pub tutorials: Vec<Session>,

    #[serde(default)]
    pub labs: Vec<Session>,
}

impl Course {
    pub fn sessions(&self, category: Category) -> &[Session] {
        match category {
            Category::Lecture => &self.lectures,
            Category::Tutorial => &self.tutorials,
            Category::Lab => &self.labs,
        }
    }

    pub fn find(&self, category: Category, section: &str) -> Option<&Session> {
        self.sessions(category)
            .iter()
            .find(|session| session.section == section)
    }

    /// True if the course is taught to this group
    pub fn offered_to(&self, group: Group) -> bool {
        self.group == group || self.group == Group::Common
    }
}

/// A session the user picked, with the course it belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selected<'a> {
    pub course: &'a Course,
    pub session: &'a Session,
}

impl<'a> Selected<'a> {
    pub fn new(course: &'a Course, session: &'a Session) -> Self {
        Self { course, session }
    }

    /// Key used to flag a choice, i.e.: `cs-f111-lab-P3`
    pub fn identity(&self) -> String {
        format!(
            "{}-{}-{}",
            self.course.id, self.session.category, self.session.section
        )
    }

    pub fn is_lab(&self) -> bool {
        self.session.category == Category::Lab
    }
}
