use thiserror::Error;

use crate::timetable::models::Category;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Timing of a session can't be turned into grid cells
    #[error("malformed schedule data for {session} (hours {hours:?}): {reason}")]
    MalformedScheduleData {
        session: String,
        hours: String,
        reason: String,
    },

    #[error("course {course}: {source}")]
    InvalidCourse {
        course: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{0} appears twice")]
    Duplicate(String),

    #[error("unknown course {0}")]
    UnknownCourse(String),

    #[error("course {course} has no {category} {section}")]
    UnknownSection {
        course: String,
        category: Category,
        section: String,
    },

    #[error("invalid pick {0:?}, expected COURSE:TYPE=SECTION")]
    InvalidPick(String),

    #[error("invalid date {0:?}, expected YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate(String),

    #[error("can't read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}
