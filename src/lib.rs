//! Pick course sections and see them on a weekly timetable, with clashes flagged.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod ics;
pub mod info;
pub mod timetable;
pub mod utils;

pub use error::{Error, Result};
