use std::collections::BTreeSet;

use crate::error::Result;
use crate::timetable::layout::Layout;
use crate::timetable::models::{Selected, Slot};
use crate::timetable::occupancy::Occupancy;

/// A cell taken by more than one selected session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clash<'a> {
    pub slot: Slot,
    pub sessions: Vec<Selected<'a>>,
}

impl Clash<'_> {
    /// i.e.: `Monday Hour 3: Chemistry (L1) vs Biology (L2)`
    pub fn describe(&self) -> String {
        let who = self
            .sessions
            .iter()
            .map(|s| format!("{} ({})", s.course.name, s.session.section))
            .collect::<Vec<_>>()
            .join(" vs ");

        format!("{} Hour {}: {who}", self.slot.day, self.slot.hour)
    }
}

/// Every clashing cell, sorted by day then hour
pub fn find_clashes<'a>(occupancy: &Occupancy<'a>) -> Vec<Clash<'a>> {
    occupancy
        .iter()
        .filter(|(_, sessions)| sessions.len() > 1)
        .map(|(slot, sessions)| Clash {
            slot: *slot,
            sessions: sessions.clone(),
        })
        .collect()
}

/// Identity of every session sharing at least one cell with another one
pub fn identities(occupancy: &Occupancy) -> BTreeSet<String> {
    occupancy
        .iter()
        .filter(|(_, sessions)| sessions.len() > 1)
        .flat_map(|(_, sessions)| sessions.iter().map(Selected::identity))
        .collect()
}

pub fn clashing_identities(selected: &[Selected], layout: &Layout) -> Result<BTreeSet<String>> {
    Ok(identities(&Occupancy::build(selected, layout)?))
}
