use std::collections::BTreeMap;

use log::debug;

use crate::error::Result;
use crate::timetable::layout::Layout;
use crate::timetable::models::{Day, Selected, DAYS};
use crate::timetable::slots::parse_spans;

/// One day/hour box of the weekly grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell<'a> {
    /// Sessions shown in the cell. A lab block is only counted at its first
    /// hour; sessions starting inside a merged block are shown by the block.
    pub sessions: Vec<Selected<'a>>,

    /// Number of rows the cell takes, 0 for covered cells
    pub span: usize,

    /// Hour of the merged cell this one belongs to
    pub covered_by: Option<u8>,

    /// More than one session shown. For a merged block this counts the
    /// sessions starting under the block too, not only the first hour.
    pub clash: bool,
}

impl Cell<'_> {
    /// False when the cell is drawn by a merged cell above it
    pub fn is_rendered(&self) -> bool {
        self.covered_by.is_none()
    }
}

/// Fixed days × hours matrix of the selected sessions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<'a> {
    hours: Vec<u8>,
    /// Indexed by day, then by position of the hour
    columns: Vec<Vec<Cell<'a>>>,
}

impl<'a> Grid<'a> {
    pub fn project(selected: &[Selected<'a>], layout: &Layout) -> Result<Self> {
        let hours = layout.hours().collect::<Vec<_>>();

        // Day => hour => (session, rows) starting there
        let mut starts: BTreeMap<Day, BTreeMap<u8, Vec<(Selected<'a>, usize)>>> = BTreeMap::new();
        for choice in selected {
            for span in parse_spans(choice.session, layout)? {
                let day = starts.entry(span.day).or_default();
                if choice.is_lab() && span.len() > 1 {
                    day.entry(span.first())
                        .or_default()
                        .push((*choice, span.len()));
                } else {
                    for hour in span.hours {
                        day.entry(hour).or_default().push((*choice, 1));
                    }
                }
            }
        }

        let columns = DAYS
            .iter()
            .map(|day| column(&hours, starts.get(day)))
            .collect();

        debug!("projected {} selected sessions on the grid", selected.len());

        Ok(Self { hours, columns })
    }

    pub fn hours(&self) -> &[u8] {
        &self.hours
    }

    pub fn cell(&self, day: Day, hour: u8) -> Option<&Cell<'a>> {
        let index = self.hours.iter().position(|h| *h == hour)?;
        self.columns.get(day as usize)?.get(index)
    }

    /// True if nothing is shown
    pub fn is_empty(&self) -> bool {
        self.columns
            .iter()
            .flatten()
            .all(|cell| cell.sessions.is_empty())
    }
}

/// Build the cells of one day, merging lab blocks
fn column<'a>(
    hours: &[u8],
    starts: Option<&BTreeMap<u8, Vec<(Selected<'a>, usize)>>>,
) -> Vec<Cell<'a>> {
    let mut cells = vec![Cell::default(); hours.len()];
    let Some(starts) = starts else {
        cells.iter_mut().for_each(|cell| cell.span = 1);
        return cells;
    };

    let at = |i: usize| starts.get(&hours[i]).map_or(&[][..], Vec::as_slice);

    let mut i = 0;
    while i < hours.len() {
        let mut sessions = at(i).iter().map(|(s, _)| *s).collect::<Vec<_>>();
        let mut last = i + at(i).iter().map(|(_, rows)| rows - 1).max().unwrap_or(0);

        // Everything starting under the block is drawn by the block
        let mut j = i + 1;
        while j <= last && j < hours.len() {
            cells[j].covered_by = Some(hours[i]);
            for (session, rows) in at(j) {
                sessions.push(*session);
                last = last.max(j + rows - 1);
            }
            j += 1;
        }

        let cell = &mut cells[i];
        cell.span = j - i;
        cell.clash = sessions.len() > 1;
        cell.sessions = sessions;
        i = j;
    }

    cells
}
