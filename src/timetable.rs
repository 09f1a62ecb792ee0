use std::collections::HashSet;

use crate::utils::{
    etc_str, line_table,
    models::{Position, TabChar},
};

pub mod clash;
pub mod grid;
pub mod layout;
pub mod models;
pub mod occupancy;
pub mod slots;

#[cfg(test)]
pub(crate) mod fixtures;

use grid::{Cell, Grid};
use layout::Layout;
use models::DAYS;

/// Text lines of a cell, one per session
fn cell_lines(cell: &Cell, layout: &Layout) -> Vec<String> {
    cell.sessions
        .iter()
        .map(|s| format!("{} {}", layout.short_name(&s.course.name), s.session.section))
        .collect()
}

/// Spread the lines of a cell over its rows, the last row takes the leftovers
fn spread(lines: Vec<String>, rows: usize, clash: bool) -> Vec<String> {
    let mut out = vec![String::new(); rows];
    if rows == 0 {
        return out;
    }

    let mut lines = lines.into_iter();
    for (row, line) in out.iter_mut().take(rows - 1).zip(lines.by_ref()) {
        *row = line;
    }
    out[rows - 1] = lines.collect::<Vec<_>>().join("/");

    if clash {
        out[0] = format!("! {}", out[0]);
    }

    out
}

/// Display the timetable
pub fn display(grid: &Grid, layout: &Layout, cell_length: usize) -> String {
    // Cell length for hours
    let clh = 11;
    // Cell number
    let cn = DAYS.len();

    let sep = TabChar::Bv.val();
    let hours = grid.hours();

    // Text of every row, per day
    let mut texts = vec![vec![String::new(); hours.len()]; cn];
    for (j, day) in DAYS.iter().enumerate() {
        for (i, hour) in hours.iter().enumerate() {
            let Some(cell) = grid.cell(*day, *hour) else {
                continue;
            };
            if !cell.is_rendered() {
                continue;
            }
            let rows = cell.span.min(hours.len() - i);
            for (k, line) in spread(cell_lines(cell, layout), rows, cell.clash)
                .into_iter()
                .enumerate()
            {
                texts[j][i + k] = etc_str(&line, cell_length);
            }
        }
    }

    let mut out = String::new();

    // Top of the tab
    out.push_str(&line_table(clh, cell_length, cn, &Position::Top, &HashSet::new()));

    // First empty case
    out.push_str(&format!("{sep}{:^clh$}{sep}", "Time"));

    // Print day's of the week
    for day in DAYS {
        out.push_str(&format!("{:^cell_length$}{sep}", day.short()));
    }
    out.push('\n');

    for (i, hour) in hours.iter().enumerate() {
        // Columns where a merged cell goes on
        let skip = DAYS
            .iter()
            .enumerate()
            .filter(|(_, day)| grid.cell(**day, *hour).is_some_and(|c| !c.is_rendered()))
            .map(|(j, _)| j)
            .collect::<HashSet<_>>();

        out.push_str(&line_table(clh, cell_length, cn, &Position::Middle, &skip));

        out.push_str(&format!("{sep}{:^clh$}", layout.label(*hour)));
        for column in &texts {
            out.push_str(&format!("{sep}{:^cell_length$}", column[i]));
        }
        out.push(sep);
        out.push('\n');
    }

    // Bottom of the table
    out.push_str(&line_table(clh, cell_length, cn, &Position::Bottom, &HashSet::new()));

    out
}
