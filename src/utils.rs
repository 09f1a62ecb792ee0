use std::collections::HashSet;

use crate::utils::models::{Position, TabChar};

pub mod models;

/// Cut a text to `width` characters, ending it with `...` when too long
pub fn etc_str(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }

    let kept = width.saturating_sub(3);
    let mut out = text.chars().take(kept).collect::<String>();
    out.push_str(&".".repeat(width - kept));

    out
}

/// Horizontal line of the table, `skip` holds the columns where the
/// line is hidden because a cell goes on in the next row
pub fn line_table(
    cell_length_hours: usize,
    cell_length: usize,
    number_cell: usize,
    pos: &Position,
    skip: &HashSet<usize>,
) -> String {
    let bh = TabChar::Bh.val();
    let (left, joint, right) = pos.joints();

    let mut line = String::new();
    line.push(left.val());
    line.push_str(&bh.to_string().repeat(cell_length_hours));

    for column in 0..number_cell {
        let previous = column > 0 && skip.contains(&(column - 1));
        let current = skip.contains(&column);

        // Junction before the column
        line.push(match (previous, current) {
            (false, false) => joint.val(),
            (true, false) => TabChar::Jl.val(),
            (false, true) => TabChar::Jr.val(),
            (true, true) => TabChar::Bv.val(),
        });

        let fill = if current { ' ' } else { bh };
        line.push_str(&fill.to_string().repeat(cell_length));
    }

    line.push(if skip.contains(&(number_cell - 1)) {
        TabChar::Bv.val()
    } else {
        right.val()
    });
    line.push('\n');

    line
}
