use std::collections::{btree_map, BTreeMap};

use log::debug;

use crate::error::Result;
use crate::timetable::layout::Layout;
use crate::timetable::models::{Selected, Slot};
use crate::timetable::slots::parse_slots;

/// Which selected sessions take each cell of the week.
///
/// Cells are kept sorted by day then hour; inside a cell, sessions keep the
/// order of the selection they were built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy<'a> {
    cells: BTreeMap<Slot, Vec<Selected<'a>>>,
}

impl<'a> Occupancy<'a> {
    pub fn build(selected: &[Selected<'a>], layout: &Layout) -> Result<Self> {
        let mut cells: BTreeMap<Slot, Vec<Selected<'a>>> = BTreeMap::new();

        for choice in selected {
            for slot in parse_slots(choice.session, layout)? {
                cells.entry(slot).or_default().push(*choice);
            }
        }

        debug!(
            "{} selected sessions take {} cells",
            selected.len(),
            cells.len()
        );

        Ok(Self { cells })
    }

    /// Sessions in a cell, empty if nobody is there
    pub fn get(&self, slot: &Slot) -> &[Selected<'a>] {
        self.cells.get(slot).map_or(&[][..], Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Slot, Vec<Selected<'a>>> {
        self.cells.iter()
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<'o, 'a> IntoIterator for &'o Occupancy<'a> {
    type Item = (&'o Slot, &'o Vec<Selected<'a>>);
    type IntoIter = btree_map::Iter<'o, Slot, Vec<Selected<'a>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::fixtures::{course, lecture};
    use crate::timetable::models::Day;

    #[test]
    fn keeps_selection_order_in_cells() {
        let chem = course("chem", vec![lecture("L1", "M", "3")]);
        let bio = course("bio", vec![lecture("L2", "M W", "3")]);
        let selected = [
            Selected::new(&bio, &bio.lectures[0]),
            Selected::new(&chem, &chem.lectures[0]),
        ];

        let occupancy = Occupancy::build(&selected, &Layout::default()).unwrap();

        assert_eq!(occupancy.len(), 2);
        let monday = occupancy.get(&Slot { day: Day::Monday, hour: 3 });
        assert_eq!(monday, &selected[..]);
        let wednesday = occupancy.get(&Slot { day: Day::Wednesday, hour: 3 });
        assert_eq!(wednesday, &selected[..1]);
    }

    #[test]
    fn cells_iterate_in_week_order() {
        let cp = course("cp", vec![lecture("L1", "S T M", "5")]);
        let selected = [Selected::new(&cp, &cp.lectures[0])];

        let occupancy = Occupancy::build(&selected, &Layout::default()).unwrap();
        let days = occupancy.iter().map(|(slot, _)| slot.day).collect::<Vec<_>>();

        assert_eq!(days, vec![Day::Monday, Day::Tuesday, Day::Saturday]);
    }

    #[test]
    fn repeated_day_is_not_deduplicated() {
        let cp = course("cp", vec![lecture("L1", "M M", "5")]);
        let selected = [Selected::new(&cp, &cp.lectures[0])];

        let occupancy = Occupancy::build(&selected, &Layout::default()).unwrap();

        assert_eq!(occupancy.get(&Slot { day: Day::Monday, hour: 5 }).len(), 2);
    }

    #[test]
    fn empty_selection() {
        let occupancy = Occupancy::build(&[], &Layout::default()).unwrap();

        assert!(occupancy.is_empty());
        assert!(occupancy.get(&Slot { day: Day::Friday, hour: 1 }).is_empty());
    }

    #[test]
    fn unscheduled_sessions_take_nothing() {
        let cp = course("cp", vec![lecture("L1", "TBA", "-")]);
        let selected = [Selected::new(&cp, &cp.lectures[0])];

        assert!(Occupancy::build(&selected, &Layout::default())
            .unwrap()
            .is_empty());
    }
}
