use timeclash::{
    catalog::Catalog,
    filter::{Pick, Selection},
    timetable::{
        self,
        clash::{clashing_identities, find_clashes},
        grid::Grid,
        models::{Day, Group, Slot},
        occupancy::Occupancy,
    },
};

const SAMPLE: &str = include_str!("../data/courses.json");

#[test]
fn sample_catalog_is_valid() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();

    assert_eq!(catalog.courses.len(), 4);
}

#[test]
fn lab_and_tutorial_clash_on_saturday() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let layout = &catalog.layout;
    let mut selection = Selection::new(&catalog, Group::A);

    for pick in [
        "cs-f111:lecture=L1",
        "cs-f111:lab=P1",
        "math-f112:lecture=L1",
        "math-f112:tutorial=T1",
        "gs-f232:lecture=L1",
    ] {
        selection.apply(&pick.parse::<Pick>().unwrap()).unwrap();
    }
    let selected = selection.selected();

    assert_eq!(selection.completed(), 3);

    let clashes = find_clashes(&Occupancy::build(&selected, layout).unwrap());
    assert_eq!(clashes.len(), 1);
    assert_eq!(clashes[0].slot, Slot { day: Day::Saturday, hour: 2 });
    assert_eq!(
        clashes[0].describe(),
        "Saturday Hour 2: Computer Programming (P1) vs Linear Algebra and Complex Variable (T1)"
    );

    let flagged = clashing_identities(&selected, layout).unwrap();
    assert_eq!(
        flagged.into_iter().collect::<Vec<_>>(),
        vec!["cs-f111-lab-P1", "math-f112-tutorial-T1"]
    );

    let grid = Grid::project(&selected, layout).unwrap();
    let saturday = grid.cell(Day::Saturday, 1).unwrap();
    assert_eq!(saturday.span, 2);
    assert!(saturday.clash);

    let table = timetable::display(&grid, layout, 14);
    assert!(table.contains("! CP P1"));
    assert!(table.contains("LACV T1"));
}

#[test]
fn swapping_the_tutorial_removes_the_clash() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let layout = &catalog.layout;
    let mut selection = Selection::new(&catalog, Group::A);

    selection.apply(&"cs-f111:lab=P1".parse().unwrap()).unwrap();
    selection.apply(&"math-f112:tutorial=T1".parse().unwrap()).unwrap();
    assert_eq!(clashing_identities(&selection.selected(), layout).unwrap().len(), 2);

    selection.apply(&"math-f112:tutorial=T2".parse().unwrap()).unwrap();
    assert!(clashing_identities(&selection.selected(), layout)
        .unwrap()
        .is_empty());
}
