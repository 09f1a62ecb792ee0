use std::{cmp::Reverse, str::FromStr, sync::LazyLock};

use dialoguer::Select;
use log::debug;
use regex::Regex;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::timetable::clash::clashing_identities;
use crate::timetable::layout::Layout;
use crate::timetable::models::{Category, Course, Group, Selected, Session, CATEGORIES};

const DISCLAIMER: &str = "(ENTER to pick, ESC to keep)";

static PICK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<course>[^:\s]+):(?P<category>[A-Za-z]+)=(?P<section>\S+)$").unwrap()
});

/// Sort key of a session remark
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rank {
    pub label: &'static str,
    /// 1 is the best
    pub priority: u8,
}

pub fn rank(remarks: &str) -> Rank {
    let (label, priority) = match remarks {
        "God" => ("God Tier", 1),
        "Demi-God" => ("Demi-God", 2),
        "Highly Recommended" | "Best" => ("Highly Recommended", 3),
        "Recommended" | "Better" | "Good" | "Preferred" | "Lenient grading" | "Prefer RS-led"
        | "Better for lectures" => ("Recommended", 4),
        "Decent" | "Mediocre" => ("Decent", 5),
        "Avoid" | "Avoid (PUMA)" => ("Avoid", 7),
        "Absolutely Avoid" | "Avoid at any cost" | "Horrendous" | "Strict" => {
            ("Avoid at all costs", 8)
        }
        _ => ("Unknown Rating", 6),
    };

    Rank { label, priority }
}

/// Best sessions first: by remark, then by rating
pub fn by_rating(sessions: &[Session]) -> Vec<&Session> {
    let mut sorted = sessions.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|session| (rank(&session.remarks).priority, Reverse(session.rating)));

    sorted
}

/// A choice given on the command line, i.e.: `cs-f111:lab=P3`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pick {
    pub course: String,
    pub category: Category,
    pub section: String,
}

impl FromStr for Pick {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = PICK
            .captures(s.trim())
            .ok_or_else(|| Error::InvalidPick(s.to_owned()))?;

        Ok(Self {
            course: captures["course"].to_owned(),
            category: captures["category"]
                .parse()
                .map_err(|_| Error::InvalidPick(s.to_owned()))?,
            section: captures["section"].to_owned(),
        })
    }
}

/// Sessions picked by the user: at most one per course and category
#[derive(Clone, Debug)]
pub struct Selection<'a> {
    catalog: &'a Catalog,
    group: Group,
    picks: Vec<Selected<'a>>,
}

impl<'a> Selection<'a> {
    pub fn new(catalog: &'a Catalog, group: Group) -> Self {
        Self {
            catalog,
            group,
            picks: Vec::new(),
        }
    }

    pub fn group(&self) -> Group {
        self.group
    }

    /// Courses of the group, common ones included
    pub fn courses(&self) -> impl Iterator<Item = &'a Course> + '_ {
        self.catalog
            .courses
            .iter()
            .filter(|course| course.offered_to(self.group))
    }

    fn course(&self, id: &str) -> Result<&'a Course> {
        self.courses()
            .find(|course| course.id == id)
            .ok_or_else(|| Error::UnknownCourse(id.to_owned()))
    }

    /// Pick a section, or clear the choice with `None`
    pub fn pick(&mut self, course_id: &str, category: Category, section: Option<&str>) -> Result<()> {
        let course = self.course(course_id)?;
        self.picks
            .retain(|s| !(s.course.id == course.id && s.session.category == category));

        match section {
            Some(section) => {
                let session =
                    course
                        .find(category, section)
                        .ok_or_else(|| Error::UnknownSection {
                            course: course.id.clone(),
                            category,
                            section: section.to_owned(),
                        })?;
                debug!("{} picked for {}", session.label(), course.id);
                self.picks.push(Selected::new(course, session));
            }
            None => debug!("{category} cleared for {}", course.id),
        }

        Ok(())
    }

    pub fn apply(&mut self, pick: &Pick) -> Result<()> {
        self.pick(&pick.course, pick.category, Some(pick.section.as_str()))
    }

    pub fn chosen(&self, course_id: &str, category: Category) -> Option<&'a Session> {
        self.picks
            .iter()
            .find(|s| s.course.id == course_id && s.session.category == category)
            .map(|s| s.session)
    }

    /// Picks are only valid inside a group, changing it starts over
    pub fn switch_group(&mut self, group: Group) {
        self.group = group;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.picks.clear();
    }

    /// Picked sessions, by course then lecture, tutorial, lab
    pub fn selected(&self) -> Vec<Selected<'a>> {
        self.courses()
            .flat_map(|course| {
                CATEGORIES.iter().filter_map(move |category| {
                    self.chosen(&course.id, *category)
                        .map(|session| Selected::new(course, session))
                })
            })
            .collect()
    }

    /// Number of courses with a pick for every category they offer
    pub fn completed(&self) -> usize {
        self.courses()
            .filter(|course| {
                CATEGORIES.iter().all(|category| {
                    course.sessions(*category).is_empty()
                        || self.chosen(&course.id, *category).is_some()
                })
            })
            .count()
    }

    /// True if picking `candidate` instead of the current choice would clash
    pub fn would_clash(&self, course: &'a Course, candidate: &'a Session, layout: &Layout) -> Result<bool> {
        let mut selected = self
            .selected()
            .into_iter()
            .filter(|s| !(s.course.id == course.id && s.session.category == candidate.category))
            .collect::<Vec<_>>();
        let choice = Selected::new(course, candidate);
        selected.push(choice);

        Ok(clashing_identities(&selected, layout)?.contains(&choice.identity()))
    }
}

/// Ask for the group
pub fn group() -> Result<Group> {
    let choices = [
        "Group A (Single Degree)",
        "Group B (Dual/Chemical/Civil/Manu.)",
    ];
    let index = Select::new()
        .with_prompt("Select your group")
        .items(&choices)
        .default(0)
        .interact()?;

    Ok(if index == 0 { Group::A } else { Group::B })
}

/// Ask a section for every course and category of the group
pub fn interactive(selection: &mut Selection, layout: &Layout) -> Result<()> {
    let courses = selection.courses().collect::<Vec<_>>();

    for course in courses {
        for category in CATEGORIES {
            let sessions = by_rating(course.sessions(category));
            if sessions.is_empty() {
                continue;
            }

            // Names showed to the users
            let mut items = vec!["Not selected".to_owned()];
            for &session in &sessions {
                let mark = if selection.would_clash(course, session, layout)? {
                    "⚠ "
                } else {
                    ""
                };
                items.push(format!(
                    "{mark}{} - {} ({}/10, {}) {}",
                    session.section,
                    session.instructor,
                    session.rating,
                    rank(&session.remarks).label,
                    session.timing(layout)
                ));
            }

            let current = selection
                .chosen(&course.id, category)
                .and_then(|chosen| sessions.iter().position(|s| s.section == chosen.section))
                .map_or(0, |i| i + 1);

            let choice = Select::new()
                .with_prompt(format!("{} - {category} {DISCLAIMER}", course.name))
                .items(&items)
                .default(current)
                .interact_opt()?;

            match choice {
                // Escape keeps the current choice
                None => (),
                Some(0) => selection.pick(&course.id, category, None)?,
                Some(i) => selection.pick(&course.id, category, Some(sessions[i - 1].section.as_str()))?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::fixtures::{course, lab, lecture, tutorial};

    fn catalog() -> Catalog {
        let mut cp = course(
            "cp",
            vec![
                lecture("L1", "M W F", "2"),
                lecture("L2", "T Th", "3"),
                lab("P1", "S", "1-2"),
            ],
        );
        cp.group = Group::A;
        let mut es = course("es", vec![lecture("L1", "M", "2"), tutorial("T1", "W", "5")]);
        es.group = Group::B;
        let bio = course("bio", vec![lecture("L1", "S", "2"), tutorial("T1", "F", "9")]);

        Catalog {
            layout: Layout::default(),
            courses: vec![cp, es, bio],
        }
    }

    #[test]
    fn ranks() {
        assert_eq!(rank("God").priority, 1);
        assert_eq!(rank("Best").label, "Highly Recommended");
        assert_eq!(rank("Lenient grading").priority, 4);
        assert_eq!(rank("Horrendous").priority, 8);
        assert_eq!(rank("whatever"), Rank { label: "Unknown Rating", priority: 6 });
    }

    #[test]
    fn sorts_by_remark_then_rating() {
        let mut sessions = vec![
            lecture("L1", "M", "1"),
            lecture("L2", "M", "1"),
            lecture("L3", "M", "1"),
            lecture("L4", "M", "1"),
        ];
        sessions[0].remarks = "Avoid".to_owned();
        sessions[1].remarks = "Good".to_owned();
        sessions[1].rating = 6;
        sessions[2].remarks = "Recommended".to_owned();
        sessions[2].rating = 8;
        sessions[3].remarks = "God".to_owned();

        let order = by_rating(&sessions)
            .into_iter()
            .map(|s| s.section.as_str())
            .collect::<Vec<_>>();

        assert_eq!(order, vec!["L4", "L3", "L2", "L1"]);
    }

    #[test]
    fn parses_picks() {
        assert_eq!(
            "cs-f111:lab=P3".parse::<Pick>().unwrap(),
            Pick {
                course: "cs-f111".to_owned(),
                category: Category::Lab,
                section: "P3".to_owned(),
            }
        );
        assert_eq!(
            "bio:Tutorial=T2".parse::<Pick>().unwrap().category,
            Category::Tutorial
        );
        assert!("bio:seminar=S1".parse::<Pick>().is_err());
        assert!("bio lab P1".parse::<Pick>().is_err());
    }

    #[test]
    fn courses_of_the_group() {
        let catalog = catalog();
        let selection = Selection::new(&catalog, Group::A);

        let ids = selection.courses().map(|c| c.id.as_str()).collect::<Vec<_>>();

        assert_eq!(ids, vec!["cp", "bio"]);
    }

    #[test]
    fn picks_in_course_then_category_order() {
        let catalog = catalog();
        let mut selection = Selection::new(&catalog, Group::A);

        selection.pick("bio", Category::Tutorial, Some("T1")).unwrap();
        selection.pick("cp", Category::Lab, Some("P1")).unwrap();
        selection.pick("cp", Category::Lecture, Some("L2")).unwrap();
        selection.pick("cp", Category::Lecture, Some("L1")).unwrap();

        let picked = selection
            .selected()
            .iter()
            .map(Selected::identity)
            .collect::<Vec<_>>();

        assert_eq!(picked, vec!["cp-lecture-L1", "cp-lab-P1", "bio-tutorial-T1"]);
    }

    #[test]
    fn unknown_picks() {
        let catalog = catalog();
        let mut selection = Selection::new(&catalog, Group::A);

        assert!(matches!(
            selection.pick("es", Category::Lecture, Some("L1")),
            Err(Error::UnknownCourse(_))
        ));
        assert!(matches!(
            selection.pick("cp", Category::Tutorial, Some("T1")),
            Err(Error::UnknownSection { .. })
        ));
    }

    #[test]
    fn clearing_and_switching_group() {
        let catalog = catalog();
        let mut selection = Selection::new(&catalog, Group::A);

        selection.pick("cp", Category::Lab, Some("P1")).unwrap();
        selection.pick("bio", Category::Lecture, Some("L1")).unwrap();
        selection.pick("cp", Category::Lab, None).unwrap();
        assert_eq!(selection.selected().len(), 1);

        selection.switch_group(Group::B);
        assert_eq!(selection.group(), Group::B);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn counts_completed_courses() {
        let catalog = catalog();
        let mut selection = Selection::new(&catalog, Group::A);

        selection.pick("bio", Category::Lecture, Some("L1")).unwrap();
        assert_eq!(selection.completed(), 0);

        selection.pick("bio", Category::Tutorial, Some("T1")).unwrap();
        assert_eq!(selection.completed(), 1);

        selection.reset();
        assert_eq!(selection.completed(), 0);
    }

    #[test]
    fn warns_before_picking_a_clash() {
        let catalog = catalog();
        let mut selection = Selection::new(&catalog, Group::A);
        let layout = Layout::default();
        selection.pick("cp", Category::Lab, Some("P1")).unwrap();

        let cp = catalog.course("cp").unwrap();
        let bio = catalog.course("bio").unwrap();

        // Saturday hour 2 is under the lab
        assert!(selection.would_clash(bio, &bio.lectures[0], &layout).unwrap());
        assert!(!selection.would_clash(bio, &bio.tutorials[0], &layout).unwrap());
        // Replacing its own choice is not a clash
        assert!(!selection.would_clash(cp, &cp.labs[0], &layout).unwrap());
    }
}
