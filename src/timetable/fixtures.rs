//! Small builders shared by the tests of the timetable modules

use crate::timetable::models::{Category, Course, Group, Session};

pub fn session(category: Category, section: &str, days: &str, hours: &str) -> Session {
    Session {
        category,
        section: section.to_owned(),
        instructor: format!("Prof {section}"),
        room: format!("R{section}"),
        days: days.to_owned(),
        hours: hours.to_owned(),
        rating: 5,
        remarks: "Decent".to_owned(),
    }
}

pub fn lecture(section: &str, days: &str, hours: &str) -> Session {
    session(Category::Lecture, section, days, hours)
}

pub fn tutorial(section: &str, days: &str, hours: &str) -> Session {
    session(Category::Tutorial, section, days, hours)
}

pub fn lab(section: &str, days: &str, hours: &str) -> Session {
    session(Category::Lab, section, days, hours)
}

/// Common course named after its id, sessions sorted out by category
pub fn course(id: &str, sessions: Vec<Session>) -> Course {
    let mut course = Course {
        id: id.to_owned(),
        name: id.to_uppercase(),
        code: String::new(),
        group: Group::Common,
        lectures: vec![],
        tutorials: vec![],
        labs: vec![],
    };

    for session in sessions {
        match session.category {
            Category::Lecture => course.lectures.push(session),
            Category::Tutorial => course.tutorials.push(session),
            Category::Lab => course.labs.push(session),
        }
    }

    course
}
