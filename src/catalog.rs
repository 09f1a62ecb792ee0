use std::{collections::HashSet, time::Duration};

use log::info;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::timetable::layout::Layout;
use crate::timetable::models::{Course, CATEGORIES};
use crate::timetable::slots::parse_spans;

/// Every course that can be picked, with the tables used to show them
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub layout: Layout,

    pub courses: Vec<Course>,
}

impl Catalog {
    /// Read and check a JSON catalog
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(text)?;
        catalog.validate()?;

        Ok(catalog)
    }

    /// Make sure every session timing can be put on the grid, so later
    /// recomputations can't fail on bad data
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();

        for course in &self.courses {
            if !ids.insert(course.id.as_str()) {
                return Err(Error::Duplicate(format!("course {}", course.id)));
            }

            for category in CATEGORIES {
                let mut sections = HashSet::new();
                for session in course.sessions(category) {
                    if !sections.insert(session.section.as_str()) {
                        return Err(Error::Duplicate(format!(
                            "{} of course {}",
                            session.label(),
                            course.id
                        )));
                    }

                    parse_spans(session, &self.layout).map_err(|err| Error::InvalidCourse {
                        course: course.id.clone(),
                        source: Box::new(err),
                    })?;
                }
            }
        }

        Ok(())
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }
}

/// Fetch the catalog, `source` is either a path or an http(s) URL
pub async fn load(source: &str, user_agent: &str) -> Result<Catalog> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        get_webpage(source, user_agent).await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|err| Error::Io {
                path: source.to_owned(),
                source: err,
            })?
    };

    let catalog = Catalog::from_json(&text)?;
    info!("{} courses loaded from {source}", catalog.courses.len());

    Ok(catalog)
}

/// Get catalog webpage
async fn get_webpage(url: &str, user_agent: &str) -> Result<String> {
    // Use custom User-Agent
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;
    let text = client
        .get(url)
        .timeout(Duration::from_secs(5))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(text)
}
