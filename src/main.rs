use anyhow::Context;
use chrono::Local;
use clap::Parser;
use dialoguer::Input;

use timeclash::{
    catalog,
    filter::{self, Pick, Selection},
    ics, info,
    timetable::{self, clash, grid::Grid, models::Group, occupancy::Occupancy},
};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Course catalog, a JSON file or an http(s) URL
    #[clap(value_parser)]
    data: String,

    /// Your group (A or B), asked when missing
    #[clap(short, long, value_name = "GROUP")]
    group: Option<Group>,

    /// Pick a section instead of being asked, i.e.: cs-f111:lab=P3
    #[clap(short, long, value_name = "COURSE:TYPE=SECTION")]
    pick: Vec<Pick>,

    /// Export to iCalendar format (.ics)
    #[clap(short, long, value_name = "FILE NAME")]
    export: Option<String>,

    /// First day of classes, used by the export
    #[clap(short, long)]
    first_day: Option<String>,

    /// Number of weeks of classes
    #[clap(short, long, default_value_t = 16)]
    weeks: u32,

    /// Width of the timetable columns
    #[clap(short, long, default_value_t = 14)]
    cell_length: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let user_agent = format!("timeclash/{}", env!("CARGO_PKG_VERSION"));

    println!("Loading courses...");
    let catalog = catalog::load(&args.data, &user_agent)
        .await
        .with_context(|| format!("can't load courses from {}", args.data))?;
    let layout = &catalog.layout;

    let group = match args.group {
        Some(group) => group,
        None => filter::group()?,
    };

    let mut selection = Selection::new(&catalog, group);
    if args.pick.is_empty() {
        filter::interactive(&mut selection, layout)?;
    } else {
        for pick in &args.pick {
            selection
                .apply(pick)
                .with_context(|| format!("can't pick {} {}", pick.category, pick.section))?;
        }
    }

    let selected = selection.selected();
    println!(
        "{}: {}/{} courses selected, {} sessions",
        selection.group(),
        selection.completed(),
        selection.courses().count(),
        selected.len()
    );

    let clashes = clash::find_clashes(&Occupancy::build(&selected, layout)?);
    if clashes.is_empty() {
        println!("No clashes detected.");
    } else {
        println!("Time clash detected ({}):", clashes.len());
        for clash in &clashes {
            println!("  {}", clash.describe());
        }
    }

    // Show the calendar
    let grid = Grid::project(&selected, layout)?;
    print!("{}", timetable::display(&grid, layout, args.cell_length));

    if let Some(mut filename) = args.export {
        let date = match args.first_day {
            None => Input::<String>::new()
                .with_prompt("First day of classes")
                .default(info::next_monday(Local::now().date_naive()).to_string())
                .interact_text()?,
            Some(day) => day,
        };
        let term = info::Term {
            first_day: info::parse_date(&date)?,
            weeks: args.weeks,
        };
        log::info!("exporting {} sessions from {}", selected.len(), term.first_day);

        // Export the calendar
        let calendar = ics::build(&selected, layout, &term)?;
        ics::export(&calendar, &mut filename)?;

        println!("iCalendar file exported => {filename}");
    }

    Ok(())
}
