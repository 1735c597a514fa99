//! Calendar grid CLI application.
//!
//! # Usage
//! ```ignore
//! calgrid              // Current month
//! calgrid 2 2024       // February 2024
//! calgrid -e -m 2 2024 // Monday first, with days of January and March
//! calgrid -W           // Current week
//! calgrid -n 3 -S      // Three months around the current one
//! ```

use calgrid::args::{Args, get_display_date};
use calgrid::clock::{Clock, SystemClock};
use calgrid::error::Result;
use calgrid::formatter::{format_month_pages, format_week_pages};
use calgrid::types::{RenderContext, ViewKind};
use log::debug;

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            eprintln!("calgrid: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<Vec<String>> {
    // Read the clock once so every page agrees on today
    let today = SystemClock.today();
    let ctx = RenderContext::new(args, today)?;
    let config = args.calendar_config()?;
    let selected = get_display_date(args, today)?;
    let window = args.page_window()?;
    debug!("today {today}, selected {selected}, {config:?}, {window:?}");

    match args.view_kind() {
        ViewKind::Month => {
            format_month_pages(&ctx, config, args.month_pager()?, selected.period(), window)
        }
        ViewKind::Week => format_week_pages(&ctx, config, selected, args.week_bounds()?, window),
    }
}
