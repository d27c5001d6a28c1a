#[macro_use]
extern crate lazy_static;
extern crate chrono;
extern crate clap;
extern crate regex;
extern crate serde;
extern crate serde_json;

use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::process::exit;

mod ascension;
mod driver;
mod error;
mod kol;
mod players;
mod spreadsheet;
mod util;

use ascension::DateWindow;
use driver::RunSummary;
use error::Result;
use kol::KolSession;
use spreadsheet::GDataClient;
use util::{add_options_and_parse, load_config, UserArgs};

fn main() {
    let args = match add_options_and_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };
    init_logging(args.verbose);
    match execute_from_args(&args) {
        Ok(summary) => info!(
            "Updated {} of {} players, {} records written",
            summary.players_updated, summary.players_in_sheet, summary.bests_written
        ),
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("Failed to set up logging: {}", e);
    }
}

fn execute_from_args(args: &UserArgs) -> Result<RunSummary> {
    let config = load_config(&args.config_file)?;
    let window = DateWindow::new(args.starts, args.ends);
    if window != DateWindow::default() {
        info!("Counting runs within {:?}", window);
    }
    let mut sheets = GDataClient::new();
    let mut game = KolSession::new();
    driver::run(&mut sheets, &mut game, &config, &window)
}
