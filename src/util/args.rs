use crate::error::Result;
use crate::util::common::{DEFAULT_CONFIG_FILE, FILL_SPREAD_NAME, FILL_SPREAD_VERSION};
use crate::util::parse_date;
use chrono::NaiveDate;
use clap::{App, AppSettings, Arg, ArgMatches};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub struct UserArgs {
    pub config_file: PathBuf,
    pub starts: Option<NaiveDate>,
    pub ends: Option<NaiveDate>,
    pub verbose: bool,
}

impl Default for UserArgs {
    fn default() -> UserArgs {
        UserArgs {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            starts: None,
            ends: None,
            verbose: false,
        }
    }
}

/// Single-dash spellings of long options that older invocations use.
const LEGACY_FLAGS: [&str; 2] = ["-starts", "-ends"];

/// Rewrites `-starts`/`-ends` (and their `=value` forms) to `--starts`/`--ends`.
fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            let flag = arg.split('=').next().unwrap_or("");
            if LEGACY_FLAGS.contains(&flag) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

fn build_app() -> App<'static, 'static> {
    App::new(FILL_SPREAD_NAME)
        .version(FILL_SPREAD_VERSION)
        .about("Fill the ascension achievements spreadsheet with each player's fastest runs")
        .setting(AppSettings::DeriveDisplayOrder)
        .setting(AppSettings::StrictUtf8)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("config_file")
                .default_value(DEFAULT_CONFIG_FILE)
                .help("Config file holding the [google] and [kol] logins"),
        )
        .arg(
            Arg::with_name("starts")
                .long("starts")
                .value_name("YYYY/M/D")
                .help("Only count runs started on or after this date"),
        )
        .arg(
            Arg::with_name("ends")
                .long("ends")
                .value_name("YYYY/M/D")
                .help("Only count runs finished on or before this date"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log each lookup and cell write"),
        )
}

/// Parses the process arguments. Exits on `--help`, `--version` or
/// arguments clap rejects.
pub fn add_options_and_parse() -> Result<UserArgs> {
    let matches = build_app().get_matches_from(normalize_legacy_flags(std::env::args()));
    parse_matches(&matches)
}

fn parse_matches(matches: &ArgMatches) -> Result<UserArgs> {
    let mut arguments = UserArgs::default();
    if let Some(path) = matches.value_of("config") {
        arguments.config_file = PathBuf::from(path.trim());
    }
    if let Some(starts) = matches.value_of("starts") {
        arguments.starts = Some(parse_date(starts)?);
    }
    if let Some(ends) = matches.value_of("ends") {
        arguments.ends = Some(parse_date(ends)?);
    }
    arguments.verbose = matches.is_present("verbose");
    Ok(arguments)
}
