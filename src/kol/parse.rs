//! Turns the search and ascension history pages into typed records.

use super::{PlayerId, PlayerMatch};
use crate::ascension::{Mode, Path, RunRecord};
use crate::error::{FillSpreadError, Result};
use chrono::{Duration, NaiveDate};
use regex::Regex;

lazy_static! {
    static ref PLAYER_LINK: Regex =
        Regex::new(r#"(?i)<a[^>]*href="?showplayer\.php\?who=(\d+)"?[^>]*>(.*?)</a>"#).unwrap();
    static ref TABLE_ROW: Regex = Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap();
    static ref TABLE_CELL: Regex = Regex::new(r"(?is)<td[^>]*>(.*?)</td>").unwrap();
    static ref TITLE_ATTR: Regex = Regex::new(r#"(?i)title\s*=\s*["']([^"']*)["']"#).unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Columns of an ascension history row.
const ASCENSION_NUMBER: usize = 0;
const END_DATE: usize = 1;
const TURNS: usize = 5;
const DAYS: usize = 6;
const RESTRICTIONS: usize = 8;

/// Icon titles in the restrictions column that describe the mode rather
/// than a path.
const MODE_TITLES: [&str; 3] = ["Hardcore", "Softcore", "Casual"];

fn cell_text(html: &str) -> String {
    HTML_TAG
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

pub fn parse_search_results(html: &str) -> Result<Vec<PlayerMatch>> {
    let mut players = Vec::new();
    for caps in PLAYER_LINK.captures_iter(html) {
        let user_id: PlayerId = caps[1]
            .parse()
            .map_err(|_| FillSpreadError::Parse(format!("bad player id {:?}", &caps[1])))?;
        players.push(PlayerMatch {
            user_name: cell_text(&caps[2]),
            user_id,
        });
    }
    Ok(players)
}

fn parse_count(s: &str) -> Option<u32> {
    s.replace(',', "").parse().ok()
}

fn mode_and_path(restrictions: &str) -> (Mode, Path) {
    let titles: Vec<&str> = TITLE_ATTR
        .captures_iter(restrictions)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .collect();
    let mode = if titles.contains(&"Casual") {
        Mode::Casual
    } else if titles.contains(&"Hardcore") {
        Mode::Hardcore
    } else if titles.contains(&"Bad Moon") {
        Mode::BadMoon
    } else {
        Mode::Softcore
    };
    let path = titles
        .iter()
        .find(|t| !MODE_TITLES.contains(t))
        .map(|t| Path::from(*t))
        .unwrap_or(Path::None);
    (mode, path)
}

/// Rows that don't start with an ascension number (headers, spacers) are
/// skipped. The page only lists the end date, so the start date is counted
/// back from it by the number of days played.
pub fn parse_ascension_history(html: &str) -> Result<Vec<RunRecord>> {
    let mut runs = Vec::new();
    for row in TABLE_ROW.captures_iter(html) {
        let cells: Vec<&str> = TABLE_CELL
            .captures_iter(&row[1])
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        if cells.len() <= RESTRICTIONS || parse_count(&cell_text(cells[ASCENSION_NUMBER])).is_none() {
            continue;
        }
        let date_text = cell_text(cells[END_DATE]);
        let end = NaiveDate::parse_from_str(&date_text, "%m/%d/%y")
            .map_err(|_| FillSpreadError::Parse(format!("bad ascension date {:?}", date_text)))?;
        let turns_text = cell_text(cells[TURNS]);
        let turns = parse_count(&turns_text)
            .ok_or_else(|| FillSpreadError::Parse(format!("bad turn count {:?}", turns_text)))?;
        let days_text = cell_text(cells[DAYS]);
        let days = parse_count(&days_text)
            .ok_or_else(|| FillSpreadError::Parse(format!("bad day count {:?}", days_text)))?;
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days.saturating_sub(1))))
            .ok_or_else(|| FillSpreadError::Parse(format!("bad day count {:?}", days_text)))?;
        let (mode, path) = mode_and_path(cells[RESTRICTIONS]);
        runs.push(RunRecord {
            mode,
            path,
            start,
            end,
            days,
            turns,
        });
    }
    Ok(runs)
}
