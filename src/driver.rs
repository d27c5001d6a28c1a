//! Runs one sync: names from the sheet, ids and histories from the game,
//! personal bests back into the sheet.

use crate::ascension::{reduce_bests, DateWindow};
use crate::error::Result;
use crate::kol::{GameSession, HistoryFetch, PlayerSearch};
use crate::players::resolve_identifiers;
use crate::spreadsheet::{open_sheet, read_name_rows, write_best, SheetRef, SpreadsheetClient};
use crate::util::FillSpreadConfig;
use log::{debug, info};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub players_in_sheet: usize,
    pub players_updated: usize,
    pub bests_written: usize,
}

pub fn run<S, G>(
    sheets: &mut S,
    game: &mut G,
    config: &FillSpreadConfig,
    window: &DateWindow,
) -> Result<RunSummary>
where
    S: SpreadsheetClient + ?Sized,
    G: GameSession + PlayerSearch + HistoryFetch + ?Sized,
{
    sheets.login(&config.google.user, &config.google.passwd)?;
    let sheet = open_sheet(&*sheets, &config.google.sheet)?;
    let name_rows = read_name_rows(&sheets.get_cells(&sheet.sheet_id, &sheet.worksheet_id)?);
    info!("Found {} players in {:?}", name_rows.len(), config.google.sheet);
    debug!("{} categories have spreadsheet columns", config.columns.len());

    game.login(&config.kol.user, &config.kol.passwd)?;
    let synced = sync_players(sheets, &*game, config, window, &sheet, &name_rows);
    // Log out even when the sync failed part way, then report the first error.
    let logged_out = game.logout();
    let mut summary = synced?;
    logged_out?;

    summary.players_in_sheet = name_rows.len();
    Ok(summary)
}

fn sync_players<S, G>(
    sheets: &mut S,
    game: &G,
    config: &FillSpreadConfig,
    window: &DateWindow,
    sheet: &SheetRef,
    name_rows: &BTreeMap<String, u32>,
) -> Result<RunSummary>
where
    S: SpreadsheetClient + ?Sized,
    G: PlayerSearch + HistoryFetch + ?Sized,
{
    let mut summary = RunSummary::default();
    let ids = resolve_identifiers(name_rows.keys(), game)?;
    for (name, id) in &ids {
        let bests = reduce_bests(&game.fetch(*id)?, window)?;
        info!(
            "{} {:?}",
            name,
            bests.keys().map(|c| c.as_str()).collect::<Vec<_>>()
        );
        let row = name_rows[name];
        for (category, run) in &bests {
            if write_best(sheets, sheet, &config.columns, row, category, run)? {
                summary.bests_written += 1;
            }
        }
        summary.players_updated += 1;
    }
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ascension::{Mode, Path, RunRecord};
    use crate::error::FillSpreadError;
    use crate::kol::{PlayerId, PlayerMatch};
    use crate::spreadsheet::test::FakeSheet;
    use crate::spreadsheet::ColumnMap;
    use crate::util::config_file::{Credentials, GoogleSettings};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeGame {
        players: HashMap<String, Vec<PlayerMatch>>,
        histories: HashMap<PlayerId, Vec<RunRecord>>,
        logins: u32,
        logouts: u32,
    }

    impl GameSession for FakeGame {
        fn login(&mut self, _user: &str, _passwd: &str) -> Result<()> {
            self.logins += 1;
            Ok(())
        }

        fn logout(&mut self) -> Result<()> {
            self.logouts += 1;
            Ok(())
        }
    }

    impl PlayerSearch for FakeGame {
        fn search(&self, name: &str) -> Result<Vec<PlayerMatch>> {
            Ok(self.players.get(name).cloned().unwrap_or_default())
        }
    }

    impl HistoryFetch for FakeGame {
        fn fetch(&self, user_id: PlayerId) -> Result<Vec<RunRecord>> {
            Ok(self.histories.get(&user_id).cloned().unwrap_or_default())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ascension(mode: Mode, path: Path, end: NaiveDate, days: u32, turns: u32) -> RunRecord {
        RunRecord {
            mode,
            path,
            start: end - chrono::Duration::days(i64::from(days - 1)),
            end,
            days,
            turns,
        }
    }

    fn config() -> FillSpreadConfig {
        FillSpreadConfig {
            google: GoogleSettings {
                user: "someone@example.com".to_string(),
                passwd: "hunter2".to_string(),
                sheet: "AFH Achievements".to_string(),
            },
            kol: Credentials {
                user: "afhbot".to_string(),
                passwd: "hunter3".to_string(),
            },
            columns: ColumnMap::standard(),
        }
    }

    fn game() -> FakeGame {
        let mut game = FakeGame::default();
        game.players.insert(
            "alice".to_string(),
            vec![PlayerMatch {
                user_name: "Alice".to_string(),
                user_id: 1,
            }],
        );
        game.players.insert(
            "bob".to_string(),
            vec![PlayerMatch {
                user_name: "Bobby".to_string(),
                user_id: 2,
            }],
        );
        game.histories.insert(
            1,
            vec![
                ascension(Mode::Hardcore, Path::None, date(2011, 1, 5), 4, 800),
                ascension(Mode::Hardcore, Path::None, date(2011, 2, 3), 2, 900),
                ascension(Mode::Softcore, Path::Oxygenarian, date(2011, 7, 9), 9, 1200),
                ascension(Mode::Casual, Path::None, date(2011, 3, 1), 1, 100),
                ascension(Mode::BadMoon, Path::Oxygenarian, date(2011, 4, 1), 12, 1500),
            ],
        );
        game
    }

    #[test]
    fn test_full_run_writes_bests() {
        let mut sheets = FakeSheet::with_names("AFH Achievements", &[("Alice", 3), ("Bob", 4)]);
        let mut game = game();
        let summary = run_sync(&mut sheets, &mut game, &DateWindow::default()).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                players_in_sheet: 2,
                players_updated: 1,
                bests_written: 2,
            }
        );
        assert_eq!(sheets.logged_in_as.as_deref(), Some("someone@example.com"));
        assert_eq!((game.logins, game.logouts), (1, 1));
        // BMO has no column, so only HCNP and SCO land in the sheet.
        assert_eq!(
            sheets.writes,
            vec![
                (3, 4, "2/900".to_string()),
                (3, 5, "2/3/2011".to_string()),
                (3, 20, "9/1200".to_string()),
                (3, 21, "7/9/2011".to_string()),
            ]
        );
    }

    #[test]
    fn test_players_synced_in_name_order() {
        let mut sheets = FakeSheet::with_names("AFH Achievements", &[("Zed", 3), ("Alice", 4)]);
        let mut game = game();
        game.players.insert(
            "zed".to_string(),
            vec![PlayerMatch {
                user_name: "ZED".to_string(),
                user_id: 3,
            }],
        );
        game.histories.insert(
            3,
            vec![ascension(Mode::Softcore, Path::Trendy, date(2011, 5, 2), 3, 450)],
        );
        let summary = run_sync(&mut sheets, &mut game, &DateWindow::default()).unwrap();

        assert_eq!(summary.players_updated, 2);
        assert_eq!(
            sheets.writes,
            vec![
                (4, 4, "2/900".to_string()),
                (4, 5, "2/3/2011".to_string()),
                (4, 20, "9/1200".to_string()),
                (4, 21, "7/9/2011".to_string()),
                (3, 30, "3/450".to_string()),
                (3, 31, "5/2/2011".to_string()),
            ]
        );
    }

    #[test]
    fn test_window_limits_runs() {
        let mut sheets = FakeSheet::with_names("AFH Achievements", &[("Alice", 3)]);
        let mut game = game();
        let window = DateWindow::new(None, Some(date(2011, 6, 30)));
        run_sync(&mut sheets, &mut game, &window).unwrap();
        assert_eq!(
            sheets.writes,
            vec![(3, 4, "2/900".to_string()), (3, 5, "2/3/2011".to_string())]
        );
    }

    #[test]
    fn test_unknown_path_aborts_and_logs_out() {
        let mut sheets = FakeSheet::with_names("AFH Achievements", &[("Alice", 3)]);
        let mut game = game();
        game.histories.insert(
            1,
            vec![ascension(Mode::Hardcore, Path::from("Zombie Slayer"), date(2011, 1, 5), 4, 800)],
        );
        match run_sync(&mut sheets, &mut game, &DateWindow::default()) {
            Err(FillSpreadError::Classify(e)) => assert_eq!(e.to_string(), "unknown path: Zombie Slayer"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(sheets.writes.is_empty());
        assert_eq!(game.logouts, 1);
    }

    #[test]
    fn test_missing_sheet_is_error() {
        let mut sheets = FakeSheet::with_names("Other Sheet", &[("Alice", 3)]);
        let mut game = game();
        assert!(matches!(
            run_sync(&mut sheets, &mut game, &DateWindow::default()),
            Err(FillSpreadError::SheetNotFound(_))
        ));
        assert_eq!(game.logins, 0);
    }

    fn run_sync(sheets: &mut FakeSheet, game: &mut FakeGame, window: &DateWindow) -> Result<RunSummary> {
        run(sheets, game, &config(), window)
    }
}
