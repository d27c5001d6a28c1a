//! Reading player names out of the achievements spreadsheet and writing
//! personal bests back into it.
mod gdata;

pub use gdata::GDataClient;

use crate::ascension::{Category, RunRecord};
use crate::error::{FillSpreadError, Result};
use chrono::Datelike;
use log::debug;
use std::collections::BTreeMap;

/// Rows above this hold the sheet headers.
const HEADER_ROWS: u32 = 2;
const NAME_COLUMN: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetEntry {
    pub title: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetEntry {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub text: String,
}

/// The spreadsheet service, as far as we need it.
pub trait SpreadsheetClient {
    fn login(&mut self, user: &str, passwd: &str) -> Result<()>;
    fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetEntry>>;
    fn list_worksheets(&self, sheet_id: &str) -> Result<Vec<WorksheetEntry>>;
    fn get_cells(&self, sheet_id: &str, worksheet_id: &str) -> Result<Vec<Cell>>;
    fn update_cell(
        &mut self,
        sheet_id: &str,
        worksheet_id: &str,
        row: u32,
        col: u32,
        value: &str,
    ) -> Result<()>;
}

/// The worksheet a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub sheet_id: String,
    pub worksheet_id: String,
}

/// Where each category's days/turns cell lives. The end date goes in the
/// column after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<Category, u32>,
}

impl ColumnMap {
    /// The layout of the achievements spreadsheet.
    pub fn standard() -> ColumnMap {
        ColumnMap::from_pairs(&[
            ("HCNP", 4),
            ("HCB", 6),
            ("HCT", 8),
            ("HCO", 10),
            ("BM", 12),
            ("SCNP", 14),
            ("SCB", 16),
            ("SCT", 18),
            ("SCO", 20),
            ("HCBHY", 22),
            ("SCBHY", 24),
            ("HCWSF", 26),
            ("SCWSF", 28),
            ("SCTrendy", 30),
            ("HCTrendy", 32),
            ("HCBoris", 34),
            ("SCBoris", 36),
        ])
    }

    pub fn from_pairs(pairs: &[(&str, u32)]) -> ColumnMap {
        ColumnMap {
            columns: pairs
                .iter()
                .map(|(code, col)| (Category::new(code), *col))
                .collect(),
        }
    }

    pub fn column_for(&self, category: &Category) -> Option<u32> {
        self.columns.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

/// Picks the spreadsheet titled `title` and its first worksheet.
pub fn open_sheet<C: SpreadsheetClient + ?Sized>(client: &C, title: &str) -> Result<SheetRef> {
    let sheet = client
        .list_spreadsheets()?
        .into_iter()
        .find(|s| s.title == title)
        .ok_or_else(|| FillSpreadError::SheetNotFound(title.to_string()))?;
    let worksheet = client
        .list_worksheets(&sheet.id)?
        .into_iter()
        .next()
        .ok_or_else(|| FillSpreadError::SheetNotFound(title.to_string()))?;
    debug!("Using spreadsheet {} worksheet {}", sheet.id, worksheet.id);
    Ok(SheetRef {
        sheet_id: sheet.id,
        worksheet_id: worksheet.id,
    })
}

/// Maps each player name in the first column (below the headers) to its row.
/// Names are lower-cased with any line breaks removed.
pub fn read_name_rows(cells: &[Cell]) -> BTreeMap<String, u32> {
    cells
        .iter()
        .filter(|c| c.row > HEADER_ROWS && c.col == NAME_COLUMN)
        .map(|c| (c.text.replace('\n', "").to_lowercase(), c.row))
        .collect()
}

pub fn format_days_turns(run: &RunRecord) -> String {
    format!("{}/{}", run.days, run.turns)
}

pub fn format_end_date(run: &RunRecord) -> String {
    format!("{}/{}/{}", run.end.month(), run.end.day(), run.end.year())
}

/// Writes one personal best into `row`. Returns `false` without writing
/// when the sheet has no column for `category`.
pub fn write_best<C: SpreadsheetClient + ?Sized>(
    client: &mut C,
    sheet: &SheetRef,
    columns: &ColumnMap,
    row: u32,
    category: &Category,
    run: &RunRecord,
) -> Result<bool> {
    let col = match columns.column_for(category) {
        Some(col) => col,
        None => {
            debug!("No column for {}, skipping", category);
            return Ok(false);
        }
    };
    client.update_cell(
        &sheet.sheet_id,
        &sheet.worksheet_id,
        row,
        col,
        &format_days_turns(run),
    )?;
    client.update_cell(
        &sheet.sheet_id,
        &sheet.worksheet_id,
        row,
        col + 1,
        &format_end_date(run),
    )?;
    Ok(true)
}
