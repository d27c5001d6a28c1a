//! The `fill_spread.cfg` file:
//!
//! ```ini
//! [google]
//! user=<username>
//! passwd=<password>
//! sheet=<spreadsheet name>
//!
//! [kol]
//! user=<username>
//! passwd=<password>
//! ```
//!
//! An optional `[columns]` section of `CATEGORY=column` lines replaces the
//! standard spreadsheet layout.

use crate::error::{FillSpreadError, Result};
use crate::spreadsheet::ColumnMap;
use ini::{Ini, Properties};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub passwd: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSettings {
    pub user: String,
    pub passwd: String,
    /// Title of the spreadsheet to update.
    pub sheet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillSpreadConfig {
    pub google: GoogleSettings,
    pub kol: Credentials,
    pub columns: ColumnMap,
}

pub fn load_config(path: &Path) -> Result<FillSpreadConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| FillSpreadError::Config(format!("{}: {}", path.display(), e)))?;
    parse_config(&contents)
}

pub fn parse_config(s: &str) -> Result<FillSpreadConfig> {
    let i = Ini::load_from_str(s).map_err(|e| FillSpreadError::Config(e.to_string()))?;
    config_from_ini(&i)
}

fn section<'a>(i: &'a Ini, name: &str) -> Result<&'a Properties> {
    i.section(Some(name))
        .ok_or_else(|| FillSpreadError::Config(format!("missing [{}] section", name)))
}

fn required(props: &Properties, section: &str, key: &str) -> Result<String> {
    props
        .get(key)
        .map(|v| v.trim().to_string())
        .ok_or_else(|| FillSpreadError::Config(format!("missing {} in [{}]", key, section)))
}

fn columns_from(props: &Properties) -> Result<ColumnMap> {
    let mut pairs = Vec::new();
    for (code, col) in props.iter() {
        let col = col
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| {
                FillSpreadError::Config(format!("column for {} must be a positive number, got {:?}", code, col))
            })?;
        pairs.push((code.trim(), col));
    }
    Ok(ColumnMap::from_pairs(&pairs))
}

fn config_from_ini(i: &Ini) -> Result<FillSpreadConfig> {
    let google = section(i, "google")?;
    let kol = section(i, "kol")?;
    let columns = match i.section(Some("columns")) {
        Some(props) => columns_from(props)?,
        None => ColumnMap::standard(),
    };
    Ok(FillSpreadConfig {
        google: GoogleSettings {
            user: required(google, "google", "user")?,
            passwd: required(google, "google", "passwd")?,
            sheet: required(google, "google", "sheet")?,
        },
        kol: Credentials {
            user: required(kol, "kol", "user")?,
            passwd: required(kol, "kol", "passwd")?,
        },
        columns,
    })
}
