use super::{Cell, SpreadsheetClient, SpreadsheetEntry, WorksheetEntry};
use crate::error::{FillSpreadError, Result};
use crate::util::check_response;
use log::{debug, trace};
use serde::Deserialize;
use ureq::Agent;

const CLIENT_LOGIN_URL: &str = "https://www.google.com/accounts/ClientLogin";
const FEEDS_URL: &str = "https://spreadsheets.google.com/feeds";
/// ClientLogin service name for spreadsheets.
const SPREADSHEET_SERVICE: &str = "wise";

/// A `{"$t": ...}` text node.
#[derive(Deserialize, Debug, Clone, Default)]
struct Text {
    #[serde(rename = "$t", default)]
    t: String,
}

#[derive(Deserialize, Debug)]
struct FeedResponse<E> {
    feed: Feed<E>,
}

#[derive(Deserialize, Debug)]
struct Feed<E> {
    #[serde(default = "Vec::new")]
    entry: Vec<E>,
}

#[derive(Deserialize, Debug)]
struct SpreadsheetFeedEntry {
    id: Text,
    title: Text,
}

#[derive(Deserialize, Debug)]
struct WorksheetFeedEntry {
    id: Text,
}

#[derive(Deserialize, Debug)]
struct CellFeedEntry {
    #[serde(rename = "gs$cell")]
    cell: GsCell,
}

#[derive(Deserialize, Debug)]
struct GsCell {
    row: String,
    col: String,
    #[serde(rename = "$t", default)]
    text: String,
}

/// Client for the GData spreadsheets feeds.
pub struct GDataClient {
    agent: Agent,
    auth_token: Option<String>,
}

impl GDataClient {
    pub fn new() -> GDataClient {
        GDataClient {
            agent: Agent::new(),
            auth_token: None,
        }
    }

    fn auth_header(&self) -> Result<String> {
        match &self.auth_token {
            Some(token) => Ok(format!("GoogleLogin auth={}", token)),
            None => Err(FillSpreadError::Authentication {
                service: "google",
                reason: "not logged in".to_string(),
            }),
        }
    }

    fn get_feed<E>(&self, url: &str) -> Result<Vec<E>>
    where
        E: serde::de::DeserializeOwned,
    {
        let resp = self
            .agent
            .get(url)
            .query("alt", "json")
            .set("Authorization", &self.auth_header()?)
            .set("GData-Version", "3.0")
            .call();
        let resp = check_response(resp)?;
        let parsed: FeedResponse<E> = resp
            .into_json_deserialize()
            .map_err(|e| FillSpreadError::Parse(format!("{}: {}", url, e)))?;
        Ok(parsed.feed.entry)
    }
}

impl Default for GDataClient {
    fn default() -> GDataClient {
        GDataClient::new()
    }
}

impl SpreadsheetClient for GDataClient {
    fn login(&mut self, user: &str, passwd: &str) -> Result<()> {
        let resp = self.agent.post(CLIENT_LOGIN_URL).send_form(&[
            ("accountType", "HOSTED_OR_GOOGLE"),
            ("Email", user),
            ("Passwd", passwd),
            ("service", SPREADSHEET_SERVICE),
            ("source", crate::util::FILL_SPREAD_NAME),
        ]);
        if let Some(e) = resp.synthetic_error() {
            return Err(FillSpreadError::Authentication {
                service: "google",
                reason: e.to_string(),
            });
        }
        let status = resp.status();
        let body = resp.into_string()?;
        match status {
            200 => {
                let token = parse_client_login(&body).ok_or_else(|| {
                    FillSpreadError::Authentication {
                        service: "google",
                        reason: "no Auth token in ClientLogin response".to_string(),
                    }
                })?;
                self.auth_token = Some(token);
                debug!("Logged in to Google as {}", user);
                Ok(())
            }
            _ => Err(FillSpreadError::Authentication {
                service: "google",
                reason: parse_client_login_error(&body)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            }),
        }
    }

    fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetEntry>> {
        let url = format!("{}/spreadsheets/private/full", FEEDS_URL);
        let entries: Vec<SpreadsheetFeedEntry> = self.get_feed(&url)?;
        Ok(entries
            .into_iter()
            .map(|e| SpreadsheetEntry {
                title: e.title.t,
                id: last_id_segment(&e.id.t),
            })
            .collect())
    }

    fn list_worksheets(&self, sheet_id: &str) -> Result<Vec<WorksheetEntry>> {
        let url = format!("{}/worksheets/{}/private/full", FEEDS_URL, sheet_id);
        let entries: Vec<WorksheetFeedEntry> = self.get_feed(&url)?;
        Ok(entries
            .into_iter()
            .map(|e| WorksheetEntry {
                id: last_id_segment(&e.id.t),
            })
            .collect())
    }

    fn get_cells(&self, sheet_id: &str, worksheet_id: &str) -> Result<Vec<Cell>> {
        let url = format!(
            "{}/cells/{}/{}/private/full",
            FEEDS_URL, sheet_id, worksheet_id
        );
        let entries: Vec<CellFeedEntry> = self.get_feed(&url)?;
        entries.into_iter().map(|e| e.cell.into_cell()).collect()
    }

    fn update_cell(
        &mut self,
        sheet_id: &str,
        worksheet_id: &str,
        row: u32,
        col: u32,
        value: &str,
    ) -> Result<()> {
        let url = cell_edit_url(sheet_id, worksheet_id, row, col);
        trace!("R{}C{} <- {:?}", row, col, value);
        let resp = self
            .agent
            .put(&url)
            .set("Authorization", &self.auth_header()?)
            .set("GData-Version", "3.0")
            .set("Content-Type", "application/atom+xml")
            .set("If-Match", "*")
            .send_string(&cell_entry_xml(&url, row, col, value));
        check_response(resp)?;
        Ok(())
    }
}

impl GsCell {
    fn into_cell(self) -> Result<Cell> {
        let bad = |field: &str, v: &str| {
            FillSpreadError::Parse(format!("cell {} is not a number: {:?}", field, v))
        };
        Ok(Cell {
            row: self.row.parse().map_err(|_| bad("row", &self.row))?,
            col: self.col.parse().map_err(|_| bad("col", &self.col))?,
            text: self.text,
        })
    }
}

/// Feed ids are URLs ending in the key we need.
fn last_id_segment(id: &str) -> String {
    id.rsplit('/').next().unwrap_or(id).to_string()
}

fn parse_client_login(body: &str) -> Option<String> {
    body.lines()
        .find_map(|line| line.strip_prefix("Auth="))
        .map(|token| token.trim().to_string())
}

fn parse_client_login_error(body: &str) -> Option<String> {
    body.lines()
        .find_map(|line| line.strip_prefix("Error="))
        .map(|reason| reason.trim().to_string())
}

fn cell_edit_url(sheet_id: &str, worksheet_id: &str, row: u32, col: u32) -> String {
    format!(
        "{}/cells/{}/{}/private/full/R{}C{}",
        FEEDS_URL, sheet_id, worksheet_id, row, col
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn cell_entry_xml(edit_url: &str, row: u32, col: u32, value: &str) -> String {
    format!(
        "<entry xmlns=\"http://www.w3.org/2005/Atom\" \
         xmlns:gs=\"http://schemas.google.com/spreadsheets/2006\">\
         <id>{url}</id>\
         <link rel=\"edit\" type=\"application/atom+xml\" href=\"{url}\"/>\
         <gs:cell row=\"{row}\" col=\"{col}\" inputValue=\"{value}\"/>\
         </entry>",
        url = xml_escape(edit_url),
        row = row,
        col = col,
        value = xml_escape(value),
    )
}
